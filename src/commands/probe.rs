//! Probe command - check how a classpath resource is backed

use std::path::PathBuf;

use colored::Colorize;

use specrun::output::{OutputMode, ProbeReport};

use super::build_roots;

/// Report whether a classpath resource lives inside an archive container
pub fn probe(resource: &str, roots: &[PathBuf], output_mode: OutputMode) -> anyhow::Result<()> {
    let roots = build_roots(roots)?;
    let archive = roots.is_archive_resource(resource)?;

    let report = ProbeReport {
        resource: resource.to_string(),
        archive,
    };

    if output_mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.archive {
        println!("{} is backed by an {}", report.resource, "archive".yellow());
    } else {
        println!("{} is backed by a {}", report.resource, "directory".green());
    }

    Ok(())
}
