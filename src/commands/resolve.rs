//! Resolve command - expand expression lists into the final resource set

use std::path::PathBuf;

use colored::Colorize;

use specrun::output::{OutputMode, ResolveReport};
use specrun::resolver::{ExclusionMode, Resolver};

use super::build_roots;

/// Expand expressions and print the resolved locator set
pub fn resolve(
    expressions: &str,
    roots: &[PathBuf],
    disjunction: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let mode = if disjunction {
        ExclusionMode::Disjunction
    } else {
        ExclusionMode::Subtract
    };
    let resolver = Resolver::new(build_roots(roots)?).with_mode(mode);

    log::debug!("expanding `{expressions}`");
    let resolved = resolver.expand(expressions)?;

    let report = ResolveReport {
        expressions: expressions
            .split(';')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
            .collect(),
        resources: resolved.iter().map(ToString::to_string).collect(),
        count: resolved.len(),
    };

    if output_mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for resource in &report.resources {
            println!("{resource}");
        }
        let summary = format!("{} resource(s)", report.count);
        eprintln!("{}", summary.dimmed());
    }

    Ok(())
}
