//! Plan command - resolve a runner property bag into a harness plan

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use specrun::context::RunnerContext;
use specrun::harness::HarnessPlan;
use specrun::output::{OutputMode, PlanReport};
use specrun::resolver::Resolver;

use super::build_roots;

/// Load a TOML property bag, build the harness plan and print it
pub fn plan(properties: &Path, roots: &[PathBuf], output_mode: OutputMode) -> anyhow::Result<()> {
    let text = fs::read_to_string(properties)?;
    let bag: BTreeMap<String, String> = toml::from_str(&text)?;

    let context = RunnerContext::from_properties(&bag)?;
    let resolver = Resolver::new(build_roots(roots)?);

    log::debug!("building harness plan from {}", properties.display());
    let plan = HarnessPlan::build(&context, &resolver)?;

    let report = PlanReport {
        template: plan.template().to_string(),
        runner_script: plan.runner_script().map(ToString::to_string),
        bootstrap_scripts: locator_strings(plan.bootstrap_scripts()),
        source_scripts: locator_strings(plan.source_scripts()),
        test_files: locator_strings(plan.test_files()),
        output_directory: plan.output_directory().display().to_string(),
    };

    if output_mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "template:".bold(), report.template);
        if let Some(script) = &report.runner_script {
            println!("{} {}", "runner script:".bold(), script);
        }
        print_section("bootstrap scripts", &report.bootstrap_scripts);
        print_section("source scripts", &report.source_scripts);
        print_section("test files", &report.test_files);
        println!("{} {}", "output directory:".bold(), report.output_directory);
    }

    Ok(())
}

fn locator_strings(locators: &[specrun::locator::Locator]) -> Vec<String> {
    locators.iter().map(ToString::to_string).collect()
}

fn print_section(title: &str, entries: &[String]) {
    println!("{} {}", format!("{title}:").bold(), entries.len());
    for entry in entries {
        println!("  {entry}");
    }
}
