//! Output formatting for human and JSON modes
//!
//! The CLI renders every command result either as human-readable text or as
//! machine-parseable JSON; the report structs here are the JSON shapes.

use serde::Serialize;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a resolve operation
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    /// Expression lists as supplied
    pub expressions: Vec<String>,
    /// Resolved locators, sorted
    pub resources: Vec<String>,
    /// Number of resolved locators
    pub count: usize,
}

/// Result of an archive probe
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    /// Probed resource path
    pub resource: String,
    /// True when the resource is backed by an archive container
    pub archive: bool,
}

/// Result of a plan operation
#[derive(Debug, Serialize)]
pub struct PlanReport {
    /// Resolved runner template
    pub template: String,
    /// Resolved test runner script, if configured
    pub runner_script: Option<String>,
    /// Bootstrap script locators in load order
    pub bootstrap_scripts: Vec<String>,
    /// Source script locators in load order
    pub source_scripts: Vec<String>,
    /// Test file locators
    pub test_files: Vec<String>,
    /// Output directory for generated runner documents
    pub output_directory: String,
}
