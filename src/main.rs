//! specrun - resolve resource expressions and prepare headless browser test
//! harnesses
//!
//! The CLI expands include/exclude resource expressions against directories
//! and archives, probes how classpath resources are backed, and resolves a
//! runner property bag into the harness plan a browser-driving runner
//! consumes.

// Keep the whole crate documented and lint-clean
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;
mod commands;

/// Main entry point for the specrun CLI
fn main() {
    if let Err(error) = cli::run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
