//! specrun - resolve resource expressions into concrete resource sets and
//! prepare headless browser test harnesses
//!
//! This library expands `;`-separated, optionally exclusionary path
//! expressions (`classpath:/pkg/*.js`, `~file:/tmp/*Test.js`, plain URLs)
//! against registered resource roots, and builds the script/page plan a
//! browser-driving test runner consumes.

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

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod context;
pub mod expression;
pub mod harness;
pub mod locator;
pub mod output;
pub mod resolver;
pub mod roots;
pub mod scanner;
