//! Tests for the runner context and property application

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use specrun::context::{BrowserVersion, ContextError, RunnerContext, DEFAULT_DEBUG_PORT};

fn bag(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// =============================================================================
// Default Tests
// =============================================================================

#[test]
fn defaults() {
    let context = RunnerContext::default();
    assert_eq!(context.browser_version, BrowserVersion::Firefox);
    assert_eq!(context.timeout, None);
    assert_eq!(context.debug_port, DEFAULT_DEBUG_PORT);
    assert!(!context.debug_mode);
    assert!(context.test_files.is_none());
}

// =============================================================================
// Property Application Tests
// =============================================================================

#[test]
fn every_known_key_applies() {
    let properties = bag(&[
        ("browserVersion", "chrome"),
        ("timeout", "30"),
        ("testRunnerTemplate", "classpath:/tpl/Runner.html"),
        ("testRunnerScript", "classpath:/tpl/run.js"),
        ("bootstrapScripts", "classpath:/boot/*.js"),
        ("sourceScripts", "classpath:/src/*.js"),
        ("testFiles", "classpath:/tests/*Test.js"),
        ("outputDirectory", "/tmp/out"),
        ("debugMode", "true"),
        ("debugPort", "9000"),
    ]);

    let context = RunnerContext::from_properties(&properties).unwrap();
    assert_eq!(context.browser_version, BrowserVersion::Chrome);
    assert_eq!(context.timeout, Some(Duration::from_secs(30)));
    assert_eq!(
        context.test_runner_template.as_deref(),
        Some("classpath:/tpl/Runner.html")
    );
    assert_eq!(context.test_runner_script.as_deref(), Some("classpath:/tpl/run.js"));
    assert_eq!(context.bootstrap_scripts.as_deref(), Some("classpath:/boot/*.js"));
    assert_eq!(context.source_scripts.as_deref(), Some("classpath:/src/*.js"));
    assert_eq!(context.test_files.as_deref(), Some("classpath:/tests/*Test.js"));
    assert_eq!(context.output_directory, Some(PathBuf::from("/tmp/out")));
    assert!(context.debug_mode);
    assert_eq!(context.debug_port, 9000);
}

#[test]
fn negative_one_timeout_waits_forever() {
    let context = RunnerContext::from_properties(&bag(&[("timeout", "-1")])).unwrap();
    assert_eq!(context.timeout, None);
}

#[test]
fn browser_names_are_case_insensitive() {
    assert_eq!("Firefox".parse::<BrowserVersion>().unwrap(), BrowserVersion::Firefox);
    assert_eq!("ie".parse::<BrowserVersion>().unwrap(), BrowserVersion::InternetExplorer);
}

// =============================================================================
// Rejection Tests
// =============================================================================

#[test]
fn unknown_key_is_rejected() {
    let err = RunnerContext::from_properties(&bag(&[("colour", "red")])).unwrap_err();
    assert!(matches!(err, ContextError::UnknownKey(ref key) if key == "colour"));
}

#[test]
fn booleans_must_be_written_out() {
    let err = RunnerContext::from_properties(&bag(&[("debugMode", "yes")])).unwrap_err();
    assert!(matches!(err, ContextError::InvalidValue { ref key, .. } if key == "debugMode"));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = RunnerContext::from_properties(&bag(&[("timeout", "0")])).unwrap_err();
    assert!(matches!(err, ContextError::InvalidValue { ref key, .. } if key == "timeout"));
}

#[test]
fn unknown_browser_is_rejected() {
    let err = RunnerContext::from_properties(&bag(&[("browserVersion", "netscape")])).unwrap_err();
    assert!(matches!(err, ContextError::UnknownBrowser(ref name) if name == "netscape"));
}

#[test]
fn bad_port_is_rejected() {
    let err = RunnerContext::from_properties(&bag(&[("debugPort", "eighty")])).unwrap_err();
    assert!(matches!(err, ContextError::InvalidValue { ref key, .. } if key == "debugPort"));
}
