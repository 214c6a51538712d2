//! Runner context
//!
//! Explicit configuration for a harness run. The build tool hands over a
//! string property bag; every known key is applied through one typed match
//! arm, so configuration errors surface as descriptive errors instead of
//! failing reflection at a distance.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Default port for the debug server
pub const DEFAULT_DEBUG_PORT: u16 = 8000;

/// Errors that can occur applying configuration properties
#[derive(Debug, Error)]
pub enum ContextError {
    /// Property key is not a known runner setting
    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),

    /// Property value does not parse into the key's type
    #[error("invalid value `{value}` for configuration key `{key}`")]
    InvalidValue {
        /// Offending key
        key: String,
        /// Offending value
        value: String,
    },

    /// Browser name is not recognized
    #[error("unknown browser version `{0}`")]
    UnknownBrowser(String),
}

/// Emulated browser version for the headless engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserVersion {
    /// Firefox emulation (the default)
    #[default]
    Firefox,
    /// Chrome emulation
    Chrome,
    /// Internet Explorer emulation
    InternetExplorer,
}

impl FromStr for BrowserVersion {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "firefox" => Ok(Self::Firefox),
            "chrome" => Ok(Self::Chrome),
            "ie" | "internet_explorer" => Ok(Self::InternetExplorer),
            _ => Err(ContextError::UnknownBrowser(s.to_string())),
        }
    }
}

impl std::fmt::Display for BrowserVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firefox => write!(f, "firefox"),
            Self::Chrome => write!(f, "chrome"),
            Self::InternetExplorer => write!(f, "ie"),
        }
    }
}

/// Configuration for a harness run
#[derive(Debug, Clone)]
pub struct RunnerContext {
    /// Browser version the headless engine emulates
    pub browser_version: BrowserVersion,

    /// Time to wait for page loads; `None` waits forever
    pub timeout: Option<Duration>,

    /// Expression resolving the test runner template document
    pub test_runner_template: Option<String>,

    /// Expression resolving the script run after page load to start tests
    pub test_runner_script: Option<String>,

    /// Expression list of scripts loaded before everything else
    pub bootstrap_scripts: Option<String>,

    /// Expression list of scripts loaded after bootstrap, before tests
    pub source_scripts: Option<String>,

    /// Expression list of test files
    pub test_files: Option<String>,

    /// Directory the generated runner documents are written to
    pub output_directory: Option<PathBuf>,

    /// Whether tests are served for inspection instead of driven headlessly
    pub debug_mode: bool,

    /// Port for the debug server
    pub debug_port: u16,
}

impl Default for RunnerContext {
    fn default() -> Self {
        Self {
            browser_version: BrowserVersion::default(),
            timeout: None,
            test_runner_template: None,
            test_runner_script: None,
            bootstrap_scripts: None,
            source_scripts: None,
            test_files: None,
            output_directory: None,
            debug_mode: false,
            debug_port: DEFAULT_DEBUG_PORT,
        }
    }
}

impl RunnerContext {
    /// Build a context from a build-tool property bag, applying every entry
    pub fn from_properties(
        properties: &BTreeMap<String, String>,
    ) -> Result<Self, ContextError> {
        let mut context = Self::default();
        for (key, value) in properties {
            context.apply(key, value)?;
        }
        Ok(context)
    }

    /// Apply one property to the context
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ContextError> {
        match key {
            "browserVersion" => self.browser_version = value.parse()?,
            "timeout" => self.timeout = parse_timeout(key, value)?,
            "testRunnerTemplate" => self.test_runner_template = Some(value.to_string()),
            "testRunnerScript" => self.test_runner_script = Some(value.to_string()),
            "bootstrapScripts" => self.bootstrap_scripts = Some(value.to_string()),
            "sourceScripts" => self.source_scripts = Some(value.to_string()),
            "testFiles" => self.test_files = Some(value.to_string()),
            "outputDirectory" => self.output_directory = Some(PathBuf::from(value)),
            "debugMode" => self.debug_mode = parse_bool(key, value)?,
            "debugPort" => {
                self.debug_port = value.parse().map_err(|_| invalid(key, value))?;
            }
            _ => return Err(ContextError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ContextError {
    ContextError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Booleans must be written out, anything else is a configuration mistake
fn parse_bool(key: &str, value: &str) -> Result<bool, ContextError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

/// `-1` waits forever, positive values are seconds
fn parse_timeout(key: &str, value: &str) -> Result<Option<Duration>, ContextError> {
    let seconds: i64 = value.parse().map_err(|_| invalid(key, value))?;
    match seconds {
        -1 => Ok(None),
        s if s > 0 => Ok(Some(Duration::from_secs(s.unsigned_abs()))),
        _ => Err(invalid(key, value)),
    }
}
