//! Harness preparation
//!
//! Turns a [`RunnerContext`] into the concrete material a browser-driving
//! runner consumes: the resolved template, the script locator lists in load
//! order, and one generated runner document per test file. Rendering and
//! page driving stay behind the [`TemplateEngine`] and [`PageDriver`] traits;
//! implementations live with the embedding runner.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::context::RunnerContext;
use crate::locator::{Locator, LocatorError};
use crate::resolver::{ResolveError, Resolver};

/// Suffix appended to a test's base name to form its runner document
pub const RUNNER_SUFFIX: &str = "Runner.html";

// Template placeholder names, matching the configuration keys
const VAR_TEST_RUNNER_SCRIPT: &str = "testRunnerScript";
const VAR_BOOTSTRAP_SCRIPTS: &str = "bootstrapScripts";
const VAR_SOURCE_SCRIPTS: &str = "sourceScripts";
const VAR_TEST_FILES: &str = "testFiles";

/// Error reported by a template engine implementation
#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct TemplateError(pub String);

/// Error reported by a page driver implementation
#[derive(Debug, Error)]
#[error("page load failed for {page}: {reason}")]
pub struct DriverError {
    /// Page that failed to load
    pub page: String,
    /// Driver-reported reason
    pub reason: String,
}

/// Renders a template against named substitution variables
pub trait TemplateEngine {
    /// Render `template`, substituting every placeholder from `vars`
    fn render(
        &self,
        template: &str,
        vars: &BTreeMap<String, String>,
    ) -> Result<String, TemplateError>;
}

/// Loads a page and blocks until its scripts signal completion
pub trait PageDriver {
    /// Visit one page to completion
    fn visit(&mut self, page: &Locator) -> Result<(), DriverError>;
}

/// Errors that can occur preparing or running a harness
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No test runner template configured
    #[error("no test runner template configured")]
    MissingTemplate,

    /// No output directory configured
    #[error("no output directory configured")]
    MissingOutputDirectory,

    /// An expression that must resolve to a resource matched nothing
    #[error("expression `{expression}` expanded to no resources")]
    EmptyExpansion {
        /// The offending expression
        expression: String,
    },

    /// Resolution of a configured expression failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Reading a resolved resource failed
    #[error(transparent)]
    Locator(#[from] LocatorError),

    /// Template engine failure
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Page driver failure
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Writing a generated runner document failed
    #[error("cannot write runner file: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved material for one harness run
#[derive(Debug, Clone)]
pub struct HarnessPlan {
    /// Runner template document
    template: Locator,

    /// Script run after page load to start the tests
    runner_script: Option<Locator>,

    /// Scripts loaded before everything else, in locator order
    bootstrap_scripts: Vec<Locator>,

    /// Scripts loaded after bootstrap, before tests
    source_scripts: Vec<Locator>,

    /// Test files, one runner document each
    test_files: Vec<Locator>,

    /// Where generated runner documents land
    output_directory: PathBuf,
}

impl HarnessPlan {
    /// Resolve every configured expression of `context` into a plan
    pub fn build(context: &RunnerContext, resolver: &Resolver) -> Result<Self, HarnessError> {
        let template_expression = context
            .test_runner_template
            .as_deref()
            .ok_or(HarnessError::MissingTemplate)?;
        let template = resolve_one(resolver, template_expression)?;

        let runner_script = context
            .test_runner_script
            .as_deref()
            .map(|expression| resolve_one(resolver, expression))
            .transpose()?;

        let output_directory = context
            .output_directory
            .clone()
            .ok_or(HarnessError::MissingOutputDirectory)?;

        Ok(Self {
            template,
            runner_script,
            bootstrap_scripts: resolve_list(resolver, context.bootstrap_scripts.as_deref())?,
            source_scripts: resolve_list(resolver, context.source_scripts.as_deref())?,
            test_files: resolve_list(resolver, context.test_files.as_deref())?,
            output_directory,
        })
    }

    /// Runner template document
    #[must_use]
    pub const fn template(&self) -> &Locator {
        &self.template
    }

    /// Script run after page load to start the tests
    #[must_use]
    pub const fn runner_script(&self) -> Option<&Locator> {
        self.runner_script.as_ref()
    }

    /// Scripts loaded before everything else
    #[must_use]
    pub fn bootstrap_scripts(&self) -> &[Locator] {
        &self.bootstrap_scripts
    }

    /// Scripts loaded after bootstrap, before tests
    #[must_use]
    pub fn source_scripts(&self) -> &[Locator] {
        &self.source_scripts
    }

    /// Test files
    #[must_use]
    pub fn test_files(&self) -> &[Locator] {
        &self.test_files
    }

    /// Where generated runner documents land
    #[must_use]
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Template substitution variables for one test file
    #[must_use]
    pub fn template_vars(&self, test: &Locator) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        // An unset runner script renders as nothing, not as a leftover
        // placeholder
        vars.insert(
            VAR_TEST_RUNNER_SCRIPT.to_string(),
            self.runner_script
                .as_ref()
                .map(|script| script_tags(std::slice::from_ref(script)))
                .unwrap_or_default(),
        );
        vars.insert(
            VAR_BOOTSTRAP_SCRIPTS.to_string(),
            script_tags(&self.bootstrap_scripts),
        );
        vars.insert(
            VAR_SOURCE_SCRIPTS.to_string(),
            script_tags(&self.source_scripts),
        );
        vars.insert(
            VAR_TEST_FILES.to_string(),
            script_tags(std::slice::from_ref(test)),
        );
        vars
    }

    /// Render and write one runner document per test file, returning the
    /// written files as locators in test order
    pub fn write_runner_files(
        &self,
        engine: &dyn TemplateEngine,
    ) -> Result<Vec<Locator>, HarnessError> {
        let template = self.template.read_to_string()?;
        fs::create_dir_all(&self.output_directory)?;

        let mut written = Vec::with_capacity(self.test_files.len());
        for test in &self.test_files {
            let rendered = engine.render(&template, &self.template_vars(test))?;
            let name = format!("{}{RUNNER_SUFFIX}", test.base_name());
            let path = self.output_directory.join(name);
            fs::write(&path, rendered)?;
            written.push(Locator::File(std::path::absolute(&path)?));
        }
        Ok(written)
    }

    /// Write the runner documents and drive each one to completion,
    /// stopping at the first driver failure
    pub fn run(
        &self,
        engine: &dyn TemplateEngine,
        driver: &mut dyn PageDriver,
    ) -> Result<Vec<Locator>, HarnessError> {
        let runners = self.write_runner_files(engine)?;
        for runner in &runners {
            driver.visit(runner)?;
        }
        Ok(runners)
    }
}

/// Expand an expression that must resolve to at least one resource; the
/// first locator wins
fn resolve_one(resolver: &Resolver, expression: &str) -> Result<Locator, HarnessError> {
    let resolved = resolver.expand(expression)?;
    resolved
        .into_iter()
        .next()
        .ok_or_else(|| HarnessError::EmptyExpansion {
            expression: expression.to_string(),
        })
}

/// Expand an optional expression list into ordered locators
fn resolve_list(
    resolver: &Resolver,
    expression: Option<&str>,
) -> Result<Vec<Locator>, HarnessError> {
    match expression {
        Some(expression) => Ok(resolver.expand(expression)?.into_iter().collect()),
        None => Ok(Vec::new()),
    }
}

/// HTML script tags for a list of sources
fn script_tags(sources: &[Locator]) -> String {
    let mut tags = String::new();
    for source in sources {
        tags.push_str("<script type=\"text/javascript\" src=\"");
        tags.push_str(&source.as_uri());
        tags.push_str("\"></script>");
    }
    tags
}
