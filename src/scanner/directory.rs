//! Directory scan strategy

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;
use crate::expression::{Expression, PatternSpec};
use crate::locator::Locator;

/// Walks a filesystem directory tree matching the expression pattern
#[derive(Debug)]
pub struct DirectoryScanner {
    /// Directory the scan is anchored at
    root: PathBuf,

    /// Expression to match
    expression: Expression,
}

impl DirectoryScanner {
    /// Create a scanner anchored at `root`
    #[must_use]
    pub(crate) fn new(root: PathBuf, expression: Expression) -> Self {
        Self { root, expression }
    }

    /// Directory the scan is anchored at
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every file under the root whose relative path matches the
    /// expression pattern. Exact patterns must match exactly one file when
    /// the expression is an inclusion.
    pub fn list(&self) -> Result<BTreeSet<Locator>, ScanError> {
        match self.expression.pattern_spec() {
            PatternSpec::Exact(name) => self.list_exact(name),
            PatternSpec::Glob(_) => self.list_glob(),
        }
    }

    fn list_exact(&self, name: &str) -> Result<BTreeSet<Locator>, ScanError> {
        let candidate = self.root.join(name);
        if candidate.is_file() {
            let absolute = absolute_path(&candidate, &self.expression)?;
            return Ok(BTreeSet::from([Locator::File(absolute)]));
        }
        if self.expression.is_exclusion() {
            return Ok(BTreeSet::new());
        }
        Err(ScanError::ResourceNotFound {
            expression: self.expression.raw().to_string(),
        })
    }

    fn list_glob(&self) -> Result<BTreeSet<Locator>, ScanError> {
        let mut matches = BTreeSet::new();

        // Single-segment patterns only look at immediate children
        let walker = WalkDir::new(&self.root).min_depth(1);
        let walker = if self.expression.spans_directories() {
            walker
        } else {
            walker.max_depth(1)
        };

        for entry in walker {
            let entry = entry.map_err(|source| ScanError::Walk {
                expression: self.expression.raw().to_string(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            if self.expression.matches(relative) {
                let absolute = absolute_path(entry.path(), &self.expression)?;
                matches.insert(Locator::File(absolute));
            }
        }

        Ok(matches)
    }
}

/// Locators must be dereferenceable from anywhere, so relative scan roots are
/// resolved against the working directory
fn absolute_path(path: &Path, expression: &Expression) -> Result<PathBuf, ScanError> {
    std::path::absolute(path).map_err(|source| ScanError::Io {
        expression: expression.raw().to_string(),
        source,
    })
}
