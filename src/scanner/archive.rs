//! Archive scan strategy

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::ScanError;
use crate::expression::{Expression, PatternSpec};
use crate::locator::Locator;

/// Enumerates entries inside an archive container matching the expression
/// pattern
#[derive(Debug)]
pub struct ArchiveScanner {
    /// Archive container holding the expression root
    archive: PathBuf,

    /// Expression root as an entry prefix inside the container
    prefix: String,

    /// Expression to match
    expression: Expression,
}

impl ArchiveScanner {
    /// Create a scanner over `archive`, anchored at `prefix` inside it
    #[must_use]
    pub(crate) fn new(archive: PathBuf, prefix: String, expression: Expression) -> Self {
        Self {
            archive,
            prefix,
            expression,
        }
    }

    /// Archive container holding the expression root
    #[must_use]
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// List every entry under the prefix whose relative path matches the
    /// expression pattern. Entries resolve as archive-entry locators readable
    /// without extraction.
    pub fn list(&self) -> Result<BTreeSet<Locator>, ScanError> {
        let names = self.entry_names()?;
        let prefix = if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{}/", self.prefix)
        };

        let mut matches = BTreeSet::new();
        for name in &names {
            // Directory markers carry a trailing slash
            if name.ends_with('/') {
                continue;
            }
            let Some(relative) = name.strip_prefix(&prefix) else {
                continue;
            };
            if self.expression.matches(relative) {
                matches.insert(Locator::ArchiveEntry {
                    archive: self.archive.clone(),
                    entry: name.clone(),
                });
            }
        }

        if matches.is_empty()
            && !self.expression.is_glob()
            && !self.expression.is_exclusion()
        {
            return Err(ScanError::ResourceNotFound {
                expression: self.expression.raw().to_string(),
            });
        }
        Ok(matches)
    }

    fn entry_names(&self) -> Result<Vec<String>, ScanError> {
        let archive_err = |source: zip::result::ZipError| ScanError::ArchiveRead {
            expression: self.expression.raw().to_string(),
            archive: self.archive.clone(),
            source,
        };

        let file = fs::File::open(&self.archive)
            .map_err(|source| archive_err(zip::result::ZipError::Io(source)))?;
        let container = zip::ZipArchive::new(file).map_err(archive_err)?;
        Ok(container.file_names().map(str::to_string).collect())
    }
}
