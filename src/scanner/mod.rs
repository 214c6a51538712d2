//! Scan strategies
//!
//! A scanner matches the set of resources described by one parsed
//! [`Expression`]. [`Scanner::for_expression`] picks the strategy: classpath
//! roots backed by an archive enumerate container entries, classpath roots on
//! the filesystem and plain `file:` roots walk a directory tree, and remote
//! URLs pass through as a single literal resource.

mod archive;
mod directory;

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

pub use archive::ArchiveScanner;
pub use directory::DirectoryScanner;

use crate::expression::{Expression, Protocol};
use crate::locator::Locator;
use crate::roots::{ResourceRoots, RootLocation, RootsError};

/// Errors that can occur while scanning
#[derive(Debug, Error)]
pub enum ScanError {
    /// Expression root cannot be located
    #[error("root for `{expression}` cannot be located")]
    RootNotFound {
        /// The expression as supplied
        expression: String,
    },

    /// Exact inclusion expression matched nothing
    #[error("resource `{expression}` matched nothing")]
    ResourceNotFound {
        /// The expression as supplied
        expression: String,
    },

    /// Archive container cannot be opened or enumerated
    #[error("cannot read archive {archive} for `{expression}`: {source}")]
    ArchiveRead {
        /// The expression as supplied
        expression: String,
        /// Archive container path
        archive: PathBuf,
        /// Underlying error
        source: zip::result::ZipError,
    },

    /// Directory traversal failed
    #[error("cannot walk root for `{expression}`: {source}")]
    Walk {
        /// The expression as supplied
        expression: String,
        /// Underlying error
        source: walkdir::Error,
    },

    /// Other I/O failure
    #[error("io error scanning `{expression}`: {source}")]
    Io {
        /// The expression as supplied
        expression: String,
        /// Underlying error
        source: std::io::Error,
    },
}

impl ScanError {
    /// Attach expression context to a registry error
    fn from_roots(error: RootsError, expression: &Expression) -> Self {
        match error {
            RootsError::ArchiveRead { archive, source } => Self::ArchiveRead {
                expression: expression.raw().to_string(),
                archive,
                source,
            },
            RootsError::RootNotFound(_) | RootsError::ResourceNotFound(_) => {
                Self::RootNotFound {
                    expression: expression.raw().to_string(),
                }
            }
        }
    }
}

/// Strategy matching the resources described by one expression
#[derive(Debug)]
pub enum Scanner {
    /// Filesystem directory walk
    Directory(DirectoryScanner),
    /// Archive container enumeration
    Archive(ArchiveScanner),
    /// Single literal resource, no scanning
    Literal(Locator),
}

impl Scanner {
    /// Select and construct the scanner suited to the expression
    pub fn for_expression(
        expression: &Expression,
        roots: &ResourceRoots,
    ) -> Result<Self, ScanError> {
        match expression.protocol() {
            Protocol::Remote => {
                let url = expression
                    .remote_url()
                    .unwrap_or(expression.location())
                    .to_string();
                Ok(Self::Literal(Locator::Remote(url)))
            }
            Protocol::Classpath => {
                let location = roots
                    .locate(expression.root_dir())
                    .map_err(|e| ScanError::from_roots(e, expression))?;
                match location {
                    Some(RootLocation::Directory(dir)) => {
                        Ok(Self::Directory(DirectoryScanner::new(dir, expression.clone())))
                    }
                    Some(RootLocation::Archive { archive, prefix }) => Ok(Self::Archive(
                        ArchiveScanner::new(archive, prefix, expression.clone()),
                    )),
                    None => Err(ScanError::RootNotFound {
                        expression: expression.raw().to_string(),
                    }),
                }
            }
            Protocol::File => {
                let root = PathBuf::from(expression.root_dir());
                let root = if expression.root_dir().is_empty() {
                    PathBuf::from(".")
                } else {
                    root
                };
                if !root.is_dir() {
                    return Err(ScanError::RootNotFound {
                        expression: expression.raw().to_string(),
                    });
                }
                Ok(Self::Directory(DirectoryScanner::new(root, expression.clone())))
            }
        }
    }

    /// List the resources matching the expression
    pub fn list(&self) -> Result<BTreeSet<Locator>, ScanError> {
        match self {
            Self::Directory(scanner) => scanner.list(),
            Self::Archive(scanner) => scanner.list(),
            Self::Literal(locator) => Ok(BTreeSet::from([locator.clone()])),
        }
    }
}
