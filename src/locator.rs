//! Resolved resource locators
//!
//! A `Locator` is the absolute, dereferenceable address of one resolved
//! resource: a file on disk, an entry inside an archive container, or a
//! remote URL carried through literally. Locators order and hash by value so
//! result sets deduplicate and iterate deterministically.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur when reading a locator
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Filesystem read failed
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Archive container cannot be opened or the entry cannot be read
    #[error("cannot read archive {archive}: {source}")]
    ArchiveRead {
        /// Archive container path
        archive: PathBuf,
        /// Underlying error
        source: zip::result::ZipError,
    },

    /// Remote resources are fetched by the embedding environment, not here
    #[error("remote resource {0} cannot be read locally")]
    RemoteNotReadable(String),
}

/// Absolute address of a resolved resource
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Locator {
    /// Regular file on the filesystem
    File(PathBuf),

    /// Entry inside an archive container, readable without extraction
    ArchiveEntry {
        /// Path of the archive container
        archive: PathBuf,
        /// Entry path inside the container
        entry: String,
    },

    /// Opaque remote URL
    Remote(String),
}

impl Locator {
    /// Render the locator as a URL-like string
    #[must_use]
    pub fn as_uri(&self) -> String {
        match self {
            Self::File(path) => format!("file://{}", path.display()),
            Self::ArchiveEntry { archive, entry } => {
                format!("jar:file://{}!/{}", archive.display(), entry)
            }
            Self::Remote(url) => url.clone(),
        }
    }

    /// Last path segment of the locator
    #[must_use]
    pub fn file_name(&self) -> &str {
        let full = match self {
            Self::File(path) => path.to_str().unwrap_or_default(),
            Self::ArchiveEntry { entry, .. } => entry,
            Self::Remote(url) => url,
        };
        full.rsplit('/').next().unwrap_or(full)
    }

    /// File name without its extension
    #[must_use]
    pub fn base_name(&self) -> &str {
        let name = self.file_name();
        name.rfind('.').map_or(name, |dot| &name[..dot])
    }

    /// Read the resource as text
    ///
    /// File locators read from disk, archive entries read straight out of the
    /// container. Remote locators are not fetched by this crate.
    pub fn read_to_string(&self) -> Result<String, LocatorError> {
        match self {
            Self::File(path) => fs::read_to_string(path).map_err(|source| LocatorError::Io {
                path: path.clone(),
                source,
            }),
            Self::ArchiveEntry { archive, entry } => read_archive_entry(archive, entry),
            Self::Remote(url) => Err(LocatorError::RemoteNotReadable(url.clone())),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_uri())
    }
}

fn read_archive_entry(archive: &Path, entry: &str) -> Result<String, LocatorError> {
    let io_err = |source: std::io::Error| LocatorError::ArchiveRead {
        archive: archive.to_path_buf(),
        source: zip::result::ZipError::Io(source),
    };
    let zip_err = |source: zip::result::ZipError| LocatorError::ArchiveRead {
        archive: archive.to_path_buf(),
        source,
    };

    let file = fs::File::open(archive).map_err(io_err)?;
    let mut container = zip::ZipArchive::new(file).map_err(zip_err)?;
    let mut zipped = container.by_name(entry).map_err(zip_err)?;
    let mut text = String::new();
    zipped.read_to_string(&mut text).map_err(io_err)?;
    Ok(text)
}
