//! Resource root registry
//!
//! The registry is the environment-lookup capability behind `classpath:`
//! expressions: an ordered search path of filesystem directories and archive
//! containers. Lookup walks the roots in registration order and the first
//! root containing the resource wins.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur registering or probing resource roots
#[derive(Debug, Error)]
pub enum RootsError {
    /// Registered root does not exist on disk
    #[error("root {0} does not exist")]
    RootNotFound(PathBuf),

    /// No registered root contains the resource
    #[error("resource {0} not found in any registered root")]
    ResourceNotFound(String),

    /// Archive container cannot be opened or enumerated
    #[error("cannot read archive {archive}: {source}")]
    ArchiveRead {
        /// Archive container path
        archive: PathBuf,
        /// Underlying error
        source: zip::result::ZipError,
    },
}

/// One registered root
#[derive(Debug, Clone)]
enum RootEntry {
    /// Plain directory scanned on the filesystem
    Directory(PathBuf),
    /// Archive container whose entries are enumerated in place
    Archive(PathBuf),
}

/// Where a resource was located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLocation {
    /// Resolved filesystem path (directory or file) under a directory root
    Directory(PathBuf),

    /// Resource lives inside an archive container
    Archive {
        /// Archive container path
        archive: PathBuf,
        /// Resource path relative to the container root
        prefix: String,
    },
}

/// Ordered search path of resource roots
#[derive(Debug, Clone, Default)]
pub struct ResourceRoots {
    entries: Vec<RootEntry>,
}

impl ResourceRoots {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root, classified by what is on disk: directories become
    /// directory roots, regular files are treated as archive containers
    pub fn add(&mut self, path: impl Into<PathBuf>) -> Result<(), RootsError> {
        let path = path.into();
        let entry = if path.is_dir() {
            RootEntry::Directory(path)
        } else if path.is_file() {
            RootEntry::Archive(path)
        } else {
            return Err(RootsError::RootNotFound(path));
        };
        self.entries.push(entry);
        Ok(())
    }

    /// Builder-style variant of [`Self::add`]
    pub fn with(mut self, path: impl Into<PathBuf>) -> Result<Self, RootsError> {
        self.add(path)?;
        Ok(self)
    }

    /// Number of registered roots
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any root is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Locate a resource path in the search path. A leading `/` on the
    /// resource is ignored, matching how classpath resources are written.
    /// Returns the first root that contains the resource, or `None`.
    pub fn locate(&self, resource: &str) -> Result<Option<RootLocation>, RootsError> {
        let relative = resource.trim_start_matches('/');

        for entry in &self.entries {
            match entry {
                RootEntry::Directory(root) => {
                    let candidate = root.join(relative);
                    if candidate.exists() {
                        return Ok(Some(RootLocation::Directory(candidate)));
                    }
                }
                RootEntry::Archive(archive) => {
                    if archive_contains(archive, relative)? {
                        return Ok(Some(RootLocation::Archive {
                            archive: archive.clone(),
                            prefix: relative.to_string(),
                        }));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Probe whether a resource is backed by an archive container rather than
    /// a plain directory. The resource must exist in some root.
    pub fn is_archive_resource(&self, resource: &str) -> Result<bool, RootsError> {
        match self.locate(resource)? {
            Some(RootLocation::Archive { .. }) => Ok(true),
            Some(RootLocation::Directory(_)) => Ok(false),
            None => Err(RootsError::ResourceNotFound(resource.to_string())),
        }
    }
}

/// Check whether an archive holds the entry itself or anything under it
fn archive_contains(archive: &Path, relative: &str) -> Result<bool, RootsError> {
    let zip_err = |source: zip::result::ZipError| RootsError::ArchiveRead {
        archive: archive.to_path_buf(),
        source,
    };

    let file = fs::File::open(archive)
        .map_err(|source| zip_err(zip::result::ZipError::Io(source)))?;
    let container = zip::ZipArchive::new(file).map_err(zip_err)?;

    if relative.is_empty() {
        return Ok(true);
    }
    let dir_prefix = format!("{relative}/");
    Ok(container
        .file_names()
        .any(|name| name == relative || name.starts_with(&dir_prefix)))
}
