//! Named data resources resolved under a root directory.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::StarDataError;

/// Resolves `/`-separated resource names such as `STARFIELD/DATA` to files
/// below a root directory.
#[derive(Clone, Debug)]
pub struct ResourceDir {
    root: PathBuf,
}

impl ResourceDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a resource name to its path without touching the filesystem.
    ///
    /// Empty names and names with empty, `.` or `..` segments are rejected.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StarDataError> {
        let mut path = self.root.clone();
        for segment in name.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(StarDataError::InvalidResourceName(name.to_string()));
            }
            path.push(segment);
        }
        Ok(path)
    }

    /// Open a resource for buffered reading.
    pub fn open(&self, name: &str) -> Result<BufReader<File>, StarDataError> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(StarDataError::ResourceNotFound(path));
        }
        let file = File::open(&path)?;
        tracing::debug!(resource = name, path = %path.display(), "opened resource");
        Ok(BufReader::new(file))
    }
}
