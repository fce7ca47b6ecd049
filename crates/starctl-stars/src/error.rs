//! Error types for star data and save-file I/O.

use std::path::PathBuf;

/// Errors raised while loading or writing a star catalog.
#[derive(Debug, thiserror::Error)]
pub enum StarDataError {
    /// The underlying stream failed or ended early.
    #[error("star data I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The catalog does not start with the expected header id.
    #[error("invalid star data header id {0}")]
    InvalidHeader(u32),
    /// The catalog header declares zero entries.
    #[error("star catalog contains no entries")]
    EmptyCatalog,
    /// A resource name contains an empty or parent-directory segment.
    #[error("invalid resource name {0:?}")]
    InvalidResourceName(String),
    /// The named resource does not exist under the resource root.
    #[error("resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),
}

/// Errors raised while reading or writing a save file.
#[derive(Debug, thiserror::Error)]
pub enum SaveFileError {
    /// The underlying stream failed.
    #[error("save file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file ended before the expected value.
    #[error("unexpected end of save file")]
    UnexpectedEof,
    /// A line did not hold the expected kind of value.
    #[error("save file line {line}: expected {expected}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Kind of value that was expected.
        expected: &'static str,
    },
}
