//! Error types for richdoc.
//!
//! Editing failures are local and recoverable: a failed operation never
//! corrupts the tracked content value.

use thiserror::Error;

use crate::host::HostError;

/// Errors that can occur during editing operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Table construction asked for a zero-sized grid
    #[error("invalid table dimensions: {rows}x{cols}")]
    InvalidDimensions {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// Link submission requires a non-empty URL
    #[error("link URL must not be empty")]
    EmptyHref,

    /// Image insertion requires a non-empty source
    #[error("image source must not be empty")]
    EmptySource,

    /// A node path no longer resolves against the live tree
    #[error("no node at the given path")]
    PathNotFound,

    /// A table operation targeted an element that is not a table
    #[error("element is not a table")]
    NotATable,

    /// Host environment failure (clipboard, upload, download)
    #[error(transparent)]
    Host(#[from] HostError),
}

/// Result type alias for editing operations.
pub type EditResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditorError::InvalidDimensions { rows: 0, cols: 3 };
        assert_eq!(err.to_string(), "invalid table dimensions: 0x3");

        let err = EditorError::EmptyHref;
        assert_eq!(err.to_string(), "link URL must not be empty");
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(EditorError: Send, Sync);
    }
}
