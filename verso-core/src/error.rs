//! Error handling for the Verso core layer.
//!
//! Defines [`CoreError`], the common error type for this crate, using the
//! `thiserror` crate for ergonomic error definition. The domain layer wraps
//! these errors in its own types; filesystem failures in the preference
//! store, for example, carry a [`CoreError::Filesystem`] as their source.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the Verso workspace.
///
/// Represents failures in the foundational layer: filesystem access and
/// general I/O. Domain crates wrap this type rather than exposing it
/// directly.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to filesystem operations, such as creating directories
    /// or reading files. Includes the path involved and the source I/O error.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors not covered by other specific variants.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_display_includes_path() {
        let err = CoreError::Filesystem {
            message: "failed to create directory".to_string(),
            path: PathBuf::from("/tmp/verso"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("failed to create directory"));
        assert!(rendered.contains("/tmp/verso"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
