use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

/// Recoverable editor failures. None of these leave the scene half-mutated.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Degenerate geometry or out-of-range input
    #[error("{0}")]
    Validation(String),

    /// A body id that does not resolve in the live world
    #[error("unknown body: {0}")]
    Reference(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Operation not possible in the current state (history boundaries, empty selection)
    #[error("{0}")]
    State(String),
}

impl EditorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Title used when the error is shown to the user.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::State(_) | Self::Reference(_) => "Warning",
            Self::Io { .. } | Self::Json(_) => "Error",
        }
    }

    /// Whether this is a no-op warning rather than a failure.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::State(_) | Self::Reference(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = EditorError::io(
            "autosave.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("autosave.json"));
        assert!(msg.contains("missing"));
        assert_eq!(err.title(), "Error");
        assert!(!err.is_warning());
    }

    #[test]
    fn test_state_error_is_warning() {
        let err = EditorError::State("Nothing to undo.".into());
        assert!(err.is_warning());
        assert_eq!(err.to_string(), "Nothing to undo.");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: EditorError = parse.unwrap_err().into();
        assert!(matches!(err, EditorError::Json(_)));
    }
}
