//! Error types shared across Overlay Studio crates.

/// Top-level error type for Overlay Studio operations.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StudioError.
pub type StudioResult<T> = Result<T, StudioError>;

impl StudioError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StudioError::storage("corrupt file");
        assert_eq!(err.to_string(), "Storage error: corrupt file");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: StudioError = io.into();
        assert!(matches!(err, StudioError::Io(_)));
    }
}
