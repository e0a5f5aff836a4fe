//! Error types for the RedGifs client

use thiserror::Error;

/// Result type alias for redgifs operations
pub type Result<T> = std::result::Result<T, RedgifsError>;

/// Errors that can occur when using the redgifs crate
#[derive(Error, Debug)]
pub enum RedgifsError {
    /// No canonical tag is close enough to the searched string
    #[error("Tag for \"{0}\" was not found.")]
    InvalidTag(String),

    /// Reading the tag snapshot failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tag snapshot (or a tag list response) is not valid JSON
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error (anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The blocking snapshot load did not complete
    #[error("Snapshot loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl RedgifsError {
    /// Creates a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` when no tag matched the searched string
    pub fn is_invalid_tag(&self) -> bool {
        matches!(self, RedgifsError::InvalidTag(_))
    }

    /// The searched string carried by an [`RedgifsError::InvalidTag`]
    pub fn invalid_tag(&self) -> Option<&str> {
        match self {
            RedgifsError::InvalidTag(tag) => Some(tag),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tag_message() {
        let err = RedgifsError::InvalidTag("xqzzv".to_string());
        assert_eq!(err.to_string(), "Tag for \"xqzzv\" was not found.");
        assert!(err.is_invalid_tag());
        assert_eq!(err.invalid_tag(), Some("xqzzv"));
    }

    #[test]
    fn test_io_error_is_not_invalid_tag() {
        let err: RedgifsError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "tags.json").into();
        assert!(!err.is_invalid_tag());
        assert!(err.invalid_tag().is_none());
    }
}
