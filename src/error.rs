//! Error types for building and exporting responses

use thiserror::Error;

/// Errors raised while building or exporting a [`Response`](crate::models::Response).
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The response could not be rendered as JSON.
    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Card JSON could not be parsed.
    #[error("invalid adaptive card: {0}")]
    InvalidCard(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let inner = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ResponseError::InvalidCard(inner);
        assert!(err.to_string().starts_with("invalid adaptive card: "));
    }

    #[test]
    fn test_error_source_is_kept() {
        use std::error::Error as _;
        let inner = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ResponseError::Serialize(inner);
        assert!(err.source().is_some());
    }
}
