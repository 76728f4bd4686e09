//! Crate-wide error type for the collection JSON boundary.
//!
//! The identity and ordering components are total functions and never fail;
//! the only fallible surface is parsing a collection document and writing it
//! back out. Both are covered by the [`Error`] enum here.

use thiserror::Error;

/// Errors surfaced while reading or writing collection documents.
#[derive(Error, Debug)]
pub enum Error {
    /// The input was not valid JSON, or did not match the collection shape.
    #[error("failed to parse collection JSON: {0}")]
    ParseCollection(#[source] serde_json::Error),

    /// The in-memory collection could not be serialized back to JSON.
    #[error("failed to serialize collection: {0}")]
    SerializeCollection(#[source] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = Error::ParseCollection(json_error);
        let display = format!("{error}");
        assert!(display.contains("failed to parse collection JSON"));
    }

    #[test]
    fn test_parse_error_exposes_source() {
        use std::error::Error as _;

        let json_error = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let error = Error::ParseCollection(json_error);
        assert!(error.source().is_some());
    }
}
