//! Error types for rets-parse
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use bytes::Bytes;
use thiserror::Error;

/// Reply code a server uses to report a search with zero matches
pub const NO_RECORDS_FOUND: i64 = 20201;

/// The main error type for rets-parse
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("RETS error {code}: {text}")]
    Api {
        code: i64,
        text: String,
        /// The raw response body, kept for diagnosis
        body: Bytes,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Invalid DELIMITER value '{value}'")]
    InvalidDelimiter { value: String },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Unsupported response format: {format}")]
    UnsupportedFormat { format: String },

    #[error("{operation} is not supported for the {format} format")]
    NotSupportedByFormat {
        operation: &'static str,
        format: &'static str,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an API error from a reply status and the body that carried it
    pub fn api(code: i64, text: impl Into<String>, body: &[u8]) -> Self {
        Self::Api {
            code,
            text: text.into(),
            body: Bytes::copy_from_slice(body),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create an invalid delimiter error
    pub fn invalid_delimiter(value: impl Into<String>) -> Self {
        Self::InvalidDelimiter {
            value: value.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Reply code of an API error, if this is one
    pub fn reply_code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if this error is the server's "no records found" reply
    pub fn is_no_records_found(&self) -> bool {
        self.reply_code() == Some(NO_RECORDS_FOUND)
    }
}

/// Result type alias for rets-parse
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parse("missing COLUMNS header element");
        assert_eq!(
            err.to_string(),
            "Parse error: missing COLUMNS header element"
        );

        let err = Error::api(20203, "Miscellaneous search error", b"<RETS/>");
        assert_eq!(err.to_string(), "RETS error 20203: Miscellaneous search error");

        let err = Error::unsupported_format("JSON");
        assert_eq!(err.to_string(), "Unsupported response format: JSON");

        let err = Error::NotSupportedByFormat {
            operation: "parse_system",
            format: "STANDARD-XML",
        };
        assert_eq!(
            err.to_string(),
            "parse_system is not supported for the STANDARD-XML format"
        );
    }

    #[test]
    fn test_api_error_keeps_body() {
        let err = Error::api(20036, "Missing parameter", b"<RETS ReplyCode=\"20036\"/>");
        match err {
            Error::Api { code, body, .. } => {
                assert_eq!(code, 20036);
                assert_eq!(&body[..], b"<RETS ReplyCode=\"20036\"/>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_is_no_records_found() {
        assert!(Error::api(NO_RECORDS_FOUND, "No Records Found", b"").is_no_records_found());
        assert!(!Error::api(20203, "Search error", b"").is_no_records_found());
        assert!(!Error::parse("missing COLUMNS header element").is_no_records_found());
        assert_eq!(Error::malformed("bad").reply_code(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::parse("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Parse error: inner"));
    }
}
