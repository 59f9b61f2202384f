//! Error types for scrappey-flow.
//!
//! All errors are represented by the `ScrappeyError` enum, which separates
//! configuration mistakes from errors reported by the remote API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all scrappey-flow operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum ScrappeyError {
    /// Node configuration errors (unknown operation, invalid parameters, strict JSON fields).
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON).
    #[error("{0}")]
    Convert(String),

    /// Host expression evaluation errors.
    #[error("{0}")]
    Expression(String),

    /// Error reported by the Scrappey API, translated through the error-code table.
    #[error("{message}")]
    Api {
        ecode: String,
        message: String,
        details: String,
        http_status: u16,
    },

    /// Transport errors that happened before a request could be sent.
    #[error("{0}")]
    Http(String),

    /// Batch aborted because one item failed and continue-on-fail is off.
    #[error("Failed to process item {item_index}: {message}")]
    Item {
        item_index: usize,
        message: String,
    },

    /// I/O errors (config file, runtime start-up).
    #[error("{0}")]
    IoError(String),
}

impl ScrappeyError {
    /// Long-form description, when the error carries one.
    pub fn details(&self) -> Option<&str> {
        match self {
            ScrappeyError::Api {
                details,
                ..
            } => Some(details),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScrappeyError {
    fn from(error: std::io::Error) -> Self {
        ScrappeyError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for ScrappeyError {
    fn from(error: serde_json::Error) -> Self {
        ScrappeyError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for ScrappeyError {
    fn from(error: toml::de::Error) -> Self {
        ScrappeyError::Config(error.to_string())
    }
}

impl From<jsonschema::ValidationError<'_>> for ScrappeyError {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        ScrappeyError::Config(error.to_string())
    }
}
