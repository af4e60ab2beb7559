//! Error types for CSS variable extraction
//!
//! This module defines the error type returned by parsing and extraction,
//! using thiserror like the rest of the crate.

use thiserror::Error;

use crate::css::stylesheet::SourcePosition;

/// Main error type for extraction operations
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Tree-sitter language setup errors
    #[error("Failed to set up tree-sitter language: {message}")]
    TreeSitterLanguage { message: String },

    /// Tree-sitter did not produce a syntax tree
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// A `var(` call whose parentheses never close
    #[error("Malformed value for '{property}' at {position}: unbalanced parentheses in '{value}'")]
    MalformedValue {
        property: String,
        value: String,
        position: SourcePosition,
    },

    /// Resolution of a single declaration needed more substitutions than allowed
    #[error("Resolving '{property}' exceeded {limit} substitutions")]
    SubstitutionLimit { property: String, limit: usize },

    /// Options could not be read from JSON
    #[error("Invalid extraction options: {source}")]
    Options {
        #[source]
        source: serde_json::Error,
    },

    /// JSON rendering errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::Json {
            source: err,
            message: "JSON operation failed".to_string(),
        }
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> ExtractResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> ExtractResult<T> {
        self.map_err(|e| ExtractError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
