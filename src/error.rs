//! Error handling for the display pipeline
//!
//! Every fallible library operation returns [`DisplayError`]. Each variant maps
//! onto an [`ErrorCode`] so callers (the CLI, or a presentation service) can
//! bucket failures without matching on messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = DisplayError> = std::result::Result<T, E>;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Stable numeric codes for display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    /// Input was not valid JSON or did not have the SPARQL results shape
    ParseError = -32700,
    /// Results lacked bindings or the title/subtitle fields
    MalformedResponse = -32001,
    /// No field registry exists for the classified entity
    UnsupportedEntityType = -32002,
    /// URI did not contain a Wikidata item id
    InvalidEntityUri = -32003,
    /// Query template name is not known
    TemplateNotFound = -32004,
    /// A field registry table broke its own invariants
    InvalidRegistry = -32005,
    /// File I/O error
    IoError = -32012,
}

impl ErrorCode {
    /// Get the integer code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Nothing in this crate performs I/O against a remote endpoint, so no
    /// error is worth retrying locally.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get the error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            ErrorCode::ParseError | ErrorCode::MalformedResponse => "input_error",
            ErrorCode::UnsupportedEntityType | ErrorCode::InvalidEntityUri => "classification_error",
            ErrorCode::TemplateNotFound => "not_found",
            ErrorCode::InvalidRegistry => "configuration_error",
            ErrorCode::IoError => "io_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

// =============================================================================
// DISPLAY ERROR
// =============================================================================

/// Errors raised while turning SPARQL results into a display document
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("malformed SPARQL response: {0}")]
    MalformedResponse(String),

    #[error("unsupported entity type: {0}")]
    UnsupportedEntityType(String),

    #[error("invalid Wikidata URI '{0}': no item id found")]
    InvalidEntityUri(String),

    #[error("invalid Wikidata item id '{0}': expected Q followed by digits")]
    InvalidEntityId(String),

    #[error("query template '{0}' not found")]
    TemplateNotFound(String),

    #[error("invalid field registry for {entity}: {reason}")]
    InvalidRegistry { entity: String, reason: String },

    #[error("failed to parse SPARQL results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DisplayError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DisplayError::MalformedResponse(reason.into())
    }

    /// Classify this error
    pub fn code(&self) -> ErrorCode {
        match self {
            DisplayError::MalformedResponse(_) => ErrorCode::MalformedResponse,
            DisplayError::UnsupportedEntityType(_) => ErrorCode::UnsupportedEntityType,
            DisplayError::InvalidEntityUri(_) | DisplayError::InvalidEntityId(_) => {
                ErrorCode::InvalidEntityUri
            }
            DisplayError::TemplateNotFound(_) => ErrorCode::TemplateNotFound,
            DisplayError::InvalidRegistry { .. } => ErrorCode::InvalidRegistry,
            DisplayError::Json(_) => ErrorCode::ParseError,
            DisplayError::Io(_) => ErrorCode::IoError,
        }
    }
}
