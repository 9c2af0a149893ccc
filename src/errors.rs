use thiserror::Error;

use crate::history::{EventKind, Street};

/// Everything that can go wrong while turning a log into hands.
///
/// None of these are recoverable for the current parse: the first error
/// aborts the whole file and no partial output is returned.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Malformed event ({reason}): {line}")]
    MalformedEvent { line: String, reason: &'static str },

    #[error("Could not extract {kind} fields from event: {line}")]
    FieldExtraction { kind: EventKind, line: String },

    #[error("Invalid street transition from {from} to {to}")]
    InvalidStreetTransition { from: Street, to: Street },

    #[error("Unknown card token: {0}")]
    UnknownCardToken(String),

    #[error("Error reading history caused by IO error")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for history parsing operations
pub type Result<T> = std::result::Result<T, HistoryError>;
