// File: src/error.rs
// Purpose: The single validation error kind surfaced next to a field

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field failed its rule.
///
/// Malformed and missing values collapse into the same error; the message
/// is whatever the rule for that field says.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldInvalid {
    pub field: String,
    pub message: String,
}

impl FieldInvalid {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
