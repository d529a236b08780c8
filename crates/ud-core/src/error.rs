//! Core error types for UserDir RS

use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validation errors collection.
///
/// Entries keep insertion order so rendered error lists are deterministic.
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("validation failed: {entries:?}")]
pub struct ValidationErrors {
    entries: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.entries.iter().any(|e| e.field == field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.entries.extend(other.entries);
    }

    /// Render every entry as `"<field>: <message>"`, in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect()
    }
}
