//! Error types for the seat layout engine

use thiserror::Error;

/// Errors raised when a table description cannot be laid out
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Shape name outside the supported set
    #[error("unknown table shape '{name}'{}", format_suggestions(.suggestions))]
    UnknownShape {
        name: String,
        suggestions: Vec<String>,
    },

    /// Seat count outside `1..=max`
    #[error("seat count {count} is out of range (expected 1..={max})")]
    InvalidSeatCount { count: i64, max: u32 },

    /// Non-positive or non-finite table dimension
    #[error("table {field} must be a positive number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
}

impl LayoutError {
    /// Create an unknown shape error with suggestions
    pub fn unknown_shape(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownShape {
            name: name.into(),
            suggestions,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownShape { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}
