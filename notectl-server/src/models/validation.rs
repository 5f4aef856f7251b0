//! Validation error types

use std::fmt;

/// Request shape error, raised before any handler logic runs
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Request body is not valid JSON of the expected shape
    Body { reason: String },

    /// Query string has a missing, mistyped or out-of-range value
    Query { reason: String },

    /// Path segment could not be parsed
    Path { field: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body { reason } => write!(f, "invalid request body: {}", reason),
            Self::Query { reason } => write!(f, "invalid query string: {}", reason),
            Self::Path { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Path {
            field: "note_id",
            reason: "expected an integer".into(),
        };
        assert_eq!(err.to_string(), "invalid note_id: expected an integer");
    }
}
