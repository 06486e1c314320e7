//! Validation error types

use std::fmt;

/// Validation error for client input
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field is absent
    Missing { field: &'static str },

    /// Value doesn't match the required format (e.g., integer id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body or query string could not be decoded into the expected shape
    Malformed { location: &'static str, message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { location, message } => {
                write!(f, "invalid {}: {}", location, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Input that checks its own invariants after decoding
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Reject NUL characters, which PostgreSQL TEXT columns cannot store.
pub fn reject_nul(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must not contain NUL characters",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "must be an integer",
        };
        assert_eq!(err.to_string(), "id: must be an integer");

        let err = ValidationError::Missing { field: "id" };
        assert_eq!(err.to_string(), "id is required");
    }

    #[test]
    fn nul_is_rejected() {
        assert!(reject_nul("title", "plain").is_ok());
        let err = reject_nul("title", "a\0b").unwrap_err();
        assert_eq!(err.to_string(), "title: must not contain NUL characters");
    }

    #[test]
    fn malformed_names_location() {
        let err = ValidationError::Malformed {
            location: "request body",
            message: "missing field `title`".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid request body: missing field `title`"
        );
    }
}
