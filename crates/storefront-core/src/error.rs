//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront-db errors                                                   │
//! │  └── DbError          - Database failures, including every not-found    │
//! │                                                                         │
//! │  storefront-api errors                                                  │
//! │  └── ApiError         - What HTTP callers see ({"error": ...})          │
//! │                                                                         │
//! │  storefront-admin errors                                                │
//! │  └── ClientError      - Transport / decode / rejected responses         │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → ApiError → {error} → ClientError     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The server returns the message verbatim in `{"error": ...}`; the admin
/// console shows it verbatim in a toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: i64 },

    /// Invalid format (e.g., non-numeric price, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field name is not part of the form.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::BelowMinimum {
            field: "countInStock".to_string(),
            min: 0,
        };
        assert_eq!(err.to_string(), "countInStock must be at least 0");

        let err = ValidationError::invalid("price", "not a number");
        assert_eq!(err.to_string(), "price has invalid format: not a number");
    }
}
