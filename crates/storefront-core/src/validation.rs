//! # Validation Module
//!
//! Input validation utilities for Storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin console                                                 │
//! │  └── Input widgets only (numeric inputs, select). No required checks.   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API handler (Rust)                                            │
//! │  ├── Multipart / JSON decoding                                          │
//! │  └── THIS MODULE: field rules                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL / CHECK (>= 0) constraints                                │
//! │  ├── UNIQUE (category name, user email)                                 │
//! │  └── Foreign key (product → category)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_name, parse_count};
//!
//! assert!(validate_name("name", "Shirt").is_ok());
//! assert_eq!(parse_count("countInStock", "5").unwrap(), 5);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required display name (product, brand, category, username).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(value.to_string())
}

/// Validates a required free-text field (product description).
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<String> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_string())
}

/// Validates an email address.
///
/// ## Rules
/// - One `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
///
/// Lower-cases the address so uniqueness is case-insensitive.
pub fn validate_email(value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .find('.')
                    .map(|dot| dot > 0 && dot < domain.len() - 1)
                    .unwrap_or(false)
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::invalid("email", "must be a valid email address"));
    }

    Ok(value.to_lowercase())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a non-negative price from decimal text.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_price;
///
/// assert_eq!(parse_price("20").unwrap().cents(), 2000);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("").is_err());
/// ```
pub fn parse_price(value: &str) -> ValidationResult<Money> {
    let price: Money = value.parse()?;
    if price.is_negative() {
        return Err(ValidationError::BelowMinimum {
            field: "price".to_string(),
            min: 0,
        });
    }
    Ok(price)
}

/// Parses a non-negative integer count (`quantity`, `countInStock`).
///
/// A whole-valued decimal such as `"5.0"` is accepted, since browsers
/// submit numeric inputs that way.
pub fn parse_count(field: &str, value: &str) -> ValidationResult<i64> {
    let text = value.trim();
    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    let count = match text.parse::<i64>() {
        Ok(count) => count,
        Err(_) => whole_decimal(text)
            .ok_or_else(|| ValidationError::invalid(field, "must be a whole number"))?,
    };

    if count < 0 {
        return Err(ValidationError::BelowMinimum {
            field: field.to_string(),
            min: 0,
        });
    }

    Ok(count)
}

/// Accepts `"5."`, `"5.0"`, `"5.00"` as 5.
fn whole_decimal(text: &str) -> Option<i64> {
    let (major, minor) = text.split_once('.')?;
    if !minor.chars().all(|c| c == '0') {
        return None;
    }
    major.parse().ok()
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates an entity id taken from a route or form field.
///
/// Ids are opaque strings; the only requirement is that they are present
/// and contain no whitespace.
pub fn validate_id(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid(field, "must not contain whitespace"));
    }
    Ok(value.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
