//! # Validation Module
//!
//! Input validation for quote items and report metadata.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Parser (parse.rs)                                            │
//! │  └── Unreadable numbers become 0, never an error                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine (engine.rs)                                           │
//! │  └── filament price > 0, weight > 0 (all failures collected)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── quantity ≥ 1                                                      │
//! │  └── text length limits                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use printcost_core::validation::{validate_quantity, validate_client_name};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_client_name("Maria Souza").is_ok());
//! ```

use crate::error::ValidationError;
use crate::MAX_CLIENT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field.
///
/// ## Rules
/// - Must not be blank
/// - At most `max` characters (counted as chars, not bytes)
pub fn validate_item_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates the client name printed on a report.
///
/// Blank is allowed; the report substitutes a default.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_CLIENT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "client name".to_string(),
            max: MAX_CLIENT_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - No upper bound
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
