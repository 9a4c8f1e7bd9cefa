//! # Error Types
//!
//! Domain-specific error types for printcost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  printcost-core errors (this file)                                     │
//! │  ├── ValidationError   - One rejected input                            │
//! │  ├── ValidationErrors  - Every rejected input of one calculation       │
//! │  └── CoreError         - Quote manipulation failures                   │
//! │                                                                         │
//! │  printcost-db errors (separate crate)                                  │
//! │  └── DbError           - Store failures                                │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError          - What the user sees                            │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → AppError → stderr          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed numeric text is never an error: the parser degrades it to zero.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quote manipulation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A position outside the quote was addressed.
    ///
    /// ## When This Occurs
    /// - Removing item 5 from a quote of 3 items
    /// - Changing the quantity of an item that was already removed
    #[error("Position {position} is out of range (quote has {len} items)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the engine and by the quote item constructors. The engine
/// collects every triggered error into [`ValidationErrors`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be strictly greater than zero.
    #[error("{field} must be > 0")]
    MustBePositive { field: String },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A computed amount overflowed the representable range.
    ///
    /// ## When This Occurs
    /// - Weight and filament price both around `1e308`
    #[error("{field} is too large to calculate")]
    TooLarge { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Creates a MustBePositive error for the given field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }
}

// =============================================================================
// Validation Errors (collected)
// =============================================================================

/// Every validation failure of a single calculation, in evaluation order.
///
/// ## Invariant
/// Never empty when returned as an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps the collected errors, or returns `None` when nothing failed.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(ValidationErrors(errors))
        }
    }

    /// Returns the individual errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Number of failed checks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a value produced by [`ValidationErrors::from_vec`].
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::must_be_positive("filament price").to_string(),
            "filament price must be > 0"
        );
        assert_eq!(
            ValidationError::must_be_positive("weight").to_string(),
            "weight must be > 0"
        );

        let err = ValidationError::TooLong {
            field: "item name".to_string(),
            max: 120,
        };
        assert_eq!(err.to_string(), "item name must be at most 120 characters");

        let err = ValidationError::TooLarge {
            field: "Material".to_string(),
        };
        assert_eq!(err.to_string(), "Material is too large to calculate");
    }

    #[test]
    fn test_validation_errors_join_messages() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationError::must_be_positive("filament price"),
            ValidationError::must_be_positive("weight"),
        ])
        .unwrap();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "filament price must be > 0; weight must be > 0"
        );
    }

    #[test]
    fn test_empty_error_list_is_none() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_position_error_message() {
        let err = CoreError::PositionOutOfRange { position: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Position 4 is out of range (quote has 2 items)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "material".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
