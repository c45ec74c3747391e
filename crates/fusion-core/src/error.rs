//! # Error Types
//!
//! Domain-specific error types for fusion-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fusion-core errors (this file)                                        │
//! │  ├── CoreError        - Lookup failures around the cart                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fusion-backend errors (separate crate)                                │
//! │  └── BackendError     - Tree store, catalog, identity, config          │
//! │                                                                         │
//! │  Client errors (in app)                                                │
//! │  └── ApiError         - What the presentation layer sees               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself never fails: a rejected add or an absent remove is
//! reported through [`crate::cart::AddOutcome`] / [`crate::cart::RemoveOutcome`],
//! not through these types.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Restaurant id does not resolve to a catalog record.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Menu item name is not on the restaurant's menu.
    #[error("Menu item '{name}' not found for restaurant {restaurant_id}")]
    MenuItemNotFound {
        name: String,
        restaurant_id: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., malformed email, illegal key character).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MenuItemNotFound {
            name: "Pizza".to_string(),
            restaurant_id: "r1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Menu item 'Pizza' not found for restaurant r1"
        );
        assert_eq!(
            CoreError::RestaurantNotFound("r9".into()).to_string(),
            "Restaurant not found: r9"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "restaurant_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
