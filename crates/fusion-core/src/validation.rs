//! # Validation Module
//!
//! Input validation for everything that crosses into FusionCart from outside:
//! tree paths, search boxes and sign-in forms.
//!
//! ## Usage
//! ```rust
//! use fusion_core::validation::{validate_email, validate_tree_key};
//!
//! validate_tree_key("restaurant_1").unwrap();
//! assert!(validate_tree_key("menu.items").is_err());
//! assert!(validate_email("guest@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_SEARCH_QUERY_LENGTH, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Characters the tree store refuses in a key.
pub const FORBIDDEN_KEY_CHARS: [char; 5] = ['.', '#', '$', '[', ']'];

// =============================================================================
// Tree Keys
// =============================================================================

/// Validates one segment of a tree path.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain `.`, `#`, `$`, `[`, `]` or `/`
pub fn validate_tree_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "key".to_string(),
        });
    }

    if let Some(bad) = key
        .chars()
        .find(|c| FORBIDDEN_KEY_CHARS.contains(c) || *c == '/')
    {
        return Err(ValidationError::InvalidFormat {
            field: "key".to_string(),
            reason: format!("'{bad}' is not allowed in a key"),
        });
    }

    Ok(())
}

/// Validates a restaurant id before it is used to build a tree path.
pub fn validate_restaurant_id(id: &str) -> ValidationResult<()> {
    validate_tree_key(id).map_err(|err| match err {
        ValidationError::Required { .. } => ValidationError::Required {
            field: "restaurant_id".to_string(),
        },
        ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
            field: "restaurant_id".to_string(),
            reason,
        },
        other => other,
    })
}

// =============================================================================
// Search
// =============================================================================

/// Trims a search query and enforces its length limit.
///
/// An empty result is valid and means "no filter".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Credentials
// =============================================================================

/// Validates an email address shape: `local@domain.tld`, no whitespace.
///
/// ## Example
/// ```rust
/// use fusion_core::validation::validate_email;
///
/// assert!(validate_email("a@b.co").is_ok());
/// assert!(validate_email("").is_err());
/// assert!(validate_email("no-at-sign").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("missing '@'"));
    };

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("malformed address"));
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid("domain must contain a '.'")),
    }
}

/// Validates a password: at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_key() {
        assert!(validate_tree_key("r1").is_ok());
        assert!(validate_tree_key("-NfX2a_b").is_ok());

        assert!(matches!(
            validate_tree_key(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_tree_key("  "),
            Err(ValidationError::Required { .. })
        ));
        for bad in ["a.b", "a#b", "a$b", "a[0]", "a/b"] {
            assert!(
                matches!(validate_tree_key(bad), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_restaurant_id_uses_its_own_field_name() {
        let err = validate_restaurant_id("r.1").unwrap_err();
        assert!(err.to_string().starts_with("restaurant_id"));
        assert_eq!(
            validate_restaurant_id(""),
            Err(ValidationError::Required {
                field: "restaurant_id".to_string()
            })
        );
    }

    #[test]
    fn test_search_query() {
        assert_eq!(validate_search_query("  pizza ").unwrap(), "pizza");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(MAX_SEARCH_QUERY_LENGTH)).is_ok());
        assert!(validate_search_query(&"x".repeat(MAX_SEARCH_QUERY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email(" user@example.com ").is_ok());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@example").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("user@exa mple.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_password() {
        assert!(validate_password("secret").is_ok());
        assert_eq!(
            validate_password("12345"),
            Err(ValidationError::TooShort {
                field: "password".to_string(),
                min: MIN_PASSWORD_LENGTH
            })
        );
        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
    }
}
