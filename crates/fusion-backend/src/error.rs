//! # Backend Error Types
//!
//! Error types for the tree store, catalog and identity provider.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Backend Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Tree / Catalog │  │       Identity          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  InvalidPath    │  │  InvalidCredentials     │ │
//! │  │  ConfigLoad...  │  │  NotFound       │  │  EmailAlreadyInUse      │ │
//! │  │  ConfigSave...  │  │  Snapshot       │  │  UserNotFound, Token    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │       I/O       │  │   Validation    │                              │
//! │  │  Io, Json       │  │ (fusion-core)   │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fusion_core::ValidationError;
use thiserror::Error;

/// Result type alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors raised by the catalog and identity collaborators.
#[derive(Debug, Error)]
pub enum BackendError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid backend configuration.
    #[error("Invalid backend configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Tree / Catalog Errors
    // =========================================================================
    /// A path segment is not a legal tree key.
    #[error("Invalid tree path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Catalog record not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Snapshot file could not be read or written.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// The tree store a watcher was attached to has been dropped.
    #[error("Tree store closed")]
    StoreClosed,

    // =========================================================================
    // Identity Errors
    // =========================================================================
    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Sign-up with an email that already has an account.
    #[error("An account already exists for {0}")]
    EmailAlreadyInUse(String),

    /// No account with this uid.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Anonymous sign-in is turned off.
    #[error("Anonymous sign-in is disabled")]
    AnonymousDisabled,

    /// ID token failed verification.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Password hashing or token signing failed.
    #[error("Identity provider error: {0}")]
    Identity(String),

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackendError {
    /// Shorthand for [`BackendError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        BackendError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Returns true for failures caused by what the user typed.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BackendError::InvalidCredentials
                | BackendError::EmailAlreadyInUse(_)
                | BackendError::AnonymousDisabled
                | BackendError::Validation(_)
        )
    }
}

impl From<toml::de::Error> for BackendError {
    fn from(err: toml::de::Error) -> Self {
        BackendError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for BackendError {
    fn from(err: toml::ser::Error) -> Self {
        BackendError::ConfigSaveFailed(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        BackendError::InvalidToken(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BackendError::not_found("Restaurant", "r9").to_string(),
            "Restaurant not found: r9"
        );
        assert_eq!(
            BackendError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_user_errors() {
        assert!(BackendError::InvalidCredentials.is_user_error());
        assert!(BackendError::EmailAlreadyInUse("a@b.co".into()).is_user_error());
        assert!(!BackendError::Snapshot("disk full".into()).is_user_error());
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: BackendError = toml::from_str::<toml::Value>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, BackendError::ConfigLoadFailed(_)));
    }
}
