//! # API Error Type
//!
//! Unified error type for client commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in FusionCart                             │
//! │                                                                         │
//! │  Presentation                Client commands                            │
//! │  ────────────                ───────────────                            │
//! │                                                                         │
//! │  get_menu("r1", "pizza")                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Backend Error? ─── BackendError::NotFound ───────┐             │  │
//! │  │         │                                          │             │  │
//! │  │  Core Error? ─── CoreError::MenuItemNotFound ──── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code = "NOT_FOUND", e.message = "Restaurant not found: r1"           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected cart add is not an error; it is reported in the command's
//! response so the UI can explain why nothing happened.

use fusion_backend::BackendError;
use fusion_core::{CoreError, ValidationError};
use serde::Serialize;

/// Error returned from client commands.
///
/// ```json
/// {
///   "code": "AUTH_FAILED",
///   "message": "Invalid email or password"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Restaurant, menu item or user not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Wrong credentials or sign-in method unavailable
    AuthFailed,

    /// No signed-in user, or the session token is no longer valid
    Unauthenticated,

    /// Resource already exists (duplicate sign-up)
    Conflict,

    /// Catalog could not be read
    CatalogError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates the error for commands that need a signed-in user.
    pub fn unauthenticated() -> Self {
        ApiError::new(ErrorCode::Unauthenticated, "No user is signed in")
    }
}

/// Converts backend errors to API errors.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            BackendError::UserNotFound(uid) => ApiError::not_found("User", &uid),
            BackendError::InvalidPath { .. } => ApiError::validation(err.to_string()),
            BackendError::Validation(e) => ApiError::validation(e.to_string()),
            BackendError::InvalidCredentials | BackendError::AnonymousDisabled => {
                ApiError::new(ErrorCode::AuthFailed, err.to_string())
            }
            BackendError::EmailAlreadyInUse(_) => ApiError::new(ErrorCode::Conflict, err.to_string()),
            BackendError::InvalidToken(_) => {
                ApiError::new(ErrorCode::Unauthenticated, "Session expired, sign in again")
            }
            BackendError::Snapshot(_)
            | BackendError::StoreClosed
            | BackendError::Io(_)
            | BackendError::Json(_) => {
                // Log the actual error but return a generic message
                tracing::error!("Catalog access failed: {}", err);
                ApiError::new(ErrorCode::CatalogError, "Catalog is unavailable")
            }
            BackendError::InvalidConfig(_)
            | BackendError::ConfigLoadFailed(_)
            | BackendError::ConfigSaveFailed(_) => {
                tracing::error!("Configuration error: {}", err);
                ApiError::internal(err.to_string())
            }
            BackendError::Identity(e) => {
                tracing::error!("Identity provider error: {}", e);
                ApiError::internal("Sign-in is temporarily unavailable")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RestaurantNotFound(id) => ApiError::not_found("Restaurant", &id),
            CoreError::MenuItemNotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
