//! # Auth Commands
//!
//! Sign-in, sign-up and account commands over [`SessionState`].
//!
//! Form input is validated here before the identity provider is called, so
//! a malformed email never shows up as an `Error` auth state.

use fusion_core::validation::{validate_email, validate_password};
use fusion_core::{AuthState, UserHandle};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;

/// Signs in with email and password.
pub async fn sign_in_with_email(
    session: &SessionState,
    email: String,
    password: String,
) -> Result<UserHandle, ApiError> {
    debug!(email = %email, "sign_in_with_email command");
    let email = email.trim();
    validate_email(email)?;

    session.sign_in_with_email(email, &password).await
}

/// Creates an account and signs it in.
///
/// ## Validation
/// - Email must look like `local@domain.tld`
/// - Password must be at least six characters
pub async fn sign_up_with_email(
    session: &SessionState,
    email: String,
    password: String,
) -> Result<UserHandle, ApiError> {
    debug!(email = %email, "sign_up_with_email command");
    let email = email.trim();
    validate_email(email)?;
    validate_password(&password)?;

    session.sign_up_with_email(email, &password).await
}

/// Starts a guest session.
pub async fn sign_in_anonymously(session: &SessionState) -> Result<UserHandle, ApiError> {
    debug!("sign_in_anonymously command");
    session.sign_in_anonymously().await
}

pub async fn sign_out(session: &SessionState) -> Result<(), ApiError> {
    debug!("sign_out command");
    session.sign_out().await
}

/// Permanently deletes the signed-in account.
pub async fn delete_account(session: &SessionState) -> Result<(), ApiError> {
    debug!("delete_account command");
    session.delete_account().await
}

pub fn current_user(session: &SessionState) -> Option<UserHandle> {
    session.current_user()
}

pub fn auth_state(session: &SessionState) -> AuthState {
    session.auth_state()
}
