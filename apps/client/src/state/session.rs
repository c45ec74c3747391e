//! # Session State
//!
//! Who is signed in, and how the last sign-in attempt went.
//!
//! ## Auth Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Initial ──sign_in/sign_up──► Loading ──ok──► Success (user = Some)    │
//! │      ▲                            │                  │                  │
//! │      │                            └──err──► Error(message)              │
//! │      │                                               │                  │
//! │      └──────────── sign_out / delete_account ────────┘                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fusion_backend::{BackendResult, IdentityProvider};
use fusion_core::{AuthState, UserHandle};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::ApiError;

/// Published session: auth progress plus the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub auth: AuthState,
    pub user: Option<UserHandle>,
}

/// Observable session backed by an injected identity provider.
pub struct SessionState {
    identity: Arc<dyn IdentityProvider>,
    tx: watch::Sender<Session>,
}

impl SessionState {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        let (tx, _) = watch::channel(Session::default());
        SessionState { identity, tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    pub fn auth_state(&self) -> AuthState {
        self.tx.borrow().auth.clone()
    }

    pub fn current_user(&self) -> Option<UserHandle> {
        self.tx.borrow().user.clone()
    }

    fn set_auth(&self, auth: AuthState) {
        self.tx.send_if_modified(|session| {
            if session.auth == auth {
                return false;
            }
            session.auth = auth;
            true
        });
    }

    /// Runs a provider call, publishing `Loading` and then its outcome.
    async fn attempt<F>(&self, call: F) -> Result<UserHandle, ApiError>
    where
        F: Future<Output = BackendResult<UserHandle>>,
    {
        self.set_auth(AuthState::Loading);

        match call.await {
            Ok(user) => {
                info!(uid = %user.uid, anonymous = user.is_anonymous, "Session started");
                self.tx.send_replace(Session {
                    auth: AuthState::Success,
                    user: Some(user.clone()),
                });
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "Sign-in failed");
                self.set_auth(AuthState::Error(err.to_string()));
                Err(err.into())
            }
        }
    }

    pub async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserHandle, ApiError> {
        self.attempt(self.identity.sign_in_with_email(email, password))
            .await
    }

    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserHandle, ApiError> {
        self.attempt(self.identity.sign_up_with_email(email, password))
            .await
    }

    pub async fn sign_in_anonymously(&self) -> Result<UserHandle, ApiError> {
        self.attempt(self.identity.sign_in_anonymously()).await
    }

    /// Ends the session. Signing out with nobody signed in is a no-op.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        if let Some(user) = self.current_user() {
            if let Err(err) = self.identity.sign_out(&user).await {
                warn!(uid = %user.uid, error = %err, "Provider sign-out failed");
            }
            info!(uid = %user.uid, "Signed out");
        }
        self.tx.send_replace(Session::default());
        Ok(())
    }

    /// Deletes the signed-in account and ends the session.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let user = self.current_user().ok_or_else(ApiError::unauthenticated)?;

        self.set_auth(AuthState::Loading);
        match self.identity.delete_account(&user).await {
            Ok(()) => {
                info!(uid = %user.uid, "Account deleted");
                self.tx.send_replace(Session::default());
                Ok(())
            }
            Err(err) => {
                warn!(uid = %user.uid, error = %err, "Account deletion failed");
                self.set_auth(AuthState::Error(err.to_string()));
                Err(err.into())
            }
        }
    }
}
