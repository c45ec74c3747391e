//! # Identity Provider
//!
//! Email/password and anonymous sign-in, producing [`UserHandle`]s that
//! carry a signed ID token.
//!
//! ## Sign-in Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     LocalIdentityProvider                               │
//! │                                                                         │
//! │  sign_up(email, pw) ──► validate ──► argon2 hash ──► accounts[email]   │
//! │                                                      │                  │
//! │  sign_in(email, pw) ──► accounts[email] ──► verify ──┤                  │
//! │                                                      ▼                  │
//! │                                   TokenSigner::issue (HS256 JWT)        │
//! │                                   sub=uid email anonymous iat exp jti   │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                                 UserHandle              │
//! │                                                                         │
//! │  sign_out(handle) ──► token jti revoked                                 │
//! │  delete_account(handle) ──► account removed + token revoked             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fusion_core::validation::{validate_email, validate_password};
use fusion_core::UserHandle;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::IdentitySettings;
use crate::error::{BackendError, BackendResult};

// =============================================================================
// Provider Trait
// =============================================================================

/// Authentication backend.
///
/// Injected into the client as `Arc<dyn IdentityProvider>`.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_email(&self, email: &str, password: &str) -> BackendResult<UserHandle>;

    /// Creates an account and signs it in.
    async fn sign_up_with_email(&self, email: &str, password: &str) -> BackendResult<UserHandle>;

    /// Signs in a guest with a fresh uid.
    async fn sign_in_anonymously(&self) -> BackendResult<UserHandle>;

    /// Invalidates the handle's ID token.
    async fn sign_out(&self, user: &UserHandle) -> BackendResult<()>;

    /// Removes the account behind the handle.
    async fn delete_account(&self, user: &UserHandle) -> BackendResult<()>;

    /// Verifies an ID token and returns its claims.
    async fn verify_token(&self, token: &str) -> BackendResult<IdTokenClaims>;
}

// =============================================================================
// Tokens
// =============================================================================

/// Clock skew tolerated when checking `exp`.
const TOKEN_LEEWAY_SECS: u64 = 60;

/// ID token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// User id.
    pub sub: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub anonymous: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Token id, used for revocation.
    pub jti: String,
}

/// HS256 token signer.
pub struct TokenSigner {
    secret: String,
    lifetime_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        TokenSigner {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Issues a token for `uid`.
    pub fn issue(&self, uid: &str, email: Option<&str>, anonymous: bool) -> BackendResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = IdTokenClaims {
            sub: uid.to_string(),
            email: email.map(str::to_string),
            anonymous,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| BackendError::Identity(format!("Failed to sign token: {}", e)))
    }

    /// Validates signature and expiry.
    pub fn verify(&self, token: &str) -> BackendResult<IdTokenClaims> {
        let mut validation = Validation::default();
        validation.leeway = TOKEN_LEEWAY_SECS;

        let data = decode::<IdTokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

fn hash_password(password: &str) -> BackendResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BackendError::Identity(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        warn!("Stored password hash is malformed");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Local Provider
// =============================================================================

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Directory {
    /// Email accounts keyed by lower-cased email.
    accounts: HashMap<String, Account>,
    /// Anonymous uids and when they were created.
    guests: HashMap<String, DateTime<Utc>>,
    /// Token ids invalidated by sign-out or deletion, with their `exp`.
    revoked: HashMap<String, i64>,
}

impl Directory {
    fn has_uid(&self, uid: &str) -> bool {
        self.guests.contains_key(uid) || self.accounts.values().any(|a| a.uid == uid)
    }

    /// Records a revoked token id.
    ///
    /// Entries whose token has expired are dropped here: signature
    /// validation already rejects those tokens.
    fn revoke(&mut self, jti: String, exp: i64) {
        let cutoff = Utc::now().timestamp() - TOKEN_LEEWAY_SECS as i64;
        self.revoked.retain(|_, expires| *expires >= cutoff);
        self.revoked.insert(jti, exp);
    }
}

/// In-process identity provider.
pub struct LocalIdentityProvider {
    signer: TokenSigner,
    allow_anonymous: bool,
    directory: RwLock<Directory>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl LocalIdentityProvider {
    pub fn new(settings: &IdentitySettings) -> Self {
        LocalIdentityProvider {
            signer: TokenSigner::new(settings.token_secret.clone(), settings.token_lifetime_secs),
            allow_anonymous: settings.allow_anonymous,
            directory: RwLock::new(Directory::default()),
        }
    }

    /// Number of email accounts.
    pub async fn account_count(&self) -> usize {
        self.directory.read().await.accounts.len()
    }

    fn handle(
        &self,
        uid: &str,
        email: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> BackendResult<UserHandle> {
        Ok(UserHandle {
            uid: uid.to_string(),
            email: email.map(str::to_string),
            is_anonymous: email.is_none(),
            id_token: self.signer.issue(uid, email, email.is_none())?,
            created_at,
        })
    }

    async fn revoke(&self, user: &UserHandle) {
        if let Ok(claims) = self.signer.verify(&user.id_token) {
            self.directory.write().await.revoke(claims.jti, claims.exp);
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in_with_email(&self, email: &str, password: &str) -> BackendResult<UserHandle> {
        validate_email(email)?;
        let key = normalize_email(email);

        let account = self.directory.read().await.accounts.get(&key).cloned();
        let Some(account) = account else {
            debug!("Sign-in for unknown email");
            return Err(BackendError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash) {
            debug!(uid = %account.uid, "Sign-in with wrong password");
            return Err(BackendError::InvalidCredentials);
        }

        info!(uid = %account.uid, "User signed in");
        self.handle(&account.uid, Some(&account.email), account.created_at)
    }

    async fn sign_up_with_email(&self, email: &str, password: &str) -> BackendResult<UserHandle> {
        validate_email(email)?;
        validate_password(password)?;
        let key = normalize_email(email);

        let password_hash = hash_password(password)?;
        let account = {
            let mut directory = self.directory.write().await;
            if directory.accounts.contains_key(&key) {
                return Err(BackendError::EmailAlreadyInUse(key));
            }
            let account = Account {
                uid: Uuid::new_v4().to_string(),
                email: key.clone(),
                password_hash,
                created_at: Utc::now(),
            };
            directory.accounts.insert(key, account.clone());
            account
        };

        info!(uid = %account.uid, "Account created");
        self.handle(&account.uid, Some(&account.email), account.created_at)
    }

    async fn sign_in_anonymously(&self) -> BackendResult<UserHandle> {
        if !self.allow_anonymous {
            return Err(BackendError::AnonymousDisabled);
        }

        let uid = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        self.directory
            .write()
            .await
            .guests
            .insert(uid.clone(), created_at);

        info!(uid = %uid, "Guest signed in");
        self.handle(&uid, None, created_at)
    }

    async fn sign_out(&self, user: &UserHandle) -> BackendResult<()> {
        self.revoke(user).await;
        info!(uid = %user.uid, "User signed out");
        Ok(())
    }

    /// Deletes the account the handle's token was issued to.
    ///
    /// The token must verify and name `user.uid`; a handle built by hand
    /// or signed out earlier is refused.
    async fn delete_account(&self, user: &UserHandle) -> BackendResult<()> {
        let claims = self.signer.verify(&user.id_token)?;
        if claims.sub != user.uid {
            warn!(uid = %user.uid, "Delete refused: token issued to another user");
            return Err(BackendError::InvalidToken(
                "token does not belong to this user".into(),
            ));
        }

        {
            let mut directory = self.directory.write().await;
            if !directory.has_uid(&user.uid) {
                return Err(BackendError::UserNotFound(user.uid.clone()));
            }
            if directory.revoked.contains_key(&claims.jti) {
                return Err(BackendError::InvalidToken("token has been revoked".into()));
            }

            directory.guests.remove(&user.uid);
            directory.accounts.retain(|_, account| account.uid != user.uid);
            directory.revoke(claims.jti, claims.exp);
        }

        info!(uid = %user.uid, "Account deleted");
        Ok(())
    }

    async fn verify_token(&self, token: &str) -> BackendResult<IdTokenClaims> {
        let claims = self.signer.verify(token)?;

        let directory = self.directory.read().await;
        if directory.revoked.contains_key(&claims.jti) {
            return Err(BackendError::InvalidToken("token has been revoked".into()));
        }
        if !directory.has_uid(&claims.sub) {
            return Err(BackendError::UserNotFound(claims.sub));
        }

        Ok(claims)
    }
}
