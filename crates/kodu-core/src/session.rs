//! Bearer-token session handling.
//!
//! # Design
//! - Claims are read with `jsonwebtoken`; the client holds no signing key, so
//!   signature checks stay with the backend.
//! - Expiry is evaluated against a caller-supplied clock so the same code runs
//!   in wasm (no `SystemTime`) and natively.
//! - Storage is behind [`TokenStore`]; the UI backs it with local storage and
//!   the CLI with a token file.

use std::cell::RefCell;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use kodu_api_models::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key holding the bearer token in the browser.
pub const TOKEN_KEY: &str = "token";

/// Claims the backend encodes in its bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Id of the logged-in user.
    pub user_id: String,
    /// Role of the logged-in user.
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Expiry as seconds since the Unix epoch.
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Issue time as seconds since the Unix epoch.
    pub iat: Option<i64>,
}

/// Errors raised while reading, storing or validating a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The token could not be decoded into [`Claims`].
    #[error("malformed bearer token: {detail}")]
    Malformed {
        /// Decoder error detail.
        detail: String,
    },
    /// The token's `exp` claim lies in the past.
    #[error("session expired")]
    Expired,
    /// The token could not be persisted or removed.
    #[error("token storage failed: {detail}")]
    Storage {
        /// Storage error detail.
        detail: String,
    },
}

/// Authenticated session derived from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    /// Decode the claims carried by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] when the token is not a JWT or its
    /// payload lacks the expected claims.
    pub fn from_token(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(SessionError::Malformed {
                detail: "empty token".to_string(),
            });
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        let data = decode::<Claims>(trimmed, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|err| SessionError::Malformed {
                detail: err.to_string(),
            })?;
        Ok(Self {
            token: trimmed.to_string(),
            claims: data.claims,
        })
    }

    /// Raw bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Decoded claims.
    #[must_use]
    pub const fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Id of the logged-in user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.claims.user_id
    }

    /// Role of the logged-in user.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.claims.role
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Whether the token has expired at `now_secs`. Tokens without `exp`
    /// never expire client-side.
    #[must_use]
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.claims.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Persistent home of the bearer token.
pub trait TokenStore {
    /// Read the stored token, if any.
    fn load(&self) -> Option<String>;

    /// Replace the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the backing store rejects the write.
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self);
}

/// In-process token store, used by tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Where an unauthenticated view must send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRedirect {
    /// The login page.
    Login,
}

/// Resolve the current session before a protected view fetches anything.
///
/// A missing token redirects to login. Malformed or expired tokens are also
/// removed from the store so the next visit starts clean.
///
/// # Errors
///
/// Returns [`AuthRedirect::Login`] whenever no usable session exists.
pub fn resolve_session<S>(store: &S, now_secs: i64) -> Result<Session, AuthRedirect>
where
    S: TokenStore + ?Sized,
{
    let Some(token) = store.load().filter(|token| !token.trim().is_empty()) else {
        return Err(AuthRedirect::Login);
    };
    match Session::from_token(token) {
        Ok(session) if !session.is_expired(now_secs) => Ok(session),
        _ => {
            store.clear();
            Err(AuthRedirect::Login)
        }
    }
}

/// Replace any stored token with the one returned by a successful login.
///
/// # Errors
///
/// Returns [`SessionError::Malformed`] for undecodable tokens (nothing is
/// stored) or [`SessionError::Storage`] when persisting fails.
pub fn establish<S>(store: &S, token: &str) -> Result<Session, SessionError>
where
    S: TokenStore + ?Sized,
{
    let session = Session::from_token(token)?;
    store.clear();
    store.save(session.token())?;
    Ok(session)
}

/// Forget the stored token.
pub fn logout<S>(store: &S)
where
    S: TokenStore + ?Sized,
{
    store.clear();
}
