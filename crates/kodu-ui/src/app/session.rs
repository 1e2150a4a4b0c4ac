//! Session context handed to every page.
//!
//! # Design
//! - The token lives in local storage under [`TOKEN_KEY`], stored raw so it
//!   stays readable by anything else on the origin.
//! - Only [`SessionCtx`] writes the token; pages receive the resolved
//!   [`Session`] as a prop.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use js_sys::Date;
use kodu_core::session::{TOKEN_KEY, establish, logout, resolve_session};
use kodu_core::{Session, SessionError, TokenStore};
use yew::Callback;

/// [`TokenStore`] backed by browser local storage.
pub(crate) struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .set_item(TOKEN_KEY, token)
            .map_err(|err| SessionError::Storage {
                detail: format!("{err:?}"),
            })
    }

    fn clear(&self) {
        if let Err(err) = LocalStorage::raw().remove_item(TOKEN_KEY) {
            console::error!("storage operation failed", "remove", TOKEN_KEY, err);
        }
    }
}

/// Current wall-clock time in seconds.
pub(crate) fn now_secs() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let secs = (Date::now() / 1000.0) as i64;
    secs
}

/// Session stored by a previous visit, if still usable.
pub(crate) fn restore() -> Option<Session> {
    resolve_session(&LocalTokenStore, now_secs()).ok()
}

#[derive(Clone, PartialEq)]
pub(crate) struct SessionCtx {
    pub(crate) current: Option<Session>,
    pub(crate) on_change: Callback<Option<Session>>,
}

impl SessionCtx {
    /// Session usable right now; an expired one counts as absent.
    pub(crate) fn active(&self) -> Option<Session> {
        self.current
            .as_ref()
            .filter(|session| !session.is_expired(now_secs()))
            .cloned()
    }

    /// Store the token returned by a login and publish the new session.
    pub(crate) fn sign_in(&self, token: &str) -> Result<Session, SessionError> {
        let session = establish(&LocalTokenStore, token)?;
        self.on_change.emit(Some(session.clone()));
        Ok(session)
    }

    pub(crate) fn sign_out(&self) {
        logout(&LocalTokenStore);
        self.on_change.emit(None);
    }
}
