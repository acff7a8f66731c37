use crate::models::AccountInfo;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

pub(crate) const TOKEN_KEY: &str = "learnhub_token";
pub(crate) const USER_KEY: &str = "learnhub_user";

/// Source of the bearer token attached to authenticated requests.
///
/// Handed to the HTTP transport at construction time so tests can run
/// without a browser storage shim.
pub(crate) trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Reads the token from `localStorage` on every call; no expiry check.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserSession;

impl SessionStore for BrowserSession {
    fn token(&self) -> Option<String> {
        local_storage()
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
            .filter(|t| !t.trim().is_empty())
    }
}

/// In-memory session for host tests.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemorySession {
    token: Arc<RwLock<Option<String>>>,
}

impl MemorySession {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }
}

/// `Authorization` header value for a token, if any.
pub(crate) fn bearer_header(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"))
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Persist a fresh login. The login page is the only writer.
pub(crate) fn save_session(token: &str, user: &AccountInfo) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
    save_json_to_storage(USER_KEY, user);
}

pub(crate) fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

pub(crate) fn load_user_from_storage() -> Option<AccountInfo> {
    load_json_from_storage(USER_KEY)
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}
