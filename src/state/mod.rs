use crate::api::ApiClient;
use crate::config::EnvConfig;
use crate::models::AccountInfo;
use crate::storage::{clear_session, load_user_from_storage, save_session, BrowserSession, SessionStore};
use leptos::logging::log;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    /// Stateless apart from its base URL; the token is read per request.
    pub api_client: ApiClient,
    pub config: EnvConfig,
    pub current_user: RwSignal<Option<AccountInfo>>,
    pub authenticated: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_user = load_user_from_storage();
        let has_token = BrowserSession.token().is_some();

        Self {
            api_client: ApiClient::from_env(),
            config: EnvConfig::new(),
            current_user: RwSignal::new(stored_user),
            authenticated: RwSignal::new(has_token),
        }
    }

    pub fn sign_in(&self, token: &str, user: AccountInfo) {
        save_session(token, &user);
        self.current_user.set(Some(user));
        self.authenticated.set(true);
    }

    pub fn sign_out(&self) {
        log!("signing out");
        clear_session();
        self.current_user.set(None);
        self.authenticated.set(false);
    }

    pub fn currency(&self) -> String {
        self.config.currency.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
