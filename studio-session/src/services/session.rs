use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};

use crate::app_state::{AppState, TokenStoreType};
use crate::domain::{AccessClaims, Identity, UpdateUserBody, User};
use crate::errors::{ClientError, LoginError};
use crate::routes;
use crate::services::auth::AuthService;
use crate::services::auth_header::BearerAuthInterceptor;
use crate::services::data_stores::FileTokenStore;
use crate::services::events::{EventBus, SessionEvent};
use crate::services::http_client::HttpClient;
use crate::services::refresh_coordinator::RefreshCoordinator;
use crate::services::session_store;
use crate::services::token_decoder::decode_access_claims;
use crate::utils::Config;

/// One signed-in (or signed-out) user of the backend API.
///
/// Owns the [`HttpClient`] every API call goes through. The client attaches
/// the stored access token to each request and recovers from expired access
/// tokens on its own; see [`RefreshCoordinator`].
pub struct Session {
    state: AppState,
    client: HttpClient,
}

impl Session {
    pub fn new(config: Config, token_store: TokenStoreType) -> Result<Self, ClientError> {
        let state = AppState::new(token_store, Arc::new(EventBus::default()), Arc::new(config));
        Self::from_state(state)
    }

    /// A session persisted in the JSON file named by `config`.
    pub fn with_file_store(config: Config) -> Result<Self, ClientError> {
        let store = FileTokenStore::new(config.token_store_path());
        Self::new(config, Arc::new(RwLock::new(store)))
    }

    pub fn from_state(state: AppState) -> Result<Self, ClientError> {
        let base_url = state.config.api_base_url()?;
        let client = HttpClient::builder(base_url)
            .request_interceptor(Arc::new(BearerAuthInterceptor::new(
                state.token_store.clone(),
            )))
            .response_interceptor(Arc::new(RefreshCoordinator::new(state.clone())))
            .build()?;
        Ok(Self { state, client })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, LoginError> {
        AuthService::login(&self.state, &self.client, username, password).await
    }

    pub async fn login_social(&self, provider: &str, code: &str) -> Result<Identity, LoginError> {
        AuthService::login_social(&self.state, &self.client, provider, code).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        AuthService::logout(&self.state, &self.client).await
    }

    pub async fn identity(&self) -> Result<Option<Identity>, ClientError> {
        Ok(session_store::identity(&self.state.token_store).await?)
    }

    /// Claims of the stored access token, expired or not.
    pub async fn claims(&self) -> Result<Option<AccessClaims>, ClientError> {
        match session_store::access_token(&self.state.token_store).await? {
            Some(token) => Ok(Some(decode_access_claims(&token)?)),
            None => Ok(None),
        }
    }

    /// Whether a refresh token that has not expired yet is stored.
    pub async fn is_authenticated(&self) -> Result<bool, ClientError> {
        let now = Utc::now().timestamp();
        Ok(session_store::usable_refresh_token(&self.state.token_store, now)
            .await?
            .is_some())
    }

    pub async fn take_redirect(&self) -> Result<Option<String>, ClientError> {
        AuthService::take_redirect(&self.state).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.state.events.subscribe()
    }

    /// Tell the session which page the user is on, for the post-login redirect.
    pub async fn set_current_path(&self, path: impl Into<String>) {
        self.state.events.set_current_path(path).await
    }

    pub async fn me(&self) -> Result<User, ClientError> {
        routes::get_me(&self.client, &self.state.config.endpoints().me).await
    }

    pub async fn update_me(&self, patch: &UpdateUserBody) -> Result<User, ClientError> {
        routes::update_me(&self.client, &self.state.config.endpoints().me, patch).await
    }
}
