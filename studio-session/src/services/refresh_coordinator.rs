use std::sync::Arc;

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::app_state::{AppState, TokenStoreType};
use crate::domain::{RefreshRequestBody, TokenPair};
use crate::errors::ClientError;
use crate::routes::refresh::HttpSessionTransport;
use crate::services::events::SessionEvent;
use crate::services::http_client::{ApiRequest, ApiResponse, HttpClient, ResponseInterceptor};
use crate::services::session_store;

#[derive(Debug)]
pub enum RetryDecision {
    /// Re-issue this (rewritten) request once.
    Retry(ApiRequest),
    /// The session is beyond repair; tear it down and reject with this error.
    Terminate(ClientError),
    /// Reject with this error, nothing else to do.
    PassThrough(ClientError),
}

/// What the coordinator needs from the HTTP layer.
#[async_trait::async_trait]
pub trait SessionTransport: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError>;
    async fn set_default_authorization(&self, token: &str) -> Result<(), ClientError>;
    async fn clear_default_authorization(&self);
}

pub type RefreshOutcome = Result<TokenPair, Arc<ClientError>>;
type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Recovers requests that failed with `401 token_not_valid`.
///
/// At most one refresh call is in flight: the first caller installs a shared
/// future in `pending` under the lock, later callers await that same future.
/// The future empties `pending` itself once the refresh has finished, on
/// success and on failure.
pub struct RefreshCoordinator {
    state: AppState,
    pending: Arc<Mutex<Option<PendingRefresh>>>,
}

impl RefreshCoordinator {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Logout is refreshed and re-issued with the new refresh token in its
    /// body. A rejected refresh call ends the session. Anything else is
    /// refreshed and re-issued once while the stored refresh token is unexpired.
    pub async fn handle_auth_failure(
        &self,
        transport: Arc<dyn SessionTransport>,
        request: &ApiRequest,
        error: ClientError,
    ) -> RetryDecision {
        if !error.is_token_not_valid() {
            return RetryDecision::PassThrough(error);
        }

        let endpoints = self.state.config.endpoints();
        if request.targets(&endpoints.logout) {
            return self.heal_logout(transport, request, error).await;
        }
        if request.targets(&endpoints.refresh) {
            return RetryDecision::Terminate(error);
        }

        let now = Utc::now().timestamp();
        let refresh_token =
            match session_store::usable_refresh_token(&self.state.token_store, now).await {
                Ok(Some(token)) => token,
                Ok(None) => return RetryDecision::PassThrough(error),
                Err(e) => {
                    log::warn!("could not read refresh token: {e}");
                    return RetryDecision::PassThrough(error);
                }
            };

        match self.refresh(transport, refresh_token).await {
            Ok(pair) => retry_with(request, &pair.access, None),
            Err(e) => RetryDecision::PassThrough(ClientError::Refresh(e)),
        }
    }

    async fn heal_logout(
        &self,
        transport: Arc<dyn SessionTransport>,
        request: &ApiRequest,
        error: ClientError,
    ) -> RetryDecision {
        let refresh_token = match session_store::refresh_token(&self.state.token_store).await {
            Ok(Some(token)) => token,
            Ok(None) => return RetryDecision::PassThrough(error),
            Err(e) => {
                log::warn!("could not read refresh token: {e}");
                return RetryDecision::PassThrough(error);
            }
        };

        match self.refresh(transport, refresh_token).await {
            Ok(pair) => {
                let body = RefreshRequestBody {
                    refresh: pair.refresh.clone(),
                };
                match serde_json::to_value(body) {
                    Ok(body) => retry_with(request, &pair.access, Some(body)),
                    Err(e) => RetryDecision::PassThrough(e.into()),
                }
            }
            Err(e) => RetryDecision::PassThrough(ClientError::Refresh(e)),
        }
    }

    /// Join the refresh in flight, or start one with `refresh_token`.
    pub async fn refresh(
        &self,
        transport: Arc<dyn SessionTransport>,
        refresh_token: String,
    ) -> RefreshOutcome {
        let pending = {
            let mut slot = self.pending.lock().await;
            match slot.as_ref() {
                Some(pending) => {
                    log::debug!("joining in-flight token refresh");
                    pending.clone()
                }
                None => {
                    log::debug!("starting token refresh");
                    let pending = run_refresh(
                        self.state.token_store.clone(),
                        self.pending.clone(),
                        transport,
                        refresh_token,
                    )
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    pub async fn is_refreshing(&self) -> bool {
        self.pending.lock().await.is_some()
    }

    /// Forced logout after an unrecoverable refresh failure.
    pub async fn terminate_session(&self, transport: &dyn SessionTransport) {
        log::warn!("refresh token rejected, ending session");

        transport.clear_default_authorization().await;
        let redirect_from = self.state.events.current_path().await;
        if let Err(e) = session_store::wipe_and_remember(&self.state.token_store, redirect_from).await {
            log::warn!("could not wipe token store: {e}");
        }
        self.state.events.emit(SessionEvent::Navigate {
            path: self.state.config.login_page_path().to_owned(),
        });
    }
}

async fn run_refresh(
    token_store: TokenStoreType,
    slot: Arc<Mutex<Option<PendingRefresh>>>,
    transport: Arc<dyn SessionTransport>,
    refresh_token: String,
) -> RefreshOutcome {
    let outcome = async {
        let pair = transport.refresh(&refresh_token).await?;
        session_store::persist_refreshed(&token_store, &pair).await?;
        transport.set_default_authorization(&pair.access).await?;
        Ok::<_, ClientError>(pair)
    }
    .await;

    slot.lock().await.take();

    match outcome {
        Ok(pair) => {
            log::info!("access token refreshed");
            Ok(pair)
        }
        Err(e) => {
            log::warn!("token refresh failed: {e}");
            Err(Arc::new(e))
        }
    }
}

fn retry_with(request: &ApiRequest, access: &str, body: Option<serde_json::Value>) -> RetryDecision {
    let mut retry = request.clone();
    if let Err(e) = retry.set_bearer(access) {
        return RetryDecision::PassThrough(e);
    }
    if body.is_some() {
        retry.body = body;
    }
    RetryDecision::Retry(retry)
}

#[async_trait::async_trait]
impl ResponseInterceptor for RefreshCoordinator {
    async fn on_response(
        &self,
        client: &HttpClient,
        request: &ApiRequest,
        outcome: Result<ApiResponse, ClientError>,
    ) -> Result<ApiResponse, ClientError> {
        let error = match outcome {
            Ok(response) => return Ok(response),
            Err(e) if !e.is_token_not_valid() => return Err(e),
            Err(e) => e,
        };

        let transport: Arc<dyn SessionTransport> = Arc::new(HttpSessionTransport::new(
            client.clone(),
            self.state.config.endpoints().refresh.clone(),
        ));
        match self
            .handle_auth_failure(transport.clone(), request, error)
            .await
        {
            RetryDecision::Retry(retry) => client.execute(retry).await,
            RetryDecision::Terminate(error) => {
                self.terminate_session(transport.as_ref()).await;
                Err(error)
            }
            RetryDecision::PassThrough(error) => Err(error),
        }
    }
}
