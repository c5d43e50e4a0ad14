use crate::app_state::AppState;
use crate::domain::{Identity, LoginRequestBody, SocialLoginRequestBody, TokenPair};
use crate::errors::{ClientError, LoginError};
use crate::routes;
use crate::services::events::SessionEvent;
use crate::services::http_client::HttpClient;
use crate::services::session_store;
use crate::services::token_decoder::{decode_access_claims, decode_refresh_claims};

/// Creates and tears down sessions.
pub struct AuthService {}

impl AuthService {
    pub async fn login(
        state: &AppState,
        client: &HttpClient,
        username: &str,
        password: &str,
    ) -> Result<Identity, LoginError> {
        let body = LoginRequestBody {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        let pair =
            routes::obtain_token_pair(client, &state.config.endpoints().login, &body).await?;
        let identity = Self::establish(state, client, pair).await?;
        log::info!("logged in as user {:?}", identity.user_id);
        Ok(identity)
    }

    pub async fn login_social(
        state: &AppState,
        client: &HttpClient,
        provider: &str,
        code: &str,
    ) -> Result<Identity, LoginError> {
        let body = SocialLoginRequestBody {
            provider: provider.to_owned(),
            code: code.to_owned(),
        };
        let pair = routes::obtain_social_token_pair(
            client,
            &state.config.endpoints().social_login,
            &body,
        )
        .await?;
        let identity = Self::establish(state, client, pair).await?;
        log::info!("logged in through {provider} as user {:?}", identity.user_id);
        Ok(identity)
    }

    /// Blacklist the stored refresh token, then tear the local session down
    /// whatever the server said. A failed blacklist call is still returned.
    pub async fn logout(state: &AppState, client: &HttpClient) -> Result<(), ClientError> {
        let blacklisted = match session_store::refresh_token(&state.token_store).await {
            Ok(Some(refresh)) => {
                routes::blacklist_refresh_token(client, &state.config.endpoints().logout, &refresh)
                    .await
            }
            Ok(None) => {
                log::debug!("no stored refresh token, skipping blacklist call");
                Ok(())
            }
            Err(e) => Err(e.into()),
        };

        let teardown = Self::teardown(state, client).await;

        if let Err(e) = &blacklisted {
            log::warn!("logout request failed, local session cleared anyway: {e}");
        }
        blacklisted?;
        teardown?;
        log::info!("logged out");
        Ok(())
    }

    /// Page the last forced logout happened on, removed once read.
    pub async fn take_redirect(state: &AppState) -> Result<Option<String>, ClientError> {
        Ok(session_store::take_redirect(&state.token_store).await?)
    }

    async fn establish(
        state: &AppState,
        client: &HttpClient,
        pair: TokenPair,
    ) -> Result<Identity, LoginError> {
        let access_claims = decode_access_claims(&pair.access)?;
        let refresh_claims = decode_refresh_claims(&pair.refresh)?;
        let groups = state.groups.display_names(&access_claims.groups);

        let identity = session_store::persist_login(
            &state.token_store,
            &pair,
            &access_claims,
            &refresh_claims,
            groups,
        )
        .await?;
        client
            .set_default_authorization(&pair.access)
            .await
            .map_err(LoginError::Client)?;
        state.events.emit(SessionEvent::StorageChanged);

        Ok(identity)
    }

    async fn teardown(state: &AppState, client: &HttpClient) -> Result<(), ClientError> {
        client.clear_default_authorization().await;
        let wiped = session_store::wipe(&state.token_store).await;
        state.events.emit(SessionEvent::StorageChanged);
        Ok(wiped?)
    }
}
