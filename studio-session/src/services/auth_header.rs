use crate::app_state::TokenStoreType;
use crate::services::http_client::{ApiRequest, RequestInterceptor};
use crate::services::session_store;

/// Attaches `Authorization: Bearer <access_token>` from the token store to
/// requests that don't carry an authorization header yet. Without a stored
/// token the request goes out unauthenticated.
pub struct BearerAuthInterceptor {
    token_store: TokenStoreType,
}

impl BearerAuthInterceptor {
    pub fn new(token_store: TokenStoreType) -> Self {
        Self { token_store }
    }
}

#[async_trait::async_trait]
impl RequestInterceptor for BearerAuthInterceptor {
    async fn on_request(&self, mut request: ApiRequest) -> ApiRequest {
        if request.has_authorization() {
            return request;
        }

        match session_store::access_token(&self.token_store).await {
            Ok(Some(token)) => {
                if let Err(e) = request.set_bearer(&token) {
                    log::warn!("stored access token is not a valid header value: {e}");
                }
            }
            Ok(None) => {}
            Err(e) => log::warn!("could not read access token: {e}"),
        }
        request
    }
}
