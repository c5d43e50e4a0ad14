use crate::domain::{RefreshRequestBody, TokenPair};
use crate::errors::ClientError;
use crate::services::http_client::{ApiRequest, HttpClient};
use crate::services::refresh_coordinator::SessionTransport;

/// Trade a refresh token for a new pair. Goes through the full response
/// chain, so a rejected refresh token ends the session.
pub async fn refresh_token_pair(
    client: &HttpClient,
    endpoint: &str,
    refresh: &str,
) -> Result<TokenPair, ClientError> {
    let body = RefreshRequestBody {
        refresh: refresh.to_owned(),
    };
    client.json(ApiRequest::post(endpoint).json(&body)?).await
}

/// [`SessionTransport`] over the shared [`HttpClient`].
pub struct HttpSessionTransport {
    client: HttpClient,
    endpoint: String,
}

impl HttpSessionTransport {
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl SessionTransport for HttpSessionTransport {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError> {
        refresh_token_pair(&self.client, &self.endpoint, refresh_token).await
    }

    async fn set_default_authorization(&self, token: &str) -> Result<(), ClientError> {
        self.client.set_default_authorization(token).await
    }

    async fn clear_default_authorization(&self) {
        self.client.clear_default_authorization().await
    }
}
