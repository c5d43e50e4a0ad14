use crate::domain::{LoginRequestBody, SocialLoginRequestBody, TokenPair};
use crate::errors::ClientError;
use crate::services::http_client::{ApiRequest, HttpClient};

/// Exchange username and password for a token pair.
pub async fn obtain_token_pair(
    client: &HttpClient,
    endpoint: &str,
    body: &LoginRequestBody,
) -> Result<TokenPair, ClientError> {
    client.json(ApiRequest::post(endpoint).json(body)?).await
}

/// Exchange an OAuth authorization code from `provider` for a token pair.
pub async fn obtain_social_token_pair(
    client: &HttpClient,
    endpoint: &str,
    body: &SocialLoginRequestBody,
) -> Result<TokenPair, ClientError> {
    client.json(ApiRequest::post(endpoint).json(body)?).await
}
