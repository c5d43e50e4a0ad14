use crate::domain::{UpdateUserBody, User};
use crate::errors::ClientError;
use crate::services::http_client::{ApiRequest, HttpClient};

pub async fn get_me(client: &HttpClient, endpoint: &str) -> Result<User, ClientError> {
    client.json(ApiRequest::get(endpoint)).await
}

pub async fn update_me(
    client: &HttpClient,
    endpoint: &str,
    patch: &UpdateUserBody,
) -> Result<User, ClientError> {
    client.json(ApiRequest::patch(endpoint).json(patch)?).await
}
