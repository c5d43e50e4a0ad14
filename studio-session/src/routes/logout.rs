use crate::domain::RefreshRequestBody;
use crate::errors::ClientError;
use crate::services::http_client::{ApiRequest, HttpClient};

/// Blacklist `refresh` on the server. The response body carries nothing of use.
pub async fn blacklist_refresh_token(
    client: &HttpClient,
    endpoint: &str,
    refresh: &str,
) -> Result<(), ClientError> {
    let body = RefreshRequestBody {
        refresh: refresh.to_owned(),
    };
    client.send(ApiRequest::post(endpoint).json(&body)?).await?;
    Ok(())
}
