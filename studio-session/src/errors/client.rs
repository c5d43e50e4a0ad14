use std::sync::Arc;

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

use super::MalformedTokenError;
use crate::domain::{ApiErrorBody, TokenStoreError};
use crate::utils::{ConfigError, TOKEN_NOT_VALID_CODE};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed with status {status}")]
    Http { status: StatusCode, body: Vec<u8> },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    MalformedToken(#[from] MalformedTokenError),

    #[error("token store failure: {0}")]
    Store(#[from] TokenStoreError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    // Shared between every caller that joined the same refresh.
    #[error("token refresh failed: {0}")]
    Refresh(Arc<ClientError>),
}

impl ClientError {
    /// HTTP status of the failure, looking through a wrapped refresh failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Network(e) => e.status(),
            ClientError::Refresh(inner) => inner.status(),
            _ => None,
        }
    }

    /// The decoded `{detail, code}` error body, when the server sent one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        match self {
            ClientError::Http { body, .. } => serde_json::from_slice(body).ok(),
            ClientError::Refresh(inner) => inner.api_error(),
            _ => None,
        }
    }

    /// True only for a direct 401 carrying the `token_not_valid` code.
    pub fn is_token_not_valid(&self) -> bool {
        match self {
            ClientError::Http { status, .. } if *status == StatusCode::UNAUTHORIZED => self
                .api_error()
                .and_then(|body| body.code)
                .is_some_and(|code| code == TOKEN_NOT_VALID_CODE),
            _ => false,
        }
    }
}
