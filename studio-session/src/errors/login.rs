use reqwest::StatusCode;
use thiserror::Error;

use super::{ClientError, MalformedTokenError};
use crate::domain::TokenStoreError;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("server issued a malformed token: {0}")]
    MalformedToken(#[from] MalformedTokenError),

    #[error("token store failure: {0}")]
    Store(#[from] TokenStoreError),

    #[error(transparent)]
    Client(ClientError),
}

impl From<ClientError> for LoginError {
    fn from(error: ClientError) -> Self {
        match error.status() {
            Some(StatusCode::BAD_REQUEST) | Some(StatusCode::UNAUTHORIZED)
                if !error.is_token_not_valid() =>
            {
                LoginError::InvalidCredentials
            }
            _ => LoginError::Client(error),
        }
    }
}
