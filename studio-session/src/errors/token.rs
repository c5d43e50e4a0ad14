use thiserror::Error;

/// The payload segment of a compact token could not be read.
#[derive(Error, Debug)]
pub enum MalformedTokenError {
    #[error("token must have exactly three dot-separated segments")]
    Segments,

    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid claims json: {0}")]
    Json(#[from] serde_json::Error),
}
