use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64_URL;
use base64::Engine;
use serde::de::DeserializeOwned;

use crate::domain::{AccessClaims, RefreshClaims};
use crate::errors::MalformedTokenError;

/// Claims from the payload segment. Neither signature nor expiry is checked.
pub fn decode_claims<T: DeserializeOwned>(token: &str) -> Result<T, MalformedTokenError> {
    let mut segments = token.trim().split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(MalformedTokenError::Segments),
    };

    // Some issuers pad their segments; base64url in tokens is normally unpadded.
    let bytes = B64_URL.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn decode_access_claims(token: &str) -> Result<AccessClaims, MalformedTokenError> {
    decode_claims(token)
}

pub fn decode_refresh_claims(token: &str) -> Result<RefreshClaims, MalformedTokenError> {
    decode_claims(token)
}
