use serde::{Deserialize, Serialize};

/// Read-only view of an access token payload. Display fields default when the
/// backend leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub exp: i64,     // Expiration time (unix seconds)
    pub user_id: i64, // Backend user id
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub groups: Vec<String>, // Raw group codes
    #[serde(default)]
    pub avatar: Option<String>,
}

impl AccessClaims {
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// The part of a refresh token the client cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub exp: i64,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl RefreshClaims {
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}
