use serde::{Deserialize, Serialize};

/// `{access, refresh}` as returned by the login, social login and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
