use serde::{Deserialize, Serialize};

/// Body of both the refresh call and the logout (blacklist) call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RefreshRequestBody {
    pub refresh: String,
}
