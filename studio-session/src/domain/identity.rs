use serde::{Deserialize, Serialize};

/// Display fields cached in the token store at login, so views can render the
/// current user without decoding tokens.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub user_id: Option<i64>,
    pub name: String,
    pub avatar: Option<String>,
    pub role: String,
    pub groups: Vec<String>, // Display names, not codes
}

impl Identity {
    pub fn in_group(&self, display_name: &str) -> bool {
        self.groups.iter().any(|g| g == display_name)
    }
}
