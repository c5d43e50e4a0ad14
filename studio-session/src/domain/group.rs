use std::collections::HashMap;

use once_cell::sync::Lazy;

// Group codes issued by the backend and the names shown to users.
static DEFAULT_GROUP_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ADMIN", "Administrator"),
        ("STAFF", "Staff"),
        ("CREW", "Crew"),
        ("EDITOR", "Editor"),
        ("EDITOR_IN_CHIEF", "Editor-in-chief"),
        ("PRODUCER", "Producer"),
        ("PR", "PR"),
    ])
});

/// Lookup table from raw group codes to display names.
#[derive(Debug, Clone)]
pub struct GroupCatalog {
    names: HashMap<String, String>,
}

impl Default for GroupCatalog {
    fn default() -> Self {
        Self {
            names: DEFAULT_GROUP_NAMES
                .iter()
                .map(|(code, name)| ((*code).to_owned(), (*name).to_owned()))
                .collect(),
        }
    }
}

impl GroupCatalog {
    /// The default table with `overrides` layered on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        catalog
            .names
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }

    /// Unknown codes are shown as-is.
    pub fn display_name(&self, code: &str) -> String {
        self.names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_owned())
    }

    pub fn display_names(&self, codes: &[String]) -> Vec<String> {
        codes.iter().map(|code| self.display_name(code)).collect()
    }
}
