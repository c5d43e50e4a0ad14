use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{GroupCatalog, TokenStore};
use crate::services::EventBus;
use crate::utils::Config;

// Using type aliases to improve readability!
pub type TokenStoreType = Arc<RwLock<dyn TokenStore>>;
pub type EventBusType = Arc<EventBus>;
pub type ConfigType = Arc<Config>;

/// State shared by the interceptors, the refresh coordinator and the session
/// bootstrap of one application instance.
#[derive(Clone)]
pub struct AppState {
    pub token_store: TokenStoreType,
    pub events: EventBusType,
    pub config: ConfigType,
    pub groups: Arc<GroupCatalog>,
}

impl AppState {
    pub fn new(token_store: TokenStoreType, events: EventBusType, config: ConfigType) -> Self {
        let groups = Arc::new(GroupCatalog::with_overrides(config.group_names()));
        Self {
            token_store,
            events,
            config,
            groups,
        }
    }
}
