use tokio::sync::{broadcast, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session keys were (re)written; views showing identity fields should re-read them.
    StorageChanged,
    /// The session ended and the user must be sent to `path`.
    Navigate { path: String },
}

/// Fan-out of session events to every open view, plus the page the embedding
/// application is currently showing.
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
    current_path: RwLock<String>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            current_path: RwLock::new("/".to_owned()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: SessionEvent) {
        if self.sender.send(event).is_err() {
            log::debug!("session event dropped, nobody is listening");
        }
    }

    pub async fn set_current_path(&self, path: impl Into<String>) {
        *self.current_path.write().await = path.into();
    }

    pub async fn current_path(&self) -> String {
        self.current_path.read().await.clone()
    }
}
