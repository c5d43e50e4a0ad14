use super::TokenStoreError;

/// Persisted string key-value storage for the session (the client-side
/// equivalent of browser local storage).
///
/// Shared as `Arc<RwLock<dyn TokenStore>>`: `clear` runs under the write lock,
/// so readers see either the whole session or none of it.
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError>;
    async fn set(&mut self, key: &str, value: String) -> Result<(), TokenStoreError>;
    async fn remove(&mut self, key: &str) -> Result<(), TokenStoreError>;
    async fn clear(&mut self) -> Result<(), TokenStoreError>;

    /// Write several keys. Implementations backed by slow storage should
    /// override this to persist the batch in one step.
    async fn set_many(&mut self, entries: Vec<(&'static str, String)>) -> Result<(), TokenStoreError> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }
}
