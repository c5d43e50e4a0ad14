use std::collections::HashMap;

use crate::domain::{TokenStore, TokenStoreError};

#[derive(Default, Debug)]
pub struct HashmapTokenStore {
    entries: HashMap<String, String>,
}

impl HashmapTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait::async_trait]
impl TokenStore for HashmapTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), TokenStoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&mut self, key: &str) -> Result<(), TokenStoreError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), TokenStoreError> {
        self.entries.clear();
        Ok(())
    }
}
