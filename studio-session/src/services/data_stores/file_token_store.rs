use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::domain::{TokenStore, TokenStoreError};

type Entries = BTreeMap<String, String>;

/// Session stored as one JSON object on disk. Each `get` reads the file, so
/// processes sharing the path share the session. A missing file is empty.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    file_path: PathBuf,
}

impl FileTokenStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn load(&self) -> Result<Entries, TokenStoreError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Entries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &Entries) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, contents).await?;
        restrict_permissions(&tmp_path).await?;

        if let Err(e) = fs::rename(&tmp_path, &self.file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.file_path.with_file_name(name)
    }
}

// Tokens are credentials: owner read/write only.
#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), TokenStoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), TokenStoreError> {
    Ok(())
}

#[async_trait::async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&mut self, key: &str, value: String) -> Result<(), TokenStoreError> {
        let mut entries = self.load().await?;
        entries.insert(key.to_owned(), value);
        self.save(&entries).await
    }

    async fn remove(&mut self, key: &str) -> Result<(), TokenStoreError> {
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_many(&mut self, new_entries: Vec<(&'static str, String)>) -> Result<(), TokenStoreError> {
        let mut entries = self.load().await?;
        for (key, value) in new_entries {
            entries.insert(key.to_owned(), value);
        }
        self.save(&entries).await
    }
}
