use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("token store io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("token store contents are corrupted: {0}")]
    Serde(#[from] serde_json::Error),
}
