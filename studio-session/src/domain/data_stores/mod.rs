pub mod token_store;
pub mod token_store_err;

pub use token_store::TokenStore;
pub use token_store_err::TokenStoreError;
