pub mod auth;
pub mod auth_header;
pub mod data_stores;
pub mod events;
pub mod http_client;
pub mod refresh_coordinator;
pub mod session;
pub mod session_store;
pub mod token_decoder;

pub use auth::*;
pub use auth_header::*;
pub use data_stores::*;
pub use events::*;
pub use http_client::*;
pub use refresh_coordinator::*;
pub use session::*;
pub use token_decoder::*;
