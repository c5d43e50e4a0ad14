pub mod access_claims;
pub mod api_error;
pub mod data_stores;
pub mod group;
pub mod identity;
pub mod login_request;
pub mod refresh_request;
pub mod token_pair;
pub mod user;

pub use access_claims::*;
pub use api_error::*;
pub use data_stores::*;
pub use group::*;
pub use identity::*;
pub use login_request::*;
pub use refresh_request::*;
pub use token_pair::*;
pub use user::*;
