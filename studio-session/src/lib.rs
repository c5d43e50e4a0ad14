pub mod app_state;
pub mod domain;
pub mod errors;
pub mod routes;
pub mod services;
pub mod utils;

pub use app_state::AppState;
pub use services::{Session, SessionEvent};
