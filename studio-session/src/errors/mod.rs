mod client;
mod login;
mod token;

pub use client::*;
pub use login::*;
pub use token::*;
