pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;

// re-export items from sub-modules
pub use login::*;
pub use logout::*;
pub use me::*;
pub use refresh::*;
