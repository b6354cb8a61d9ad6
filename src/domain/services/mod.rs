mod controller;
mod session_store;

pub use controller::*;
pub use session_store::*;
