mod backend;
mod conversation;
mod error;
mod ids;
mod message;
mod sender;
mod slash_commands;
mod snapshot;
mod suggestions;

pub use backend::*;
pub use conversation::*;
pub use error::*;
pub use ids::*;
pub use message::*;
pub use sender::*;
pub use slash_commands::*;
pub use snapshot::*;
pub use suggestions::*;
