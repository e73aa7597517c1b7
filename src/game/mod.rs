//! Game module - session, configuration and the message channel

pub mod config;
pub mod error;
pub mod messages;
pub mod session;

pub use config::{ConfigError, GameConfig};
pub use error::ActionError;
pub use messages::{Discard, GameMessage, MessageCategory, MessageSink, Messages};
pub use session::{open_resources, session_rng, Session};
