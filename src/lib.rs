//! NotRouge - a menu-driven dungeon RPG
//!
//! Visit the town, gear up in the shop, and push through short dungeon
//! runs. Dying costs half your gold and levels, and all but one piece
//! of gear.

pub mod combat;
pub mod data;
pub mod death;
pub mod dungeon;
pub mod economy;
pub mod entities;
pub mod game;
pub mod items;
pub mod progression;
pub mod save;

// Re-export commonly used types
pub use data::Catalog;
pub use entities::{Enemy, Player};
pub use game::{ActionError, GameConfig, MessageSink, Messages, Session};
