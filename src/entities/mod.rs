//! Player and enemy state

pub mod stats;
pub mod player;
pub mod enemies;

pub use stats::{Combatant, DamageOutcome, Health};
pub use player::{Player, STARTING_ATTACK, STARTING_DEFENSE, STARTING_GOLD, STARTING_HEALTH};
pub use enemies::Enemy;
