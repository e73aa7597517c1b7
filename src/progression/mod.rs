//! Progression systems

pub mod xp;

pub use xp::{required_exp, LEVEL_UP_ATTACK, LEVEL_UP_DEFENSE, LEVEL_UP_HEALTH};
