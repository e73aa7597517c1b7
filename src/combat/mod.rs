//! Combat system

pub mod dice;
pub mod damage;
pub mod encounter;

pub use dice::{Dice, sample_indices};
pub use damage::{enemy_attack_roll, mitigate, player_attack_roll};
pub use encounter::{
    AutoAttack, Combat, CombatAction, CombatState, AUTO_ATTACK_SAFETY_HP, FLEE_CHANCE,
};
