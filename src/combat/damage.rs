//! Damage calculation
//!
//! Raw attack rolls. Mitigation by defense happens when the target takes
//! the hit, so a floored roll can still be fully absorbed.

use super::dice::Dice;

/// Variance applied to the player's attack stat
pub const PLAYER_ATTACK_VARIANCE: i32 = 5;
/// Variance applied to an enemy's attack stat
pub const ENEMY_ATTACK_VARIANCE: i32 = 3;
/// Minimum raw roll, before mitigation
pub const MIN_RAW_DAMAGE: i32 = 1;

/// Raw damage of a player swing: `max(1, attack + [-5, 5])`
pub fn player_attack_roll(attack: i32, dice: &mut dyn Dice) -> i32 {
    attack_roll(attack, PLAYER_ATTACK_VARIANCE, dice)
}

/// Raw damage of an enemy swing: `max(1, attack + [-3, 3])`
pub fn enemy_attack_roll(attack: i32, dice: &mut dyn Dice) -> i32 {
    attack_roll(attack, ENEMY_ATTACK_VARIANCE, dice)
}

/// Highest raw roll an attacker can produce
pub fn max_attack_roll(attack: i32, variance: i32) -> i32 {
    (attack + variance).max(MIN_RAW_DAMAGE)
}

fn attack_roll(attack: i32, variance: i32, dice: &mut dyn Dice) -> i32 {
    (attack + dice.roll(-variance, variance)).max(MIN_RAW_DAMAGE)
}

/// Damage left after defense: `max(0, raw - defense)`
pub fn mitigate(raw: i32, defense: i32) -> i32 {
    (raw - defense).max(0)
}
