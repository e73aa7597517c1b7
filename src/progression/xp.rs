//! Experience and leveling
//!
//! XP curve and per-level stat gains.

/// Experience needed to leave level 1
pub const BASE_EXP_TO_LEVEL: u64 = 100;
/// Growth factor of the requirement per level
pub const EXP_PER_LEVEL_MULTIPLIER: f64 = 1.5;

/// Max health gained per level
pub const LEVEL_UP_HEALTH: i32 = 15;
/// Attack gained per level
pub const LEVEL_UP_ATTACK: i32 = 3;
/// Defense gained per level
pub const LEVEL_UP_DEFENSE: i32 = 2;

/// Experience needed to advance from `level` to `level + 1`:
/// `ceil(100 * 1.5^(level - 1))`
pub fn required_exp(level: u32) -> u64 {
    let steps = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    (BASE_EXP_TO_LEVEL as f64 * EXP_PER_LEVEL_MULTIPLIER.powi(steps)).ceil() as u64
}
