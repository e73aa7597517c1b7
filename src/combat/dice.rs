//! Randomness used by the game rules
//!
//! Everything random in the engine goes through `Dice`, so rules can be
//! driven from a seeded RNG in play and from fixed rolls in tests.

use rand::Rng;

/// Source of uniform dice-style randomness
pub trait Dice {
    /// Uniform integer in `lo..=hi`
    fn roll(&mut self, lo: i32, hi: i32) -> i32;

    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Index drawn proportionally to `weights`. Weights need not sum to 1;
    /// zero-weight entries are never chosen. Returns `None` when every
    /// weight is zero.
    fn weighted(&mut self, weights: &[f64]) -> Option<usize>;
}

impl<R: Rng> Dice for R {
    fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        self.gen_range(lo..=hi)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen::<f64>() < p
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let mut target = self.gen_range(0.0..total);
        let mut last = None;
        for (i, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            if target < w {
                return Some(i);
            }
            target -= w;
            last = Some(i);
        }
        // Float rounding can leave a sliver past the last bucket
        last
    }
}

/// Choose up to `count` distinct indices in `0..len`, in draw order
pub fn sample_indices(dice: &mut dyn Dice, len: usize, count: usize) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..len).collect();
    let take = count.min(len);
    for i in 0..take {
        let j = i + dice.pick(len - i);
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// Fixed rolls for deterministic tests.
///
/// Each queue is consumed front to back; an exhausted queue falls back to
/// the lowest legal value (or "no" for `chance`).
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedDice {
    pub rolls: std::collections::VecDeque<i32>,
    pub chances: std::collections::VecDeque<bool>,
    pub picks: std::collections::VecDeque<usize>,
    pub weighted: std::collections::VecDeque<usize>,
}

#[cfg(test)]
impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: &[i32]) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_chances(mut self, chances: &[bool]) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_weighted(mut self, picks: &[usize]) -> Self {
        self.weighted.extend(picks);
        self
    }
}

#[cfg(test)]
impl Dice for ScriptedDice {
    fn roll(&mut self, lo: i32, hi: i32) -> i32 {
        self.rolls.pop_front().unwrap_or(lo).clamp(lo, hi)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(len - 1)
    }

    fn weighted(&mut self, weights: &[f64]) -> Option<usize> {
        match self.weighted.pop_front() {
            Some(i) => Some(i),
            None => weights.iter().position(|w| *w > 0.0),
        }
    }
}
