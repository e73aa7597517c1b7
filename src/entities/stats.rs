//! Health pool and the shared damage/heal rules
//!
//! Players and enemies both implement `Combatant`, which supplies the
//! mitigation and healing rules in one place.

use serde::{Deserialize, Serialize};

use crate::combat::damage::mitigate;
use crate::game::MessageSink;

/// Health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Subtract up to `amount`, never going below zero. Returns the amount removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Add up to `amount`, never exceeding max. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min((self.max - self.current).max(0));
        self.current += actual;
        actual
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    /// Shift max by `delta` and pull current down if it now exceeds max.
    /// Current is never raised here.
    pub fn adjust_max(&mut self, delta: i32) {
        self.max += delta;
        self.current = self.current.min(self.max).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Result of one hit landing on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// `max(0, raw - defense)`
    pub effective: i32,
    /// Health is now zero
    pub is_dead: bool,
}

/// Anything that can take hits and be healed
pub trait Combatant {
    fn health(&self) -> &Health;
    fn health_mut(&mut self) -> &mut Health;
    fn defense(&self) -> i32;

    /// Log line for a hit that got through defense
    fn hurt_message(&self, effective: i32) -> String;

    /// Apply a raw hit after defense mitigation
    fn take_damage(&mut self, raw: i32, sink: &mut dyn MessageSink) -> DamageOutcome {
        let effective = mitigate(raw, self.defense());
        self.health_mut().take_damage(effective);
        sink.combat(self.hurt_message(effective));
        DamageOutcome {
            effective,
            is_dead: self.health().is_dead(),
        }
    }

    /// Restore health up to max; returns the amount actually healed
    fn heal(&mut self, amount: u32, sink: &mut dyn MessageSink) -> u32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let healed = self.health_mut().heal(amount);
        let hp = *self.health();
        sink.combat(format!(
            "You healed {} health. Current health: {}/{}",
            healed, hp.current, hp.max
        ));
        healed as u32
    }

    fn is_dead(&self) -> bool {
        self.health().is_dead()
    }
}
