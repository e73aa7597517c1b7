//! Live enemy instances

use crate::entities::stats::{Combatant, Health};

/// An enemy in an active encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub health: Health,
    pub attack: i32,
    pub defense: i32,
    pub gold_drop: u32,
    pub exp_drop: u64,
}

impl Combatant for Enemy {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn hurt_message(&self, effective: i32) -> String {
        format!("The {} took {} damage!", self.name, effective)
    }
}
