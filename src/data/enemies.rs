//! Enemy templates for data-driven enemy creation
//!
//! Templates never take damage; every encounter spawns a fresh `Enemy`.

use serde::{Deserialize, Serialize};

use crate::entities::{Enemy, Health};

/// A template for creating enemies from external data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Display name
    pub name: String,
    /// Starting (and maximum) HP
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Gold awarded on defeat
    pub gold_drop: u32,
    /// Experience awarded on defeat
    pub exp_drop: u64,
}

impl EnemyTemplate {
    /// Spawn a live, full-health copy for one encounter
    pub fn spawn(&self) -> Enemy {
        Enemy {
            name: self.name.clone(),
            health: Health::new(self.health),
            attack: self.attack,
            defense: self.defense,
            gold_drop: self.gold_drop,
            exp_drop: self.exp_drop,
        }
    }
}

/// Collection of enemy templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplates {
    pub templates: Vec<EnemyTemplate>,
}

impl EnemyTemplates {
    /// Find a template by name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Create default enemy templates (hardcoded fallback)
pub fn default_enemy_templates() -> EnemyTemplates {
    let enemy = |name: &str, health, attack, defense, gold_drop, exp_drop| EnemyTemplate {
        name: name.to_string(),
        health,
        attack,
        defense,
        gold_drop,
        exp_drop,
    };

    EnemyTemplates {
        templates: vec![
            enemy("Giant Rat", 20, 6, 1, 5, 10),
            enemy("Goblin", 30, 9, 2, 12, 20),
            enemy("Skeleton", 40, 11, 4, 18, 30),
            enemy("Cave Spider", 25, 13, 1, 15, 25),
            enemy("Orc Brute", 60, 14, 5, 30, 50),
            enemy("Dark Knight", 90, 18, 8, 60, 90),
        ],
    }
}
