//! Item templates for the shop catalog
//!
//! Templates are immutable; buying one stamps out a fresh `Item` instance.

use serde::{Deserialize, Serialize};

use crate::items::{Item, ItemId, ItemKind};

/// A shop-catalog item definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    pub kind: ItemKind,
    pub cost: u32,
    #[serde(default)]
    pub attack_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
    #[serde(default)]
    pub health_bonus: i32,
    #[serde(default)]
    pub heal_amount: u32,
}

impl ItemTemplate {
    /// Create a new independent instance of this template
    pub fn instantiate(&self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name.clone(),
            kind: self.kind,
            cost: self.cost,
            attack_bonus: self.attack_bonus,
            defense_bonus: self.defense_bonus,
            health_bonus: self.health_bonus,
            heal_amount: self.heal_amount,
        }
    }

    fn equipment(name: &str, kind: ItemKind, cost: u32, atk: i32, def: i32, hp: i32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            cost,
            attack_bonus: atk,
            defense_bonus: def,
            health_bonus: hp,
            heal_amount: 0,
        }
    }

    fn consumable(name: &str, cost: u32, heal: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Consumable,
            cost,
            attack_bonus: 0,
            defense_bonus: 0,
            health_bonus: 0,
            heal_amount: heal,
        }
    }
}

/// Collection of item templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplates {
    pub templates: Vec<ItemTemplate>,
}

impl ItemTemplates {
    /// Find a template by name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&ItemTemplate> {
        self.templates.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Create default item templates (hardcoded fallback)
pub fn default_item_templates() -> ItemTemplates {
    use ItemKind::*;

    ItemTemplates {
        templates: vec![
            // Weapons
            ItemTemplate::equipment("Rusty Sword", Weapon, 30, 3, 0, 0),
            ItemTemplate::equipment("Iron Sword", Weapon, 80, 6, 0, 0),
            ItemTemplate::equipment("War Axe", Weapon, 150, 10, 0, 0),
            ItemTemplate::equipment("Knight's Blade", Weapon, 260, 14, 2, 0),

            // Armor
            ItemTemplate::equipment("Leather Armor", Armor, 40, 0, 3, 0),
            ItemTemplate::equipment("Chainmail", Armor, 110, 0, 6, 10),
            ItemTemplate::equipment("Plate Armor", Armor, 240, 0, 10, 20),

            // Accessories
            ItemTemplate::equipment("Copper Ring", Accessory, 50, 1, 1, 0),
            ItemTemplate::equipment("Amulet of Vigor", Accessory, 120, 0, 0, 30),
            ItemTemplate::equipment("Band of Fury", Accessory, 180, 5, 0, -10),

            // Consumables
            ItemTemplate::consumable("Minor Health Potion", 15, 25),
            ItemTemplate::consumable("Health Potion", 35, 50),
            ItemTemplate::consumable("Greater Health Potion", 70, 100),
        ],
    }
}
