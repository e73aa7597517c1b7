//! Item definitions
//!
//! Owned item instances, item kinds, equipment slots and stat bonuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique per-instance item ID.
///
/// Two potions bought from the same template are different instances with
/// different IDs, so removal and lookup never rely on structural equality.
pub type ItemId = u64;

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Accessory,
    Consumable,
}

impl ItemKind {
    /// Lowercase name as used in catalog files and saves
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Accessory => "accessory",
            ItemKind::Consumable => "consumable",
        }
    }

    /// Slot this kind occupies when equipped, `None` for consumables
    pub fn slot(&self) -> Option<EquipSlot> {
        match self {
            ItemKind::Weapon => Some(EquipSlot::Weapon),
            ItemKind::Armor => Some(EquipSlot::Armor),
            ItemKind::Accessory => Some(EquipSlot::Accessory),
            ItemKind::Consumable => None,
        }
    }

    /// Check if this is an equipment category
    pub fn is_equipment(&self) -> bool {
        self.slot().is_some()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a known item kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type '{0}'")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Ok(ItemKind::Weapon),
            "armor" => Ok(ItemKind::Armor),
            "accessory" => Ok(ItemKind::Accessory),
            "consumable" => Ok(ItemKind::Consumable),
            _ => Err(UnknownItemKind(s.to_string())),
        }
    }
}

/// Equipment slot for wearable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Armor => "Armor",
            EquipSlot::Accessory => "Accessory",
        }
    }

    /// Get all slots in display order
    pub fn all() -> &'static [EquipSlot] {
        &[EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory]
    }
}

/// Flat stat modifiers granted by an equipped item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatBonus {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
}

/// An owned item instance.
///
/// The serialized form doubles as the save-file item record: every numeric
/// field except `cost` may be missing and defaults to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "item_type")]
    pub kind: ItemKind,
    #[serde(default)]
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

impl Item {
    pub fn is_consumable(&self) -> bool {
        self.kind == ItemKind::Consumable
    }

    /// Bonuses applied while equipped. Consumables never grant any.
    pub fn bonus(&self) -> StatBonus {
        if self.is_consumable() {
            return StatBonus::default();
        }
        StatBonus {
            attack: self.attack_bonus,
            defense: self.defense_bonus,
            health: self.health_bonus,
        }
    }

    /// One-line description for shop and inventory listings
    pub fn describe(&self) -> String {
        let mut desc = format!("{} ({})", self.name, self.kind);
        if self.attack_bonus != 0 {
            desc.push_str(&format!(" | ATK: {:+}", self.attack_bonus));
        }
        if self.defense_bonus != 0 {
            desc.push_str(&format!(" | DEF: {:+}", self.defense_bonus));
        }
        if self.health_bonus != 0 {
            desc.push_str(&format!(" | HP: {:+}", self.health_bonus));
        }
        if self.heal_amount != 0 {
            desc.push_str(&format!(" | Heals: {}", self.heal_amount));
        }
        desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item {
            id: 1,
            name: "Sword".to_string(),
            kind: ItemKind::Weapon,
            cost: 50,
            attack_bonus: 5,
            defense_bonus: 0,
            health_bonus: 0,
            heal_amount: 0,
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("weapon".parse::<ItemKind>(), Ok(ItemKind::Weapon));
        assert_eq!(" Armor ".parse::<ItemKind>(), Ok(ItemKind::Armor));
        assert!("potion".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_consumable_has_no_bonus() {
        let mut potion = sword();
        potion.kind = ItemKind::Consumable;
        assert_eq!(potion.bonus(), StatBonus::default());
        assert_eq!(sword().bonus().attack, 5);
    }

    #[test]
    fn test_item_record_defaults() {
        let json = r#"{"name":"Ring","item_type":"accessory","cost":30}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ItemKind::Accessory);
        assert_eq!(item.health_bonus, 0);
        assert_eq!(item.id, 0);
    }

    #[test]
    fn test_describe() {
        assert_eq!(sword().describe(), "Sword (weapon) | ATK: +5");
    }
}
