//! Equipment system
//!
//! Fixed three-slot record of equipped items.

use serde::{Deserialize, Serialize};
use super::item::{Item, ItemId, EquipSlot};

/// Player equipment slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<Item>,
    #[serde(default)]
    pub armor: Option<Item>,
    #[serde(default)]
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get item in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
            EquipSlot::Accessory => self.accessory.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    /// Place an item in its slot, returning whatever was there before.
    /// Items without a slot are handed straight back as `Err`.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item.kind.slot() {
            Some(slot) => Ok(self.slot_mut(slot).replace(item)),
            None => Err(item),
        }
    }

    /// Unequip an item from a slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_none()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.all_items().any(|i| i.id == id)
    }

    /// Equipped items in slot order
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        EquipSlot::all().iter().filter_map(|&slot| self.get(slot))
    }

    /// Empty every slot, returning the items in slot order
    pub fn drain(&mut self) -> Vec<Item> {
        EquipSlot::all().iter().filter_map(|&slot| self.unequip(slot)).collect()
    }
}
