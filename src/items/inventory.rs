//! Inventory system
//!
//! Ordered collection of unequipped item instances, addressed by `ItemId`.

use serde::{Deserialize, Serialize};
use super::item::{Item, ItemId};

/// Player inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item to the end of the inventory
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove an item by ID, preserving the order of the rest
    pub fn remove_by_id(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Get item by ID
    pub fn get_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get_by_id(id).is_some()
    }

    /// Get all items in order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consumables in inventory order
    pub fn consumables(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_consumable())
    }

    /// Remove every item, returning them in order
    pub fn drain(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}
