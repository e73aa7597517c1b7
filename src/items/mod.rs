//! Item system

pub mod item;
pub mod inventory;
pub mod equipment;

pub use item::{Item, ItemId, ItemKind, EquipSlot, StatBonus, UnknownItemKind};
pub use inventory::Inventory;
pub use equipment::Equipment;
