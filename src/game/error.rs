//! Rejected player requests
//!
//! The engine validates every request itself; a rejection leaves state untouched.

use thiserror::Error;

use crate::items::{EquipSlot, ItemId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no item with id {0}")]
    ItemNotFound(ItemId),

    #[error("{0} is not a recognized equipment type")]
    NotEquippable(String),

    #[error("{0} cannot be used")]
    NotUsable(String),

    #[error("nothing equipped in the {} slot", .0.name())]
    SlotEmpty(EquipSlot),

    #[error("not enough gold: costs {cost}, have {gold}")]
    InsufficientGold { cost: u32, gold: u32 },

    #[error("no such offer in the shop: {0}")]
    NoSuchOffer(usize),

    #[error("no usable items")]
    NoUsableItems,

    #[error("the encounter is already over")]
    CombatOver,

    #[error("no enemies to fight")]
    NoEnemies,

    #[error("the dungeon run is not waiting for that")]
    RunNotReady,
}
