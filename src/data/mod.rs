//! Catalog data
//!
//! Item and enemy templates loaded once from external text files (with a
//! built-in fallback) and passed by reference to the shop and the dungeon.

pub mod loader;
pub mod items;
pub mod enemies;

pub use loader::{Catalog, CatalogError};
pub use items::{ItemTemplate, ItemTemplates, default_item_templates};
pub use enemies::{EnemyTemplate, EnemyTemplates, default_enemy_templates};
