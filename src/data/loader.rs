//! Catalog loader
//!
//! Reads the pipe-delimited item and enemy catalogs. Bad lines are logged
//! and skipped; a missing file yields an empty list, never a crash.
//!
//! ```text
//! # name|type|cost[|attack[|defense[|health[|heal]]]]
//! Iron Sword|weapon|80|6
//! # name|health|attack|defense|gold|exp
//! Goblin|30|9|2|12|20
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::items::ItemKind;
use super::items::{ItemTemplate, ItemTemplates, default_item_templates};
use super::enemies::{EnemyTemplate, EnemyTemplates, default_enemy_templates};

/// Why a catalog line or file was rejected
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not enough fields: expected {expected}, got {found}")]
    MissingField { expected: usize, found: usize },

    #[error("invalid number '{value}' for {field}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    UnknownItemType(#[from] crate::items::UnknownItemKind),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable item and enemy definitions for one game session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Shop item templates
    pub items: ItemTemplates,
    /// Dungeon enemy templates
    pub enemies: EnemyTemplates,
}

impl Catalog {
    pub fn new(items: ItemTemplates, enemies: EnemyTemplates) -> Self {
        Self { items, enemies }
    }

    /// Built-in catalog shipped with the game
    pub fn builtin() -> Self {
        Self::new(default_item_templates(), default_enemy_templates())
    }

    /// Load both catalogs from disk. Unreadable files give empty lists.
    pub fn load(items_path: &Path, enemies_path: &Path) -> Self {
        let items = load_items(items_path).unwrap_or_else(|e| {
            log::warn!("{}", e);
            ItemTemplates::default()
        });
        let enemies = load_enemies(enemies_path).unwrap_or_else(|e| {
            log::warn!("{}", e);
            EnemyTemplates::default()
        });
        Self { items, enemies }
    }

    /// Like `load`, but a file that cannot be read falls back to the
    /// built-in list for that half of the catalog.
    pub fn load_or_builtin(items_path: &Path, enemies_path: &Path) -> Self {
        let items = load_items(items_path).unwrap_or_else(|e| {
            log::warn!("{}. Using built-in items.", e);
            default_item_templates()
        });
        let enemies = load_enemies(enemies_path).unwrap_or_else(|e| {
            log::warn!("{}. Using built-in enemies.", e);
            default_enemy_templates()
        });
        Self { items, enemies }
    }
}

fn read_catalog(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load item templates from a catalog file
pub fn load_items(path: &Path) -> Result<ItemTemplates, CatalogError> {
    let text = read_catalog(path)?;
    let items = parse_items(&text);
    log::info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Load enemy templates from a catalog file
pub fn load_enemies(path: &Path) -> Result<EnemyTemplates, CatalogError> {
    let text = read_catalog(path)?;
    let enemies = parse_enemies(&text);
    log::info!("Loaded {} enemies from {}", enemies.len(), path.display());
    Ok(enemies)
}

/// Catalog lines worth parsing: trimmed, non-blank, not comments
fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parse every valid item line, skipping bad ones
pub fn parse_items(text: &str) -> ItemTemplates {
    let templates = data_lines(text)
        .filter_map(|line| match parse_item_line(line) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("Skipping item line '{}': {}", line, e);
                None
            }
        })
        .collect();
    ItemTemplates { templates }
}

/// Parse every valid enemy line, skipping bad ones
pub fn parse_enemies(text: &str) -> EnemyTemplates {
    let templates = data_lines(text)
        .filter_map(|line| match parse_enemy_line(line) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("Skipping enemy line '{}': {}", line, e);
                None
            }
        })
        .collect();
    EnemyTemplates { templates }
}

fn required<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, CatalogError> {
    value.trim().parse().map_err(|_| CatalogError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Optional numeric field: anything that isn't a plain non-negative number reads as 0
fn optional(parts: &[&str], index: usize) -> u32 {
    parts
        .get(index)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

fn optional_bonus(parts: &[&str], index: usize) -> i32 {
    i32::try_from(optional(parts, index)).unwrap_or(i32::MAX)
}

/// `name|itemType|cost[|attackBonus[|defenseBonus[|healthBonus[|healAmount]]]]`
pub fn parse_item_line(line: &str) -> Result<ItemTemplate, CatalogError> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return Err(CatalogError::MissingField { expected: 3, found: parts.len() });
    }
    let kind: ItemKind = parts[1].parse()?;
    Ok(ItemTemplate {
        name: parts[0].trim().to_string(),
        kind,
        cost: required("cost", parts[2])?,
        attack_bonus: optional_bonus(&parts, 3),
        defense_bonus: optional_bonus(&parts, 4),
        health_bonus: optional_bonus(&parts, 5),
        heal_amount: optional(&parts, 6),
    })
}

/// `name|health|attack|defense|goldDrop|expDrop`
pub fn parse_enemy_line(line: &str) -> Result<EnemyTemplate, CatalogError> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 6 {
        return Err(CatalogError::MissingField { expected: 6, found: parts.len() });
    }
    Ok(EnemyTemplate {
        name: parts[0].trim().to_string(),
        health: required("health", parts[1])?,
        attack: required("attack", parts[2])?,
        defense: required("defense", parts[3])?,
        gold_drop: required("goldDrop", parts[4])?,
        exp_drop: required("expDrop", parts[5])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_line_full() {
        let t = parse_item_line("Chainmail|armor|110|0|6|10").unwrap();
        assert_eq!(t.kind, ItemKind::Armor);
        assert_eq!(t.cost, 110);
        assert_eq!(t.defense_bonus, 6);
        assert_eq!(t.health_bonus, 10);
        assert_eq!(t.heal_amount, 0);
    }

    #[test]
    fn test_optional_fields_default_to_zero() {
        let t = parse_item_line("Potion|consumable|20|||x|40").unwrap();
        assert_eq!(t.attack_bonus, 0);
        assert_eq!(t.health_bonus, 0);
        assert_eq!(t.heal_amount, 40);

        let short = parse_item_line("Stick|weapon|1").unwrap();
        assert_eq!(short.attack_bonus, 0);
    }

    #[test]
    fn test_malformed_item_lines() {
        assert!(matches!(
            parse_item_line("Sword|weapon"),
            Err(CatalogError::MissingField { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse_item_line("Sword|weapon|cheap"),
            Err(CatalogError::InvalidNumber { field: "cost", .. })
        ));
        assert!(matches!(
            parse_item_line("Sword|spell|10"),
            Err(CatalogError::UnknownItemType(_))
        ));
    }

    #[test]
    fn test_parse_items_skips_comments_and_bad_lines() {
        let text = "\
# shop stock
Rusty Sword|weapon|30|3

broken line
Health Potion|consumable|35|0|0|0|50
Bad Cost|armor|-4
";
        let items = parse_items(text);
        let names: Vec<_> = items.templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rusty Sword", "Health Potion"]);
    }

    #[test]
    fn test_parse_enemies() {
        let text = "Goblin|30|9|2|12|20\nSlime|10|3|0|2\nGhost|x|1|1|1|1\n";
        let enemies = parse_enemies(text);
        assert_eq!(enemies.len(), 1);
        let goblin = &enemies.templates[0];
        assert_eq!(goblin.health, 30);
        assert_eq!(goblin.exp_drop, 20);
    }

    #[test]
    fn test_missing_files_give_empty_catalog() {
        let dir = std::env::temp_dir().join("notrouge-missing-catalog");
        let catalog = Catalog::load(&dir.join("nope_items.txt"), &dir.join("nope_enemies.txt"));
        assert!(catalog.items.is_empty());
        assert!(catalog.enemies.is_empty());

        let fallback =
            Catalog::load_or_builtin(&dir.join("nope_items.txt"), &dir.join("nope_enemies.txt"));
        assert_eq!(fallback, Catalog::builtin());
    }

    #[test]
    fn test_load_from_file() {
        let path =
            std::env::temp_dir().join(format!("notrouge-enemies-{}.txt", std::process::id()));
        fs::write(&path, "Rat|12|4|0|3|5\n").unwrap();
        let enemies = load_enemies(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(enemies.find("rat").map(|e| e.attack), Some(4));
    }
}
