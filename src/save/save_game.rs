//! Game save/load system
//!
//! Handles saving and loading the player to/from a JSON record. A missing,
//! unreadable or incompatible save is reported as "no save", never a crash.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{Health, Player};
use crate::items::{Equipment, Inventory, Item, ItemId};

/// Save file version for compatibility checking
pub const SAVE_VERSION: u32 = 1;

const SAVE_FILE_NAME: &str = "notrouge_save.json";

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },
}

fn current_version() -> u32 {
    SAVE_VERSION
}

/// On-disk player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "current_version")]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub max_health: i32,
    #[serde(default)]
    pub current_health: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub inventory: Vec<Item>,
    #[serde(default)]
    pub equipped: Equipment,
    /// Next free item ID; recomputed from the items when absent
    #[serde(default)]
    pub next_item_id: ItemId,
}

impl From<&Player> for SaveData {
    fn from(player: &Player) -> Self {
        Self {
            version: SAVE_VERSION,
            name: player.name.clone(),
            level: player.level,
            experience: player.experience,
            max_health: player.health.max,
            current_health: player.health.current,
            attack: player.attack,
            defense: player.defense,
            gold: player.gold,
            inventory: player.inventory.items().to_vec(),
            equipped: player.equipment.clone(),
            next_item_id: player.next_item_id,
        }
    }
}

impl SaveData {
    /// Rebuild the player. Items saved without an ID (or with a clashing
    /// one) get fresh IDs.
    pub fn into_player(self) -> Player {
        let mut equipped = self.equipped;
        let mut inventory = self.inventory;

        let mut seen = HashSet::new();
        let mut needs_id = Vec::new();
        let mut max_id: ItemId = 0;
        let all = inventory
            .iter_mut()
            .chain(equipped.weapon.iter_mut())
            .chain(equipped.armor.iter_mut())
            .chain(equipped.accessory.iter_mut());
        for item in all {
            if item.id == 0 || !seen.insert(item.id) {
                needs_id.push(item);
            } else {
                max_id = max_id.max(item.id);
            }
        }
        for item in needs_id {
            max_id += 1;
            item.id = max_id;
        }

        let mut inv = Inventory::new();
        for item in inventory {
            inv.add_item(item);
        }

        let max = self.max_health;
        Player {
            name: self.name,
            level: self.level.max(1),
            experience: self.experience,
            health: Health {
                current: self.current_health.clamp(0, max.max(0)),
                max,
            },
            attack: self.attack,
            defense: self.defense,
            gold: self.gold,
            inventory: inv,
            equipment: equipped,
            next_item_id: self.next_item_id.max(max_id + 1),
        }
    }
}

/// Serialize a player to the save-file JSON
pub fn to_json(player: &Player) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&SaveData::from(player))?)
}

/// Parse save-file JSON back into a player
pub fn from_json(json: &str) -> Result<Player, SaveError> {
    let save: SaveData = serde_json::from_str(json)?;
    if save.version != SAVE_VERSION {
        return Err(SaveError::IncompatibleVersion {
            expected: SAVE_VERSION,
            found: save.version,
        });
    }
    Ok(save.into_player())
}

/// Somewhere the player can be persisted
pub trait PlayerStore {
    /// Overwrite the stored player
    fn save(&mut self, player: &Player) -> Result<(), SaveError>;

    /// Stored player, or `None` when there is no usable save
    fn load(&self) -> Option<Player>;
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "notrouge", "NotRouge") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("saves");
        path
    } else {
        // Fallback to current directory
        PathBuf::from("./saves")
    }
}

/// Default location of the single save file
pub fn default_save_path() -> PathBuf {
    save_directory().join(SAVE_FILE_NAME)
}

/// JSON save file on disk
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the save, distinguishing the failure modes
    pub fn read(&self) -> Result<Player, SaveError> {
        let data = fs::read_to_string(&self.path)?;
        from_json(&data)
    }
}

impl PlayerStore for SaveFile {
    fn save(&mut self, player: &Player) -> Result<(), SaveError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, to_json(player)?)?;
        log::info!("Game saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Option<Player> {
        if !self.exists() {
            log::info!("No save file at {}", self.path.display());
            return None;
        }
        match self.read() {
            Ok(player) => {
                log::info!("Game loaded from {}", self.path.display());
                Some(player)
            }
            Err(e) => {
                log::warn!("Ignoring unreadable save {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// Store that keeps the JSON in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON of the last save
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    /// How many times `save` has succeeded
    pub fn save_count(&self) -> u32 {
        self.saves
    }
}

impl PlayerStore for MemoryStore {
    fn save(&mut self, player: &Player) -> Result<(), SaveError> {
        self.json = Some(to_json(player)?);
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Option<Player> {
        let json = self.json.as_deref()?;
        from_json(json).ok()
    }
}
