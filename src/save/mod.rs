//! Save/load system
//!
//! Persists the player to a single JSON save file.

pub mod save_game;

pub use save_game::{
    SaveData, SaveError, SaveFile, MemoryStore, PlayerStore,
    to_json, from_json, save_directory, default_save_path, SAVE_VERSION,
};
