//! Dungeon runs: a short sequence of rooms between town visits

pub mod encounter;
pub mod run;

pub use encounter::{Discovery, EncounterKind};
pub use run::{DungeonRun, RunState, RunStep, MAX_ROOMS, MIN_ROOMS};
