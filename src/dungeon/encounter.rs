//! Encounter kinds and the weighted draw

use crate::combat::Dice;

/// One unit of dungeon progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncounterKind {
    Combat,
    Nothing,
    Treasure,
    Healing,
}

impl EncounterKind {
    /// Draw order; weights line up with this
    pub const ALL: [EncounterKind; 4] = [
        EncounterKind::Combat,
        EncounterKind::Nothing,
        EncounterKind::Treasure,
        EncounterKind::Healing,
    ];

    /// Relative draw weight
    pub fn weight(&self) -> f64 {
        match self {
            EncounterKind::Combat => 0.6,
            EncounterKind::Nothing => 0.2,
            EncounterKind::Treasure => 0.15,
            EncounterKind::Healing => 0.05,
        }
    }

    /// Draw a kind. With `allow_combat` false the combat weight is dropped,
    /// so an empty enemy catalog never produces a fight.
    pub fn draw(dice: &mut dyn Dice, allow_combat: bool) -> EncounterKind {
        let weights: Vec<f64> = Self::ALL
            .iter()
            .map(|k| match k {
                EncounterKind::Combat if !allow_combat => 0.0,
                k => k.weight(),
            })
            .collect();
        dice.weighted(&weights)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(EncounterKind::Nothing)
    }
}

/// What the player found in a non-combat room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    Treasure { gold: u32 },
    Healing { rolled: u32, healed: u32 },
    Nothing,
}
