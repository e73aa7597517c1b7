//! Dungeon run sequencer
//!
//! A run is a fixed number of rooms rolled on entry. The front-end calls
//! [`DungeonRun::advance`] to open the next room, resolves any fight through
//! [`DungeonRun::combat_mut`], then hands the outcome back with
//! [`DungeonRun::finish_combat`]. After a quiet room or an escape the run
//! waits for [`DungeonRun::continue_on`] or [`DungeonRun::retreat`].

use crate::combat::{Combat, CombatState, Dice};
use crate::data::Catalog;
use crate::death::{apply_death_penalty, DeathReport};
use crate::entities::{Combatant, Player};
use crate::game::{ActionError, MessageSink};
use crate::save::PlayerStore;
use super::encounter::{Discovery, EncounterKind};

/// Fewest rooms in a run
pub const MIN_ROOMS: i32 = 3;
/// Most rooms in a run
pub const MAX_ROOMS: i32 = 7;
/// Gold range for a hidden chest
pub const TREASURE_GOLD: (i32, i32) = (20, 100);
/// Heal range for a spring
pub const SPRING_HEAL: (i32, i32) = (20, 60);

/// Where the run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Ready to open the next room
    Exploring,
    /// Waiting for continue or retreat
    AwaitingChoice,
    /// A fight is in progress
    InCombat,
    /// Every room done
    Cleared,
    /// Player walked out early
    Retreated,
    /// Player fell; the death penalty has been applied
    Died,
}

impl RunState {
    pub fn is_over(&self) -> bool {
        matches!(self, RunState::Cleared | RunState::Retreated | RunState::Died)
    }
}

/// What one call into the run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStep {
    /// An enemy appeared; fight it through `combat_mut`
    Fight,
    /// A room without an enemy
    Found(Discovery),
    /// The enemy went down, exploring continues
    Won,
    /// Escaped a fight; continue or retreat
    Escaped,
    /// All rooms done
    Cleared,
    /// Defeated and revived in town
    Died(DeathReport),
}

/// One trip into the dungeon
#[derive(Debug, Clone)]
pub struct DungeonRun {
    rooms: u32,
    depth: u32,
    state: RunState,
    combat: Option<Combat>,
}

impl DungeonRun {
    /// Enter the dungeon. Refused when the catalog has no enemies.
    pub fn enter(
        catalog: &Catalog,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<Self, ActionError> {
        if catalog.enemies.is_empty() {
            sink.warn("The dungeon seems eerily quiet... (No enemies loaded).".to_string());
            return Err(ActionError::NoEnemies);
        }
        Ok(Self::with_rooms(dice.roll(MIN_ROOMS, MAX_ROOMS).max(1) as u32, sink))
    }

    /// Run with a fixed room count
    pub fn with_rooms(rooms: u32, sink: &mut dyn MessageSink) -> Self {
        sink.system("You enter the dark and winding dungeon...".to_string());
        log::info!("Dungeon run started: {} rooms", rooms);
        Self {
            rooms,
            depth: 0,
            state: RunState::Exploring,
            combat: None,
        }
    }

    pub fn rooms(&self) -> u32 {
        self.rooms
    }

    /// Rooms opened so far
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn combat(&self) -> Option<&Combat> {
        self.combat.as_ref()
    }

    pub fn combat_mut(&mut self) -> Option<&mut Combat> {
        self.combat.as_mut()
    }

    /// Open the next room, or end the run if the player is down or every
    /// room is done
    pub fn advance(
        &mut self,
        player: &mut Player,
        catalog: &Catalog,
        dice: &mut dyn Dice,
        store: &mut dyn PlayerStore,
        sink: &mut dyn MessageSink,
    ) -> Result<RunStep, ActionError> {
        if self.state != RunState::Exploring {
            return Err(ActionError::RunNotReady);
        }
        if player.is_dead() {
            return Ok(self.die(player, dice, store, sink));
        }
        if self.depth >= self.rooms {
            self.state = RunState::Cleared;
            sink.system(
                "You have cleared this section of the dungeon! You return to town.".to_string(),
            );
            log::info!("Dungeon cleared after {} rooms", self.rooms);
            return Ok(RunStep::Cleared);
        }

        self.depth += 1;
        sink.system(format!("--- Dungeon Depth: {}/{} ---", self.depth, self.rooms));
        sink.system("You explore deeper...".to_string());

        let kind = EncounterKind::draw(dice, !catalog.enemies.is_empty());
        log::debug!("Room {}/{}: {:?}", self.depth, self.rooms, kind);
        let templates = &catalog.enemies.templates;
        let discovery = match kind {
            EncounterKind::Combat if !templates.is_empty() => {
                let enemy = templates[dice.pick(templates.len())].spawn();
                self.combat = Some(Combat::new(enemy, sink));
                self.state = RunState::InCombat;
                return Ok(RunStep::Fight);
            }
            EncounterKind::Treasure => {
                let gold = dice.roll(TREASURE_GOLD.0, TREASURE_GOLD.1).max(0) as u32;
                player.add_gold(gold);
                sink.item(format!("You found a hidden chest with {} gold!", gold));
                Discovery::Treasure { gold }
            }
            EncounterKind::Healing => {
                let rolled = dice.roll(SPRING_HEAL.0, SPRING_HEAL.1).max(0) as u32;
                let healed = player.heal(rolled, sink);
                sink.system(format!("You found a refreshing spring and healed {} health!", rolled));
                Discovery::Healing { rolled, healed }
            }
            _ => {
                sink.system("You found nothing of interest in this area.".to_string());
                Discovery::Nothing
            }
        };
        self.state = RunState::AwaitingChoice;
        Ok(RunStep::Found(discovery))
    }

    /// Settle a finished fight
    pub fn finish_combat(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        store: &mut dyn PlayerStore,
        sink: &mut dyn MessageSink,
    ) -> Result<RunStep, ActionError> {
        let outcome = match &self.combat {
            Some(combat) if self.state == RunState::InCombat && combat.is_over() => combat.state(),
            _ => return Err(ActionError::RunNotReady),
        };
        self.combat = None;

        match outcome {
            CombatState::PlayerLost => Ok(self.die(player, dice, store, sink)),
            CombatState::PlayerWon => {
                self.state = RunState::Exploring;
                Ok(RunStep::Won)
            }
            CombatState::PlayerFled | CombatState::Active => {
                self.state = RunState::AwaitingChoice;
                Ok(RunStep::Escaped)
            }
        }
    }

    /// Keep exploring after a quiet room or an escape
    pub fn continue_on(&mut self) -> Result<(), ActionError> {
        if self.state != RunState::AwaitingChoice {
            return Err(ActionError::RunNotReady);
        }
        self.state = RunState::Exploring;
        Ok(())
    }

    /// Leave the dungeon early
    pub fn retreat(&mut self, sink: &mut dyn MessageSink) -> Result<(), ActionError> {
        if self.state != RunState::AwaitingChoice {
            return Err(ActionError::RunNotReady);
        }
        self.state = RunState::Retreated;
        sink.system("You retreat from the dungeon.".to_string());
        log::info!("Retreated at depth {}/{}", self.depth, self.rooms);
        Ok(())
    }

    fn die(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        store: &mut dyn PlayerStore,
        sink: &mut dyn MessageSink,
    ) -> RunStep {
        self.combat = None;
        self.state = RunState::Died;
        RunStep::Died(apply_death_penalty(player, dice, store, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::ScriptedDice;
    use crate::data::{EnemyTemplate, EnemyTemplates, ItemTemplates};
    use crate::game::Messages;
    use crate::save::MemoryStore;

    fn catalog_with(enemy: EnemyTemplate) -> Catalog {
        Catalog::new(ItemTemplates::default(), EnemyTemplates { templates: vec![enemy] })
    }

    fn weakling() -> EnemyTemplate {
        EnemyTemplate {
            name: "Slime".to_string(),
            health: 1,
            attack: 1,
            defense: 0,
            gold_drop: 3,
            exp_drop: 5,
        }
    }

    // Weighted indices: 0 combat, 1 nothing, 2 treasure, 3 healing
    fn run(rooms: u32) -> (DungeonRun, Messages) {
        let mut log = Messages::new();
        let run = DungeonRun::with_rooms(rooms, &mut log);
        (run, log)
    }

    #[test]
    fn test_enter_rolls_room_count() {
        let mut log = Messages::new();
        let mut dice = ScriptedDice::new().with_rolls(&[6]);
        let run = DungeonRun::enter(&Catalog::builtin(), &mut dice, &mut log).unwrap();
        assert_eq!(run.rooms(), 6);
        assert_eq!(run.state(), RunState::Exploring);
    }

    #[test]
    fn test_enter_refused_without_enemies() {
        let mut log = Messages::new();
        let result = DungeonRun::enter(&Catalog::default(), &mut ScriptedDice::new(), &mut log);
        assert_eq!(result.err(), Some(ActionError::NoEnemies));
        assert!(log.contains("eerily quiet"));
    }

    #[test]
    fn test_treasure_then_retreat() {
        let (mut run, mut log) = run(3);
        let mut player = Player::new("Delver");
        let mut dice = ScriptedDice::new().with_weighted(&[2]).with_rolls(&[42]);
        let step = run
            .advance(&mut player, &Catalog::builtin(), &mut dice, &mut MemoryStore::new(), &mut log)
            .unwrap();
        assert_eq!(step, RunStep::Found(Discovery::Treasure { gold: 42 }));
        assert_eq!(player.gold(), 142);
        assert_eq!(run.state(), RunState::AwaitingChoice);
        assert!(log.contains("You found a hidden chest with 42 gold!"));

        // Can't open another room before choosing
        assert_eq!(
            run.advance(
                &mut player,
                &Catalog::builtin(),
                &mut dice,
                &mut MemoryStore::new(),
                &mut log
            ),
            Err(ActionError::RunNotReady)
        );
        run.retreat(&mut log).unwrap();
        assert_eq!(run.state(), RunState::Retreated);
        assert!(run.is_over());
    }

    #[test]
    fn test_spring_heals_and_reports_roll() {
        let (mut run, mut log) = run(3);
        let mut player = Player::new("Delver");
        player.health.current = 90;
        let mut dice = ScriptedDice::new().with_weighted(&[3]).with_rolls(&[30]);
        let step = run
            .advance(&mut player, &Catalog::builtin(), &mut dice, &mut MemoryStore::new(), &mut log)
            .unwrap();
        assert_eq!(step, RunStep::Found(Discovery::Healing { rolled: 30, healed: 10 }));
        assert_eq!(player.current_health(), 100);
        assert!(log.contains("refreshing spring"));
    }

    #[test]
    fn test_quiet_rooms_until_cleared() {
        let (mut run, mut log) = run(2);
        let mut player = Player::new("Delver");
        let catalog = Catalog::builtin();
        let mut store = MemoryStore::new();
        let mut dice = ScriptedDice::new().with_weighted(&[1, 1]);

        for _ in 0..2 {
            let step = run.advance(&mut player, &catalog, &mut dice, &mut store, &mut log).unwrap();
            assert_eq!(step, RunStep::Found(Discovery::Nothing));
            run.continue_on().unwrap();
        }
        let step = run.advance(&mut player, &catalog, &mut dice, &mut store, &mut log).unwrap();
        assert_eq!(step, RunStep::Cleared);
        assert_eq!(run.depth(), 2);
        assert!(log.contains("You have cleared this section of the dungeon!"));
    }

    #[test]
    fn test_won_fight_keeps_exploring() {
        let (mut run, mut log) = run(3);
        let mut player = Player::new("Delver");
        let catalog = catalog_with(weakling());
        let mut store = MemoryStore::new();
        let mut dice = ScriptedDice::new().with_weighted(&[0]);

        let step = run.advance(&mut player, &catalog, &mut dice, &mut store, &mut log).unwrap();
        assert_eq!(step, RunStep::Fight);
        assert_eq!(run.state(), RunState::InCombat);

        // Fight still running
        assert_eq!(
            run.finish_combat(&mut player, &mut dice, &mut store, &mut log),
            Err(ActionError::RunNotReady)
        );

        let combat = run.combat_mut().unwrap();
        combat.attack(&mut player, &mut dice, &mut log).unwrap();
        let step = run.finish_combat(&mut player, &mut dice, &mut store, &mut log).unwrap();
        assert_eq!(step, RunStep::Won);
        assert_eq!(run.state(), RunState::Exploring);
        assert!(run.combat().is_none());
        assert_eq!(player.gold(), 103);
    }

    #[test]
    fn test_escape_offers_choice() {
        let (mut run, mut log) = run(3);
        let mut player = Player::new("Delver");
        let mut tough = weakling();
        tough.health = 500;
        let catalog = catalog_with(tough);
        let mut store = MemoryStore::new();
        let mut dice = ScriptedDice::new().with_weighted(&[0]).with_chances(&[true]);

        run.advance(&mut player, &catalog, &mut dice, &mut store, &mut log).unwrap();
        run.combat_mut().unwrap().flee(&mut player, &mut dice, &mut log).unwrap();
        let step = run.finish_combat(&mut player, &mut dice, &mut store, &mut log).unwrap();
        assert_eq!(step, RunStep::Escaped);
        assert_eq!(run.state(), RunState::AwaitingChoice);
        run.continue_on().unwrap();
        assert_eq!(run.state(), RunState::Exploring);
    }

    #[test]
    fn test_defeat_applies_death_penalty() {
        let (mut run, mut log) = run(3);
        let mut player = Player::new("Delver");
        player.health.current = 1;
        let mut brute = weakling();
        brute.health = 500;
        brute.attack = 50;
        let catalog = catalog_with(brute);
        let mut store = MemoryStore::new();
        let mut dice = ScriptedDice::new().with_weighted(&[0]);

        run.advance(&mut player, &catalog, &mut dice, &mut store, &mut log).unwrap();
        run.combat_mut().unwrap().attack(&mut player, &mut dice, &mut log).unwrap();
        let step = run.finish_combat(&mut player, &mut dice, &mut store, &mut log).unwrap();
        assert!(matches!(step, RunStep::Died(_)));
        assert_eq!(run.state(), RunState::Died);
        assert_eq!(player.gold(), 50);
        assert_eq!(player.current_health(), player.max_health());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_dead_on_arrival_ends_run() {
        let (mut run, mut log) = run(3);
        let mut player = Player::new("Delver");
        player.health.current = 0;
        let mut store = MemoryStore::new();
        let step = run
            .advance(
                &mut player,
                &Catalog::builtin(),
                &mut ScriptedDice::new(),
                &mut store,
                &mut log,
            )
            .unwrap();
        assert!(matches!(step, RunStep::Died(_)));
        assert_eq!(run.depth(), 0);
    }
}
