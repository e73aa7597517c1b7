//! Game session
//!
//! Owns everything one play session needs: the player, the catalog, the save
//! store, the RNG and the message log. Front-ends drive the game through this
//! type and drain [`Session::messages`] between prompts.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::combat::{AutoAttack, CombatAction, CombatState};
use crate::data::Catalog;
use crate::dungeon::{DungeonRun, RunStep};
use crate::economy::{self, Shop};
use crate::entities::Player;
use crate::items::{EquipSlot, Item, ItemId};
use crate::save::{PlayerStore, SaveError, SaveFile};
use super::config::GameConfig;
use super::error::ActionError;
use super::messages::{MessageSink, Messages};

/// One play session
pub struct Session {
    config: GameConfig,
    catalog: Catalog,
    player: Player,
    store: Box<dyn PlayerStore>,
    rng: StdRng,
    messages: Messages,
    /// Offers for the current shop visit
    shop: Shop,
    /// Active dungeon run, dropped once it ends
    run: Option<DungeonRun>,
}

/// RNG for a session: seeded when the config says so
pub fn session_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Catalog and save file as the config describes them
pub fn open_resources(config: &GameConfig) -> (Catalog, Box<dyn PlayerStore>) {
    let catalog = Catalog::load_or_builtin(&config.items_path, &config.enemies_path);
    let store = SaveFile::new(config.resolved_save_path());
    (catalog, Box::new(store))
}

impl Session {
    /// Session around an existing player
    pub fn new(
        player: Player,
        catalog: Catalog,
        store: Box<dyn PlayerStore>,
        rng: StdRng,
        config: GameConfig,
    ) -> Self {
        Self {
            config,
            catalog,
            player,
            store,
            rng,
            messages: Messages::new(),
            shop: Shop::default(),
            run: None,
        }
    }

    /// Start over with a fresh character
    pub fn new_game(
        name: &str,
        catalog: Catalog,
        store: Box<dyn PlayerStore>,
        config: GameConfig,
    ) -> Self {
        let name = match name.trim() {
            "" => "Adventurer",
            trimmed => trimmed,
        };
        let rng = session_rng(&config);
        let mut session = Self::new(Player::new(name), catalog, store, rng, config);
        session.messages.system(format!("Welcome, {}! Your adventure begins.", name));
        log::info!("New game for {}", name);
        session
    }

    /// Resume from the store; `None` when there is no usable save
    pub fn load_game(
        catalog: Catalog,
        store: Box<dyn PlayerStore>,
        config: GameConfig,
    ) -> Option<Self> {
        let player = store.load()?;
        let rng = session_rng(&config);
        let mut session = Self::new(player, catalog, store, rng, config);
        session.messages.system(format!(
            "Game loaded successfully! Welcome back, {}.",
            session.player.name()
        ));
        Some(session)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Pending messages; drain after each action
    pub fn messages(&mut self) -> &mut Messages {
        &mut self.messages
    }

    /// Persist the player
    pub fn save(&mut self) -> Result<(), SaveError> {
        match self.store.save(&self.player) {
            Ok(()) => {
                self.messages.system("Game saved successfully!".to_string());
                Ok(())
            }
            Err(e) => {
                log::warn!("Save failed: {}", e);
                self.messages.warn(format!("Error saving game: {}", e));
                Err(e)
            }
        }
    }

    // Town and inventory

    /// Restock the shop for a new visit
    pub fn visit_shop(&mut self) -> &Shop {
        self.shop = Shop::stock_from(&self.catalog, self.config.shop_stock_size, &mut self.rng);
        log::debug!("Shop restocked with {} offers", self.shop.stock().len());
        &self.shop
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Buy the offer at `index` in the current stock
    pub fn buy(&mut self, index: usize) -> Result<ItemId, ActionError> {
        self.shop.buy(index, &mut self.player, &mut self.messages)
    }

    pub fn sell(&mut self, id: ItemId) -> Result<u32, ActionError> {
        economy::sell(&mut self.player, id, &mut self.messages)
    }

    pub fn equip(&mut self, id: ItemId) -> Result<(), ActionError> {
        self.player.equip(id, &mut self.messages)
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Result<ItemId, ActionError> {
        self.player.unequip(slot, &mut self.messages)
    }

    pub fn use_item(&mut self, id: ItemId) -> Result<u32, ActionError> {
        self.player.use_consumable(id, &mut self.messages)
    }

    pub fn discard(&mut self, id: ItemId) -> Result<Item, ActionError> {
        self.player.discard(id, &mut self.messages)
    }

    // Dungeon

    pub fn run(&self) -> Option<&DungeonRun> {
        self.run.as_ref()
    }

    pub fn in_dungeon(&self) -> bool {
        self.run.is_some()
    }

    /// Start a dungeon run
    pub fn enter_dungeon(&mut self) -> Result<(), ActionError> {
        if self.run.is_some() {
            return Err(ActionError::RunNotReady);
        }
        self.run = Some(DungeonRun::enter(&self.catalog, &mut self.rng, &mut self.messages)?);
        Ok(())
    }

    /// Open the next room
    pub fn advance(&mut self) -> Result<RunStep, ActionError> {
        let run = self.run.as_mut().ok_or(ActionError::RunNotReady)?;
        let step = run.advance(
            &mut self.player,
            &self.catalog,
            &mut self.rng,
            self.store.as_mut(),
            &mut self.messages,
        )?;
        self.drop_finished_run();
        Ok(step)
    }

    /// One manual combat turn
    pub fn combat_action(&mut self, action: CombatAction) -> Result<CombatState, ActionError> {
        let combat = self
            .run
            .as_mut()
            .and_then(|run| run.combat_mut())
            .ok_or(ActionError::CombatOver)?;
        combat.act(action, &mut self.player, &mut self.rng, &mut self.messages)
    }

    /// One auto-attack tick; the front-end paces the loop
    pub fn auto_attack_tick(&mut self) -> Result<AutoAttack, ActionError> {
        let combat = self
            .run
            .as_mut()
            .and_then(|run| run.combat_mut())
            .ok_or(ActionError::CombatOver)?;
        combat.auto_attack_tick(&mut self.player, &mut self.rng, &mut self.messages)
    }

    /// Hand a finished fight back to the run
    pub fn finish_combat(&mut self) -> Result<RunStep, ActionError> {
        let run = self.run.as_mut().ok_or(ActionError::RunNotReady)?;
        let step = run.finish_combat(
            &mut self.player,
            &mut self.rng,
            self.store.as_mut(),
            &mut self.messages,
        )?;
        self.drop_finished_run();
        Ok(step)
    }

    pub fn continue_on(&mut self) -> Result<(), ActionError> {
        self.run.as_mut().ok_or(ActionError::RunNotReady)?.continue_on()
    }

    pub fn retreat(&mut self) -> Result<(), ActionError> {
        self.run
            .as_mut()
            .ok_or(ActionError::RunNotReady)?
            .retreat(&mut self.messages)?;
        self.drop_finished_run();
        Ok(())
    }

    fn drop_finished_run(&mut self) {
        if self.run.as_ref().is_some_and(|run| run.is_over()) {
            self.run = None;
        }
    }
}
