//! Turn-based encounter between the player and one enemy
//!
//! The front-end picks an action each turn; the encounter applies it, lets
//! the enemy answer when the rules say so, and reports the new state.
//! Auto-attack is the same attack step repeated until someone drops or the
//! player is down to 1 HP.

use crate::entities::{Combatant, Enemy, Player};
use crate::game::{ActionError, MessageSink};
use crate::items::ItemId;
use super::damage::{
    enemy_attack_roll, max_attack_roll, mitigate, player_attack_roll, ENEMY_ATTACK_VARIANCE,
    PLAYER_ATTACK_VARIANCE,
};
use super::dice::Dice;

/// Chance that a flee attempt succeeds
pub const FLEE_CHANCE: f64 = 0.5;
/// Auto-attack hands control back once the player is at or below this
pub const AUTO_ATTACK_SAFETY_HP: i32 = 1;

/// Where the encounter stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    Active,
    PlayerWon,
    PlayerLost,
    PlayerFled,
}

impl CombatState {
    pub fn is_over(&self) -> bool {
        !matches!(self, CombatState::Active)
    }
}

/// A manual turn choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    UseItem(ItemId),
    Flee,
}

/// Result of one auto-attack tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAttack {
    /// Both sides still standing, keep going
    Continue,
    /// Player at 1 HP; back to manual choice, encounter still active
    SafetyStop,
    /// Neither side can get through the other's defense; back to manual choice
    Stalemate,
    /// The encounter ended this tick
    Finished(CombatState),
}

/// One live encounter
#[derive(Debug, Clone)]
pub struct Combat {
    enemy: Enemy,
    state: CombatState,
    /// Player turns taken so far
    turns: u32,
}

impl Combat {
    pub fn new(enemy: Enemy, sink: &mut dyn MessageSink) -> Self {
        sink.combat(format!("A wild {} appears!", enemy.name));
        Self {
            enemy,
            state: CombatState::Active,
            turns: 0,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Status line for both combatants
    pub fn status(&self, player: &Player) -> String {
        format!(
            concat!(
                "{} Health: {}/{} | Attack: {} | Defense: {}\n",
                "{} Health: {}/{} | Attack: {} | Defense: {}"
            ),
            player.name(),
            player.current_health(),
            player.max_health(),
            player.attack(),
            player.defense(),
            self.enemy.name,
            self.enemy.health.current,
            self.enemy.health.max,
            self.enemy.attack,
            self.enemy.defense,
        )
    }

    /// Neither side's best roll gets past the other's defense
    pub fn is_stalemate(&self, player: &Player) -> bool {
        let player_best = max_attack_roll(player.attack(), PLAYER_ATTACK_VARIANCE);
        let enemy_best = max_attack_roll(self.enemy.attack, ENEMY_ATTACK_VARIANCE);
        mitigate(player_best, self.enemy.defense) == 0
            && mitigate(enemy_best, player.defense()) == 0
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        if self.is_over() {
            Err(ActionError::CombatOver)
        } else {
            Ok(())
        }
    }

    /// Apply a manual action
    pub fn act(
        &mut self,
        action: CombatAction,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<CombatState, ActionError> {
        match action {
            CombatAction::Attack => self.attack(player, dice, sink),
            CombatAction::UseItem(id) => self.use_item(id, player, dice, sink),
            CombatAction::Flee => self.flee(player, dice, sink),
        }
    }

    /// Player swings; a surviving enemy swings back
    pub fn attack(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<CombatState, ActionError> {
        self.ensure_active()?;
        self.turns += 1;
        if self.player_strikes(player, dice, sink) {
            return Ok(self.state);
        }
        self.enemy_strikes(player, dice, sink);
        Ok(self.state)
    }

    /// Drink a consumable; costs the turn, so the enemy answers
    pub fn use_item(
        &mut self,
        id: ItemId,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<CombatState, ActionError> {
        self.ensure_active()?;
        if player.inventory().consumables().next().is_none() {
            sink.warn("You have no usable items.".to_string());
            return Err(ActionError::NoUsableItems);
        }
        player.use_consumable(id, sink)?;
        self.turns += 1;
        self.enemy_strikes(player, dice, sink);
        Ok(self.state)
    }

    /// 50/50 escape; a failed attempt gives the enemy a free swing
    pub fn flee(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<CombatState, ActionError> {
        self.ensure_active()?;
        self.turns += 1;
        if dice.chance(FLEE_CHANCE) {
            sink.combat("You successfully fled from combat!".to_string());
            self.state = CombatState::PlayerFled;
            log::debug!("Fled from {} after {} turns", self.enemy.name, self.turns);
            return Ok(self.state);
        }
        sink.combat("You failed to flee!".to_string());
        self.enemy_strikes(player, dice, sink);
        Ok(self.state)
    }

    /// One auto-attack iteration. Checks the stop conditions before and
    /// after acting.
    pub fn auto_attack_tick(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<AutoAttack, ActionError> {
        self.ensure_active()?;
        if player.current_health() <= AUTO_ATTACK_SAFETY_HP {
            return Ok(AutoAttack::SafetyStop);
        }
        if self.is_stalemate(player) {
            sink.warn(format!(
                "Neither you nor the {} can land a blow. Auto-attack stopped.",
                self.enemy.name
            ));
            return Ok(AutoAttack::Stalemate);
        }

        self.attack(player, dice, sink)?;
        if self.is_over() {
            return Ok(AutoAttack::Finished(self.state));
        }
        if player.current_health() <= AUTO_ATTACK_SAFETY_HP {
            sink.warn(
                "Your health is critically low (1 HP remaining)! Auto-attack stopped.".to_string(),
            );
            return Ok(AutoAttack::SafetyStop);
        }
        Ok(AutoAttack::Continue)
    }

    /// Run auto-attack ticks until the fight ends or the safety stop trips
    pub fn auto_attack(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> Result<AutoAttack, ActionError> {
        sink.combat("Initiating auto-attack...".to_string());
        loop {
            match self.auto_attack_tick(player, dice, sink)? {
                AutoAttack::Continue => continue,
                done => return Ok(done),
            }
        }
    }

    /// Returns true when the enemy went down
    fn player_strikes(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) -> bool {
        let raw = player_attack_roll(player.attack(), dice);
        sink.combat(format!("You attack the {} for {} damage!", self.enemy.name, raw));
        let hit = self.enemy.take_damage(raw, sink);
        if !hit.is_dead {
            return false;
        }

        self.state = CombatState::PlayerWon;
        sink.combat(format!("You defeated the {}!", self.enemy.name));
        player.add_gold(self.enemy.gold_drop);
        player.gain_exp(self.enemy.exp_drop, sink);
        sink.combat(format!(
            "You gained {} gold and {} experience.",
            self.enemy.gold_drop, self.enemy.exp_drop
        ));
        log::debug!("Defeated {} in {} turns", self.enemy.name, self.turns);
        true
    }

    fn enemy_strikes(
        &mut self,
        player: &mut Player,
        dice: &mut dyn Dice,
        sink: &mut dyn MessageSink,
    ) {
        let raw = enemy_attack_roll(self.enemy.attack, dice);
        sink.combat(format!("The {} attacks you for {} damage!", self.enemy.name, raw));
        if player.take_damage(raw, sink).is_dead {
            self.state = CombatState::PlayerLost;
            log::debug!("Player fell to {} after {} turns", self.enemy.name, self.turns);
        }
    }
}
