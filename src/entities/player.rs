//! The player character
//!
//! Stat fields always equal the starting values, plus level-up gains, plus
//! the bonuses of whatever is currently equipped. Every mutation that
//! touches equipment goes through `apply_bonus` to keep that true.

use crate::data::ItemTemplate;
use crate::entities::stats::{Combatant, Health};
use crate::game::{ActionError, MessageSink};
use crate::items::{EquipSlot, Equipment, Inventory, Item, ItemId, StatBonus};
use crate::progression::{required_exp, LEVEL_UP_ATTACK, LEVEL_UP_DEFENSE, LEVEL_UP_HEALTH};

pub const STARTING_GOLD: u32 = 100;
pub const STARTING_HEALTH: i32 = 100;
pub const STARTING_ATTACK: i32 = 10;
pub const STARTING_DEFENSE: i32 = 5;

/// Single long-lived player aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub(crate) name: String,
    pub(crate) level: u32,
    pub(crate) experience: u64,
    pub(crate) health: Health,
    pub(crate) attack: i32,
    pub(crate) defense: i32,
    pub(crate) gold: u32,
    pub(crate) inventory: Inventory,
    pub(crate) equipment: Equipment,
    /// Next ID handed to a newly created item instance
    pub(crate) next_item_id: ItemId,
}

impl Player {
    /// Level 1 hero with starting stats and gold
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            experience: 0,
            health: Health::new(STARTING_HEALTH),
            attack: STARTING_ATTACK,
            defense: STARTING_DEFENSE,
            gold: STARTING_GOLD,
            inventory: Inventory::new(),
            equipment: Equipment::new(),
            next_item_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    /// Experience needed to leave the current level
    pub fn exp_to_next(&self) -> u64 {
        required_exp(self.level)
    }

    pub fn current_health(&self) -> i32 {
        self.health.current
    }

    pub fn max_health(&self) -> i32 {
        self.health.max
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Allocate a fresh instance ID
    pub(crate) fn next_item_id(&mut self) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }

    /// Stamp a new instance of `template` into the inventory
    pub(crate) fn add_from_template(&mut self, template: &ItemTemplate) -> ItemId {
        let id = self.next_item_id();
        self.inventory.add_item(template.instantiate(id));
        id
    }

    pub(crate) fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, returns false if not enough
    pub(crate) fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    /// Add experience, leveling up as many times as it covers
    pub fn gain_exp(&mut self, amount: u64, sink: &mut dyn MessageSink) -> u32 {
        sink.system(format!("You gained {} experience!", amount));
        self.experience = self.experience.saturating_add(amount);
        let mut levels = 0;
        while self.experience >= required_exp(self.level) {
            self.experience -= required_exp(self.level);
            self.level_up(sink);
            levels += 1;
        }
        levels
    }

    /// Raise level by one with full heal
    pub fn level_up(&mut self, sink: &mut dyn MessageSink) {
        self.level += 1;
        self.health.max += LEVEL_UP_HEALTH;
        self.health.restore_full();
        self.attack += LEVEL_UP_ATTACK;
        self.defense += LEVEL_UP_DEFENSE;
        log::info!("{} reached level {}", self.name, self.level);
        sink.system(format!("*** You leveled up to Level {}! ***", self.level));
        sink.system(format!(
            "Health +{}, Attack +{}, Defense +{}.",
            LEVEL_UP_HEALTH, LEVEL_UP_ATTACK, LEVEL_UP_DEFENSE
        ));
        sink.system("You feel stronger!".to_string());
    }

    /// Add or remove (`sign` = -1) an item's bonuses, clamping current health
    fn apply_bonus(&mut self, bonus: StatBonus, sign: i32) {
        self.attack += sign * bonus.attack;
        self.defense += sign * bonus.defense;
        self.health.adjust_max(sign * bonus.health);
    }

    /// Equip an inventory item, returning any displaced item to the inventory
    pub fn equip(&mut self, id: ItemId, sink: &mut dyn MessageSink) -> Result<(), ActionError> {
        let Some(item) = self.inventory.get_by_id(id) else {
            sink.warn("You don't have that item.".to_string());
            return Err(ActionError::ItemNotFound(id));
        };
        let Some(slot) = item.kind.slot() else {
            sink.warn(format!("Cannot equip {}. It's not a recognized equipment type.", item.name));
            return Err(ActionError::NotEquippable(item.name.clone()));
        };

        if let Some(old) = self.equipment.unequip(slot) {
            self.apply_bonus(old.bonus(), -1);
            sink.item(format!("Unequipped {}.", old.name));
            self.inventory.add_item(old);
        }

        let Some(item) = self.inventory.remove_by_id(id) else {
            return Err(ActionError::ItemNotFound(id));
        };
        self.apply_bonus(item.bonus(), 1);
        sink.item(format!("Equipped {}.", item.name));
        // Slot was emptied above, so nothing comes back
        let _ = self.equipment.equip(item);
        Ok(())
    }

    /// Move an equipped item back into the inventory
    pub fn unequip(
        &mut self,
        slot: EquipSlot,
        sink: &mut dyn MessageSink,
    ) -> Result<ItemId, ActionError> {
        let Some(item) = self.equipment.unequip(slot) else {
            sink.warn(format!("Nothing is equipped as {}.", slot.name().to_lowercase()));
            return Err(ActionError::SlotEmpty(slot));
        };
        self.apply_bonus(item.bonus(), -1);
        sink.item(format!("Unequipped {}.", item.name));
        let id = item.id;
        self.inventory.add_item(item);
        Ok(id)
    }

    /// Check that `id` names a consumable with a heal effect
    pub(crate) fn usable_consumable(
        &self,
        id: ItemId,
        sink: &mut dyn MessageSink,
    ) -> Result<&Item, ActionError> {
        let Some(item) = self.inventory.get_by_id(id) else {
            sink.warn("You don't have that item.".to_string());
            return Err(ActionError::ItemNotFound(id));
        };
        if !item.is_consumable() || item.heal_amount == 0 {
            sink.warn(format!("{} cannot be used.", item.name));
            return Err(ActionError::NotUsable(item.name.clone()));
        }
        Ok(item)
    }

    /// Drink a consumable from the inventory; returns health restored
    pub fn use_consumable(
        &mut self,
        id: ItemId,
        sink: &mut dyn MessageSink,
    ) -> Result<u32, ActionError> {
        let heal_amount = self.usable_consumable(id, sink)?.heal_amount;
        let Some(item) = self.inventory.remove_by_id(id) else {
            return Err(ActionError::ItemNotFound(id));
        };
        let healed = self.heal(heal_amount, sink);
        sink.item(format!("You used a {}.", item.name));
        Ok(healed)
    }

    /// Throw an unequipped item away for good
    pub fn discard(&mut self, id: ItemId, sink: &mut dyn MessageSink) -> Result<Item, ActionError> {
        match self.inventory.remove_by_id(id) {
            Some(item) => {
                sink.item(format!("You threw away {}.", item.name));
                Ok(item)
            }
            None => {
                sink.warn("Equipped items cannot be thrown away.".to_string());
                Err(ActionError::ItemNotFound(id))
            }
        }
    }

    /// Multi-line character sheet for the front-end
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("--- {}'s Stats ---\n", self.name));
        out.push_str(&format!(
            "Level: {} (EXP: {}/{})\n",
            self.level,
            self.experience,
            self.exp_to_next()
        ));
        out.push_str(&format!("Health: {}/{}\n", self.health.current, self.health.max));
        out.push_str(&format!("Attack: {}\n", self.attack));
        out.push_str(&format!("Defense: {}\n", self.defense));
        out.push_str(&format!("Gold: {}\n", self.gold));
        out.push_str("\n--- Equipped Gear ---\n");
        for &slot in EquipSlot::all() {
            let name = self.equipment.get(slot).map(|i| i.name.as_str()).unwrap_or("None");
            out.push_str(&format!("{}: {}\n", slot.name(), name));
        }
        out.push_str("\n--- Inventory ---\n");
        if self.inventory.is_empty() {
            out.push_str("Empty\n");
        }
        for (i, item) in self.inventory.items().iter().enumerate() {
            out.push_str(&format!("{}. {} (Type: {})\n", i + 1, item.name, item.kind));
        }
        out
    }
}

impl Combatant for Player {
    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn defense(&self) -> i32 {
        self.defense
    }

    fn hurt_message(&self, effective: i32) -> String {
        format!("You took {} damage!", effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_item_templates;
    use crate::game::Messages;
    use crate::items::ItemKind;

    fn template(name: &str) -> ItemTemplate {
        default_item_templates().find(name).unwrap().clone()
    }

    #[test]
    fn test_new_player_starting_stats() {
        let p = Player::new("Hero");
        assert_eq!(p.level(), 1);
        assert_eq!(p.max_health(), STARTING_HEALTH);
        assert_eq!(p.attack(), STARTING_ATTACK);
        assert_eq!(p.defense(), STARTING_DEFENSE);
        assert_eq!(p.gold(), STARTING_GOLD);
    }

    #[test]
    fn test_take_damage_mitigated_by_defense() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let hit = p.take_damage(12, &mut log);
        assert_eq!(hit.effective, 7);
        assert!(!hit.is_dead);
        assert_eq!(p.current_health(), 93);
        assert!(log.contains("You took 7 damage!"));

        let weak = p.take_damage(3, &mut log);
        assert_eq!(weak.effective, 0);
        assert_eq!(p.current_health(), 93);

        let lethal = p.take_damage(500, &mut log);
        assert!(lethal.is_dead);
        assert_eq!(p.current_health(), 0);
    }

    #[test]
    fn test_heal_reports_actual_amount() {
        let mut p = Player::new("Hero");
        p.health.current = 80;
        let mut log = Messages::new();
        assert_eq!(p.heal(50, &mut log), 20);
        assert_eq!(p.current_health(), 100);
        assert_eq!(p.heal(0, &mut log), 0);
    }

    #[test]
    fn test_exact_exp_gives_one_level() {
        let mut p = Player::new("Hero");
        p.health.current = 10;
        let mut log = Messages::new();
        let levels = p.gain_exp(required_exp(1), &mut log);
        assert_eq!(levels, 1);
        assert_eq!(p.level(), 2);
        assert_eq!(p.experience(), 0);
        assert_eq!(p.max_health(), 115);
        assert_eq!(p.current_health(), 115);
        assert_eq!(p.attack(), 13);
        assert_eq!(p.defense(), 7);
    }

    #[test]
    fn test_multi_level_gain() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        // 100 + 150 = 250 covers two levels, 10 left over
        assert_eq!(p.gain_exp(260, &mut log), 2);
        assert_eq!(p.level(), 3);
        assert_eq!(p.experience(), 10);
    }

    #[test]
    fn test_equip_and_swap_restores_stats() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let sword = p.add_from_template(&template("Iron Sword"));
        let axe = p.add_from_template(&template("War Axe"));

        p.equip(sword, &mut log).unwrap();
        assert_eq!(p.attack(), STARTING_ATTACK + 6);
        assert!(!p.inventory().contains(sword));
        assert!(p.equipment().contains(sword));

        p.equip(axe, &mut log).unwrap();
        assert_eq!(p.attack(), STARTING_ATTACK + 10);
        assert!(p.inventory().contains(sword));
        assert!(!p.equipment().contains(sword));

        p.unequip(EquipSlot::Weapon, &mut log).unwrap();
        assert_eq!(p.attack(), STARTING_ATTACK);
        assert_eq!(p.inventory().count(), 2);
    }

    #[test]
    fn test_health_bonus_swap_clamps_current() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let amulet = p.add_from_template(&template("Amulet of Vigor"));
        let ring = p.add_from_template(&template("Copper Ring"));

        p.equip(amulet, &mut log).unwrap();
        assert_eq!(p.max_health(), 130);
        // Equipping never tops up
        assert_eq!(p.current_health(), 100);
        p.health.current = 130;

        p.equip(ring, &mut log).unwrap();
        assert_eq!(p.max_health(), 100);
        assert_eq!(p.current_health(), 100);
    }

    #[test]
    fn test_negative_health_bonus_clamps() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let band = p.add_from_template(&template("Band of Fury"));
        p.equip(band, &mut log).unwrap();
        assert_eq!(p.max_health(), 90);
        assert_eq!(p.current_health(), 90);
    }

    #[test]
    fn test_equip_consumable_is_noop() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let potion = p.add_from_template(&template("Health Potion"));
        let before = p.clone();
        let err = p.equip(potion, &mut log).unwrap_err();
        assert_eq!(err, ActionError::NotEquippable("Health Potion".to_string()));
        assert_eq!(p, before);
        assert!(log.contains("not a recognized equipment type"));
    }

    #[test]
    fn test_equip_unknown_id_is_noop() {
        let mut p = Player::new("Hero");
        let before = p.clone();
        assert_eq!(p.equip(42, &mut Messages::new()), Err(ActionError::ItemNotFound(42)));
        assert_eq!(p, before);
    }

    #[test]
    fn test_use_consumable() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let potion = p.add_from_template(&template("Minor Health Potion"));
        p.health.current = 50;
        assert_eq!(p.use_consumable(potion, &mut log), Ok(25));
        assert_eq!(p.current_health(), 75);
        assert!(p.inventory().is_empty());
    }

    #[test]
    fn test_zero_heal_consumable_is_kept() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let mut dud = template("Health Potion");
        dud.name = "Dust".to_string();
        dud.heal_amount = 0;
        let id = p.add_from_template(&dud);
        assert!(matches!(p.use_consumable(id, &mut log), Err(ActionError::NotUsable(_))));
        assert!(p.inventory().contains(id));
    }

    #[test]
    fn test_discard_only_inventory_items() {
        let mut p = Player::new("Hero");
        let mut log = Messages::new();
        let sword = p.add_from_template(&template("Rusty Sword"));
        let ring = p.add_from_template(&template("Copper Ring"));
        p.equip(ring, &mut log).unwrap();

        assert!(p.discard(ring, &mut log).is_err());
        assert!(p.equipment().contains(ring));
        assert_eq!(p.discard(sword, &mut log).map(|i| i.kind), Ok(ItemKind::Weapon));
        assert!(p.inventory().is_empty());
    }

    #[test]
    fn test_summary_lists_gear() {
        let mut p = Player::new("Ayla");
        let mut log = Messages::new();
        let sword = p.add_from_template(&template("Rusty Sword"));
        p.equip(sword, &mut log).unwrap();
        let sheet = p.summary();
        assert!(sheet.contains("--- Ayla's Stats ---"));
        assert!(sheet.contains("Weapon: Rusty Sword"));
        assert!(sheet.contains("Level: 1 (EXP: 0/100)"));
        assert!(sheet.contains("Empty"));
    }
}
