//! Death penalty
//!
//! When the player drops to 0 HP they lose half their gold, half their
//! gained levels and all but one random piece of equipment, then wake up
//! in town fully healed. The result is saved straight away.

use crate::combat::Dice;
use crate::entities::{Player, STARTING_ATTACK, STARTING_DEFENSE, STARTING_HEALTH};
use crate::game::MessageSink;
use crate::save::PlayerStore;

/// What the player walked away with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathReport {
    pub gold_kept: u32,
    pub kept_item: Option<String>,
    pub level: u32,
    /// The revived state reached the save store
    pub saved: bool,
}

/// Apply the death penalty to `player` and persist the result
pub fn apply_death_penalty(
    player: &mut Player,
    dice: &mut dyn Dice,
    store: &mut dyn PlayerStore,
    sink: &mut dyn MessageSink,
) -> DeathReport {
    sink.system("You have been defeated!".to_string());
    sink.system("But your adventure doesn't end here...".to_string());

    player.gold /= 2;
    sink.system(format!("You kept half your gold: {} gold remaining.", player.gold));

    // Equipped gear first (slot order), then inventory order
    let pool: Vec<_> = player
        .equipment
        .all_items()
        .chain(player.inventory.items())
        .filter(|item| !item.is_consumable())
        .map(|item| item.id)
        .collect();

    player.attack = STARTING_ATTACK;
    player.defense = STARTING_DEFENSE;
    player.health.max = STARTING_HEALTH;
    player.health.restore_full();

    let mut kept_item = None;
    if !pool.is_empty() {
        let kept_id = pool[dice.pick(pool.len())];
        let mut everything = player.equipment.drain();
        everything.extend(player.inventory.drain());

        if let Some(kept) = everything.into_iter().find(|item| item.id == kept_id) {
            sink.item(format!("You managed to keep one random piece of equipment: {}.", kept.name));
            kept_item = Some(kept.name.clone());
            let bonus = kept.bonus();
            match player.equipment.equip(kept) {
                Ok(_) => {
                    player.attack += bonus.attack;
                    player.defense += bonus.defense;
                    player.health.max += bonus.health;
                    player.health.restore_full();
                }
                // Only reachable if a consumable ever lands in the pool
                Err(item) => player.inventory.add_item(item),
            }
        }
    } else {
        sink.item("You had no equipment to keep.".to_string());
    }

    let levels_to_keep = player.level.saturating_sub(1) / 2;
    player.level = 1 + levels_to_keep;
    player.experience = 0;
    sink.system(format!(
        "You kept half your gained levels. You are now Level {}.",
        player.level
    ));
    player.health.restore_full();

    log::info!(
        "Death penalty applied: level {}, {} gold, kept {:?}",
        player.level,
        player.gold,
        kept_item
    );

    let saved = match store.save(player) {
        Ok(()) => {
            sink.system("Game saved successfully!".to_string());
            true
        }
        Err(e) => {
            log::warn!("Failed to save after death: {}", e);
            sink.warn(format!("Error saving game: {}", e));
            false
        }
    };
    sink.system("You've been revived and returned to town!".to_string());

    DeathReport {
        gold_kept: player.gold,
        kept_item,
        level: player.level,
        saved,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::combat::dice::ScriptedDice;
    use crate::game::Discard;
    use crate::save::MemoryStore;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_death_halves_gold_and_levels(gold in 0u32..100_000, level in 1u32..200) {
            let mut player = Player::new("Fallen");
            player.gold = gold;
            player.level = level;
            player.health.current = 0;
            let mut store = MemoryStore::new();
            let mut dice = ScriptedDice::new();

            let report = apply_death_penalty(&mut player, &mut dice, &mut store, &mut Discard);

            prop_assert_eq!(player.gold(), gold / 2);
            prop_assert_eq!(player.level(), 1 + (level - 1) / 2);
            prop_assert!(player.level() <= level);
            prop_assert_eq!(player.experience(), 0);
            prop_assert_eq!(player.current_health(), player.max_health());
            prop_assert_eq!(report.gold_kept, player.gold());
            prop_assert!(report.saved);
            let loaded = store.load();
            prop_assert_eq!(loaded.as_ref(), Some(&player));
        }
    }
}
