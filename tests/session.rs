//! Whole-session flows through the public API

use std::cell::RefCell;
use std::rc::Rc;

use notrouge::combat::{AutoAttack, CombatState};
use notrouge::data::{default_item_templates, Catalog, EnemyTemplate, EnemyTemplates};
use notrouge::dungeon::RunStep;
use notrouge::game::{GameConfig, Session};
use notrouge::items::{EquipSlot, ItemKind};
use notrouge::save::{from_json, to_json, PlayerStore, SaveError, SaveFile};
use notrouge::Player;

/// Store the test can inspect after handing a clone to the session
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<Option<String>>>);

impl PlayerStore for SharedStore {
    fn save(&mut self, player: &Player) -> Result<(), SaveError> {
        *self.0.borrow_mut() = Some(to_json(player)?);
        Ok(())
    }

    fn load(&self) -> Option<Player> {
        self.0.borrow().as_deref().and_then(|json| from_json(json).ok())
    }
}

fn config() -> GameConfig {
    GameConfig {
        seed: Some(1234),
        shop_stock_size: 20,
        ..GameConfig::default()
    }
}

/// Full item catalog, one enemy nobody survives
fn deadly_catalog() -> Catalog {
    let reaper = EnemyTemplate {
        name: "Reaper".to_string(),
        health: 10_000,
        attack: 500,
        defense: 0,
        gold_drop: 0,
        exp_drop: 0,
    };
    Catalog::new(default_item_templates(), EnemyTemplates { templates: vec![reaper] })
}

#[test]
fn test_buy_equip_die_and_reload() {
    let store = SharedStore::default();
    let mut session =
        Session::new_game("Hero", deadly_catalog(), Box::new(store.clone()), config());

    // Stock covers the whole catalog, so the cheapest weapon is on offer
    let index = session
        .visit_shop()
        .stock()
        .iter()
        .position(|t| t.name == "Rusty Sword")
        .expect("rusty sword in stock");
    let sword = session.buy(index).unwrap();
    assert_eq!(session.player().gold(), 70);
    session.equip(sword).unwrap();
    assert_eq!(session.player().attack(), 13);

    let mut died = false;
    for _ in 0..50 {
        session.enter_dungeon().unwrap();
        while session.in_dungeon() {
            match session.advance().unwrap() {
                RunStep::Fight => loop {
                    match session.auto_attack_tick().unwrap() {
                        AutoAttack::Continue => continue,
                        AutoAttack::Finished(state) => {
                            assert_eq!(state, CombatState::PlayerLost);
                            break;
                        }
                        AutoAttack::SafetyStop | AutoAttack::Stalemate => {
                            panic!("one hit should be fatal")
                        }
                    }
                },
                RunStep::Found(_) => {
                    session.continue_on().unwrap();
                    continue;
                }
                RunStep::Cleared => break,
                other => panic!("unexpected step {other:?}"),
            }

            let gold_before = session.player().gold();
            match session.finish_combat().unwrap() {
                RunStep::Died(report) => {
                    assert_eq!(report.gold_kept, gold_before / 2);
                    assert_eq!(report.kept_item.as_deref(), Some("Rusty Sword"));
                    died = true;
                }
                other => panic!("expected death, got {other:?}"),
            }
        }
        if died {
            break;
        }
    }
    assert!(died, "never met the reaper");
    assert!(!session.in_dungeon());

    let player = session.player();
    assert_eq!(player.level(), 1);
    assert_eq!(player.experience(), 0);
    assert_eq!(player.current_health(), player.max_health());
    assert_eq!(player.attack(), 13);
    assert_eq!(player.equipment().get(EquipSlot::Weapon).map(|i| i.id), Some(sword));

    // The death penalty saved on its own
    let reloaded = Session::load_game(deadly_catalog(), Box::new(store), config()).unwrap();
    assert_eq!(reloaded.player(), session.player());
}

#[test]
fn test_inventory_actions_outside_combat() {
    let store = Box::new(SharedStore::default());
    let mut session = Session::new_game("Hero", Catalog::builtin(), store, config());
    let stock: Vec<_> = session.visit_shop().stock().to_vec();
    let potion = stock.iter().position(|t| t.name == "Minor Health Potion").unwrap();
    let ring = stock.iter().position(|t| t.name == "Copper Ring").unwrap();

    let potion = session.buy(potion).unwrap();
    let ring = session.buy(ring).unwrap();
    assert_eq!(session.player().gold(), 35);

    // Full health still lets the potion be drunk; it just heals nothing
    assert_eq!(session.use_item(potion), Ok(0));
    assert_eq!(session.player().inventory().count(), 1);

    session.equip(ring).unwrap();
    assert!(session.sell(ring).is_err());
    session.unequip(EquipSlot::Accessory).unwrap();
    assert_eq!(session.sell(ring), Ok(25));
    assert_eq!(session.player().gold(), 60);
    assert!(session
        .player()
        .inventory()
        .items()
        .iter()
        .all(|item| item.kind != ItemKind::Accessory));
}

#[test]
fn test_save_file_round_trip() {
    let path = std::env::temp_dir().join(format!("notrouge-session-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let mut config = config();
    config.save_path = Some(path.clone());

    let mut session = Session::new_game(
        "Keeper",
        Catalog::builtin(),
        Box::new(SaveFile::new(config.resolved_save_path())),
        config.clone(),
    );
    let offer = session
        .visit_shop()
        .stock()
        .iter()
        .position(|t| t.kind == ItemKind::Armor && t.cost <= 100)
        .unwrap();
    let armor = session.buy(offer).unwrap();
    session.equip(armor).unwrap();
    session.save().unwrap();

    let store = Box::new(SaveFile::new(&path));
    let reloaded = Session::load_game(Catalog::builtin(), store, config).unwrap();
    assert_eq!(reloaded.player(), session.player());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_empty_enemy_catalog_keeps_player_in_town() {
    let catalog = Catalog::new(default_item_templates(), EnemyTemplates::default());
    let store = Box::new(SharedStore::default());
    let mut session = Session::new_game("Hero", catalog, store, config());
    assert!(session.enter_dungeon().is_err());
    assert!(!session.in_dungeon());
    let texts: Vec<String> = session.messages().drain().map(|m| m.text).collect();
    assert!(texts.iter().any(|t| t.contains("eerily quiet")));
}
