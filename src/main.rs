//! NotRouge - Entry Point
//!
//! Line-oriented terminal front-end. All game rules live in the library;
//! this file only prints menus, reads choices and shows the message log.

use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};

use notrouge::combat::{AutoAttack, CombatAction};
use notrouge::dungeon::RunStep;
use notrouge::economy::sell_price;
use notrouge::game::{open_resources, GameConfig, MessageCategory, Session};
use notrouge::items::{EquipSlot, Item, ItemId};

/// Stdin reached EOF; treated as quitting
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
struct InputClosed;

fn main() -> Result<()> {
    // Log to file so diagnostics don't mix with the menus
    if let Ok(log_file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("notrouge.log")
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .init();
    }

    log::info!("Starting NotRouge v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load_or_default(&GameConfig::config_path());
    let result = main_menu(config);

    match result {
        Err(e) if e.is::<InputClosed>() => {
            log::info!("Input closed, exiting");
            Ok(())
        }
        Err(e) => {
            log::error!("Game exited with error: {}", e);
            Err(e)
        }
        Ok(()) => {
            log::info!("NotRouge shut down cleanly");
            Ok(())
        }
    }
}

fn main_menu(config: GameConfig) -> Result<()> {
    loop {
        clear_screen()?;
        println!("{}", "--- NotRouge ---".bold());
        println!("1. New Game");
        println!("2. Load Game");
        println!("3. Exit");

        let session = match ask("Enter choice (1-3): ")?.as_str() {
            "1" => {
                let name = ask("Enter your character's name: ")?;
                let (catalog, store) = open_resources(&config);
                Session::new_game(&name, catalog, store, config.clone())
            }
            "2" => {
                let (catalog, store) = open_resources(&config);
                match Session::load_game(catalog, store, config.clone()) {
                    Some(session) => session,
                    None => {
                        println!("{}", "No save file found. Starting a new game.".yellow());
                        let name = ask("Enter your character's name: ")?;
                        let (catalog, store) = open_resources(&config);
                        Session::new_game(&name, catalog, store, config.clone())
                    }
                }
            }
            "3" => {
                println!("Thanks for playing!");
                return Ok(());
            }
            _ => {
                println!("Invalid choice.");
                continue;
            }
        };
        return play(session);
    }
}

/// Town loop; saves on the way out, including when input closes
fn play(mut session: Session) -> Result<()> {
    let result = town(&mut session);
    let _ = session.save();
    flush_messages(&mut session);
    match result {
        Err(e) if e.is::<InputClosed>() => Ok(()),
        other => other,
    }
}

fn town(session: &mut Session) -> Result<()> {
    loop {
        flush_messages(session);
        println!();
        println!("{}", "--- Town ---".bold());
        println!("1. Enter Dungeon");
        println!("2. Visit Shop");
        println!("3. View Stats & Inventory");
        println!("4. Save Game");
        println!("5. Exit Game");

        match ask("Enter choice (1-5): ")?.as_str() {
            "1" => dungeon(session)?,
            "2" => shop(session)?,
            "3" => inventory(session)?,
            "4" => {
                let _ = session.save();
            }
            "5" => {
                println!("Saving and exiting. Thanks for playing!");
                return Ok(());
            }
            _ => println!("Invalid choice."),
        }
    }
}

fn shop(session: &mut Session) -> Result<()> {
    session.visit_shop();
    loop {
        flush_messages(session);
        println!();
        let title = format!("--- Welcome to the Shop! (Gold: {}) ---", session.player().gold());
        println!("{}", title.bold());
        if session.shop().is_empty() {
            println!("The shelves are empty.");
        }
        for (i, offer) in session.shop().stock().iter().enumerate() {
            println!("{}. {} - {} gold", i + 1, offer.instantiate(0).describe(), offer.cost);
        }
        println!("S. Sell items");
        println!("0. Leave shop");

        let choice = ask("Enter choice: ")?;
        match choice.to_lowercase().as_str() {
            "0" => return Ok(()),
            "s" => sell_menu(session)?,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    let _ = session.buy(n - 1);
                }
                _ => println!("Invalid choice."),
            },
        }
    }
}

fn sell_menu(session: &mut Session) -> Result<()> {
    loop {
        flush_messages(session);
        let items: Vec<(ItemId, String)> = session
            .player()
            .inventory()
            .items()
            .iter()
            .map(|item| {
                let line = format!("{} - sells for {} gold", item.describe(), sell_price(item));
                (item.id, line)
            })
            .collect();
        println!();
        println!("{}", "--- Sell Items ---".bold());
        if items.is_empty() {
            println!("You have nothing to sell.");
            return Ok(());
        }
        for (i, (_, line)) in items.iter().enumerate() {
            println!("{}. {}", i + 1, line);
        }
        println!("0. Back");

        match pick_from(&items, &ask("Enter item number to sell: ")?) {
            Pick::Back => return Ok(()),
            Pick::Chosen(id) => {
                let prompt = session.player().inventory().get_by_id(id).map(sell_prompt);
                if let Some(prompt) = prompt {
                    if ask_yes_no(&prompt)? {
                        let _ = session.sell(id);
                    }
                }
            }
            Pick::Invalid => println!("Invalid choice."),
        }
    }
}

fn inventory(session: &mut Session) -> Result<()> {
    loop {
        flush_messages(session);
        println!();
        println!("{}", session.player().summary());
        println!("U. Use item");
        println!("E. Equip item");
        println!("R. Remove equipped item");
        println!("T. Throw away item");
        println!("0. Back");

        match ask("Enter choice: ")?.to_lowercase().as_str() {
            "0" => return Ok(()),
            "u" => {
                let items = inventory_choices(session, |kind| !kind.is_equipment());
                if let Some(id) = choose_item(&items, "use")? {
                    let _ = session.use_item(id);
                }
            }
            "e" => {
                let items = inventory_choices(session, |kind| kind.is_equipment());
                if let Some(id) = choose_item(&items, "equip")? {
                    let _ = session.equip(id);
                }
            }
            "r" => {
                for (i, slot) in EquipSlot::all().iter().enumerate() {
                    println!("{}. {}", i + 1, slot.name());
                }
                let choice = ask("Enter slot number (or 0 to go back): ")?;
                if let Some(slot) = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| EquipSlot::all().get(i))
                {
                    let _ = session.unequip(*slot);
                }
            }
            "t" => {
                let items = inventory_choices(session, |_| true);
                if let Some(id) = choose_item(&items, "throw away")? {
                    let prompt = session.player().inventory().get_by_id(id).map(discard_prompt);
                    if let Some(prompt) = prompt {
                        if ask_yes_no(&prompt)? {
                            let _ = session.discard(id);
                        }
                    }
                }
            }
            _ => println!("Invalid choice."),
        }
    }
}

fn dungeon(session: &mut Session) -> Result<()> {
    if session.enter_dungeon().is_err() {
        return Ok(());
    }
    loop {
        let step = match session.advance() {
            Ok(step) => step,
            Err(_) => return Ok(()),
        };
        flush_messages(session);
        let step = match step {
            RunStep::Fight => combat(session)?,
            other => other,
        };
        flush_messages(session);

        match step {
            RunStep::Cleared | RunStep::Died(_) => {
                pause()?;
                return Ok(());
            }
            RunStep::Won | RunStep::Fight => continue,
            RunStep::Found(_) | RunStep::Escaped => {
                println!(
                    "Health: {}/{}",
                    session.player().current_health(),
                    session.player().max_health()
                );
                if ask_yes_no("Continue exploring the dungeon? (y/n): ")? {
                    let _ = session.continue_on();
                } else {
                    let _ = session.retreat();
                    flush_messages(session);
                    return Ok(());
                }
            }
        }
    }
}

/// Fight until the encounter ends, then settle it with the run
fn combat(session: &mut Session) -> Result<RunStep> {
    loop {
        flush_messages(session);
        let over = session.run().and_then(|run| run.combat()).map_or(true, |c| c.is_over());
        if over {
            return Ok(session.finish_combat()?);
        }
        if let Some(combat) = session.run().and_then(|run| run.combat()) {
            println!();
            let title = format!(
                "--- Combat: {} vs {} ---",
                session.player().name(),
                combat.enemy().name
            );
            println!("{}", title.bold());
            println!("{}", combat.status(session.player()));
        }
        println!("1. Attack");
        println!("2. Use Item");
        println!("3. Flee (50% chance)");
        println!("4. Auto-Attack (until enemy dies or 1 HP remaining)");

        match ask("Enter choice (1-4): ")?.as_str() {
            "1" => {
                let _ = session.combat_action(CombatAction::Attack);
            }
            "2" => {
                let items = inventory_choices(session, |kind| !kind.is_equipment());
                if items.is_empty() {
                    let _ = session.combat_action(CombatAction::UseItem(0));
                } else if let Some(id) = choose_item(&items, "use")? {
                    let _ = session.combat_action(CombatAction::UseItem(id));
                }
            }
            "3" => {
                let _ = session.combat_action(CombatAction::Flee);
            }
            "4" => auto_attack(session)?,
            _ => println!("Invalid choice."),
        }
    }
}

fn auto_attack(session: &mut Session) -> Result<()> {
    println!("Initiating auto-attack...");
    let delay = Duration::from_millis(session.config().auto_attack_delay_ms);
    loop {
        match session.auto_attack_tick() {
            Ok(AutoAttack::Continue) => {
                flush_messages(session);
                thread::sleep(delay);
            }
            Ok(AutoAttack::SafetyStop | AutoAttack::Stalemate | AutoAttack::Finished(_))
            | Err(_) => {
                return Ok(());
            }
        }
    }
}

/// Inventory entries whose kind passes `filter`, labelled for a menu
fn inventory_choices(
    session: &Session,
    filter: impl Fn(notrouge::items::ItemKind) -> bool,
) -> Vec<(ItemId, String)> {
    session
        .player()
        .inventory()
        .items()
        .iter()
        .filter(|item| filter(item.kind))
        .map(|item| (item.id, item.describe()))
        .collect()
}

fn choose_item(items: &[(ItemId, String)], verb: &str) -> Result<Option<ItemId>> {
    if items.is_empty() {
        println!("You have no items to {}.", verb);
        return Ok(None);
    }
    for (i, (_, line)) in items.iter().enumerate() {
        println!("{}. {}", i + 1, line);
    }
    println!("0. Back");
    match pick_from(items, &ask(&format!("Enter item number to {} (or 0 to go back): ", verb))?) {
        Pick::Chosen(id) => Ok(Some(id)),
        Pick::Back => Ok(None),
        Pick::Invalid => {
            println!("Invalid choice.");
            Ok(None)
        }
    }
}

enum Pick {
    Chosen(ItemId),
    Back,
    Invalid,
}

fn pick_from(items: &[(ItemId, String)], input: &str) -> Pick {
    match input.parse::<usize>() {
        Ok(0) => Pick::Back,
        Ok(n) => items.get(n - 1).map_or(Pick::Invalid, |(id, _)| Pick::Chosen(*id)),
        Err(_) => Pick::Invalid,
    }
}

/// Print and clear pending engine messages
fn flush_messages(session: &mut Session) {
    for message in session.messages().drain() {
        let line = match message.category {
            MessageCategory::Combat => message.text.red(),
            MessageCategory::Item => message.text.yellow(),
            MessageCategory::System => message.text.cyan(),
            MessageCategory::Warning => message.text.magenta(),
        };
        println!("{}", line);
    }
}

fn ask(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(InputClosed.into());
    }
    Ok(line.trim().to_string())
}

fn ask_yes_no(prompt: &str) -> Result<bool> {
    loop {
        match parse_yes_no(&ask(prompt)?) {
            Some(answer) => return Ok(answer),
            None => println!("Please enter y or n."),
        }
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn sell_prompt(item: &Item) -> String {
    format!(
        "Are you sure you want to sell {} for {} gold? (y/n): ",
        item.name,
        sell_price(item)
    )
}

fn discard_prompt(item: &Item) -> String {
    format!(
        "Are you sure you want to throw away {}? This cannot be undone! (y/n): ",
        item.name
    )
}

fn pause() -> Result<()> {
    ask("Press Enter to continue...")?;
    Ok(())
}

fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
