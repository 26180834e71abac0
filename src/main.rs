use adventure::combat::types::{Player, StatKind};
use adventure::constants::{START_LOCATION_ID, WEIGHT_LIMIT};
use adventure::event_log::EventLog;
use adventure::game::run_game;
use adventure::game::state::AdventureGame;
use adventure::input::{ActionSource, StdinActions};
use adventure::save_manager::{restore, SaveManager};
use std::io;
use std::path::Path;

const DEFAULT_DATA_PATH: &str = "data/game_data.json";

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut data_path = DEFAULT_DATA_PATH;

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                println!("Adventure - Turn-Based Text Adventure\n");
                println!("Usage: adventure [data-file]\n");
                println!("Arguments:");
                println!("  data-file  Path to the world data JSON (default: {})", DEFAULT_DATA_PATH);
                std::process::exit(0);
            }
            other => data_path = other,
        }
    }

    let mut game = AdventureGame::from_file(Path::new(data_path), START_LOCATION_ID)?;
    let mut player = Player::new(WEIGHT_LIMIT);
    let mut log = EventLog::new();
    let save_manager = SaveManager::new()?;
    let mut actions = StdinActions;

    println!("Welcome to the campus adventure!");
    println!("Recover the usb stick, the lucky mug, and the laptop charger,");
    println!("and bring them back before you run out of time.\n");

    let mut continuing = false;
    if save_manager.save_exists() {
        loop {
            let answer = actions.next_action("A saved game exists. Continue it? (yes/no): ");
            match answer.as_str() {
                "yes" | "y" => {
                    continuing = true;
                    break;
                }
                "no" | "n" | "quit" => break,
                _ => println!("Please answer yes or no."),
            }
        }
    }

    if continuing {
        match save_manager.load() {
            Ok(data) => {
                log = restore(data, &mut game, &mut player);
                println!("Save loaded.\n");
            }
            Err(e) => {
                println!("Could not load the save: {}", e);
                println!("Starting a new game instead.\n");
                allocate_stats(&mut player, &mut actions);
            }
        }
    } else {
        allocate_stats(&mut player, &mut actions);
    }

    run_game(
        &mut game,
        &mut player,
        &mut log,
        Some(&save_manager),
        &mut actions,
    );

    println!("\nThanks for playing!");
    Ok(())
}

/// Interactive stat allocation until every starting point is spent.
fn allocate_stats(player: &mut Player, actions: &mut dyn ActionSource) {
    println!("Spend your stat points before heading out.");
    while player.points > 0 {
        println!("\nPoints remaining: {}", player.points);
        println!("1) Speed   (faster travel costs fewer steps)");
        println!("2) Attack  (hit harder in combat)");
        println!("3) Defense (shrug off enemy blows)");

        let choice = actions.next_action("Pick a stat (1-3): ");
        if choice == "quit" {
            // Closed stdin; leave the remaining points unspent.
            break;
        }
        let stat = match choice.parse::<i32>().ok().and_then(StatKind::from_menu_choice) {
            Some(stat) => stat,
            None => {
                println!("Enter 1, 2, or 3.");
                continue;
            }
        };

        let amount = actions.next_action("How many points? ");
        if amount == "quit" {
            break;
        }
        let amount = match amount.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                println!("Enter a whole number.");
                continue;
            }
        };

        match player.allocate(stat, amount) {
            Ok(()) => println!("{} is now {}.", stat.name(), stat_value(player, stat)),
            Err(e) => println!("{}", e),
        }
    }
}

fn stat_value(player: &Player, stat: StatKind) -> i32 {
    match stat {
        StatKind::Speed => player.speed,
        StatKind::Attack => player.attack,
        StatKind::Defense => player.defense,
    }
}
