//! The turn loop and world-command handling shared by the interactive binary
//! and the simulator.

use crate::combat::logic::run_encounter;
use crate::combat::types::Player;
use crate::constants::MENU_COMMANDS;
use crate::event_log::{Event, EventLog};
use crate::game::state::AdventureGame;
use crate::input::ActionSource;
use crate::save_manager::SaveManager;
use crate::world::item::TakeOutcome;

/// A one-off puzzle rule: dropping `item` at `location_id` spawns
/// `spawn_item` at `spawn_location_id`, unless it is already there or held.
#[derive(Debug, Clone)]
pub struct DropTrigger {
    pub item: String,
    pub location_id: i32,
    pub spawn_item: String,
    pub spawn_location_id: i32,
    pub message: String,
}

/// The shipped trigger table: swiping the t-card at Bahen reveals the usb
/// stick at the exam center.
pub fn default_drop_triggers() -> Vec<DropTrigger> {
    vec![DropTrigger {
        item: "t-card".to_string(),
        location_id: 8,
        spawn_item: "usb stick".to_string(),
        spawn_location_id: 12,
        message: "You swipe the t-card. System access granted.\n\
                  A message flashes: 'USB stick detected at the exam center.'"
            .to_string(),
    }]
}

/// Drives the game until it is no longer ongoing. All reads go through
/// `actions`; pass `save` as `None` to disable the save command (simulator).
pub fn run_game(
    game: &mut AdventureGame,
    player: &mut Player,
    log: &mut EventLog,
    save: Option<&SaveManager>,
    actions: &mut dyn ActionSource,
) {
    // The command that led to the location about to be logged.
    let mut pending_action: Option<String> = None;

    while game.ongoing {
        {
            let loc = game.current_location_mut();
            loc.visited = true;
            let (id, brief) = (loc.id, loc.brief_description.clone());
            log.append(Event::new(id, brief), pending_action.take().as_deref());
        }

        if game.active_enemy_name().is_some() {
            run_encounter(game, player, log, actions);
            continue;
        }

        describe_location(game, log);
        println!(
            "What to do? Choose from: look, inventory, stats, score, log, save, quit, drop <item>"
        );
        println!("At this location, you can also:");
        for command in game.current_location().available_commands.keys() {
            println!("- {}", command);
        }

        let mut choice = actions.next_action("\nEnter action: ");
        while !is_valid_choice(game, &choice) {
            println!("That was an invalid option; try again.");
            choice = actions.next_action("\nEnter action: ");
        }
        println!("========");
        println!("You decided to: {}", choice);

        if MENU_COMMANDS.contains(&choice.as_str()) {
            handle_menu_command(&choice, game, player, log, save);
        } else {
            apply_world_command(game, player, &choice);
            game.check_win(player);
            game.check_steps();
        }
        pending_action = Some(choice);
    }
}

fn is_valid_choice(game: &AdventureGame, choice: &str) -> bool {
    game.current_location().available_commands.contains_key(choice)
        || MENU_COMMANDS.contains(&choice)
        || choice.starts_with("drop ")
}

/// Prints the brief description on a revisit, the long one (plus visible
/// items) on a first visit.
pub fn describe_location(game: &AdventureGame, log: &EventLog) {
    let loc = game.current_location();
    if log.previously_visited(loc.id) {
        println!("{}", loc.brief_description);
    } else {
        println!("{}", loc.long_description);
        display_items(game);
    }
}

fn display_items(game: &AdventureGame) {
    let loc = game.current_location();
    if loc.items.is_empty() {
        return;
    }
    println!("\nYou see:");
    for name in &loc.items {
        if let Some(item) = game.item(name) {
            println!("- {}", item.description);
        }
    }
}

/// Executes a universal command that doesn't touch the world.
pub fn handle_menu_command(
    choice: &str,
    game: &mut AdventureGame,
    player: &Player,
    log: &EventLog,
    save: Option<&SaveManager>,
) {
    match choice {
        "look" => {
            println!("{}", game.current_location().long_description);
            display_items(game);
        }
        "inventory" => {
            println!("Inventory:");
            for item in &player.inventory.items {
                println!("- {}", item.name);
            }
        }
        "stats" => {
            println!(
                "Current Health: {}/{}",
                player.current_health, player.max_health
            );
            println!("Speed: {}", player.speed);
            println!("Attack: {}", player.attack);
            println!("Defense: {}", player.defense);
        }
        "score" => println!("Score: {}", game.score(player)),
        "log" => {
            for event in log.events() {
                println!(
                    "Location: {}, Command: {}",
                    event.location_id,
                    event.next_command.as_deref().unwrap_or("None")
                );
            }
        }
        "save" => match save {
            Some(manager) => match manager.save(game, player, log) {
                Ok(()) => println!("Game saved."),
                Err(e) => println!("Failed to save: {}", e),
            },
            None => println!("Saving is not available here."),
        },
        "quit" => game.ongoing = false,
        _ => {}
    }
}

/// Executes a movement, take, or drop command against the world.
pub fn apply_world_command(game: &mut AdventureGame, player: &mut Player, choice: &str) {
    if let Some(name) = choice.strip_prefix("take ") {
        take_item(game, player, name);
    } else if let Some(name) = choice.strip_prefix("drop ") {
        drop_item(game, player, name);
    } else if let Some(&destination) = game.current_location().available_commands.get(choice) {
        if choice.starts_with("go ") {
            game.current_location_id = destination;
            game.advance_steps(player);
        }
    }
}

fn take_item(game: &mut AdventureGame, player: &mut Player, name: &str) {
    if !game.current_location().items.iter().any(|n| n == name) {
        println!("No such item here.");
        return;
    }
    let Some(item) = game.items.get(name).cloned() else {
        println!("No such item here.");
        return;
    };
    match player.inventory.take_item(&item, game.current_location_mut()) {
        TakeOutcome::Taken => println!("Added {} to inventory.", name),
        TakeOutcome::TooHeavy => {
            println!("Your inventory is full. Drop an item to take {}.", name)
        }
    }
}

fn drop_item(game: &mut AdventureGame, player: &mut Player, name: &str) {
    match player.inventory.drop_item(name, game.current_location_mut()) {
        Some(item) => {
            println!("Dropped {}.", item.name);
            run_drop_triggers(game, player, &item.name);
        }
        None => println!("{} is not in your inventory.", name),
    }
}

/// Consults the drop-trigger table after a successful drop. The spawned item
/// only appears if it is neither already at its spawn location nor carried.
fn run_drop_triggers(game: &mut AdventureGame, player: &Player, dropped: &str) {
    let current_id = game.current_location_id;
    let matches: Vec<DropTrigger> = game
        .drop_triggers
        .iter()
        .filter(|t| t.item == dropped && t.location_id == current_id)
        .cloned()
        .collect();

    for trigger in matches {
        if !game.items.contains_key(&trigger.spawn_item) {
            continue;
        }
        let already_held = player.inventory.contains(&trigger.spawn_item);
        if let Some(target) = game.locations.get_mut(&trigger.spawn_location_id) {
            if !already_held && !target.items.contains(&trigger.spawn_item) {
                println!("{}", trigger.message);
                target.items.push(trigger.spawn_item.clone());
                target.add_take_command(&trigger.spawn_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::data::GameTables;
    use crate::world::item::{CombatUse, Item};
    use crate::world::location::Location;
    use std::collections::{BTreeMap, HashMap};

    fn location(id: i32, commands: &[(&str, i32)], items: &[&str]) -> Location {
        let mut loc = Location {
            id,
            brief_description: format!("Location {}.", id),
            long_description: format!("The long view of location {}.", id),
            available_commands: commands
                .iter()
                .map(|(c, d)| (c.to_string(), *d))
                .collect::<BTreeMap<_, _>>(),
            items: items.iter().map(|s| s.to_string()).collect(),
            enemies: Vec::new(),
            visited: false,
        };
        for name in items {
            loc.add_take_command(name);
        }
        loc
    }

    fn item(name: &str, weight: f64) -> Item {
        Item {
            name: name.to_string(),
            description: format!("a {}", name),
            start_position: 1,
            target_position: -1,
            target_points: 0,
            weight,
            combat_use: CombatUse::None,
            strength: 0,
        }
    }

    fn trigger_world() -> AdventureGame {
        AdventureGame::from_tables(
            GameTables {
                locations: [
                    location(8, &[("go east", 12)], &[]),
                    location(12, &[("go west", 8)], &[]),
                ]
                .into_iter()
                .map(|l| (l.id, l))
                .collect(),
                items: [item("t-card", 0.2), item("usb stick", 0.5)]
                    .into_iter()
                    .map(|i| (i.name.clone(), i))
                    .collect(),
                enemies: HashMap::new(),
            },
            8,
        )
    }

    #[test]
    fn test_movement_advances_steps() {
        let mut game = trigger_world();
        let mut player = Player::new(10.0);
        apply_world_command(&mut game, &mut player, "go east");
        assert_eq!(game.current_location_id, 12);
        assert_eq!(game.steps, 6);
    }

    #[test]
    fn test_take_unknown_item_is_a_noop() {
        let mut game = trigger_world();
        let mut player = Player::new(10.0);
        apply_world_command(&mut game, &mut player, "take ghost");
        assert!(player.inventory.items.is_empty());
        assert_eq!(game.steps, 0);
    }

    #[test]
    fn test_drop_trigger_spawns_item_once() {
        let mut game = trigger_world();
        let mut player = Player::new(10.0);
        let card = game.items["t-card"].clone();
        player.inventory.items.push(card);
        player.inventory.current_weight = 0.2;

        apply_world_command(&mut game, &mut player, "drop t-card");

        let exam = &game.locations[&12];
        assert_eq!(exam.items, vec!["usb stick".to_string()]);
        assert_eq!(exam.available_commands.get("take usb stick"), Some(&12));

        // Dropping again (after re-taking) does not duplicate the spawn.
        apply_world_command(&mut game, &mut player, "take t-card");
        apply_world_command(&mut game, &mut player, "drop t-card");
        assert_eq!(game.locations[&12].items.len(), 1);
    }

    #[test]
    fn test_drop_trigger_ignores_wrong_location() {
        let mut game = trigger_world();
        game.current_location_id = 12;
        let mut player = Player::new(10.0);
        let card = game.items["t-card"].clone();
        player.inventory.items.push(card);
        player.inventory.current_weight = 0.2;

        apply_world_command(&mut game, &mut player, "drop t-card");
        // Dropped at 12, trigger is tied to 8: no spawn.
        assert_eq!(game.locations[&12].items, vec!["t-card".to_string()]);
    }

    #[test]
    fn test_drop_trigger_skipped_while_spawn_item_held() {
        let mut game = trigger_world();
        let mut player = Player::new(10.0);
        let card = game.items["t-card"].clone();
        let usb = game.items["usb stick"].clone();
        player.inventory.items.push(card);
        player.inventory.items.push(usb);
        player.inventory.current_weight = 0.7;

        apply_world_command(&mut game, &mut player, "drop t-card");
        assert!(game.locations[&12].items.is_empty());
    }
}
