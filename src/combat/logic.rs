//! The turn-based combat resolver.
//!
//! One call to [`run_encounter`] drives a whole encounter: player action,
//! enemy retaliation, step accounting, until a terminal outcome. All player
//! decisions come through the injected [`ActionSource`], so the resolver runs
//! identically under a live player or a scripted sequence.

use std::collections::HashMap;

use crate::combat::types::{Enemy, Player};
use crate::constants::INSTANT_KILL_DAMAGE;
use crate::event_log::{Event, EventLog};
use crate::game::state::AdventureGame;
use crate::input::{ActionSource, EXHAUSTED_ACTION};
use crate::world::item::CombatUse;

/// How one encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    EnemyDefeated,
    PlayerFled,
    PlayerDied,
    /// The game ended mid-encounter (step budget exhausted, or quit).
    GameEnded,
}

/// Effect of a one-off `(item, enemy)` pairing. Kept in a lookup table on the
/// game state so new pairings are content edits, not resolver changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatSpecial {
    /// The item defeats the enemy outright and is consumed in the process.
    InstantKill,
}

/// The shipped pairing table: stale bread fells the Giant Goose.
pub fn default_combat_specials() -> HashMap<(String, String), CombatSpecial> {
    HashMap::from([(
        ("stale bread".to_string(), "Giant Goose".to_string()),
        CombatSpecial::InstantKill,
    )])
}

/// Runs one encounter against the active enemy at the current location.
///
/// The enemy is taken out of the enemy table for the duration (its state is
/// shared with nothing else) and put back afterwards; defeat is expressed
/// through the location's enemy list, not the table.
pub fn run_encounter(
    game: &mut AdventureGame,
    player: &mut Player,
    log: &mut EventLog,
    actions: &mut dyn ActionSource,
) -> EncounterOutcome {
    let Some(enemy_name) = game.active_enemy_name() else {
        return EncounterOutcome::EnemyDefeated;
    };
    let Some(mut enemy) = game.enemies.remove(&enemy_name) else {
        // Stale reference in the location data; drop it rather than fight a ghost.
        game.current_location_mut().enemies.pop();
        return EncounterOutcome::EnemyDefeated;
    };

    println!("You have entered combat with {}!", enemy.name);
    let mut turn_number: u32 = 1;

    let outcome = loop {
        if !game.ongoing {
            break EncounterOutcome::GameEnded;
        }

        if let Some(outcome) = player_turn(game, player, &mut enemy, log, actions) {
            break outcome;
        }

        // Enemy retaliation: defense reduces damage to a floor of 1, never 0.
        let damage = (enemy.attack_damage(turn_number) - player.defense).max(1);
        player.take_damage(damage);
        println!(
            "{} attacks for {} damage! HP: {}/{}",
            enemy.name, damage, player.current_health, player.max_health
        );
        if !player.is_alive() {
            println!("You died! Game over.");
            game.ongoing = false;
            break EncounterOutcome::PlayerDied;
        }

        turn_number += 1;
        game.advance_steps(player);
        game.check_steps();
    };

    game.enemies.insert(enemy.name.clone(), enemy);
    outcome
}

/// One player turn. Returns `Some(outcome)` if the turn ended the encounter.
fn player_turn(
    game: &mut AdventureGame,
    player: &mut Player,
    enemy: &mut Enemy,
    log: &mut EventLog,
    actions: &mut dyn ActionSource,
) -> Option<EncounterOutcome> {
    let prompt = "What to do? Choose from attack, flee, or inventory: ";
    let mut action = actions.next_action(prompt);
    loop {
        match action.as_str() {
            "attack" | "flee" | "inventory" => break,
            // Cooperative early exit; also how exhausted scripts unwind.
            "quit" => {
                game.ongoing = false;
                return Some(EncounterOutcome::GameEnded);
            }
            _ => action = actions.next_action(prompt),
        }
    }

    // The chosen action is logged against the current location before it
    // resolves.
    let loc = game.current_location();
    log.append(
        Event::new(loc.id, loc.brief_description.clone()),
        Some(&action),
    );

    match action.as_str() {
        "attack" => {
            if !enemy.apply_damage(player.attack) {
                handle_defeat(game, enemy);
                Some(EncounterOutcome::EnemyDefeated)
            } else {
                println!("You hit {} for {} damage.", enemy.name, player.attack);
                None
            }
        }
        "flee" => match flee_destination(game, actions) {
            Some(destination) => {
                game.current_location_id = destination;
                Some(EncounterOutcome::PlayerFled)
            }
            None => {
                game.ongoing = false;
                Some(EncounterOutcome::GameEnded)
            }
        },
        _ => {
            if use_combat_item(game, player, enemy, actions) {
                Some(EncounterOutcome::EnemyDefeated)
            } else {
                None
            }
        }
    }
}

/// Prompts for a flee direction until a valid location command is chosen.
/// Returns `None` only on quit.
fn flee_destination(game: &AdventureGame, actions: &mut dyn ActionSource) -> Option<i32> {
    let loc = game.current_location();
    println!("Which direction would you like to flee?");
    for direction in loc.movement_commands() {
        println!("- {}", direction);
    }

    let mut choice = actions.next_action("");
    while !loc.available_commands.contains_key(&choice) {
        if choice == EXHAUSTED_ACTION {
            return None;
        }
        println!("That was an invalid option; try again.");
        choice = actions.next_action("\nEnter action: ");
    }
    println!("You ran away!");
    Some(loc.available_commands[&choice])
}

/// Uses an item mid-combat. Returns whether the enemy was defeated by it.
/// An unusable choice, or having nothing usable, still consumes the turn.
fn use_combat_item(
    game: &mut AdventureGame,
    player: &mut Player,
    enemy: &mut Enemy,
    actions: &mut dyn ActionSource,
) -> bool {
    let usable = player.inventory.usable_item_names();
    if usable.is_empty() {
        println!("No items available!");
        return false;
    }

    println!("Inventory:");
    for item in &player.inventory.items {
        println!("- {}", item.name);
    }
    let choice = actions.next_action("Which item would you like to use? ");
    if !usable.contains(&choice) {
        println!("Item not in inventory or not usable.");
        return false;
    }
    let Some(item) = player.inventory.item(&choice).cloned() else {
        return false;
    };

    match item.combat_use {
        CombatUse::Heal => {
            player.heal(item.strength);
            println!("You healed {} health!", item.strength);
            false
        }
        CombatUse::Damage => {
            let special = game
                .combat_specials
                .get(&(item.name.clone(), enemy.name.clone()))
                .copied();
            if let Some(CombatSpecial::InstantKill) = special {
                enemy.apply_damage(INSTANT_KILL_DAMAGE);
                handle_defeat(game, enemy);
                player.inventory.consume_item(&item.name);
                return true;
            }
            println!("You did {} damage!", item.strength);
            if !enemy.apply_damage(item.strength) {
                handle_defeat(game, enemy);
                true
            } else {
                false
            }
        }
        CombatUse::None => false,
    }
}

/// Shared defeat handling for the attack and item-kill paths: the enemy
/// leaves the location and its drops become takeable there.
fn handle_defeat(game: &mut AdventureGame, enemy: &Enemy) {
    println!("{} has been defeated!", enemy.name);
    let loc = game.current_location_mut();
    loc.enemies.pop();
    for name in &enemy.drops {
        loc.items.push(name.clone());
        loc.add_take_command(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::AttackKind;
    use crate::input::ScriptedActions;
    use crate::world::data::GameTables;
    use crate::world::item::Item;
    use crate::world::location::Location;
    use std::collections::BTreeMap;

    fn location(id: i32, enemies: &[&str]) -> Location {
        Location {
            id,
            brief_description: format!("Location {}.", id),
            long_description: format!("The long view of location {}.", id),
            available_commands: BTreeMap::from([(
                if id == 1 { "go east" } else { "go west" }.to_string(),
                if id == 1 { 2 } else { 1 },
            )]),
            items: Vec::new(),
            enemies: enemies.iter().map(|s| s.to_string()).collect(),
            visited: false,
        }
    }

    fn enemy(name: &str, health: i32, attack: i32, pattern: Vec<AttackKind>) -> Enemy {
        Enemy {
            name: name.to_string(),
            max_health: health,
            current_health: health,
            attack,
            attack_pattern: pattern,
            drops: vec!["lucky mug".to_string()],
        }
    }

    fn combat_item(name: &str, combat_use: CombatUse, strength: i32) -> Item {
        Item {
            name: name.to_string(),
            description: format!("a {}", name),
            start_position: 1,
            target_position: -1,
            target_points: 0,
            weight: 0.5,
            combat_use,
            strength,
        }
    }

    fn game_with_enemy(e: Enemy) -> AdventureGame {
        let name = e.name.clone();
        AdventureGame::from_tables(
            GameTables {
                locations: [location(1, &[name.as_str()]), location(2, &[])]
                    .into_iter()
                    .map(|l| (l.id, l))
                    .collect(),
                items: HashMap::new(),
                enemies: HashMap::from([(name, e)]),
            },
            1,
        )
    }

    fn attacker() -> Player {
        let mut p = Player::new(10.0);
        p.attack = 5;
        p
    }

    #[test]
    fn test_one_hit_kill_skips_enemy_turn() {
        // Enemy would hit hard, but dies to the first attack.
        let mut game = game_with_enemy(enemy("Glass Goose", 1, 10, vec![AttackKind::Big]));
        let mut player = attacker();
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["attack"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::EnemyDefeated);
        assert_eq!(player.current_health, player.max_health);
        let loc = game.current_location();
        assert!(loc.enemies.is_empty());
        assert_eq!(loc.items, vec!["lucky mug".to_string()]);
        assert_eq!(loc.available_commands.get("take lucky mug"), Some(&1));
        assert!(game.ongoing);
        assert_eq!(game.steps, 0);
    }

    #[test]
    fn test_enemy_damage_floor_is_one() {
        let mut game = game_with_enemy(enemy("Armored Goose", 10, 10, vec![AttackKind::Big]));
        let mut player = attacker();
        player.defense = 100;
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["attack", "attack"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        // First attack leaves 5 HP, so one retaliation lands before the kill.
        assert_eq!(outcome, EncounterOutcome::EnemyDefeated);
        assert_eq!(player.current_health, player.max_health - 1);
    }

    #[test]
    fn test_inventory_without_usable_items_consumes_turn() {
        let mut game = game_with_enemy(enemy("Goose", 10, 4, vec![AttackKind::Big]));
        let mut player = attacker();
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["inventory", "attack", "attack"]);

        run_encounter(&mut game, &mut player, &mut log, &mut actions);

        // The wasted turn let the enemy hit once more (two retaliations total).
        assert_eq!(player.current_health, player.max_health - 8);
    }

    #[test]
    fn test_heal_item_caps_at_max_health() {
        let mut game = game_with_enemy(enemy("Goose", 15, 3, vec![AttackKind::Big]));
        let mut player = attacker();
        player
            .inventory
            .items
            .push(combat_item("instant noodles", CombatUse::Heal, 50));
        player.inventory.current_weight = 0.5;
        let mut log = EventLog::new();
        // attack, overheal, then two attacks to finish; three retaliations land
        let mut actions = ScriptedActions::new([
            "attack",
            "inventory",
            "instant noodles",
            "attack",
            "attack",
        ]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::EnemyDefeated);
        // Healed back to full after the first hit, then took two more.
        assert_eq!(player.current_health, player.max_health - 6);
    }

    #[test]
    fn test_special_pairing_instant_kills_and_consumes_item() {
        let mut game = game_with_enemy(enemy("Giant Goose", 40, 12, vec![AttackKind::Big]));
        let mut player = attacker();
        player
            .inventory
            .items
            .push(combat_item("stale bread", CombatUse::Damage, 1));
        player.inventory.current_weight = 0.5;
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["inventory", "stale bread"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::EnemyDefeated);
        assert!(!player.inventory.contains("stale bread"));
        assert!(player.inventory.current_weight.abs() < 1e-9);
        assert!(game.current_location().enemies.is_empty());
        // No retaliation on the killing turn.
        assert_eq!(player.current_health, player.max_health);
    }

    #[test]
    fn test_damage_item_without_pairing_uses_strength() {
        let mut game = game_with_enemy(enemy("Lesser Goose", 3, 2, vec![AttackKind::Small]));
        let mut player = attacker();
        player
            .inventory
            .items
            .push(combat_item("stale bread", CombatUse::Damage, 4));
        player.inventory.current_weight = 0.5;
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["inventory", "stale bread"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::EnemyDefeated);
        // A plain damage item is not consumed.
        assert!(player.inventory.contains("stale bread"));
    }

    #[test]
    fn test_flee_moves_player_without_retaliation() {
        let mut game = game_with_enemy(enemy("Goose", 40, 12, vec![AttackKind::Big]));
        let mut player = attacker();
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["flee", "go east"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::PlayerFled);
        assert_eq!(game.current_location_id, 2);
        assert_eq!(player.current_health, player.max_health);
        // The goose stays where it was.
        assert_eq!(game.locations[&1].enemies, vec!["Goose".to_string()]);
    }

    #[test]
    fn test_player_death_marks_game_over() {
        let mut game = game_with_enemy(enemy("Goose", 100, 12, vec![AttackKind::Big]));
        let mut player = attacker();
        let mut log = EventLog::new();
        let mut actions = ScriptedActions::new(["attack", "attack", "attack"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::PlayerDied);
        assert_eq!(player.current_health, 0);
        assert!(!game.ongoing);
    }

    #[test]
    fn test_step_budget_exhaustion_ends_encounter() {
        let mut game = game_with_enemy(enemy("Goose", 1000, 1, vec![AttackKind::Small]));
        game.max_steps = 12;
        let mut player = attacker();
        let mut log = EventLog::new();
        // Each full round costs 6 steps at speed 0; the second round trips
        // the budget and the loop ends before a third player turn.
        let mut actions = ScriptedActions::new(["attack", "attack", "attack", "attack"]);

        let outcome = run_encounter(&mut game, &mut player, &mut log, &mut actions);

        assert_eq!(outcome, EncounterOutcome::GameEnded);
        assert!(!game.ongoing);
        assert_eq!(game.steps, 12);
    }

    #[test]
    fn test_combat_actions_are_logged_against_location() {
        let mut game = game_with_enemy(enemy("Glass Goose", 1, 1, vec![AttackKind::Small]));
        let mut player = attacker();
        let mut log = EventLog::new();
        log.append(Event::new(1, "Location 1.".to_string()), None);
        let mut actions = ScriptedActions::new(["attack"]);

        run_encounter(&mut game, &mut player, &mut log, &mut actions);

        let events = log.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].next_command.as_deref(), Some("attack"));
        assert_eq!(events[1].location_id, 1);
    }
}
