//! Loading of the read-only game data file.
//!
//! The file is a single JSON document with `locations`, `items`, and
//! `enemies` arrays. Parsing is strict: unknown combat-use codes or an empty
//! attack pattern are configuration errors, not recoverable states.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::combat::types::{AttackKind, Enemy};
use crate::world::item::{CombatUse, Item};
use crate::world::location::Location;

#[derive(Deserialize)]
struct GameData {
    locations: Vec<LocationData>,
    items: Vec<ItemData>,
    enemies: Vec<EnemyData>,
}

#[derive(Deserialize)]
struct LocationData {
    id: i32,
    brief_description: String,
    long_description: String,
    available_commands: BTreeMap<String, i32>,
    items: Vec<String>,
    enemies: Vec<String>,
}

#[derive(Deserialize)]
struct ItemData {
    name: String,
    description: String,
    start_position: i32,
    target_position: i32,
    target_points: i32,
    weight: f64,
    combat_use: u8,
    strength: i32,
}

#[derive(Deserialize)]
struct EnemyData {
    name: String,
    max_health: i32,
    current_health: i32,
    attack: i32,
    items: Vec<String>,
    attack_pattern: Vec<AttackKind>,
}

/// The static world tables built from a game data file.
#[derive(Debug)]
pub struct GameTables {
    pub locations: BTreeMap<i32, Location>,
    pub items: HashMap<String, Item>,
    pub enemies: HashMap<String, Enemy>,
}

/// Reads and validates a game data file.
pub fn load_game_data(path: &Path) -> io::Result<GameTables> {
    let json = fs::read_to_string(path)?;
    parse_game_data(&json)
}

/// Parses game data from a JSON string. Exposed for tests and embedding.
pub fn parse_game_data(json: &str) -> io::Result<GameTables> {
    let data: GameData =
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut locations = BTreeMap::new();
    for loc in data.locations {
        locations.insert(
            loc.id,
            Location {
                id: loc.id,
                brief_description: loc.brief_description,
                long_description: loc.long_description,
                available_commands: loc.available_commands,
                items: loc.items,
                enemies: loc.enemies,
                visited: false,
            },
        );
    }

    let mut items = HashMap::new();
    for item in data.items {
        let combat_use = CombatUse::from_code(item.combat_use).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("item {:?} has unknown combat_use {}", item.name, item.combat_use),
            )
        })?;
        items.insert(
            item.name.clone(),
            Item {
                name: item.name,
                description: item.description,
                start_position: item.start_position,
                target_position: item.target_position,
                target_points: item.target_points,
                weight: item.weight,
                combat_use,
                strength: item.strength,
            },
        );
    }

    let mut enemies = HashMap::new();
    for enemy in data.enemies {
        if enemy.attack_pattern.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("enemy {:?} has an empty attack pattern", enemy.name),
            ));
        }
        enemies.insert(
            enemy.name.clone(),
            Enemy {
                name: enemy.name,
                max_health: enemy.max_health,
                current_health: enemy.current_health,
                attack: enemy.attack,
                attack_pattern: enemy.attack_pattern,
                drops: enemy.items,
            },
        );
    }

    Ok(GameTables {
        locations,
        items,
        enemies,
    })
}
