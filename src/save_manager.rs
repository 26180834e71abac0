use crate::combat::types::Player;
use crate::event_log::{EventLog, EventRecord};
use crate::game::state::AdventureGame;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// The on-disk save document. Ordered maps keep serialization deterministic,
/// so saving an unchanged game rewrites the identical file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    pub location_id: i32,
    #[serde(default)]
    pub steps: u32,
    pub player: PlayerSave,
    pub visited_locations: Vec<i32>,
    pub location_items: BTreeMap<String, Vec<String>>,
    pub location_enemies: BTreeMap<String, Vec<String>>,
    pub log: Vec<EventRecord>,
}

/// Player stats plus inventory by item name; full item data is rebuilt from
/// the world tables on load.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerSave {
    pub inventory: Vec<String>,
    pub speed: i32,
    pub attack: i32,
    pub defense: i32,
    pub max_health: i32,
    pub current_health: i32,
    pub points: i32,
}

/// Snapshots the mutable parts of a running game.
pub fn capture(game: &AdventureGame, player: &Player, log: &EventLog) -> SaveData {
    let mut visited_locations = Vec::new();
    let mut location_items = BTreeMap::new();
    let mut location_enemies = BTreeMap::new();
    for (id, loc) in &game.locations {
        if loc.visited {
            visited_locations.push(*id);
        }
        location_items.insert(id.to_string(), loc.items.clone());
        location_enemies.insert(id.to_string(), loc.enemies.clone());
    }

    SaveData {
        location_id: game.current_location_id,
        steps: game.steps,
        player: PlayerSave {
            inventory: player.inventory.items.iter().map(|i| i.name.clone()).collect(),
            speed: player.speed,
            attack: player.attack,
            defense: player.defense,
            max_health: player.max_health,
            current_health: player.current_health,
            points: player.points,
        },
        visited_locations,
        location_items,
        location_enemies,
        log: log.records(),
    }
}

/// Applies a snapshot on top of a freshly loaded world. Item names that no
/// longer exist in the world tables are dropped, and inventory weight is
/// recomputed from the items actually restored.
pub fn restore(data: SaveData, game: &mut AdventureGame, player: &mut Player) -> EventLog {
    game.current_location_id = data.location_id;
    game.steps = data.steps;

    player.speed = data.player.speed;
    player.attack = data.player.attack;
    player.defense = data.player.defense;
    player.max_health = data.player.max_health;
    player.current_health = data.player.current_health;
    player.points = data.player.points;

    player.inventory.items.clear();
    player.inventory.current_weight = 0.0;
    for name in &data.player.inventory {
        if let Some(item) = game.items.get(name) {
            player.inventory.current_weight += item.weight;
            player.inventory.items.push(item.clone());
        }
    }

    for id in &data.visited_locations {
        if let Some(loc) = game.locations.get_mut(id) {
            loc.visited = true;
        }
    }
    for (key, names) in data.location_items {
        if let Ok(id) = key.parse::<i32>() {
            if let Some(loc) = game.locations.get_mut(&id) {
                loc.items = names;
            }
        }
    }
    for (key, names) in data.location_enemies {
        if let Ok(id) = key.parse::<i32>() {
            if let Some(loc) = game.locations.get_mut(&id) {
                loc.enemies = names;
            }
        }
    }
    for loc in game.locations.values_mut() {
        loc.sync_take_commands();
    }

    EventLog::from_records(data.log)
}

/// Manages the save file in the platform config directory.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager pointing at the platform-appropriate config
    /// directory, creating it if needed.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "adventure").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save_game.json"),
        })
    }

    /// Creates a SaveManager writing to an explicit path.
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn save_path(&self) -> &PathBuf {
        &self.save_path
    }

    /// Writes the current game to disk as pretty-printed JSON.
    pub fn save(&self, game: &AdventureGame, player: &Player, log: &EventLog) -> io::Result<()> {
        let data = capture(game, player, log);
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.save_path, json)
    }

    /// Reads a snapshot from disk.
    pub fn load(&self) -> io::Result<SaveData> {
        let json = fs::read_to_string(&self.save_path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Checks if a save file exists
    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
