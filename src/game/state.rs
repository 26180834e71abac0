use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;

use crate::combat::logic::{default_combat_specials, CombatSpecial};
use crate::combat::types::{Enemy, Player};
use crate::constants::{GOAL_ITEMS, GOAL_LOCATION_ID, HELPER_ITEM, MAX_STEPS, STEP_COST_BASE};
use crate::game::logic::{default_drop_triggers, DropTrigger};
use crate::world::data::{load_game_data, GameTables};
use crate::world::item::Item;
use crate::world::location::Location;

/// All world state for one playthrough: the static location/item/enemy tables
/// (locations and enemies carry the mutable bits), the player's position, and
/// the step budget.
///
/// Invariant: `current_location_id` is always a key of `locations`.
pub struct AdventureGame {
    pub locations: BTreeMap<i32, Location>,
    pub items: HashMap<String, Item>,
    pub enemies: HashMap<String, Enemy>,
    /// One-off `(item, enemy)` combat pairings; content, not mechanics.
    pub combat_specials: HashMap<(String, String), CombatSpecial>,
    /// One-off drop-triggers-spawn puzzle rules; content, not mechanics.
    pub drop_triggers: Vec<DropTrigger>,
    pub current_location_id: i32,
    pub ongoing: bool,
    pub steps: u32,
    pub max_steps: u32,
}

impl AdventureGame {
    /// Builds a game from a game data file, starting at `initial_location_id`.
    pub fn from_file(path: &Path, initial_location_id: i32) -> io::Result<Self> {
        Ok(Self::from_tables(load_game_data(path)?, initial_location_id))
    }

    pub fn from_tables(tables: GameTables, initial_location_id: i32) -> Self {
        Self {
            locations: tables.locations,
            items: tables.items,
            enemies: tables.enemies,
            combat_specials: default_combat_specials(),
            drop_triggers: default_drop_triggers(),
            current_location_id: initial_location_id,
            ongoing: true,
            steps: 0,
            max_steps: MAX_STEPS,
        }
    }

    pub fn current_location(&self) -> &Location {
        &self.locations[&self.current_location_id]
    }

    pub fn current_location_mut(&mut self) -> &mut Location {
        let id = self.current_location_id;
        self.locations
            .get_mut(&id)
            .expect("current location missing from world")
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    /// The active combatant here, if any: enemies are fought one at a time,
    /// most recently added first.
    pub fn active_enemy_name(&self) -> Option<String> {
        self.current_location().enemies.last().cloned()
    }

    /// Step cost of one action: higher speed strictly reduces it, and the
    /// stat cap keeps the minimum at 1.
    pub fn step_cost(&self, player: &Player) -> u32 {
        (STEP_COST_BASE - player.speed).max(1) as u32
    }

    pub fn advance_steps(&mut self, player: &Player) {
        self.steps += self.step_cost(player);
    }

    /// Ends the game (failure) once the step budget is exhausted.
    pub fn check_steps(&mut self) {
        if self.steps >= self.max_steps {
            println!("You have run out of steps. The deadline has passed.");
            self.ongoing = false;
        }
    }

    /// Current score: items resting at their target location score their
    /// points; carried items score when they are the helper item (always) or
    /// the player stands at their target location.
    pub fn score(&self, player: &Player) -> i32 {
        let mut total = 0;
        for (id, loc) in &self.locations {
            for name in &loc.items {
                if let Some(item) = self.items.get(name) {
                    if item.target_position == *id {
                        total += item.target_points;
                    }
                }
            }
        }
        for item in &player.inventory.items {
            if item.name == HELPER_ITEM {
                total += item.target_points;
            } else if item.target_position == self.current_location_id {
                total += item.target_points;
            }
        }
        total
    }

    /// Ends the game (success) once every goal item is simultaneously present
    /// at the goal location.
    pub fn check_win(&mut self, player: &Player) {
        let Some(goal) = self.locations.get(&GOAL_LOCATION_ID) else {
            return;
        };
        let delivered = GOAL_ITEMS
            .iter()
            .all(|required| goal.items.iter().any(|name| name == required));
        if delivered {
            println!("\nCONGRATULATIONS! You delivered everything in time!");
            println!("Final Score: {}", self.score(player));
            self.ongoing = false;
        }
    }
}
