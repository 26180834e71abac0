//! Scripted playthroughs for demos and balance checks.
//!
//! The simulator drives the same turn loop as the interactive binary,
//! feeding it a fixed command list instead of stdin, so simulated runs
//! match real gameplay behavior.

use crate::combat::types::{Player, StatKind};
use crate::constants::{START_LOCATION_ID, WEIGHT_LIMIT};
use crate::event_log::EventLog;
use crate::game::logic::run_game;
use crate::game::state::AdventureGame;
use crate::input::ScriptedActions;
use std::io;
use std::path::Path;

pub struct Simulation {
    game: AdventureGame,
    player: Player,
    log: EventLog,
    actions: ScriptedActions,
}

impl Simulation {
    /// Builds a simulation from a data file and a fixed command script.
    pub fn new(data_path: &Path, commands: &[&str]) -> io::Result<Self> {
        let game = AdventureGame::from_file(data_path, START_LOCATION_ID)?;
        Ok(Self::with_game(game, commands))
    }

    /// Builds a simulation on an already-loaded world.
    ///
    /// The simulated player uses a fixed build: 5 attack, 5 speed, no
    /// defense, all stat points spent.
    pub fn with_game(game: AdventureGame, commands: &[&str]) -> Self {
        let mut player = Player::new(WEIGHT_LIMIT);
        for (stat, amount) in [(StatKind::Attack, 5), (StatKind::Speed, 5)] {
            if let Err(e) = player.allocate(stat, amount) {
                unreachable!("fixed build allocation failed: {}", e);
            }
        }

        Self {
            game,
            player,
            log: EventLog::new(),
            actions: ScriptedActions::new(commands.iter().copied()),
        }
    }

    /// Plays the script through the shared turn loop. Saving is disabled;
    /// once the script runs out, every further prompt answers "quit".
    pub fn run(&mut self) {
        run_game(
            &mut self.game,
            &mut self.player,
            &mut self.log,
            None,
            &mut self.actions,
        );
    }

    /// Location ids in the order the run visited them.
    pub fn id_log(&self) -> Vec<i32> {
        self.log.location_ids()
    }

    pub fn game(&self) -> &AdventureGame {
        &self.game
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::data::GameTables;
    use crate::world::location::Location;
    use std::collections::{BTreeMap, HashMap};

    fn two_room_world() -> AdventureGame {
        let mut locations = BTreeMap::new();
        for (id, commands) in [(1, [("go east", 2)]), (2, [("go west", 1)])] {
            locations.insert(
                id,
                Location {
                    id,
                    brief_description: format!("Room {}.", id),
                    long_description: format!("A long look at room {}.", id),
                    available_commands: commands
                        .iter()
                        .map(|(c, d)| (c.to_string(), *d))
                        .collect(),
                    items: Vec::new(),
                    enemies: Vec::new(),
                    visited: false,
                },
            );
        }
        AdventureGame::from_tables(
            GameTables {
                locations,
                items: HashMap::new(),
                enemies: HashMap::new(),
            },
            1,
        )
    }

    #[test]
    fn test_simulation_uses_fixed_build() {
        let sim = Simulation::with_game(two_room_world(), &[]);
        assert_eq!(sim.player().attack, 5);
        assert_eq!(sim.player().speed, 5);
        assert_eq!(sim.player().defense, 0);
        assert_eq!(sim.player().points, 0);
    }

    #[test]
    fn test_script_exhaustion_ends_the_run() {
        let mut sim = Simulation::with_game(two_room_world(), &["go east", "go west"]);
        sim.run();
        assert!(!sim.game().ongoing);
        assert_eq!(sim.id_log(), vec![1, 2, 1]);
    }

    #[test]
    fn test_quit_stops_before_later_commands() {
        let mut sim = Simulation::with_game(two_room_world(), &["quit", "go east"]);
        sim.run();
        assert!(!sim.game().ongoing);
        assert_eq!(sim.id_log(), vec![1]);
    }
}
