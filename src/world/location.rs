use std::collections::BTreeMap;

/// Command prefix for picking up an item at a location.
const TAKE_PREFIX: &str = "take ";
/// Command prefix for directional travel.
const GO_PREFIX: &str = "go ";

/// A location in the game world.
///
/// `available_commands` maps a command string to the destination location id;
/// `take <item>` entries always map back to the location's own id and are kept
/// in lockstep with `items`.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: i32,
    pub brief_description: String,
    pub long_description: String,
    pub available_commands: BTreeMap<String, i32>,
    pub items: Vec<String>,
    pub enemies: Vec<String>,
    pub visited: bool,
}

impl Location {
    /// Registers a `take <item>` command pointing at this location.
    pub fn add_take_command(&mut self, item_name: &str) {
        self.available_commands
            .insert(format!("{}{}", TAKE_PREFIX, item_name), self.id);
    }

    pub fn remove_take_command(&mut self, item_name: &str) {
        self.available_commands
            .remove(&format!("{}{}", TAKE_PREFIX, item_name));
    }

    /// Rewrites the `take` commands to exactly match the current item list,
    /// purging stale entries and adding missing ones.
    pub fn sync_take_commands(&mut self) {
        self.available_commands
            .retain(|cmd, _| !cmd.starts_with(TAKE_PREFIX));
        let names: Vec<String> = self.items.clone();
        for name in names {
            self.add_take_command(&name);
        }
    }

    /// The directional travel commands available here, in display order.
    pub fn movement_commands(&self) -> impl Iterator<Item = &String> {
        self.available_commands
            .keys()
            .filter(|cmd| cmd.starts_with(GO_PREFIX))
    }
}
