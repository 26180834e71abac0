use crate::world::location::Location;

/// What an item does when used during combat.
///
/// Wire values in the game data file: 0 = none, 1 = heal, 2 = damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatUse {
    None,
    Heal,
    Damage,
}

impl CombatUse {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CombatUse::None),
            1 => Some(CombatUse::Heal),
            2 => Some(CombatUse::Damage),
            _ => None,
        }
    }

    pub fn is_usable(self) -> bool {
        self != CombatUse::None
    }
}

/// An item in the game world. Immutable after load; an item's whereabouts is
/// tracked through location item lists and the player inventory, not here.
///
/// Invariants: `name` is non-empty, `weight >= 0`, `target_points >= 0`,
/// `strength >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub start_position: i32,
    pub target_position: i32,
    pub target_points: i32,
    pub weight: f64,
    pub combat_use: CombatUse,
    pub strength: i32,
}

/// Result of attempting to pick up an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeOutcome {
    Taken,
    /// The item would push the inventory past its weight limit; nothing
    /// changed.
    TooHeavy,
}

/// A weight-limited collection of carried items, unique by name.
///
/// Invariant: `current_weight` equals the sum of carried item weights (within
/// floating-point tolerance) and never exceeds `weight_limit`.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub items: Vec<Item>,
    pub weight_limit: f64,
    pub current_weight: f64,
}

impl Inventory {
    pub fn new(weight_limit: f64) -> Self {
        Self {
            items: Vec::new(),
            weight_limit,
            current_weight: 0.0,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i.name == name)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Names of carried items with a nonzero combat use.
    pub fn usable_item_names(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| i.combat_use.is_usable())
            .map(|i| i.name.clone())
            .collect()
    }

    /// Moves `item` from `location` into the inventory, deregistering its
    /// take command. Fails without side effects past the weight limit.
    pub fn take_item(&mut self, item: &Item, location: &mut Location) -> TakeOutcome {
        if self.current_weight + item.weight > self.weight_limit {
            return TakeOutcome::TooHeavy;
        }
        self.items.push(item.clone());
        self.current_weight += item.weight;
        location.items.retain(|name| name != &item.name);
        location.remove_take_command(&item.name);
        TakeOutcome::Taken
    }

    /// Moves the named item out of the inventory into `location`, registering
    /// its take command. Returns the dropped item, or `None` if it was not
    /// carried.
    pub fn drop_item(&mut self, name: &str, location: &mut Location) -> Option<Item> {
        let index = self.items.iter().position(|i| i.name == name)?;
        let item = self.items.remove(index);
        self.current_weight -= item.weight;
        location.items.push(item.name.clone());
        location.add_take_command(&item.name);
        Some(item)
    }

    /// Removes the named item without placing it anywhere (consumed in
    /// combat). Returns whether it was carried.
    pub fn consume_item(&mut self, name: &str) -> bool {
        match self.items.iter().position(|i| i.name == name) {
            Some(index) => {
                let item = self.items.remove(index);
                self.current_weight -= item.weight;
                true
            }
            None => false,
        }
    }
}
