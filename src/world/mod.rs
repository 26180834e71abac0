pub mod data;
pub mod item;
pub mod location;

pub use data::{load_game_data, GameTables};
pub use item::{CombatUse, Inventory, Item, TakeOutcome};
pub use location::Location;
