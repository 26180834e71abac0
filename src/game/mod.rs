pub mod logic;
pub mod state;

pub use logic::{run_game, DropTrigger};
pub use state::AdventureGame;
