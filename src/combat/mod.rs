pub mod logic;
pub mod types;

pub use logic::{run_encounter, CombatSpecial, EncounterOutcome};
pub use types::{AttackKind, Enemy, Player, StatKind};
