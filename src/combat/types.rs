use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_MAX_HEALTH, STARTING_STAT_POINTS, STAT_CAP};
use crate::world::item::Inventory;

/// One step of an enemy's attack pattern.
///
/// Wire values in the game data file: `"small"` and `"big"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    Small,
    Big,
}

/// A scripted enemy. Mutated only through [`Enemy::apply_damage`]; defeat is
/// handled by removing the enemy from its location, not by destroying this
/// record.
///
/// Invariants: `max_health > 0`, `attack >= 0`, `attack_pattern` is non-empty.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
    pub max_health: i32,
    pub current_health: i32,
    pub attack: i32,
    pub attack_pattern: Vec<AttackKind>,
    /// Item names spawned at the enemy's location on defeat.
    pub drops: Vec<String>,
}

impl Enemy {
    /// Damage dealt on the given 1-indexed turn.
    ///
    /// The pattern cycles with period = pattern length; a turn number whose
    /// modulus is 0 selects the last pattern element, so turn 1 against a
    /// single-element pattern wraps to that only element. Big attacks deal
    /// full `attack`, small ones half rounded up.
    pub fn attack_damage(&self, turn_number: u32) -> i32 {
        let period = self.attack_pattern.len();
        let m = (turn_number as usize) % period;
        let index = if m == 0 { period - 1 } else { m - 1 };
        match self.attack_pattern[index] {
            AttackKind::Big => self.attack,
            AttackKind::Small => (self.attack + 1) / 2,
        }
    }

    /// Subtracts `amount` (which must be positive) from current health and
    /// returns whether the enemy is still alive. Health is not clamped at
    /// zero; callers treat anything <= 0 as dead.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.current_health -= amount;
        self.current_health > 0
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}

/// A spendable player stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Speed,
    Attack,
    Defense,
}

impl StatKind {
    /// Maps the 1/2/3 menu choice used during stat allocation.
    pub fn from_menu_choice(choice: i32) -> Option<Self> {
        match choice {
            1 => Some(StatKind::Speed),
            2 => Some(StatKind::Attack),
            3 => Some(StatKind::Defense),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatKind::Speed => "Speed",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
        }
    }
}

/// Why a stat allocation was rejected. The caller messages the player and
/// retries; nothing is partially applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocateError {
    NotPositive,
    InsufficientPoints { available: i32 },
    CapExceeded { stat: StatKind, current: i32 },
}

impl fmt::Display for AllocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocateError::NotPositive => write!(f, "Points must be a positive number."),
            AllocateError::InsufficientPoints { available } => {
                write!(f, "You only have {} points left.", available)
            }
            AllocateError::CapExceeded { stat, current } => write!(
                f,
                "{} cannot be more than {}. Current: {}",
                stat.name(),
                STAT_CAP,
                current
            ),
        }
    }
}

/// The player character: carried inventory plus combat stats.
///
/// Invariants: stats are in `[0, STAT_CAP]`, `0 <= current_health <=
/// max_health`, `points >= 0`.
#[derive(Debug, Clone)]
pub struct Player {
    pub inventory: Inventory,
    pub speed: i32,
    pub attack: i32,
    pub defense: i32,
    pub max_health: i32,
    pub current_health: i32,
    pub points: i32,
}

impl Player {
    pub fn new(weight_limit: f64) -> Self {
        Self {
            inventory: Inventory::new(weight_limit),
            speed: 0,
            attack: 0,
            defense: 0,
            max_health: BASE_MAX_HEALTH,
            current_health: BASE_MAX_HEALTH,
            points: STARTING_STAT_POINTS,
        }
    }

    fn stat_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::Speed => &mut self.speed,
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
        }
    }

    /// Spends `amount` unspent points on `stat`, enforcing the per-stat cap.
    pub fn allocate(&mut self, stat: StatKind, amount: i32) -> Result<(), AllocateError> {
        if amount <= 0 {
            return Err(AllocateError::NotPositive);
        }
        if amount > self.points {
            return Err(AllocateError::InsufficientPoints {
                available: self.points,
            });
        }
        let current = *self.stat_mut(stat);
        if current + amount > STAT_CAP {
            return Err(AllocateError::CapExceeded { stat, current });
        }
        self.points -= amount;
        *self.stat_mut(stat) += amount;
        Ok(())
    }

    /// Applies incoming damage; player health is clamped at zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.current_health = (self.current_health - amount).max(0);
    }

    /// Restores health, capped at maximum.
    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
