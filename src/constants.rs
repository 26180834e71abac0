// World tuning
pub const START_LOCATION_ID: i32 = 1;
pub const MAX_STEPS: u32 = 50;
pub const STEP_COST_BASE: i32 = 6;

// Player setup
pub const WEIGHT_LIMIT: f64 = 10.0;
pub const STARTING_STAT_POINTS: i32 = 10;
pub const STAT_CAP: i32 = 5;
pub const BASE_MAX_HEALTH: i32 = 10;

// Win condition content
pub const GOAL_LOCATION_ID: i32 = 1;
pub const GOAL_ITEMS: [&str; 3] = ["usb stick", "lucky mug", "laptop charger"];
/// The one item that always scores while carried, regardless of location.
pub const HELPER_ITEM: &str = "old socks";

// Combat
pub const INSTANT_KILL_DAMAGE: i32 = 9999;

// Universal commands accepted at any location (plus "drop <item>")
pub const MENU_COMMANDS: [&str; 7] = [
    "look",
    "inventory",
    "stats",
    "score",
    "log",
    "save",
    "quit",
];
