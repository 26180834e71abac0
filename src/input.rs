//! Input seam for the game and combat loops.
//!
//! Every interactive read goes through [`ActionSource`], so the same turn
//! logic can be driven by a live player at a terminal or by a scripted
//! command sequence in the simulator and tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Fallback action when a source runs dry. Always a valid command, so the
/// turn loops terminate instead of re-prompting forever.
pub const EXHAUSTED_ACTION: &str = "quit";

/// A source of player decisions.
pub trait ActionSource {
    /// Displays `prompt` (sources may ignore it) and returns the next action,
    /// trimmed and lowercased.
    fn next_action(&mut self, prompt: &str) -> String;
}

/// Reads actions from stdin. Used by the interactive binary.
pub struct StdinActions;

impl ActionSource for StdinActions {
    fn next_action(&mut self, prompt: &str) -> String {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // 0 bytes read means stdin closed; treat it as quitting.
            Ok(0) | Err(_) => EXHAUSTED_ACTION.to_string(),
            Ok(_) => line.trim().to_lowercase(),
        }
    }
}

/// Replays a fixed command sequence, then yields [`EXHAUSTED_ACTION`].
pub struct ScriptedActions {
    queue: VecDeque<String>,
}

impl ScriptedActions {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: commands
                .into_iter()
                .map(|c| c.into().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl ActionSource for ScriptedActions {
    fn next_action(&mut self, _prompt: &str) -> String {
        self.queue
            .pop_front()
            .unwrap_or_else(|| EXHAUSTED_ACTION.to_string())
    }
}
