//! Chronological record of visited locations and the action taken from each.
//!
//! The log is an append-only sequence with tail truncation; each entry's
//! `next_command` is the command that led from it to the following entry,
//! so the tail always carries `None`.

use serde::{Deserialize, Serialize};

/// One entry in the game history.
///
/// Invariants: `location_id >= -1`, `description` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub location_id: i32,
    pub description: String,
    /// The command taken from this event, `None` while it is the tail.
    pub next_command: Option<String>,
}

impl Event {
    pub fn new(location_id: i32, description: String) -> Self {
        Self {
            location_id,
            description,
            next_command: None,
        }
    }
}

/// Wire form of an [`Event`], matching the save file's `log` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id_num: i32,
    pub description: String,
    pub next_command: Option<String>,
}

/// The full game history, oldest entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Appends `event` to the end of the log. `command`, when present, is
    /// recorded on the current tail as the action that led to the new event;
    /// `None` leaves the tail's command unset (the first event, or an arrival
    /// that no logged action produced, such as the return from an encounter).
    pub fn append(&mut self, event: Event, command: Option<&str>) {
        if let (Some(tail), Some(cmd)) = (self.events.last_mut(), command) {
            tail.next_command = Some(cmd.to_string());
        }
        self.events.push(event);
    }

    /// Removes the tail entry and clears the new tail's `next_command`.
    /// No-op on an empty log.
    pub fn truncate_last(&mut self) {
        if self.events.pop().is_some() {
            if let Some(tail) = self.events.last_mut() {
                tail.next_command = None;
            }
        }
    }

    /// The ordered sequence of every entry's location id, oldest first.
    pub fn location_ids(&self) -> Vec<i32> {
        self.events.iter().map(|e| e.location_id).collect()
    }

    /// Whether `location_id` appears in the log before the tail entry.
    ///
    /// The tail is excluded because it is the just-logged current visit; a
    /// first-time visit must still read as unvisited so the long description
    /// is shown.
    pub fn previously_visited(&self, location_id: i32) -> bool {
        let before_tail = self.events.len().saturating_sub(1);
        self.events[..before_tail]
            .iter()
            .any(|e| e.location_id == location_id)
    }

    /// The log as wire records, oldest first.
    pub fn records(&self) -> Vec<EventRecord> {
        self.events
            .iter()
            .map(|e| EventRecord {
                id_num: e.location_id,
                description: e.description.clone(),
                next_command: e.next_command.clone(),
            })
            .collect()
    }

    /// Rebuilds a log from wire records via repeated [`EventLog::append`],
    /// so the tail invariant is re-derived rather than trusted.
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        let mut log = EventLog::new();
        let mut carried: Option<String> = None;
        for record in records {
            log.append(
                Event::new(record.id_num, record.description),
                carried.as_deref(),
            );
            carried = record.next_command;
        }
        log
    }
}
