//! Time-based ID generation for projects and tasks

use chrono::{DateTime, Utc};

/// Generates strictly increasing, time-based IDs.
///
/// IDs are Unix milliseconds. When two IDs are requested within the same
/// millisecond (or the clock goes backwards) the generator bumps past the
/// last issued value instead of repeating it.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Create a generator that will never issue an ID at or below `floor`
    pub fn seeded(floor: u64) -> Self {
        IdGenerator { last: floor }
    }

    /// Next ID for a given instant; None once the ID space is used up
    pub fn next_id_at(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }

    /// Parse a numeric ID out of a project key
    /// Non-numeric keys such as "default" yield None
    pub fn parse_project_id(key: &str) -> Option<u64> {
        key.parse::<u64>().ok()
    }
}
