//! # Thread Priority Mapping
//!
//! Abstract priority levels and the lookup table that translates them onto a
//! host's native priority scale.
//!
//! The table is plain data: it can be built in code, tweaked per host, or
//! loaded from JSON at start-up.
//!
//! ```
//! use core_sync::{Priority, PriorityTable};
//!
//! let table = PriorityTable::from_json(r#"{"Low": 1, "Normal": 3, "High": 5}"#).unwrap();
//! assert_eq!(table.get(Priority::High), Some(5));
//! assert_eq!(table.get(Priority::Highest), None);
//! ```

use bridge_traits::HostFacility;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{Result, SyncError};

/// Priority level requested for a new thread
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Priority {
    /// Background housekeeping
    Lowest = 0,
    /// Below the runtime's normal work
    Low = 1,
    /// Regular runtime threads
    #[default]
    Normal = 2,
    /// Latency-sensitive work such as input polling
    High = 3,
    /// Compositor / display refresh
    Highest = 4,
}

impl Priority {
    /// Every level, lowest first
    pub const ALL: [Priority; 5] = [
        Priority::Lowest,
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Highest,
    ];

    /// Raw level number
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Parse a raw level number; out-of-range values yield `None`.
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level)).copied()
    }
}

/// Explicit translation from [`Priority`] to native host priorities.
///
/// Levels missing from the table, and levels whose native value lies outside
/// the host's valid range, resolve to the host's default priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityTable {
    levels: BTreeMap<Priority, i32>,
}

impl PriorityTable {
    /// Creates a table with no mapped levels (everything resolves to the host default).
    pub fn empty() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Sets the native priority for `priority`
    pub fn with_level(mut self, priority: Priority, native: i32) -> Self {
        self.levels.insert(priority, native);
        self
    }

    /// Sets the native priority for `priority` in place
    pub fn set(&mut self, priority: Priority, native: i32) {
        self.levels.insert(priority, native);
    }

    /// Removes the mapping for `priority`
    pub fn remove(&mut self, priority: Priority) -> Option<i32> {
        self.levels.remove(&priority)
    }

    /// Native value mapped for `priority`, if any
    pub fn get(&self, priority: Priority) -> Option<i32> {
        self.levels.get(&priority).copied()
    }

    /// Number of mapped levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Mapped levels in ascending priority order
    pub fn iter(&self) -> impl Iterator<Item = (Priority, i32)> + '_ {
        self.levels.iter().map(|(priority, native)| (*priority, *native))
    }

    /// Parses a table from a JSON object keyed by level name.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SyncError::InvalidPriorityTable(e.to_string()))
    }

    /// Serialises the table as a JSON object keyed by level name.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SyncError::InvalidPriorityTable(e.to_string()))
    }

    /// Translates `priority` onto the native scale of `host`.
    pub fn resolve(&self, priority: Priority, host: &dyn HostFacility) -> i32 {
        match self.get(priority) {
            Some(native) if host.priority_range().contains(&native) => native,
            Some(native) => {
                warn!(
                    ?priority,
                    native,
                    host = host.name(),
                    "mapped priority outside host range, using host default"
                );
                host.default_priority()
            }
            None => {
                debug!(?priority, host = host.name(), "unmapped priority, using host default");
                host.default_priority()
            }
        }
    }

    /// Translates a raw level number; unknown levels use the host default.
    pub fn resolve_level(&self, level: u8, host: &dyn HostFacility) -> i32 {
        match Priority::from_level(level) {
            Some(priority) => self.resolve(priority, host),
            None => {
                debug!(level, host = host.name(), "unknown priority level, using host default");
                host.default_priority()
            }
        }
    }
}

impl Default for PriorityTable {
    /// Five-step table matching the desktop host's `0..=6` scale, leaving the
    /// idle (0) and time-critical (6) extremes unused.
    fn default() -> Self {
        Self::empty()
            .with_level(Priority::Lowest, 1)
            .with_level(Priority::Low, 2)
            .with_level(Priority::Normal, 3)
            .with_level(Priority::High, 4)
            .with_level(Priority::Highest, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::{DesktopHost, DESKTOP_DEFAULT_PRIORITY};

    #[test]
    fn test_priority_levels_round_trip() {
        for priority in Priority::ALL {
            assert_eq!(Priority::from_level(priority.as_u8()), Some(priority));
        }
        assert_eq!(Priority::from_level(5), None);
        assert_eq!(Priority::from_level(u8::MAX), None);
    }

    #[test]
    fn test_default_priority_is_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn test_default_table_resolves_every_level() {
        let host = DesktopHost::new();
        let table = PriorityTable::default();

        assert_eq!(table.len(), 5);
        assert_eq!(table.resolve(Priority::Lowest, &host), 1);
        assert_eq!(table.resolve(Priority::Normal, &host), 3);
        assert_eq!(table.resolve(Priority::Highest, &host), 5);
    }

    #[test]
    fn test_unmapped_level_falls_back_to_host_default() {
        let host = DesktopHost::new();
        let mut table = PriorityTable::default();
        assert_eq!(table.remove(Priority::High), Some(4));

        assert_eq!(table.resolve(Priority::High, &host), DESKTOP_DEFAULT_PRIORITY);
        assert_eq!(PriorityTable::empty().resolve(Priority::Low, &host), DESKTOP_DEFAULT_PRIORITY);
    }

    #[test]
    fn test_out_of_range_native_value_falls_back() {
        let host = DesktopHost::new();
        let table = PriorityTable::empty()
            .with_level(Priority::Highest, 99)
            .with_level(Priority::Lowest, -1);

        assert_eq!(table.resolve(Priority::Highest, &host), DESKTOP_DEFAULT_PRIORITY);
        assert_eq!(table.resolve(Priority::Lowest, &host), DESKTOP_DEFAULT_PRIORITY);
    }

    #[test]
    fn test_unknown_raw_level_falls_back() {
        let host = DesktopHost::new();
        let table = PriorityTable::default();

        assert_eq!(table.resolve_level(3, &host), 4);
        assert_eq!(table.resolve_level(42, &host), DESKTOP_DEFAULT_PRIORITY);
    }

    #[test]
    fn test_json_round_trip() {
        let table = PriorityTable::default().with_level(Priority::Highest, 6);
        let json = table.to_json().unwrap();
        assert!(json.contains("\"Highest\":6"));

        let parsed = PriorityTable::from_json(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = PriorityTable::from_json(r#"{"Urgent": 7}"#).unwrap_err();
        assert!(matches!(err, SyncError::InvalidPriorityTable(_)));
    }
}
