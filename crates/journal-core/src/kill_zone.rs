//! Kill zones: narrow high-activity windows used to flag entry timing.
//!
//! Two independent pieces of static data live here:
//! - [`KILL_ZONES`]: named windows for display only.
//! - [`KILL_ZONE_HOURS`]: the hour set behind [`is_kill_zone`].
//!
//! The boolean check never reads the named list. If the two ever disagree,
//! the hour set wins.

use chrono::{DateTime, Timelike, Utc};
use serde::Serialize;

/// A named UTC window, `[start, end)`, as `"HH:MM"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KillZone {
    pub name: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub description: &'static str,
}

/// Kill zones listed in the UI.
pub const KILL_ZONES: [KillZone; 4] = [
    KillZone {
        name: "Asian Kill Zone",
        start: "00:00",
        end: "04:00",
        description: "Asian range formation",
    },
    KillZone {
        name: "London Kill Zone",
        start: "07:00",
        end: "10:00",
        description: "London open expansion",
    },
    KillZone {
        name: "NY AM Kill Zone",
        start: "12:00",
        end: "15:00",
        description: "New York open and London overlap",
    },
    KillZone {
        name: "NY PM Kill Zone",
        start: "18:00",
        end: "20:00",
        description: "New York afternoon session",
    },
];

/// UTC hours treated as kill-zone hours.
pub const KILL_ZONE_HOURS: [u32; 12] = [0, 1, 2, 3, 7, 8, 9, 12, 13, 14, 18, 19];

/// Check whether a UTC hour (0-23) is a kill-zone hour.
#[must_use]
pub fn is_kill_zone_hour(hour: u32) -> bool {
    KILL_ZONE_HOURS.contains(&hour)
}

/// Check whether a UTC datetime falls in a kill zone.
#[must_use]
pub fn is_kill_zone(dt: DateTime<Utc>) -> bool {
    is_kill_zone_hour(dt.hour())
}

/// Check whether the current UTC time falls in a kill zone.
#[must_use]
pub fn is_kill_zone_now() -> bool {
    is_kill_zone(Utc::now())
}
