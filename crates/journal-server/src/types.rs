//! API response types.

use chrono::{DateTime, Utc};
use journal_core::{KillZone, RuleViolation, SessionDisplay, SessionFlags, SessionKey};
use serde::{Deserialize, Serialize};

/// Response for `GET /api/session`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    /// Instant that was classified.
    pub timestamp: DateTime<Utc>,
    pub flags: SessionFlags,
    /// Active session labels, in configuration order.
    pub active_labels: Vec<String>,
    pub primary: Option<SessionKey>,
    pub primary_label: String,
    pub is_kill_zone: bool,
    /// `off_session` when an entry at this instant falls outside every session.
    pub off_session_violation: Option<RuleViolation>,
    pub display: SessionDisplay,
}

/// Response for `GET /api/kill-zones`.
#[derive(Debug, Clone, Serialize)]
pub struct KillZoneReport {
    pub zones: &'static [KillZone],
    pub hours: &'static [u32],
}

/// Query for `GET /api/session`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    /// RFC 3339 timestamp or epoch milliseconds. Defaults to now.
    pub at: Option<String>,
}

/// Query for `GET /api/discipline`.
#[derive(Debug, Deserialize)]
pub struct DisciplineQuery {
    pub violation: String,
    #[serde(default = "default_occurrence")]
    pub occurrence: u32,
}

fn default_occurrence() -> u32 {
    1
}
