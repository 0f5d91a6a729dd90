//! Trading session utilities.
//!
//! Classifies a UTC instant into the configured trading sessions.
//! Used for:
//! - Session flags on journaled trades
//! - The "current session" banner
//! - Off-session rule violations (see [`crate::discipline`])
//!
//! Only the UTC hour is consulted, so boundaries have one-hour resolution.
//! Sessions may overlap; a single hour can activate several of them.

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::kill_zone::is_kill_zone;

/// Sentinel returned by [`primary_session_label`] when no session is active.
pub const NO_ACTIVE_SESSION: &str = "No active session";

/// Sentinel shown in [`SessionDisplay::current_session`] outside all sessions.
pub const OFF_HOURS: &str = "Off-hours";

const LABEL_SEPARATOR: &str = " / ";

/// Stable session identifier, used as the flag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKey {
    Asian,
    London,
    NewYork,
    LondonClose,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asian => "asian",
            Self::London => "london",
            Self::NewYork => "new_york",
            Self::LondonClose => "london_close",
        }
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named UTC hour window `[start_hour, end_hour)`.
///
/// `start_hour > end_hour` denotes a window that wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradingSession {
    pub key: SessionKey,
    pub name: &'static str,
    pub emoji: &'static str,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl TradingSession {
    /// Check whether `hour` (0-23) falls inside this session.
    #[must_use]
    pub fn contains_hour(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    /// Display label, `"<emoji> <name>"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }
}

/// Configured sessions, in configuration order.
pub const SESSIONS: [TradingSession; 4] = [
    TradingSession {
        key: SessionKey::Asian,
        name: "Asian",
        emoji: "🌏",
        start_hour: 23,
        end_hour: 8,
    },
    TradingSession {
        key: SessionKey::London,
        name: "London",
        emoji: "🇬🇧",
        start_hour: 7,
        end_hour: 16,
    },
    TradingSession {
        key: SessionKey::NewYork,
        name: "New York",
        emoji: "🇺🇸",
        start_hour: 12,
        end_hour: 21,
    },
    TradingSession {
        key: SessionKey::LondonClose,
        name: "London Close",
        emoji: "🔔",
        start_hour: 15,
        end_hour: 16,
    },
];

/// Ranking used to pick a single primary session, highest first.
///
/// Independent of the order of [`SESSIONS`].
pub const SESSION_PRIORITY: [SessionKey; 4] = [
    SessionKey::LondonClose,
    SessionKey::NewYork,
    SessionKey::London,
    SessionKey::Asian,
];

/// Look up the configured session for a key.
#[must_use]
pub fn session(key: SessionKey) -> &'static TradingSession {
    match key {
        SessionKey::Asian => &SESSIONS[0],
        SessionKey::London => &SESSIONS[1],
        SessionKey::NewYork => &SESSIONS[2],
        SessionKey::LondonClose => &SESSIONS[3],
    }
}

/// One flag per configured session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub asian: bool,
    pub london: bool,
    pub new_york: bool,
    pub london_close: bool,
}

impl SessionFlags {
    #[must_use]
    pub fn get(&self, key: SessionKey) -> bool {
        match key {
            SessionKey::Asian => self.asian,
            SessionKey::London => self.london,
            SessionKey::NewYork => self.new_york,
            SessionKey::LondonClose => self.london_close,
        }
    }

    fn set(&mut self, key: SessionKey, active: bool) {
        match key {
            SessionKey::Asian => self.asian = active,
            SessionKey::London => self.london = active,
            SessionKey::NewYork => self.new_york = active,
            SessionKey::LondonClose => self.london_close = active,
        }
    }

    /// True if at least one session is active.
    #[must_use]
    pub fn any(&self) -> bool {
        self.asian || self.london || self.new_york || self.london_close
    }
}

/// Result of classifying an instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub flags: SessionFlags,
    /// Labels of active sessions, in configuration order.
    pub active_labels: Vec<String>,
}

/// Classify a UTC hour of day (0-23).
#[must_use]
pub fn classify_hour(hour: u32) -> SessionStatus {
    let mut flags = SessionFlags::default();
    let mut active_labels = Vec::new();

    for session in &SESSIONS {
        let active = session.contains_hour(hour);
        flags.set(session.key, active);
        if active {
            active_labels.push(session.label());
        }
    }

    SessionStatus {
        flags,
        active_labels,
    }
}

/// Classify a UTC datetime. Minutes and seconds are ignored.
#[must_use]
pub fn classify(dt: DateTime<Utc>) -> SessionStatus {
    classify_hour(dt.hour())
}

/// Classify the current UTC time.
#[must_use]
pub fn current_status() -> SessionStatus {
    classify(Utc::now())
}

/// Pick the highest-priority active session, if any.
#[must_use]
pub fn primary_session(flags: &SessionFlags) -> Option<&'static TradingSession> {
    SESSION_PRIORITY
        .iter()
        .find(|key| flags.get(**key))
        .map(|key| session(*key))
}

/// Label of the primary session, or [`NO_ACTIVE_SESSION`].
pub fn primary_session_label(flags: &SessionFlags) -> String {
    primary_session(flags)
        .map(TradingSession::label)
        .unwrap_or_else(|| NO_ACTIVE_SESSION.to_string())
}

/// Parse an RFC 3339 timestamp or epoch milliseconds into UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ms) = input.parse::<i64>() {
        return DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| CoreError::InvalidTimestamp(input.to_string()));
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidTimestamp(format!("{input}: {e}")))
}

/// Display bundle for the session banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionDisplay {
    pub current_session: String,
    pub is_kill_zone: bool,
    pub local_time: String,
    pub utc_time: String,
}

/// Build the display bundle, rendering local time in `tz`.
pub fn format_session_info_in<Tz>(dt: DateTime<Utc>, tz: &Tz) -> SessionDisplay
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let status = classify(dt);
    let current_session = if status.active_labels.is_empty() {
        OFF_HOURS.to_string()
    } else {
        status.active_labels.join(LABEL_SEPARATOR)
    };

    SessionDisplay {
        current_session,
        is_kill_zone: is_kill_zone(dt),
        local_time: dt.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        utc_time: dt.format("%H:%M:%S UTC").to_string(),
    }
}

/// Build the display bundle using the host's local time zone.
pub fn format_session_info(dt: DateTime<Utc>) -> SessionDisplay {
    format_session_info_in(dt, &Local)
}

/// Display bundle for the current time.
pub fn current_session_info() -> SessionDisplay {
    format_session_info(Utc::now())
}
