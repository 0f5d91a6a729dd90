//! Core domain logic for the trading journal.
//!
//! This crate provides the pure, reentrant pieces of the journal:
//! - `session`: UTC trading-session classification and display bundle
//! - `kill_zone`: kill-zone reference data and the kill-zone hour check
//! - `discipline`: punishment templates for rule violations
//!
//! Everything here is a function of its input and compiled-in tables, so it
//! is safe to call from any number of request handlers at once.

pub mod discipline;
pub mod error;
pub mod kill_zone;
pub mod session;

pub use discipline::{
    pick_punishment, violation_for_entry, Punishment, PunishmentTemplate, RuleViolation, Severity,
};
pub use error::{CoreError, Result};
pub use kill_zone::{
    is_kill_zone, is_kill_zone_hour, is_kill_zone_now, KillZone, KILL_ZONES, KILL_ZONE_HOURS,
};
pub use session::{
    classify, classify_hour, current_session_info, current_status, format_session_info,
    format_session_info_in, parse_timestamp, primary_session, primary_session_label,
    SessionDisplay, SessionFlags, SessionKey, SessionStatus, TradingSession, NO_ACTIVE_SESSION,
    OFF_HOURS, SESSIONS, SESSION_PRIORITY,
};
