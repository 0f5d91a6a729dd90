//! Punishment templates for trading-rule violations.
//!
//! Each violation kind owns a small rotation of templates. The nth repeat of a
//! violation picks the next template in the rotation and escalates the
//! cooldown by severity.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::session::classify;

/// Kind of rule a journaled trade broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    /// Entered without a stop loss.
    NoStopLoss,
    /// Position size above the configured risk.
    Oversized,
    /// Re-entered immediately after a loss to win it back.
    RevengeTrade,
    /// Exceeded the daily trade count.
    OverTrading,
    /// Traded while no session was active.
    OffSession,
    /// Widened the stop after entry.
    MovedStop,
}

impl RuleViolation {
    pub const ALL: [RuleViolation; 6] = [
        Self::NoStopLoss,
        Self::Oversized,
        Self::RevengeTrade,
        Self::OverTrading,
        Self::OffSession,
        Self::MovedStop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoStopLoss => "no_stop_loss",
            Self::Oversized => "oversized",
            Self::RevengeTrade => "revenge_trade",
            Self::OverTrading => "over_trading",
            Self::OffSession => "off_session",
            Self::MovedStop => "moved_stop",
        }
    }

    /// Templates rotated through by [`pick_punishment`], never empty.
    pub fn templates(&self) -> &'static [PunishmentTemplate] {
        match self {
            Self::NoStopLoss => &NO_STOP_LOSS,
            Self::Oversized => &OVERSIZED,
            Self::RevengeTrade => &REVENGE_TRADE,
            Self::OverTrading => &OVER_TRADING,
            Self::OffSession => &OFF_SESSION,
            Self::MovedStop => &MOVED_STOP,
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleViolation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CoreError::UnknownViolation(s.to_string()))
    }
}

/// How hard to come down on a repeated violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Strike,
    Lockout,
}

impl Severity {
    /// Severity for the nth occurrence (1-based).
    #[must_use]
    pub fn for_occurrence(occurrence: u32) -> Self {
        match occurrence {
            0 | 1 => Self::Warning,
            2 | 3 => Self::Strike,
            _ => Self::Lockout,
        }
    }

    fn cooldown_multiplier(&self) -> u32 {
        match self {
            Self::Warning => 1,
            Self::Strike => 2,
            Self::Lockout => 4,
        }
    }
}

/// One entry in a violation's rotation. `cooldown_minutes` is the base
/// cooldown before the severity multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PunishmentTemplate {
    pub title: &'static str,
    pub task: &'static str,
    pub cooldown_minutes: u32,
}

const NO_STOP_LOSS: [PunishmentTemplate; 2] = [
    PunishmentTemplate {
        title: "Stop-loss drill",
        task: "Write the invalidation level for your last 10 trades before the next entry.",
        cooldown_minutes: 30,
    },
    PunishmentTemplate {
        title: "Hard stop only",
        task: "Next 5 trades must be placed with a bracket order.",
        cooldown_minutes: 60,
    },
];

const OVERSIZED: [PunishmentTemplate; 2] = [
    PunishmentTemplate {
        title: "Half size",
        task: "Trade at half your normal size for the rest of the day.",
        cooldown_minutes: 30,
    },
    PunishmentTemplate {
        title: "Position math",
        task: "Recompute risk per trade for your last 5 entries in the journal.",
        cooldown_minutes: 45,
    },
];

const REVENGE_TRADE: [PunishmentTemplate; 2] = [
    PunishmentTemplate {
        title: "Walk away",
        task: "Close the platform and step away from the screen.",
        cooldown_minutes: 60,
    },
    PunishmentTemplate {
        title: "Loss review",
        task: "Write what you felt before the revenge entry and what triggered it.",
        cooldown_minutes: 90,
    },
];

const OVER_TRADING: [PunishmentTemplate; 2] = [
    PunishmentTemplate {
        title: "Trade cap",
        task: "No more entries today. Review every trade you took instead.",
        cooldown_minutes: 120,
    },
    PunishmentTemplate {
        title: "A+ setups only",
        task: "Tomorrow, only take setups you graded A+ in pre-market prep.",
        cooldown_minutes: 60,
    },
];

const OFF_SESSION: [PunishmentTemplate; 1] = [PunishmentTemplate {
    title: "Session discipline",
    task: "Write down the session you trade and its hours. Only enter inside it.",
    cooldown_minutes: 30,
}];

const MOVED_STOP: [PunishmentTemplate; 2] = [
    PunishmentTemplate {
        title: "Set and forget",
        task: "Next 3 trades: no stop adjustments except to break-even.",
        cooldown_minutes: 45,
    },
    PunishmentTemplate {
        title: "Chart review",
        task: "Mark where the original stop was and where price went afterwards.",
        cooldown_minutes: 30,
    },
];

/// Chosen punishment for a violation occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Punishment {
    pub violation: RuleViolation,
    pub occurrence: u32,
    pub severity: Severity,
    pub title: &'static str,
    pub task: &'static str,
    pub cooldown_minutes: u32,
}

/// Pick the punishment for the nth (1-based) occurrence of a violation.
///
/// Deterministic: the same inputs always yield the same template.
/// `occurrence == 0` is treated as the first occurrence.
#[must_use]
pub fn pick_punishment(violation: RuleViolation, occurrence: u32) -> Punishment {
    let occurrence = occurrence.max(1);
    let templates = violation.templates();
    let template = templates[(occurrence as usize - 1) % templates.len()];
    let severity = Severity::for_occurrence(occurrence);

    Punishment {
        violation,
        occurrence,
        severity,
        title: template.title,
        task: template.task,
        cooldown_minutes: template.cooldown_minutes * severity.cooldown_multiplier(),
    }
}

/// Violation implied by the entry time alone, if any.
#[must_use]
pub fn violation_for_entry(entry_time: DateTime<Utc>) -> Option<RuleViolation> {
    if classify(entry_time).flags.any() {
        None
    } else {
        Some(RuleViolation::OffSession)
    }
}
