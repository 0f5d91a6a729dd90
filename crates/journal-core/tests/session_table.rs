//! Hour-by-hour checks of session flags, primary session and kill zones.

use chrono::{TimeZone, Utc};
use journal_core::{
    classify, classify_hour, format_session_info_in, is_kill_zone, primary_session, SessionKey,
    OFF_HOURS,
};

/// (hour, asian, london, new_york, london_close, primary, kill_zone)
const TABLE: [(u32, bool, bool, bool, bool, Option<SessionKey>, bool); 24] = [
    (0, true, false, false, false, Some(SessionKey::Asian), true),
    (1, true, false, false, false, Some(SessionKey::Asian), true),
    (2, true, false, false, false, Some(SessionKey::Asian), true),
    (3, true, false, false, false, Some(SessionKey::Asian), true),
    (4, true, false, false, false, Some(SessionKey::Asian), false),
    (5, true, false, false, false, Some(SessionKey::Asian), false),
    (6, true, false, false, false, Some(SessionKey::Asian), false),
    (7, true, true, false, false, Some(SessionKey::London), true),
    (8, false, true, false, false, Some(SessionKey::London), true),
    (9, false, true, false, false, Some(SessionKey::London), true),
    (10, false, true, false, false, Some(SessionKey::London), false),
    (11, false, true, false, false, Some(SessionKey::London), false),
    (12, false, true, true, false, Some(SessionKey::NewYork), true),
    (13, false, true, true, false, Some(SessionKey::NewYork), true),
    (14, false, true, true, false, Some(SessionKey::NewYork), true),
    (15, false, true, true, true, Some(SessionKey::LondonClose), false),
    (16, false, false, true, false, Some(SessionKey::NewYork), false),
    (17, false, false, true, false, Some(SessionKey::NewYork), false),
    (18, false, false, true, false, Some(SessionKey::NewYork), true),
    (19, false, false, true, false, Some(SessionKey::NewYork), true),
    (20, false, false, true, false, Some(SessionKey::NewYork), false),
    (21, false, false, false, false, None, false),
    (22, false, false, false, false, None, false),
    (23, true, false, false, false, Some(SessionKey::Asian), false),
];

#[test]
fn test_every_hour_matches_table() {
    for (hour, asian, london, new_york, london_close, primary, kill_zone) in TABLE {
        let dt = Utc.with_ymd_and_hms(2026, 3, 4, hour, 30, 0).unwrap();
        let status = classify(dt);

        assert_eq!(status.flags.asian, asian, "asian at {hour}");
        assert_eq!(status.flags.london, london, "london at {hour}");
        assert_eq!(status.flags.new_york, new_york, "new_york at {hour}");
        assert_eq!(status.flags.london_close, london_close, "london_close at {hour}");
        assert_eq!(
            primary_session(&status.flags).map(|s| s.key),
            primary,
            "primary at {hour}"
        );
        assert_eq!(is_kill_zone(dt), kill_zone, "kill zone at {hour}");

        let active = [asian, london, new_york, london_close]
            .iter()
            .filter(|f| **f)
            .count();
        assert_eq!(status.active_labels.len(), active, "labels at {hour}");
    }
}

#[test]
fn test_off_hours_display() {
    for hour in [21, 22] {
        let dt = Utc.with_ymd_and_hms(2026, 3, 4, hour, 0, 0).unwrap();
        assert!(classify_hour(hour).active_labels.is_empty());
        assert_eq!(format_session_info_in(dt, &Utc).current_session, OFF_HOURS);
    }
}
