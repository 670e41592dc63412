//! Landing page countdown.

use serde::Serialize;

use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPhase {
    Upcoming,
    Live,
    Ended,
}

/// Time remaining until the doors open, split for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
}

/// Phase of the event at `now`. `ends_at` is exclusive.
pub fn phase(now: Timestamp, starts_at: Timestamp, ends_at: Timestamp) -> EventPhase {
    if now < starts_at {
        EventPhase::Upcoming
    } else if now < ends_at {
        EventPhase::Live
    } else {
        EventPhase::Ended
    }
}

/// Countdown to `starts_at`; all zeros once the event has started.
pub fn countdown(now: Timestamp, starts_at: Timestamp) -> Countdown {
    let total_seconds = (starts_at - now).num_seconds().max(0);
    Countdown {
        days: total_seconds / 86_400,
        hours: (total_seconds % 86_400) / 3_600,
        minutes: (total_seconds % 3_600) / 60,
        seconds: total_seconds % 60,
        total_seconds,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn start() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 11, 21, 3, 30, 0).unwrap()
    }

    #[test]
    fn splits_remaining_time() {
        let now = start() - Duration::seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 5);
        assert_eq!(
            countdown(now, start()),
            Countdown {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5,
                total_seconds: 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5,
            }
        );
    }

    #[test]
    fn zero_after_start() {
        assert_eq!(
            countdown(start() + Duration::minutes(1), start()),
            Countdown::default()
        );
        assert_eq!(countdown(start(), start()), Countdown::default());
    }

    #[test]
    fn phases() {
        let end = start() + Duration::hours(8);
        assert_eq!(phase(start() - Duration::seconds(1), start(), end), EventPhase::Upcoming);
        assert_eq!(phase(start(), start(), end), EventPhase::Live);
        assert_eq!(phase(end - Duration::seconds(1), start(), end), EventPhase::Live);
        assert_eq!(phase(end, start(), end), EventPhase::Ended);
    }
}
