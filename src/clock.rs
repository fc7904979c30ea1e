//! Wall-clock source for identifier generation.
//!
//! The offset of the returned time is the timezone of the date prefix; the
//! UTC instant drives the elapsed-time field.

use chrono::{DateTime, FixedOffset, Local};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2023, 1, 1, 10, 0, 0)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_current() {
        let before = chrono::Utc::now().timestamp_millis();
        let now = SystemClock.now().timestamp_millis();
        let after = chrono::Utc::now().timestamp_millis();
        assert!(before <= now && now <= after);
    }
}
