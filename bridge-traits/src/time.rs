//! Time Source Abstraction
//!
//! Injectable clock so cache timestamps and log entries are deterministic
//! under test.

use chrono::{DateTime, Utc};

/// Time source trait.
///
/// Components that record wall-clock timestamps (cache `cached_at` columns,
/// settings `updated_at`, log entries) take a `Clock` instead of calling
/// `Utc::now()` directly.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;

    /// Current Unix timestamp in seconds.
    fn unix_timestamp(&self) -> i64 {
        self.now().timestamp()
    }

    /// Current Unix timestamp in milliseconds.
    fn unix_timestamp_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// System clock using actual wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn timestamp_helpers_derive_from_now() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(at);

        assert_eq!(clock.unix_timestamp(), at.timestamp());
        assert_eq!(clock.unix_timestamp_millis(), at.timestamp_millis());
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        assert!(clock.unix_timestamp() > 1_700_000_000);
    }
}
