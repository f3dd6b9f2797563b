use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::entities::CacheRecord;

/// Default number of days an entry stays fresh.
pub const DEFAULT_EXPIRY_DAYS: u32 = 1;

const SECONDS_PER_DAY: i64 = 86_400;

/// Decides whether a cache record is stale.
///
/// An entry is expired once its age is strictly greater than the interval;
/// an entry exactly at the boundary is still fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    interval_days: u32,
}

impl ExpiryPolicy {
    /// Creates a policy where entries stay fresh for `interval_days` days.
    #[must_use]
    pub const fn new(interval_days: u32) -> Self {
        Self { interval_days }
    }

    /// Configured freshness window in days.
    #[must_use]
    pub const fn interval_days(&self) -> u32 {
        self.interval_days
    }

    /// Freshness window as a duration, one day being 86 400 seconds.
    #[must_use]
    pub fn interval(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.interval_days) * SECONDS_PER_DAY)
    }

    /// Returns true if `record` is older than the interval at `now`.
    ///
    /// A record created after `now` (clock skew) is never expired.
    #[must_use]
    pub fn is_expired(&self, record: &CacheRecord, now: DateTime<Utc>) -> bool {
        self.is_stale(record.created_at(), now)
    }

    fn is_stale(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - created_at > self.interval()
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap()
    }

    #[test_case(-1, false ; "one_second_before_boundary")]
    #[test_case(0, false ; "exactly_at_boundary")]
    #[test_case(1, true ; "one_second_after_boundary")]
    fn test_one_day_boundary(offset_secs: i64, expected: bool) {
        let policy = ExpiryPolicy::default();
        let record = CacheRecord::new("https://x/a.png", "f", created());
        let now = created() + TimeDelta::seconds(SECONDS_PER_DAY + offset_secs);

        assert_eq!(policy.is_expired(&record, now), expected);
    }

    #[test_case(0, 1, true ; "zero_interval_expires_immediately")]
    #[test_case(7, 6 * SECONDS_PER_DAY, false ; "week_interval_six_days_old")]
    #[test_case(7, 8 * SECONDS_PER_DAY, true ; "week_interval_eight_days_old")]
    fn test_configured_interval(days: u32, age_secs: i64, expected: bool) {
        let policy = ExpiryPolicy::new(days);
        let now = created() + TimeDelta::seconds(age_secs);

        assert_eq!(policy.is_stale(created(), now), expected);
    }

    #[test]
    fn test_interval_is_whole_days() {
        let policy = ExpiryPolicy::new(3);
        assert_eq!(policy.interval_days(), 3);
        assert_eq!(policy.interval(), TimeDelta::days(3));
    }

    #[test]
    fn test_clock_skew_is_not_expired() {
        let policy = ExpiryPolicy::default();
        let now = created() - TimeDelta::hours(5);
        assert!(!policy.is_stale(created(), now));
    }
}
