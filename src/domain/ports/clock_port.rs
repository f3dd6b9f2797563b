//! Port definition for wall-clock time.

use chrono::{DateTime, Utc};

/// Source of the current time for timestamps and expiry checks.
pub trait ClockPort: Send + Sync {
    /// Returns the current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::TimeDelta;
    use std::sync::RwLock;

    /// Clock that only moves when told to.
    pub struct ManualClock {
        now: RwLock<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Creates a clock frozen at `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: RwLock::new(now),
            }
        }

        /// Moves the clock forward.
        pub fn advance(&self, delta: TimeDelta) {
            let mut now = self.now.write().unwrap();
            *now += delta;
        }
    }

    impl ClockPort for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.read().unwrap()
        }
    }
}
