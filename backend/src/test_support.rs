//! Test utilities shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Only compiled for tests or with the `test-support`
//! feature.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

/// A [`Clock`] that stands still until the test moves it.
///
/// # Examples
/// ```
/// use chrono::Duration;
/// use content_api::test_support::MutableClock;
/// use mockable::Clock;
///
/// let clock = MutableClock::fixed();
/// let before = clock.utc();
/// clock.advance(Duration::hours(1));
/// assert_eq!(clock.utc() - before, Duration::hours(1));
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `start`.
    #[must_use]
    pub const fn starting_at(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    /// Start the clock at 2026-03-01 09:00 UTC.
    #[must_use]
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .unwrap_or_default();
        Self::starting_at(start)
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
