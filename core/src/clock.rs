//! Wall-clock source for the service layer.
//!
//! RULE: Nothing in tick.rs or action.rs reads the clock.
//! The service asks its Clock for `now` once per request and hands
//! that instant to the pure engine functions.

use chrono::{DateTime, Duration, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Real time, via chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests and replay tooling.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedClock {
    pub current: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: start }
    }

    /// Move forward by `by`. Returns the new instant.
    pub fn advance(&mut self, by: Duration) -> DateTime<Utc> {
        self.current += by;
        self.current
    }

    pub fn advance_minutes(&mut self, minutes: i64) -> DateTime<Utc> {
        self.advance(Duration::minutes(minutes))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.current
    }
}
