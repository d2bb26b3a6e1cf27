//! Time sources for mutations that stamp or compare wall-clock time.

use std::cell::Cell;
use std::time::Duration;

use lesspass_types::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(chrono::Utc::now().timestamp_millis())
    }
}

/// A frozen clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<Timestamp>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self::new(Timestamp::from_millis(millis))
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        let millis = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        let next = self.now.get().millis().saturating_add(millis);
        self.now.set(Timestamp::from_millis(next));
    }

    pub fn rewind(&self, by: Duration) {
        self.now.set(self.now.get().saturating_sub(by));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
