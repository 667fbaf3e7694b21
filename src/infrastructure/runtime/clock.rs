use crate::domain::ports::time_service::TimeService;
use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;

#[derive(Clone, Debug, Default)]
pub struct SystemTimeService;

impl SystemTimeService {
    pub fn new() -> Self {
        Self
    }
}

impl TimeService for SystemTimeService {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedTimeService {
    now: RwLock<DateTime<Utc>>,
}

impl FixedTimeService {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut current) = self.now.write() {
            *current = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut current) = self.now.write() {
            *current += by;
        }
    }
}

impl TimeService for FixedTimeService {
    fn now(&self) -> DateTime<Utc> {
        match self.now.read() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
