#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use projectdeck::domain::errors::{DomainError, DomainResult};
use projectdeck::domain::ports::KeyValueStore;
use projectdeck::infrastructure::runtime::FixedTimeService;
use projectdeck::infrastructure::storage::InMemoryStore;
use projectdeck::{
    ActivityService, NotificationService, Role, SessionService, User,
    DEFAULT_ACTIVITY_CAPACITY, DEFAULT_NOTIFICATION_CAPACITY,
};
use std::sync::Arc;

/// Everything a log test needs, sharing one store, clock and session.
pub struct TestHarness {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedTimeService>,
    pub session: Arc<SessionService>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            clock: Arc::new(FixedTimeService::new(test_epoch())),
            session: Arc::new(SessionService::new()),
        }
    }

    pub fn activities(&self) -> ActivityService {
        self.activities_with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }

    pub fn activities_with_capacity(&self, capacity: usize) -> ActivityService {
        ActivityService::new(
            self.store.clone(),
            self.session.clone(),
            self.clock.clone(),
            capacity,
        )
    }

    pub fn notifications(&self) -> NotificationService {
        NotificationService::new(
            self.store.clone(),
            self.clock.clone(),
            DEFAULT_NOTIFICATION_CAPACITY,
        )
    }
}

pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 10, 0, 0).unwrap()
}

pub fn john() -> User {
    User::new("user-john", "John Smith", "john@example.com", Role::Manager)
}

pub fn jane() -> User {
    User::new("user-jane", "Jane Doe", "jane@example.com", Role::Member)
}

/// Reads fine, refuses every write.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: InMemoryStore,
}

impl ReadOnlyStore {
    pub fn seeded(key: &str, value: &[u8]) -> Self {
        let store = Self::default();
        store.inner.write(key, value).unwrap();
        store
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn read(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        self.inner.read(key)
    }

    fn write(&self, _key: &str, _value: &[u8]) -> DomainResult<()> {
        Err(DomainError::Storage("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> DomainResult<()> {
        Err(DomainError::Storage("quota exceeded".to_string()))
    }
}
