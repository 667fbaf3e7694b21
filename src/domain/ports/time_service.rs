use chrono::{DateTime, Utc};

pub trait TimeService: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
