use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::domain::entities::{Activity, Notification};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::KeyValueStore;

/// An entry that can live in an [`EventLog`].
pub trait LogEntry: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

impl LogEntry for Activity {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl LogEntry for Notification {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Newest-first, capacity-bounded collection mirrored to a key-value store.
///
/// Every mutation rewrites the whole collection under `key`. Persistence is
/// best effort: read and write failures are logged and never reach the
/// caller, and the in-memory change stands either way.
pub struct EventLog<T: LogEntry> {
    key: String,
    capacity: usize,
    entries: VecDeque<T>,
    store: Arc<dyn KeyValueStore>,
}

impl<T: LogEntry> EventLog<T> {
    /// Read the persisted collection once. Missing or malformed data yields
    /// an empty log.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, capacity: usize) -> Self {
        let key = key.into();

        let mut entries = match Self::read_back(store.as_ref(), &key) {
            Ok(entries) => entries,
            Err(DomainError::Serialization(e)) => {
                tracing::warn!("Discarding unreadable event log '{}': {}", key, e);
                VecDeque::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read event log '{}': {}", key, e);
                VecDeque::new()
            }
        };

        if entries.len() > capacity {
            tracing::info!(
                "Event log '{}' holds {} entries, keeping newest {}",
                key,
                entries.len(),
                capacity
            );
            entries.truncate(capacity);
        }

        tracing::debug!("Loaded event log '{}' with {} entries", key, entries.len());

        Self {
            key,
            capacity,
            entries,
            store,
        }
    }

    fn read_back(store: &dyn KeyValueStore, key: &str) -> DomainResult<VecDeque<T>> {
        match store.read(key)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(VecDeque::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Add `entry` as the newest element and evict from the tail past
    /// capacity. Returns how many entries were evicted.
    pub fn prepend(&mut self, entry: T) -> usize {
        self.entries.push_front(entry);

        let evicted = self.entries.len().saturating_sub(self.capacity);
        self.entries.truncate(self.capacity);

        self.persist();
        evicted
    }

    /// Keep only entries matching `keep`. Returns how many were removed.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(keep);
        let removed = before - self.entries.len();

        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Drop entries created strictly before `cutoff`. Returns how many were
    /// removed.
    pub fn purge_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        self.retain(|entry| entry.created_at() >= cutoff)
    }

    /// Apply `change` to the entry with `id`. `change` reports whether it
    /// modified the entry. Unknown ids are a no-op.
    pub fn update<F>(&mut self, id: &str, change: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let changed = match self.entries.iter_mut().find(|entry| entry.id() == id) {
            Some(entry) => change(entry),
            None => false,
        };

        if changed {
            self.persist();
        }
        changed
    }

    /// Apply `change` to every entry. Returns how many entries changed.
    pub fn update_all<F>(&mut self, mut change: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let changed = self
            .entries
            .iter_mut()
            .fold(0, |count, entry| if change(entry) { count + 1 } else { count });

        if changed > 0 {
            self.persist();
        }
        changed
    }

    /// Drop everything. Returns how many entries were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.persist();
        removed
    }

    fn persist(&self) {
        if let Err(e) = self.write_back() {
            tracing::warn!("Failed to persist event log '{}': {}", self.key, e);
        }
    }

    fn write_back(&self) -> DomainResult<()> {
        let bytes = serde_json::to_vec(&self.entries)?;
        self.store.write(&self.key, &bytes)
    }
}
