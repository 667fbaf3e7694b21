use std::sync::Arc;

use crate::domain::entities::{NewNotification, Notification, NotificationType};
use crate::domain::ports::{KeyValueStore, TimeService};
use crate::domain::services::EventLog;

pub const NOTIFICATION_STORAGE_KEY: &str = "projectdeck.notifications";

/// Read-state selector for [`NotificationFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl ReadFilter {
    fn accepts(&self, read: bool) -> bool {
        match self {
            ReadFilter::All => true,
            ReadFilter::Read => read,
            ReadFilter::Unread => !read,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub notification_type: Option<NotificationType>,
    pub read: ReadFilter,
    /// Case-insensitive substring over title and message
    pub search_query: Option<String>,
}

impl NotificationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notification_type(mut self, notification_type: NotificationType) -> Self {
        self.notification_type = Some(notification_type);
        self
    }

    pub fn read(mut self, read: ReadFilter) -> Self {
        self.read = read;
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        if self
            .notification_type
            .is_some_and(|kind| kind != notification.notification_type)
        {
            return false;
        }
        if !self.read.accepts(notification.read) {
            return false;
        }

        match self.search_query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                notification.title.to_lowercase().contains(&needle)
                    || notification.message.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// In-app notification inbox, persisted under [`NOTIFICATION_STORAGE_KEY`].
pub struct NotificationService {
    log: EventLog<Notification>,
    clock: Arc<dyn TimeService>,
}

impl NotificationService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn TimeService>,
        capacity: usize,
    ) -> Self {
        let log = EventLog::load(store, NOTIFICATION_STORAGE_KEY, capacity);
        tracing::info!("Notifications loaded: {} entries", log.len());
        Self { log, clock }
    }

    /// Add an unread notification and return its id.
    pub fn add(&mut self, new: NewNotification) -> String {
        let notification = Notification::new(new, self.clock.now());
        let id = notification.id.clone();

        tracing::debug!(
            "Adding {} notification {}: {}",
            notification.notification_type,
            id,
            notification.title
        );

        self.log.prepend(notification);
        id
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.set_read(id, true)
    }

    pub fn mark_unread(&mut self, id: &str) -> bool {
        self.set_read(id, false)
    }

    fn set_read(&mut self, id: &str, read: bool) -> bool {
        self.log.update(id, |notification| {
            let changed = notification.read != read;
            notification.read = read;
            changed
        })
    }

    /// Returns how many notifications flipped to read.
    pub fn mark_all_read(&mut self) -> usize {
        self.log.update_all(|notification| {
            let changed = !notification.read;
            notification.read = true;
            changed
        })
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.log.retain(|notification| notification.id != id) > 0
    }

    pub fn delete_all_read(&mut self) -> usize {
        let removed = self.log.retain(|notification| !notification.read);
        tracing::info!("Deleted {} read notifications", removed);
        removed
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.log.clear();
        tracing::info!("Cleared notifications ({} entries)", removed);
        removed
    }

    /// Derived from the collection on every call.
    pub fn unread_count(&self) -> usize {
        self.log.iter().filter(|notification| !notification.read).count()
    }

    pub fn get_filtered(&self, filter: &NotificationFilter) -> Vec<Notification> {
        self.log
            .iter()
            .filter(|notification| filter.matches(notification))
            .cloned()
            .collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<Notification> {
        self.log.iter().take(limit).cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Notification> {
        self.log.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
