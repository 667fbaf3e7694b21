use crate::application::services::{ActivityService, NotificationService, SessionService};
use crate::config::Config;
use crate::domain::ports::{KeyValueStore, TimeService};
use crate::infrastructure::runtime::SystemTimeService;
use crate::infrastructure::storage::LocalFileStore;
use std::sync::Arc;

/// Everything the front end talks to, wired once at startup.
pub struct AppState {
    pub session: Arc<SessionService>,
    pub activities: ActivityService,
    pub notifications: NotificationService,
}

/// Wire services over the file store in `config.data_dir`.
pub fn build_app_state(config: &Config) -> AppState {
    let store: Arc<dyn KeyValueStore> = Arc::new(LocalFileStore::new(&config.data_dir));
    tracing::info!("Using data directory {}", config.data_dir.display());

    build_app_state_with(
        config,
        store,
        Arc::new(SystemTimeService::new()),
        Arc::new(SessionService::new()),
    )
}

/// Wire services over caller-supplied adapters.
pub fn build_app_state_with(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn TimeService>,
    session: Arc<SessionService>,
) -> AppState {
    let activities = ActivityService::new(
        store.clone(),
        session.clone(),
        clock.clone(),
        config.activity_capacity,
    );

    let notifications = NotificationService::new(store, clock, config.notification_capacity);

    AppState {
        session,
        activities,
        notifications,
    }
}
