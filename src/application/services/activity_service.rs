use chrono::{DateTime, Days, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{Activity, ActivityAction, Actor, NewActivity, TargetType};
use crate::domain::ports::{ActorProvider, KeyValueStore, TimeService};
use crate::domain::services::EventLog;

pub const ACTIVITY_STORAGE_KEY: &str = "projectdeck.activities";
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Conjunction of optional predicates. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFilter {
    pub action: Option<ActivityAction>,
    pub target_type: Option<TargetType>,
    pub user_id: Option<String>,
    /// Case-insensitive substring over description, actor name and target name
    pub search_query: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub to: Option<DateTime<Utc>>,
}

impl ActivityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, action: ActivityAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn target_type(mut self, target_type: TargetType) -> Self {
        self.target_type = Some(target_type);
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn between(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, activity: &Activity) -> bool {
        if self.action.is_some_and(|action| action != activity.action) {
            return false;
        }
        if self.target_type.is_some_and(|target| target != activity.target_type) {
            return false;
        }
        if self.user_id.as_deref().is_some_and(|id| id != activity.user_id) {
            return false;
        }
        if self.from.is_some_and(|from| activity.created_at < from) {
            return false;
        }
        if self.to.is_some_and(|to| activity.created_at > to) {
            return false;
        }

        match self.search_query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
                contains(&activity.description)
                    || contains(&activity.user_name)
                    || activity.target_name.as_deref().is_some_and(contains)
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    pub total_count: usize,
    pub counts_by_action: BTreeMap<ActivityAction, usize>,
    /// Keyed by user id
    pub counts_by_actor: BTreeMap<String, usize>,
    /// Keyed by `YYYY-MM-DD` (UTC)
    pub counts_by_day: BTreeMap<String, usize>,
}

/// The activity feed: records who did what, keeps the newest `capacity`
/// entries and persists them under [`ACTIVITY_STORAGE_KEY`].
pub struct ActivityService {
    log: EventLog<Activity>,
    actors: Arc<dyn ActorProvider>,
    clock: Arc<dyn TimeService>,
}

impl ActivityService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        actors: Arc<dyn ActorProvider>,
        clock: Arc<dyn TimeService>,
        capacity: usize,
    ) -> Self {
        let log = EventLog::load(store, ACTIVITY_STORAGE_KEY, capacity);
        tracing::info!("Activity log loaded: {} entries", log.len());
        Self { log, actors, clock }
    }

    /// Record an activity for the current actor, falling back to the guest
    /// identity when nobody is signed in. Always succeeds.
    pub fn record(&mut self, new: NewActivity) {
        let actor = self.actors.current_actor().unwrap_or_else(Actor::guest);
        let activity = Activity::new(new, actor, self.clock.now());

        tracing::debug!(
            "Recording activity {}: {} by {}",
            activity.id,
            activity.action,
            activity.user_id
        );

        let evicted = self.log.prepend(activity);
        if evicted > 0 {
            tracing::debug!("Activity log at capacity, dropped {} oldest", evicted);
        }
    }

    /// Matching activities, newest first.
    pub fn query(&self, filter: &ActivityFilter) -> Vec<Activity> {
        self.log
            .iter()
            .filter(|activity| filter.matches(activity))
            .cloned()
            .collect()
    }

    pub fn recent(&self, limit: usize) -> Vec<Activity> {
        self.log.iter().take(limit).cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Activity> {
        self.log.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn stats(&self) -> ActivityStats {
        self.log
            .iter()
            .fold(ActivityStats::default(), |mut stats, activity| {
                stats.total_count += 1;
                *stats.counts_by_action.entry(activity.action).or_default() += 1;
                *stats
                    .counts_by_actor
                    .entry(activity.user_id.clone())
                    .or_default() += 1;
                *stats
                    .counts_by_day
                    .entry(activity.created_at.format("%Y-%m-%d").to_string())
                    .or_default() += 1;
                stats
            })
    }

    /// Remove activities created strictly before `now - days` calendar days.
    /// An activity exactly `days` old is kept. Returns how many were removed.
    pub fn purge_older_than(&mut self, days: u32) -> usize {
        let now = self.clock.now();
        let cutoff = now
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let removed = self.log.purge_before(cutoff);
        tracing::info!(
            "Purged {} activities older than {} days (before {})",
            removed,
            days,
            cutoff.to_rfc3339()
        );
        removed
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.log.clear();
        tracing::info!("Cleared activity log ({} entries)", removed);
        removed
    }
}
