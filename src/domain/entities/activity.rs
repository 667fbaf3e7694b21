use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::Actor;
use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    ProjectArchived,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TaskStatusChanged,
    TaskAssigned,
    TaskCommented,
    MemberInvited,
    MemberRemoved,
    MemberRoleChanged,
    SettingsUpdated,
    UserLogin,
    UserLogout,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::ProjectCreated => "project_created",
            ActivityAction::ProjectUpdated => "project_updated",
            ActivityAction::ProjectDeleted => "project_deleted",
            ActivityAction::ProjectArchived => "project_archived",
            ActivityAction::TaskCreated => "task_created",
            ActivityAction::TaskUpdated => "task_updated",
            ActivityAction::TaskDeleted => "task_deleted",
            ActivityAction::TaskStatusChanged => "task_status_changed",
            ActivityAction::TaskAssigned => "task_assigned",
            ActivityAction::TaskCommented => "task_commented",
            ActivityAction::MemberInvited => "member_invited",
            ActivityAction::MemberRemoved => "member_removed",
            ActivityAction::MemberRoleChanged => "member_role_changed",
            ActivityAction::SettingsUpdated => "settings_updated",
            ActivityAction::UserLogin => "user_login",
            ActivityAction::UserLogout => "user_logout",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project_created" => Ok(ActivityAction::ProjectCreated),
            "project_updated" => Ok(ActivityAction::ProjectUpdated),
            "project_deleted" => Ok(ActivityAction::ProjectDeleted),
            "project_archived" => Ok(ActivityAction::ProjectArchived),
            "task_created" => Ok(ActivityAction::TaskCreated),
            "task_updated" => Ok(ActivityAction::TaskUpdated),
            "task_deleted" => Ok(ActivityAction::TaskDeleted),
            "task_status_changed" => Ok(ActivityAction::TaskStatusChanged),
            "task_assigned" => Ok(ActivityAction::TaskAssigned),
            "task_commented" => Ok(ActivityAction::TaskCommented),
            "member_invited" => Ok(ActivityAction::MemberInvited),
            "member_removed" => Ok(ActivityAction::MemberRemoved),
            "member_role_changed" => Ok(ActivityAction::MemberRoleChanged),
            "settings_updated" => Ok(ActivityAction::SettingsUpdated),
            "user_login" => Ok(ActivityAction::UserLogin),
            "user_logout" => Ok(ActivityAction::UserLogout),
            _ => Err(DomainError::Validation(format!("Invalid activity action: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Project,
    Task,
    Member,
    Comment,
    Settings,
    User,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Project => "project",
            TargetType::Task => "task",
            TargetType::Member => "member",
            TargetType::Comment => "comment",
            TargetType::Settings => "settings",
            TargetType::User => "user",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(TargetType::Project),
            "task" => Ok(TargetType::Task),
            "member" => Ok(TargetType::Member),
            "comment" => Ok(TargetType::Comment),
            "settings" => Ok(TargetType::Settings),
            "user" => Ok(TargetType::User),
            _ => Err(DomainError::Validation(format!("Invalid target type: {}", s))),
        }
    }
}

/// A recorded domain event, attributed to the actor who caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub action: ActivityAction,
    pub target_type: TargetType,
    pub description: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// What a caller supplies to record an activity; the log fills in the id,
/// timestamp and actor.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub action: ActivityAction,
    pub target_type: TargetType,
    pub description: String,
    pub target_id: Option<String>,
    pub target_name: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl NewActivity {
    pub fn new(
        action: ActivityAction,
        target_type: TargetType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action,
            target_type,
            description: description.into(),
            target_id: None,
            target_name: None,
            metadata: None,
        }
    }

    pub fn target_id(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    pub fn target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = Some(target_name.into());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl Activity {
    pub fn new(new: NewActivity, actor: Actor, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: new.action,
            target_type: new.target_type,
            description: new.description,
            user_id: actor.id,
            user_name: actor.name,
            user_email: actor.email,
            user_avatar: actor.avatar,
            target_id: new.target_id,
            target_name: new.target_name,
            metadata: new.metadata,
            created_at,
        }
    }
}
