use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;

/// An allowed operation: an action performed on a kind of resource.
///
/// Equality is structural, so a permission built at runtime from user input
/// matches the statically authored one with the same action and resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub action: Cow<'static, str>,
    pub resource: Cow<'static, str>,
}

impl Permission {
    pub fn new(
        action: impl Into<Cow<'static, str>>,
        resource: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            action: action.into(),
            resource: resource.into(),
        }
    }

    /// Const constructor used by the static role tables.
    pub const fn of(action: &'static str, resource: &'static str) -> Self {
        Self {
            action: Cow::Borrowed(action),
            resource: Cow::Borrowed(resource),
        }
    }
}

/// Formats as `resource:action`.
impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((resource, action)) if !resource.is_empty() && !action.is_empty() => {
                Ok(Permission::new(action.to_string(), resource.to_string()))
            }
            _ => Err(DomainError::Validation(format!(
                "Invalid permission format: '{}'. Must match pattern 'resource:action'",
                s
            ))),
        }
    }
}

/// Team role. The set is closed; each role owns a fixed permission list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Member,
    Viewer,
}

static ADMIN_PERMISSIONS: [Permission; 18] = [
    Permission::of("create", "project"),
    Permission::of("read", "project"),
    Permission::of("update", "project"),
    Permission::of("delete", "project"),
    Permission::of("create", "task"),
    Permission::of("read", "task"),
    Permission::of("update", "task"),
    Permission::of("delete", "task"),
    Permission::of("assign", "task"),
    Permission::of("read", "member"),
    Permission::of("invite", "member"),
    Permission::of("update_role", "member"),
    Permission::of("remove", "member"),
    Permission::of("read", "activity"),
    Permission::of("purge", "activity"),
    Permission::of("read", "analytics"),
    Permission::of("read", "settings"),
    Permission::of("update", "settings"),
];

static MANAGER_PERMISSIONS: [Permission; 13] = [
    Permission::of("create", "project"),
    Permission::of("read", "project"),
    Permission::of("update", "project"),
    Permission::of("create", "task"),
    Permission::of("read", "task"),
    Permission::of("update", "task"),
    Permission::of("delete", "task"),
    Permission::of("assign", "task"),
    Permission::of("read", "member"),
    Permission::of("invite", "member"),
    Permission::of("read", "activity"),
    Permission::of("read", "analytics"),
    Permission::of("read", "settings"),
];

static MEMBER_PERMISSIONS: [Permission; 7] = [
    Permission::of("read", "project"),
    Permission::of("create", "task"),
    Permission::of("read", "task"),
    Permission::of("update", "task"),
    Permission::of("read", "member"),
    Permission::of("read", "activity"),
    Permission::of("read", "settings"),
];

static VIEWER_PERMISSIONS: [Permission; 3] = [
    Permission::of("read", "project"),
    Permission::of("read", "task"),
    Permission::of("read", "member"),
];

/// Every permission the application knows about.
pub fn permission_catalog() -> &'static [Permission] {
    &ADMIN_PERMISSIONS
}

impl Role {
    pub fn all() -> [Role; 4] {
        [Role::Admin, Role::Manager, Role::Member, Role::Viewer]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Member => "member",
            Role::Viewer => "viewer",
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => &ADMIN_PERMISSIONS,
            Role::Manager => &MANAGER_PERMISSIONS,
            Role::Member => &MEMBER_PERMISSIONS,
            Role::Viewer => &VIEWER_PERMISSIONS,
        }
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions().contains(permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the role literals.
impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "member" => Ok(Role::Member),
            "viewer" => Ok(Role::Viewer),
            _ => Err(DomainError::Validation(format!("Unknown role: {}", s))),
        }
    }
}
