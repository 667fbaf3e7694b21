use crate::domain::entities::{Actor, Permission, Role, User};
use crate::domain::ports::ActorProvider;
use std::sync::RwLock;

/// Holds the signed-in user and answers role-gated UI checks.
///
/// Shared behind an `Arc` so the activity log can resolve the current actor
/// while the front end signs users in and out. A poisoned lock reads as
/// signed out.
#[derive(Debug, Default)]
pub struct SessionService {
    current: RwLock<Option<User>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            current: RwLock::new(Some(user)),
        }
    }

    pub fn sign_in(&self, user: User) {
        tracing::info!("User {} signed in as {}", user.id, user.role);
        if let Ok(mut current) = self.current.write() {
            *current = Some(user);
        }
    }

    /// Returns the user that was signed in, if any.
    pub fn sign_out(&self) -> Option<User> {
        let previous = match self.current.write() {
            Ok(mut current) => current.take(),
            Err(_) => None,
        };
        if let Some(user) = &previous {
            tracing::info!("User {} signed out", user.id);
        }
        previous
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().ok().and_then(|current| current.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.current
            .read()
            .ok()
            .and_then(|current| current.as_ref().map(|user| user.role))
    }

    /// Signed-out sessions can do nothing.
    pub fn can(&self, permission: &Permission) -> bool {
        self.role()
            .map(|role| role.has_permission(permission))
            .unwrap_or(false)
    }

    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        self.role()
            .map(|role| role.has_any_permission(permissions))
            .unwrap_or(false)
    }

    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        self.role()
            .map(|role| role.has_all_permissions(permissions))
            .unwrap_or(false)
    }
}

impl ActorProvider for SessionService {
    fn current_actor(&self) -> Option<Actor> {
        self.current
            .read()
            .ok()
            .and_then(|current| current.as_ref().map(User::actor))
    }
}
