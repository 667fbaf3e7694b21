use crate::domain::entities::{Permission, Role};

/// Permission checks keyed by role name.
///
/// Role names arrive as strings from stored profiles and UI state. A name that
/// is not one of the known roles grants nothing, so guards in front of
/// destructive actions stay closed.
pub struct PermissionService;

impl PermissionService {
    /// True iff `role` names a known role whose table contains `permission`
    pub fn has_permission(role: &str, permission: &Permission) -> bool {
        Self::get_role_permissions(role).contains(permission)
    }

    /// True if at least one of `permissions` is granted; false for an empty list
    pub fn has_any_permission(role: &str, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .any(|perm| Self::has_permission(role, perm))
    }

    /// True only if every one of `permissions` is granted; true for an empty list
    pub fn has_all_permissions(role: &str, permissions: &[Permission]) -> bool {
        permissions
            .iter()
            .all(|perm| Self::has_permission(role, perm))
    }

    /// Exact, case-sensitive role name check
    pub fn is_valid_role(role: &str) -> bool {
        role.parse::<Role>().is_ok()
    }

    /// The role's fixed permission list, empty for unknown roles
    pub fn get_role_permissions(role: &str) -> &'static [Permission] {
        match role.parse::<Role>() {
            Ok(role) => role.permissions(),
            Err(_) => {
                tracing::debug!("Unknown role '{}' treated as having no permissions", role);
                &[]
            }
        }
    }
}
