//! The permission model.
//!
//! [`PermissionModel`] answers two kinds of question over an immutable
//! [`PermissionTable`]:
//!
//! - **Authorization**: does a role hold a capability (or any/all of a list)?
//! - **Delegation**: may a manager of one role administer a subject of another?
//!
//! Inputs are the raw strings callers hold (a role from the session, a
//! token hard-coded at the call site). Nothing here fails or panics:
//! unrecognized input is the least-privileged outcome.
//!
//! # Audit Logging
//!
//! Decisions are logged at debug level. An unknown role string is logged
//! at warn level since it usually means a typo upstream. Logging never
//! changes a result.
//!
//! # Example
//!
//! ```
//! use insight_auth::{PermissionModel, PermissionPolicy};
//!
//! let model = PermissionModel::default();
//!
//! assert!(model.has_permission("MEMBER", "agents:execute"));
//! assert!(!model.has_permission("MEMBER", "agents:delete"));
//! assert!(model.has_permission("OWNER", "quantum:entangle"));
//!
//! assert!(!model.has_any_permission("OWNER", &[]));
//! assert!(model.has_all_permissions("VIEWER", &[]));
//!
//! assert!(model.can_manage_role("ADMIN", "MEMBER"));
//! assert!(!model.can_manage_role("ADMIN", "ADMIN"));
//! ```

use crate::capability::Capability;
use crate::error::AccessDenied;
use crate::grant::RoleGrants;
use crate::policy::PermissionPolicy;
use crate::role::Role;
use crate::table::PermissionTable;
use std::sync::Arc;

/// Role-based authorization over an immutable table.
///
/// Clones share the table. The table is never mutated after construction,
/// so the model is safe to call from any number of threads without locking.
#[derive(Debug, Clone, Default)]
pub struct PermissionModel {
    table: Arc<PermissionTable>,
}

impl PermissionModel {
    /// Creates a model over `table`.
    #[must_use]
    pub fn new(table: PermissionTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Creates a model over the built-in table.
    #[must_use]
    pub fn shipped() -> Self {
        Self::new(PermissionTable::shipped())
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Looks up the grants of a role string.
    fn lookup(&self, role: &str) -> Option<&RoleGrants> {
        match Role::parse(role) {
            Some(r) => Some(self.table.grants(r)),
            None => {
                tracing::warn!(role = role, "unknown role: treated as holding nothing");
                None
            }
        }
    }

    /// The delegation rank of a role string, 0 for unknown.
    fn rank(role: &str) -> u8 {
        let level = Role::level_of(role);
        if level == 0 {
            tracing::warn!(role = role, "unknown role: ranked below every known role");
        }
        level
    }

    /// Typed check: does `role` hold every flag in `caps`?
    ///
    /// An empty `caps` is trivially held.
    #[must_use]
    pub fn allows(&self, role: Role, caps: Capability) -> bool {
        self.table.grants(role).contains(caps)
    }

    /// The capabilities of a role, with the wildcard expanded.
    ///
    /// A wildcard role yields the full catalog, never a literal `admin:*`.
    /// An unknown role yields an empty list. The returned list is owned by
    /// the caller; changing it cannot affect the table.
    #[must_use]
    pub fn role_permissions(&self, role: &str) -> Vec<Capability> {
        self.lookup(role)
            .map(|grants| grants.expand().singles().collect())
            .unwrap_or_default()
    }

    /// [`role_permissions`](Self::role_permissions) as wire tokens.
    #[must_use]
    pub fn role_permission_tokens(&self, role: &str) -> Vec<&'static str> {
        self.lookup(role)
            .map(|grants| grants.expand().tokens())
            .unwrap_or_default()
    }

    /// Returns `true` if `manager` may administer a subject holding `target`.
    ///
    /// Requires the manager's level to be strictly greater than the
    /// target's. Unknown roles are level 0: an unknown manager manages
    /// nothing, and every known manager manages an unknown target.
    #[must_use]
    pub fn can_manage_role(&self, manager: &str, target: &str) -> bool {
        let manager_level = Self::rank(manager);
        let target_level = Self::rank(target);
        let allowed = manager_level > target_level;

        if allowed {
            tracing::debug!(manager, target, "role management allowed");
        } else {
            tracing::debug!(
                manager,
                target,
                manager_level,
                target_level,
                "role management denied: rank not above target"
            );
        }

        allowed
    }

    /// The known roles `manager` may assign, highest first.
    ///
    /// Empty for unknown managers and for the lowest role.
    #[must_use]
    pub fn assignable_roles(&self, manager: &str) -> Vec<Role> {
        let level = Self::rank(manager);
        Role::ALL
            .into_iter()
            .filter(|r| level > r.level())
            .collect()
    }

    /// [`can_manage_role`](Self::can_manage_role) as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::CannotManage`] when the check fails.
    pub fn require_manage(&self, manager: &str, target: &str) -> Result<(), AccessDenied> {
        if self.can_manage_role(manager, target) {
            Ok(())
        } else {
            Err(AccessDenied::CannotManage {
                manager: manager.to_string(),
                target: target.to_string(),
            })
        }
    }
}

impl From<PermissionTable> for PermissionModel {
    fn from(table: PermissionTable) -> Self {
        Self::new(table)
    }
}

impl PermissionPolicy for PermissionModel {
    fn has_permission(&self, role: &str, capability: &str) -> bool {
        let allowed = self
            .lookup(role)
            .is_some_and(|grants| grants.allows_token(capability));

        if allowed {
            tracing::debug!(role, capability, "permission allowed");
        } else {
            tracing::debug!(role, capability, "permission denied");
        }

        allowed
    }
}
