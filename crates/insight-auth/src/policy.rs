//! Permission policy trait.
//!
//! [`PermissionPolicy`] is the seam route handlers and UI conditionals
//! depend on. Implementors answer one question (does this role hold this
//! capability token?) and inherit the list forms and the `Result` form.
//!
//! # Empty requirement lists
//!
//! | Operation | Empty list |
//! |-----------|------------|
//! | [`has_any_permission`](PermissionPolicy::has_any_permission) | `false` |
//! | [`has_all_permissions`](PermissionPolicy::has_all_permissions) | `true` |
//!
//! An empty "any" requirement grants nothing; an empty "all" requirement is
//! trivially met. Overriding implementations must keep this asymmetry.

use crate::error::AccessDenied;
use crate::Role;

/// Authorization decisions for a role against capability tokens.
///
/// Every method is total: unknown roles and unknown tokens are denials,
/// never errors or panics.
///
/// # Example
///
/// ```
/// use insight_auth::{PermissionModel, PermissionPolicy};
///
/// fn can_delete(policy: &dyn PermissionPolicy, role: &str) -> bool {
///     policy.has_permission(role, "agents:delete")
/// }
///
/// let model = PermissionModel::default();
/// assert!(can_delete(&model, "ADMIN"));
/// assert!(!can_delete(&model, "MEMBER"));
/// ```
pub trait PermissionPolicy: Send + Sync {
    /// Returns `true` if `role` holds `capability`.
    fn has_permission(&self, role: &str, capability: &str) -> bool;

    /// Returns `true` if `role` holds at least one of `capabilities`.
    ///
    /// An empty list yields `false`.
    fn has_any_permission(&self, role: &str, capabilities: &[&str]) -> bool {
        capabilities.iter().any(|c| self.has_permission(role, c))
    }

    /// Returns `true` if `role` holds every one of `capabilities`.
    ///
    /// An empty list yields `true`.
    fn has_all_permissions(&self, role: &str, capabilities: &[&str]) -> bool {
        capabilities.iter().all(|c| self.has_permission(role, c))
    }

    /// Like [`has_permission`](Self::has_permission), as a `Result`.
    ///
    /// # Errors
    ///
    /// - [`AccessDenied::UnknownRole`] if `role` names no role.
    /// - [`AccessDenied::MissingCapability`] if the role lacks the token.
    fn check(&self, role: &str, capability: &str) -> Result<(), AccessDenied> {
        if self.has_permission(role, capability) {
            return Ok(());
        }
        if Role::parse(role).is_none() {
            return Err(AccessDenied::UnknownRole {
                role: role.to_string(),
            });
        }
        Err(AccessDenied::MissingCapability {
            role: role.to_string(),
            capability: capability.to_string(),
        })
    }
}
