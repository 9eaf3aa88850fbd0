//! Role-based access control for the Insight platform.
//!
//! This crate is the single authorization decision point for the admin
//! back-office, the operations portal, and the end-user dashboard. Route
//! handlers and UI code call into it; it calls into nothing.
//!
//! # Model
//!
//! ```text
//! Role (OWNER > ADMIN > MEMBER > VIEWER)
//!   │
//!   ▼
//! PermissionTable ── Role → RoleGrants { All | Explicit(Capability) }
//!   │
//!   ▼
//! PermissionModel ── has_permission / has_any / has_all
//!                    role_permissions / can_manage_role
//! ```
//!
//! | Type | Controls |
//! |------|----------|
//! | [`Capability`] | Closed catalog of `"<resource>:<action>"` tokens |
//! | [`Role`] | Authority level and delegation rank |
//! | [`PermissionTable`] | Which role holds which capabilities |
//! | [`PermissionModel`] | Decisions over a table |
//! | [`PermissionPolicy`] | Trait seam callers depend on |
//!
//! # Design Principles
//!
//! - **Fail closed**: unknown roles and tokens are denials, never errors
//! - **Immutable table**: built once, shared by `Arc`, read without locks
//! - **Wildcard as a variant**: `admin:*` is [`RoleGrants::All`], never a
//!   member of a capability set
//!
//! # Example
//!
//! ```
//! use insight_auth::{PermissionModel, PermissionPolicy};
//!
//! let model = PermissionModel::default();
//!
//! if !model.has_permission("VIEWER", "reports:delete") {
//!     // route handler responds with "forbidden"
//! }
//! assert!(model.check("ADMIN", "reports:delete").is_ok());
//! ```

pub mod capability;
pub mod error;
pub mod grant;
pub mod model;
pub mod policy;
pub mod role;
pub mod table;

pub use capability::{Action, Capability, CatalogEntry, Resource, WILDCARD};
pub use error::{AccessDenied, ErrorCode, TableError};
pub use grant::RoleGrants;
pub use model::PermissionModel;
pub use policy::PermissionPolicy;
pub use role::Role;
pub use table::{PermissionTable, PermissionTableBuilder, TableSpec};
