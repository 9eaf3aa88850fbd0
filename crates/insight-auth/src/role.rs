//! Role hierarchy.
//!
//! Roles form a strict total order:
//!
//! ```text
//! OWNER (4) > ADMIN (3) > MEMBER (2) > VIEWER (1) > unknown (0)
//! ```
//!
//! The numeric level drives delegation: a manager may administer a subject
//! only when the manager's level is strictly greater. Role strings that do
//! not name a role sit at level 0, so they can manage nothing and can be
//! managed by every known role.
//!
//! # Example
//!
//! ```
//! use insight_auth::Role;
//!
//! assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
//! assert_eq!(Role::parse("admin"), None);
//!
//! assert!(Role::Owner.can_manage(Role::Admin));
//! assert!(!Role::Owner.can_manage(Role::Owner));
//! assert_eq!(Role::level_of("nobody"), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named authority level.
///
/// Variant order is lowest to highest so the derived `Ord` matches the
/// hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Viewer,
    Member,
    Admin,
    Owner,
}

impl Role {
    /// Every role, highest authority first.
    pub const ALL: [Role; 4] = [Self::Owner, Self::Admin, Self::Member, Self::Viewer];

    /// Number of roles.
    pub const COUNT: usize = 4;

    /// Parses a role identifier.
    ///
    /// Matching is exact and case-sensitive. Anything else is unknown,
    /// and unknown roles hold nothing.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "OWNER" => Some(Self::Owner),
            "ADMIN" => Some(Self::Admin),
            "MEMBER" => Some(Self::Member),
            "VIEWER" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// The wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
            Self::Viewer => "VIEWER",
        }
    }

    /// Hierarchy level used for delegation checks.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Owner => 4,
            Self::Admin => 3,
            Self::Member => 2,
            Self::Viewer => 1,
        }
    }

    /// Hierarchy level of a role string; 0 for unknown roles.
    #[must_use]
    pub fn level_of(name: &str) -> u8 {
        Self::parse(name).map_or(0, Self::level)
    }

    /// Returns `true` if a holder of `self` may administer a holder of `target`.
    ///
    /// Strictly greater: no role manages its own rank.
    #[must_use]
    pub fn can_manage(self, target: Self) -> bool {
        self.level() > target.level()
    }

    /// Dense index for table storage.
    pub(crate) const fn index(self) -> usize {
        self.level() as usize - 1
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
