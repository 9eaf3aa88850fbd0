//! Role grants.
//!
//! A role's table entry is either the wildcard or an explicit capability
//! set. Modelling the wildcard as its own variant keeps `"admin:*"` out of
//! capability sets entirely: membership and expansion are both one `match`.
//!
//! | Variant | Membership | Expansion |
//! |---------|------------|-----------|
//! | [`RoleGrants::All`] | every token, including ones not yet in the catalog | the full catalog |
//! | [`RoleGrants::Explicit`] | exact catalog members of the set | the set itself |

use crate::capability::{Capability, WILDCARD};

/// What a role holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleGrants {
    /// The `admin:*` wildcard: every capability, present and future.
    All,
    /// A finite set of catalog capabilities.
    Explicit(Capability),
}

impl RoleGrants {
    /// Grants nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::Explicit(Capability::empty())
    }

    /// Returns `true` for the wildcard.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns `true` if every flag in `caps` is held.
    ///
    /// The empty set is trivially held.
    #[must_use]
    pub fn contains(&self, caps: Capability) -> bool {
        match self {
            Self::All => true,
            Self::Explicit(set) => set.contains(caps),
        }
    }

    /// Returns `true` if the wire token is held.
    ///
    /// The wildcard holds any token at all. An explicit set holds only
    /// catalog tokens it contains; unknown tokens are never held.
    #[must_use]
    pub fn allows_token(&self, token: &str) -> bool {
        match self {
            Self::All => true,
            Self::Explicit(set) => Capability::parse(token).is_some_and(|c| set.contains(c)),
        }
    }

    /// The effective capability set, with the wildcard expanded.
    #[must_use]
    pub fn expand(&self) -> Capability {
        match self {
            Self::All => Capability::all(),
            Self::Explicit(set) => *set,
        }
    }

    /// Tokens as they would be written in a table file.
    ///
    /// The wildcard stays unexpanded here, unlike [`expand`](Self::expand).
    #[must_use]
    pub fn table_tokens(&self) -> Vec<&'static str> {
        match self {
            Self::All => vec![WILDCARD],
            Self::Explicit(set) => set.tokens(),
        }
    }

    /// What `self` holds that `higher` does not, as tokens.
    ///
    /// An empty result means `higher` contains `self`.
    #[must_use]
    pub fn excess_over(&self, higher: &Self) -> Vec<&'static str> {
        match (higher, self) {
            (Self::All, _) => Vec::new(),
            (Self::Explicit(_), Self::All) => vec![WILDCARD],
            (Self::Explicit(h), Self::Explicit(l)) => l.difference(*h).tokens(),
        }
    }
}

impl Default for RoleGrants {
    fn default() -> Self {
        Self::none()
    }
}
