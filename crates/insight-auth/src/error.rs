//! Error types.
//!
//! The boolean decision operations never fail: unknown input degrades to
//! "denied". Errors exist only where a caller asks for one:
//!
//! - [`AccessDenied`]: from the `require*`/`check` helpers that route
//!   handlers use to turn a denial into a response.
//! - [`TableError`]: from building a permission table at startup.
//!
//! Both implement [`ErrorCode`] for machine-readable handling.

use crate::Role;
use thiserror::Error;

/// Machine-readable error interface.
///
/// Codes are UPPER_SNAKE_CASE, domain-prefixed, and stable once published.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying or user action can resolve the error.
    fn is_recoverable(&self) -> bool;
}

/// An authorization check denied the request.
///
/// # Example
///
/// ```
/// use insight_auth::{AccessDenied, ErrorCode};
///
/// let err = AccessDenied::MissingCapability {
///     role: "VIEWER".to_string(),
///     capability: "agents:write".to_string(),
/// };
/// assert_eq!(err.code(), "AUTH_MISSING_CAPABILITY");
/// assert!(err.to_string().contains("agents:write"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The role is known but does not hold the capability.
    #[error("access denied: role '{role}' lacks '{capability}'")]
    MissingCapability {
        /// Role of the caller.
        role: String,
        /// Capability that was required.
        capability: String,
    },

    /// The role string does not name a role.
    #[error("access denied: unknown role '{role}'")]
    UnknownRole {
        /// The unrecognized role string.
        role: String,
    },

    /// The manager's rank is not strictly above the target's.
    #[error("access denied: role '{manager}' cannot manage role '{target}'")]
    CannotManage {
        /// Role of the acting manager.
        manager: String,
        /// Role being assigned or revoked.
        target: String,
    },
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingCapability { .. } => "AUTH_MISSING_CAPABILITY",
            Self::UnknownRole { .. } => "AUTH_UNKNOWN_ROLE",
            Self::CannotManage { .. } => "AUTH_CANNOT_MANAGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// A permission table could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A table spec names a role that does not exist.
    #[error("unknown role '{0}' in permission table")]
    UnknownRole(String),

    /// A table spec lists a token that is not in the catalog.
    #[error("role {role} lists unknown capability '{token}'")]
    UnknownCapability {
        /// Role whose list contains the token.
        role: Role,
        /// The unrecognized token.
        token: String,
    },

    /// The wildcard must be a role's only entry.
    #[error("role {role} mixes 'admin:*' with explicit capabilities")]
    WildcardMixed {
        /// Role whose list mixes the two.
        role: Role,
    },

    /// A lower role holds something a higher role does not.
    #[error(
        "role {higher} does not contain every capability of {lower}: missing {}",
        .missing.join(", ")
    )]
    NotMonotonic {
        /// The higher-ranked role.
        higher: Role,
        /// The lower-ranked role.
        lower: Role,
        /// Tokens held by `lower` but not by `higher`.
        missing: Vec<&'static str>,
    },
}

impl ErrorCode for TableError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "TABLE_UNKNOWN_ROLE",
            Self::UnknownCapability { .. } => "TABLE_UNKNOWN_CAPABILITY",
            Self::WildcardMixed { .. } => "TABLE_WILDCARD_MIXED",
            Self::NotMonotonic { .. } => "TABLE_NOT_MONOTONIC",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_code_format(code: &str, prefix: &str) {
        assert!(code.starts_with(prefix), "{code} lacks {prefix}");
        assert!(
            code.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
            "{code} is not UPPER_SNAKE_CASE"
        );
    }

    #[test]
    fn access_denied_codes() {
        let errs = [
            AccessDenied::MissingCapability {
                role: "VIEWER".into(),
                capability: "agents:write".into(),
            },
            AccessDenied::UnknownRole { role: "X".into() },
            AccessDenied::CannotManage {
                manager: "ADMIN".into(),
                target: "OWNER".into(),
            },
        ];
        for err in &errs {
            assert_code_format(err.code(), "AUTH_");
            assert!(!err.is_recoverable());
        }
    }

    #[test]
    fn table_error_codes() {
        let errs = [
            TableError::UnknownRole("GUEST".into()),
            TableError::UnknownCapability {
                role: Role::Admin,
                token: "agents:fly".into(),
            },
            TableError::WildcardMixed { role: Role::Owner },
            TableError::NotMonotonic {
                higher: Role::Admin,
                lower: Role::Member,
                missing: vec!["team:manage"],
            },
        ];
        for err in &errs {
            assert_code_format(err.code(), "TABLE_");
            assert!(!err.is_recoverable());
        }
    }

    #[test]
    fn not_monotonic_display_lists_missing() {
        let err = TableError::NotMonotonic {
            higher: Role::Admin,
            lower: Role::Member,
            missing: vec!["team:manage", "audit:read"],
        };
        let msg = err.to_string();
        assert!(msg.contains("ADMIN"), "got: {msg}");
        assert!(msg.contains("MEMBER"), "got: {msg}");
        assert!(msg.contains("team:manage, audit:read"), "got: {msg}");
    }

    #[test]
    fn cannot_manage_display() {
        let err = AccessDenied::CannotManage {
            manager: "MEMBER".into(),
            target: "ADMIN".into(),
        };
        assert_eq!(
            err.to_string(),
            "access denied: role 'MEMBER' cannot manage role 'ADMIN'"
        );
    }
}
