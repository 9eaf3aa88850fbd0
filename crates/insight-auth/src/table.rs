//! Role → capability table.
//!
//! The table is built once at startup and never mutated afterwards. It can
//! come from three places:
//!
//! - [`PermissionTable::shipped`]: the built-in assignment.
//! - [`PermissionTable::builder`]: programmatic construction (tests, DI).
//! - [`PermissionTable::from_spec`]: a [`TableSpec`] deserialized from a
//!   table file.
//!
//! # Hierarchy
//!
//! By convention each role holds everything the role below it holds:
//!
//! ```text
//! OWNER ⊇ ADMIN ⊇ MEMBER ⊇ VIEWER
//! ```
//!
//! Nothing in the decision functions relies on this, but breaking it is a
//! silent privilege bug, so [`PermissionTableBuilder::build`] and
//! [`PermissionTable::verify_hierarchy`] reject tables that violate it.

use crate::capability::{Capability, Resource, WILDCARD};
use crate::error::TableError;
use crate::grant::RoleGrants;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable role → grants mapping.
///
/// Roles without an entry hold nothing.
///
/// # Example
///
/// ```
/// use insight_auth::{Capability, PermissionTable, Role};
///
/// let table = PermissionTable::builder()
///     .grant_all(Role::Owner)
///     .grant(Role::Admin, Capability::AGENTS_READ | Capability::AGENTS_WRITE)
///     .grant(Role::Member, Capability::AGENTS_READ)
///     .build()
///     .expect("monotonic table");
///
/// assert!(table.grants(Role::Owner).is_all());
/// assert_eq!(table.grants(Role::Member).expand(), Capability::AGENTS_READ);
/// assert!(table.grants(Role::Viewer).expand().is_empty());
///
/// // A lower role holding more than the role above it is rejected.
/// let inverted = PermissionTable::builder()
///     .grant(Role::Viewer, Capability::AGENTS_READ)
///     .build();
/// assert!(inverted.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: [RoleGrants; Role::COUNT],
}

impl PermissionTable {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> PermissionTableBuilder {
        PermissionTableBuilder::default()
    }

    /// The built-in table.
    ///
    /// | Role | Holds |
    /// |------|-------|
    /// | OWNER | `admin:*` |
    /// | ADMIN | everything except billing |
    /// | MEMBER | read, write and execute on content; read on team, settings, data sources |
    /// | VIEWER | read on content |
    #[must_use]
    pub fn shipped() -> Self {
        let viewer = Capability::AGENTS_READ
            | Capability::WORKFLOWS_READ
            | Capability::REPORTS_READ
            | Capability::DASHBOARDS_READ
            | Capability::CROSSTABS_READ
            | Capability::AUDIENCES_READ
            | Capability::CHARTS_READ
            | Capability::INSIGHTS_READ;

        let member = viewer
            | Capability::AGENTS_WRITE
            | Capability::AGENTS_EXECUTE
            | Capability::WORKFLOWS_WRITE
            | Capability::WORKFLOWS_EXECUTE
            | Capability::REPORTS_WRITE
            | Capability::DASHBOARDS_WRITE
            | Capability::CROSSTABS_WRITE
            | Capability::AUDIENCES_WRITE
            | Capability::CHARTS_WRITE
            | Capability::MEMORY_READ
            | Capability::MEMORY_WRITE
            | Capability::INSIGHTS_WRITE
            | Capability::DATA_SOURCES_READ
            | Capability::TEAM_READ
            | Capability::SETTINGS_READ;

        let admin = Capability::all().difference(Capability::family(Resource::Billing));

        let mut entries = [RoleGrants::none(); Role::COUNT];
        entries[Role::Owner.index()] = RoleGrants::All;
        entries[Role::Admin.index()] = RoleGrants::Explicit(admin);
        entries[Role::Member.index()] = RoleGrants::Explicit(member);
        entries[Role::Viewer.index()] = RoleGrants::Explicit(viewer);
        Self { entries }
    }

    /// Builds a table from a deserialized spec.
    ///
    /// Role names and tokens are matched exactly. The hierarchy is not
    /// verified here; call [`verify_hierarchy`](Self::verify_hierarchy)
    /// when the caller wants it enforced.
    ///
    /// # Errors
    ///
    /// - [`TableError::UnknownRole`] for a key that is not a role.
    /// - [`TableError::UnknownCapability`] for a token not in the catalog.
    /// - [`TableError::WildcardMixed`] when `admin:*` shares a list with
    ///   other tokens.
    pub fn from_spec(spec: &TableSpec) -> Result<Self, TableError> {
        let mut builder = Self::builder();

        for (name, tokens) in &spec.roles {
            let role = Role::parse(name).ok_or_else(|| TableError::UnknownRole(name.clone()))?;

            if tokens.iter().any(|t| t == WILDCARD) {
                if tokens.iter().any(|t| t != WILDCARD) {
                    return Err(TableError::WildcardMixed { role });
                }
                builder = builder.grant_all(role);
                continue;
            }

            let (caps, unknown) = Capability::parse_list(tokens.as_slice());
            if let Some(token) = unknown.first() {
                return Err(TableError::UnknownCapability {
                    role,
                    token: (*token).to_string(),
                });
            }
            builder = builder.grant(role, caps);
        }

        Ok(builder.build_unverified())
    }

    /// Converts back into the table file shape.
    ///
    /// Every role gets an entry, including empty ones.
    #[must_use]
    pub fn to_spec(&self) -> TableSpec {
        let roles = Role::ALL
            .iter()
            .map(|role| {
                let tokens = self
                    .grants(*role)
                    .table_tokens()
                    .into_iter()
                    .map(String::from)
                    .collect();
                (role.as_str().to_string(), tokens)
            })
            .collect();
        TableSpec { roles }
    }

    /// The grants of a role.
    #[must_use]
    pub fn grants(&self, role: Role) -> &RoleGrants {
        &self.entries[role.index()]
    }

    /// Checks that each role contains every capability of the role below it.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotMonotonic`] for the highest adjacent pair
    /// that violates containment.
    pub fn verify_hierarchy(&self) -> Result<(), TableError> {
        for pair in Role::ALL.windows(2) {
            let (higher, lower) = (pair[0], pair[1]);
            let missing = self.grants(lower).excess_over(self.grants(higher));
            if !missing.is_empty() {
                return Err(TableError::NotMonotonic {
                    higher,
                    lower,
                    missing,
                });
            }
        }
        Ok(())
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::shipped()
    }
}

/// Builder for [`PermissionTable`].
///
/// Later calls for the same role replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct PermissionTableBuilder {
    entries: [RoleGrants; Role::COUNT],
}

impl PermissionTableBuilder {
    /// Gives `role` the wildcard.
    #[must_use]
    pub fn grant_all(mut self, role: Role) -> Self {
        self.entries[role.index()] = RoleGrants::All;
        self
    }

    /// Gives `role` exactly `caps`.
    #[must_use]
    pub fn grant(mut self, role: Role, caps: Capability) -> Self {
        self.entries[role.index()] = RoleGrants::Explicit(caps);
        self
    }

    /// Builds and verifies the hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotMonotonic`] if a lower role holds anything
    /// a higher role does not.
    pub fn build(self) -> Result<PermissionTable, TableError> {
        let table = self.build_unverified();
        table.verify_hierarchy()?;
        Ok(table)
    }

    /// Builds without verifying the hierarchy.
    #[must_use]
    pub fn build_unverified(self) -> PermissionTable {
        PermissionTable {
            entries: self.entries,
        }
    }
}

/// Serializable table shape: role identifier → token list.
///
/// ```toml
/// [roles]
/// OWNER = ["admin:*"]
/// ADMIN = ["agents:read", "agents:write"]
/// VIEWER = ["agents:read"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Role identifier → capability tokens.
    #[serde(default)]
    pub roles: BTreeMap<String, Vec<String>>,
}
