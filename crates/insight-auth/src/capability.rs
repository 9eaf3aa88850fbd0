//! Capability catalog.
//!
//! A capability names one action on one resource family and travels on the
//! wire as a `"<resource>:<action>"` token (e.g. `"agents:write"`).
//!
//! Capabilities are bitflags: a single flag is one capability, a union of
//! flags is a capability set. The catalog below is the only source of
//! token strings, so a typo in a token is a `None` from [`Capability::parse`]
//! rather than a silently unmatched string.
//!
//! # Example
//!
//! ```
//! use insight_auth::{Action, Capability, Resource};
//!
//! let cap = Capability::parse("agents:write").expect("catalog token");
//! assert_eq!(cap, Capability::AGENTS_WRITE);
//! assert_eq!(cap.resource(), Some(Resource::Agents));
//! assert_eq!(cap.action(), Some(Action::Write));
//! assert_eq!(Capability::of(Resource::Agents, Action::Write), Some(cap));
//!
//! // The wildcard is a table sentinel, not a capability.
//! assert_eq!(Capability::parse("admin:*"), None);
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token of the wildcard grant: every capability, present and future.
pub const WILDCARD: &str = "admin:*";

bitflags! {
    /// Closed set of capabilities known to the platform.
    ///
    /// Bit positions follow catalog order. New capabilities are appended;
    /// existing bits and tokens never change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capability: u64 {
        const AGENTS_READ          = 1 << 0;
        const AGENTS_WRITE         = 1 << 1;
        const AGENTS_DELETE        = 1 << 2;
        const AGENTS_EXECUTE       = 1 << 3;

        const WORKFLOWS_READ       = 1 << 4;
        const WORKFLOWS_WRITE      = 1 << 5;
        const WORKFLOWS_DELETE     = 1 << 6;
        const WORKFLOWS_EXECUTE    = 1 << 7;

        const REPORTS_READ         = 1 << 8;
        const REPORTS_WRITE        = 1 << 9;
        const REPORTS_DELETE       = 1 << 10;
        const REPORTS_PUBLISH      = 1 << 11;

        const DASHBOARDS_READ      = 1 << 12;
        const DASHBOARDS_WRITE     = 1 << 13;
        const DASHBOARDS_DELETE    = 1 << 14;
        const DASHBOARDS_SHARE     = 1 << 15;

        const CROSSTABS_READ       = 1 << 16;
        const CROSSTABS_WRITE      = 1 << 17;
        const CROSSTABS_DELETE     = 1 << 18;

        const AUDIENCES_READ       = 1 << 19;
        const AUDIENCES_WRITE      = 1 << 20;
        const AUDIENCES_DELETE     = 1 << 21;

        const CHARTS_READ          = 1 << 22;
        const CHARTS_WRITE         = 1 << 23;
        const CHARTS_DELETE        = 1 << 24;

        const MEMORY_READ          = 1 << 25;
        const MEMORY_WRITE         = 1 << 26;
        const MEMORY_DELETE        = 1 << 27;

        const INSIGHTS_READ        = 1 << 28;
        const INSIGHTS_WRITE       = 1 << 29;

        const DATA_SOURCES_READ    = 1 << 30;
        const DATA_SOURCES_WRITE   = 1 << 31;
        const DATA_SOURCES_DELETE  = 1 << 32;

        const TEAM_READ            = 1 << 33;
        const TEAM_INVITE          = 1 << 34;
        const TEAM_MANAGE          = 1 << 35;

        const BILLING_READ         = 1 << 36;
        const BILLING_MANAGE       = 1 << 37;

        const SETTINGS_READ        = 1 << 38;
        const SETTINGS_MANAGE      = 1 << 39;

        const AUDIT_READ           = 1 << 40;
    }
}

/// Resource family a capability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Agents,
    Workflows,
    Reports,
    Dashboards,
    Crosstabs,
    Audiences,
    Charts,
    Memory,
    Insights,
    DataSources,
    Team,
    Billing,
    Settings,
    Audit,
}

impl Resource {
    /// Every resource family, in catalog order.
    pub const ALL: [Resource; 14] = [
        Self::Agents,
        Self::Workflows,
        Self::Reports,
        Self::Dashboards,
        Self::Crosstabs,
        Self::Audiences,
        Self::Charts,
        Self::Memory,
        Self::Insights,
        Self::DataSources,
        Self::Team,
        Self::Billing,
        Self::Settings,
        Self::Audit,
    ];

    /// The token prefix of this family.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Workflows => "workflows",
            Self::Reports => "reports",
            Self::Dashboards => "dashboards",
            Self::Crosstabs => "crosstabs",
            Self::Audiences => "audiences",
            Self::Charts => "charts",
            Self::Memory => "memory",
            Self::Insights => "insights",
            Self::DataSources => "data_sources",
            Self::Team => "team",
            Self::Billing => "billing",
            Self::Settings => "settings",
            Self::Audit => "audit",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Write,
    Delete,
    Execute,
    Publish,
    Share,
    Invite,
    Manage,
}

impl Action {
    /// The token suffix of this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Execute => "execute",
            Self::Publish => "publish",
            Self::Share => "share",
            Self::Invite => "invite",
            Self::Manage => "manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the capability catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The single-flag capability.
    pub capability: Capability,
    /// Resource family.
    pub resource: Resource,
    /// Action on the resource.
    pub action: Action,
    /// Wire token, `"<resource>:<action>"`.
    pub token: &'static str,
    /// Human-readable description, for display only.
    pub description: &'static str,
}

const fn entry(
    capability: Capability,
    resource: Resource,
    action: Action,
    token: &'static str,
    description: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        capability,
        resource,
        action,
        token,
        description,
    }
}

use Action as A;
use Capability as C;
use Resource as R;

#[rustfmt::skip]
static CATALOG: [CatalogEntry; 41] = [
    entry(C::AGENTS_READ, R::Agents, A::Read, "agents:read", "View agents and their configuration"),
    entry(C::AGENTS_WRITE, R::Agents, A::Write, "agents:write", "Create and edit agents"),
    entry(C::AGENTS_DELETE, R::Agents, A::Delete, "agents:delete", "Delete agents"),
    entry(C::AGENTS_EXECUTE, R::Agents, A::Execute, "agents:execute", "Run agents"),
    entry(C::WORKFLOWS_READ, R::Workflows, A::Read, "workflows:read", "View workflows"),
    entry(C::WORKFLOWS_WRITE, R::Workflows, A::Write, "workflows:write", "Create and edit workflows"),
    entry(C::WORKFLOWS_DELETE, R::Workflows, A::Delete, "workflows:delete", "Delete workflows"),
    entry(C::WORKFLOWS_EXECUTE, R::Workflows, A::Execute, "workflows:execute", "Run workflows"),
    entry(C::REPORTS_READ, R::Reports, A::Read, "reports:read", "View reports"),
    entry(C::REPORTS_WRITE, R::Reports, A::Write, "reports:write", "Create and edit reports"),
    entry(C::REPORTS_DELETE, R::Reports, A::Delete, "reports:delete", "Delete reports"),
    entry(C::REPORTS_PUBLISH, R::Reports, A::Publish, "reports:publish", "Publish reports to the organization"),
    entry(C::DASHBOARDS_READ, R::Dashboards, A::Read, "dashboards:read", "View dashboards"),
    entry(C::DASHBOARDS_WRITE, R::Dashboards, A::Write, "dashboards:write", "Create and edit dashboards"),
    entry(C::DASHBOARDS_DELETE, R::Dashboards, A::Delete, "dashboards:delete", "Delete dashboards"),
    entry(C::DASHBOARDS_SHARE, R::Dashboards, A::Share, "dashboards:share", "Share dashboards outside the team"),
    entry(C::CROSSTABS_READ, R::Crosstabs, A::Read, "crosstabs:read", "View crosstabs"),
    entry(C::CROSSTABS_WRITE, R::Crosstabs, A::Write, "crosstabs:write", "Create and edit crosstabs"),
    entry(C::CROSSTABS_DELETE, R::Crosstabs, A::Delete, "crosstabs:delete", "Delete crosstabs"),
    entry(C::AUDIENCES_READ, R::Audiences, A::Read, "audiences:read", "View audiences"),
    entry(C::AUDIENCES_WRITE, R::Audiences, A::Write, "audiences:write", "Create and edit audiences"),
    entry(C::AUDIENCES_DELETE, R::Audiences, A::Delete, "audiences:delete", "Delete audiences"),
    entry(C::CHARTS_READ, R::Charts, A::Read, "charts:read", "View charts"),
    entry(C::CHARTS_WRITE, R::Charts, A::Write, "charts:write", "Create and edit charts"),
    entry(C::CHARTS_DELETE, R::Charts, A::Delete, "charts:delete", "Delete charts"),
    entry(C::MEMORY_READ, R::Memory, A::Read, "memory:read", "View agent memory"),
    entry(C::MEMORY_WRITE, R::Memory, A::Write, "memory:write", "Add to agent memory"),
    entry(C::MEMORY_DELETE, R::Memory, A::Delete, "memory:delete", "Remove agent memory"),
    entry(C::INSIGHTS_READ, R::Insights, A::Read, "insights:read", "View insights"),
    entry(C::INSIGHTS_WRITE, R::Insights, A::Write, "insights:write", "Create and edit insights"),
    entry(C::DATA_SOURCES_READ, R::DataSources, A::Read, "data_sources:read", "View data sources"),
    entry(C::DATA_SOURCES_WRITE, R::DataSources, A::Write, "data_sources:write", "Connect and configure data sources"),
    entry(C::DATA_SOURCES_DELETE, R::DataSources, A::Delete, "data_sources:delete", "Disconnect data sources"),
    entry(C::TEAM_READ, R::Team, A::Read, "team:read", "View team members"),
    entry(C::TEAM_INVITE, R::Team, A::Invite, "team:invite", "Invite team members"),
    entry(C::TEAM_MANAGE, R::Team, A::Manage, "team:manage", "Change member roles and remove members"),
    entry(C::BILLING_READ, R::Billing, A::Read, "billing:read", "View billing and invoices"),
    entry(C::BILLING_MANAGE, R::Billing, A::Manage, "billing:manage", "Change plan and payment details"),
    entry(C::SETTINGS_READ, R::Settings, A::Read, "settings:read", "View organization settings"),
    entry(C::SETTINGS_MANAGE, R::Settings, A::Manage, "settings:manage", "Change organization settings"),
    entry(C::AUDIT_READ, R::Audit, A::Read, "audit:read", "View the audit log"),
];

impl Capability {
    /// The full catalog, in bit order.
    #[must_use]
    pub fn catalog() -> &'static [CatalogEntry] {
        &CATALOG
    }

    /// Looks up the catalog row of a single-flag capability.
    ///
    /// Returns `None` for the empty set and for unions of several flags.
    #[must_use]
    pub fn entry(self) -> Option<&'static CatalogEntry> {
        CATALOG.iter().find(|e| e.capability == self)
    }

    /// Parses a wire token. Exact match only; unknown tokens yield `None`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.capability)
    }

    /// Parses a list of tokens into a combined set.
    ///
    /// Returns the combined capabilities and the tokens that matched
    /// nothing. Callers decide whether unknown tokens are an error.
    ///
    /// ```
    /// use insight_auth::Capability;
    ///
    /// let (caps, unknown) = Capability::parse_list(&["agents:read", "agents:fly"]);
    /// assert_eq!(caps, Capability::AGENTS_READ);
    /// assert_eq!(unknown, vec!["agents:fly"]);
    /// ```
    #[must_use]
    pub fn parse_list<'a, S: AsRef<str>>(tokens: &'a [S]) -> (Self, Vec<&'a str>) {
        let mut caps = Self::empty();
        let mut unknown = Vec::new();
        for token in tokens {
            match Self::parse(token.as_ref()) {
                Some(c) => caps |= c,
                None => unknown.push(token.as_ref()),
            }
        }
        (caps, unknown)
    }

    /// Typed lookup of a resource/action pair.
    ///
    /// Pairs that are not in the catalog (e.g. `audit:write`) yield `None`.
    #[must_use]
    pub fn of(resource: Resource, action: Action) -> Option<Self> {
        CATALOG
            .iter()
            .find(|e| e.resource == resource && e.action == action)
            .map(|e| e.capability)
    }

    /// Every capability of one resource family.
    #[must_use]
    pub fn family(resource: Resource) -> Self {
        CATALOG
            .iter()
            .filter(|e| e.resource == resource)
            .fold(Self::empty(), |acc, e| acc | e.capability)
    }

    /// Wire token of a single flag.
    #[must_use]
    pub fn as_token(self) -> Option<&'static str> {
        self.entry().map(|e| e.token)
    }

    /// Resource family of a single flag.
    #[must_use]
    pub fn resource(self) -> Option<Resource> {
        self.entry().map(|e| e.resource)
    }

    /// Action of a single flag.
    #[must_use]
    pub fn action(self) -> Option<Action> {
        self.entry().map(|e| e.action)
    }

    /// Description of a single flag.
    #[must_use]
    pub fn description(self) -> Option<&'static str> {
        self.entry().map(|e| e.description)
    }

    /// The single flags contained in this set, in catalog order.
    pub fn singles(self) -> impl Iterator<Item = Capability> {
        CATALOG
            .iter()
            .filter(move |e| self.contains(e.capability))
            .map(|e| e.capability)
    }

    /// Tokens of every flag in this set, in catalog order.
    #[must_use]
    pub fn tokens(self) -> Vec<&'static str> {
        CATALOG
            .iter()
            .filter(|e| self.contains(e.capability))
            .map(|e| e.token)
            .collect()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = self.tokens();
        if tokens.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", tokens.join(", "))
        }
    }
}
