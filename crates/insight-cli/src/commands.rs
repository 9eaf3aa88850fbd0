//! Subcommands and their output.
//!
//! Every command renders either plain text (one answer or one item per
//! line) or a single-line JSON document with `--json`. Boolean queries
//! print `true` or `false` and report the answer so the caller can map it
//! to an exit code.

use crate::config::InsightConfig;
use anyhow::Result;
use clap::Subcommand;
use insight_auth::{Capability, ErrorCode, PermissionModel, PermissionPolicy};
use serde_json::json;

/// Permission queries against the active table.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Does ROLE hold CAPABILITY?
    Check { role: String, capability: String },

    /// Does ROLE hold at least one CAPABILITY? (false for none)
    Any {
        role: String,
        capabilities: Vec<String>,
    },

    /// Does ROLE hold every CAPABILITY? (true for none)
    All {
        role: String,
        capabilities: Vec<String>,
    },

    /// List the capabilities ROLE holds
    List { role: String },

    /// May MANAGER administer a user holding TARGET?
    CanManage { manager: String, target: String },

    /// List the roles MANAGER may assign
    Assignable { manager: String },

    /// Print the capability catalog
    Catalog,

    /// Print the active role table
    Table,

    /// Check that every role holds everything the role below it holds
    Verify,

    /// Print the resolved configuration
    Config,
}

impl Command {
    /// Whether the startup hierarchy check must be skipped.
    ///
    /// `verify` reports violations itself instead of failing at load.
    #[must_use]
    pub fn loads_unverified(&self) -> bool {
        matches!(self, Self::Verify)
    }
}

/// The rendered result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout, without a trailing newline.
    pub output: String,
    /// The answer of a boolean query.
    pub answer: Option<bool>,
}

impl Outcome {
    fn listing(output: String) -> Self {
        Self {
            output,
            answer: None,
        }
    }

    fn answer(output: String, answer: bool) -> Self {
        Self {
            output,
            answer: Some(answer),
        }
    }
}

/// Runs `command` over `model`.
///
/// # Errors
///
/// Returns an error if `verify` finds a violation or if output cannot be
/// serialized.
pub fn execute(
    command: &Command,
    model: &PermissionModel,
    config: &InsightConfig,
    json: bool,
) -> Result<Outcome> {
    let outcome = match command {
        Command::Check { role, capability } => {
            let allowed = model.has_permission(role, capability);
            let output = if json {
                json!({ "role": role, "capability": capability, "allowed": allowed }).to_string()
            } else {
                allowed.to_string()
            };
            Outcome::answer(output, allowed)
        }
        Command::Any { role, capabilities } => {
            let caps = as_strs(capabilities);
            let allowed = model.has_any_permission(role, &caps);
            Outcome::answer(list_answer(role, &caps, allowed, json), allowed)
        }
        Command::All { role, capabilities } => {
            let caps = as_strs(capabilities);
            let allowed = model.has_all_permissions(role, &caps);
            Outcome::answer(list_answer(role, &caps, allowed, json), allowed)
        }
        Command::List { role } => {
            let tokens = model.role_permission_tokens(role);
            let output = if json {
                json!({ "role": role, "permissions": tokens }).to_string()
            } else {
                tokens.join("\n")
            };
            Outcome::listing(output)
        }
        Command::CanManage { manager, target } => {
            let allowed = model.can_manage_role(manager, target);
            let output = if json {
                json!({ "manager": manager, "target": target, "allowed": allowed }).to_string()
            } else {
                allowed.to_string()
            };
            Outcome::answer(output, allowed)
        }
        Command::Assignable { manager } => {
            let roles: Vec<&str> = model
                .assignable_roles(manager)
                .into_iter()
                .map(|r| r.as_str())
                .collect();
            let output = if json {
                json!({ "manager": manager, "roles": roles }).to_string()
            } else {
                roles.join("\n")
            };
            Outcome::listing(output)
        }
        Command::Catalog => Outcome::listing(render_catalog(json)),
        Command::Table => {
            let spec = model.table().to_spec();
            let output = if json {
                serde_json::to_string(&spec)?
            } else {
                toml::to_string(&spec)?.trim_end().to_string()
            };
            Outcome::listing(output)
        }
        Command::Verify => {
            if let Err(e) = model.table().verify_hierarchy() {
                anyhow::bail!("{e} [{}]", e.code());
            }
            let output = if json {
                json!({ "monotonic": true }).to_string()
            } else {
                "ok: role hierarchy is monotonic".to_string()
            };
            Outcome::listing(output)
        }
        Command::Config => {
            let output = if json {
                serde_json::to_string(config)?
            } else {
                config.to_toml()?.trim_end().to_string()
            };
            Outcome::listing(output)
        }
    };

    Ok(outcome)
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

fn list_answer(role: &str, caps: &[&str], allowed: bool, json: bool) -> String {
    if json {
        json!({ "role": role, "capabilities": caps, "allowed": allowed }).to_string()
    } else {
        allowed.to_string()
    }
}

fn render_catalog(json: bool) -> String {
    let entries = Capability::catalog();
    if json {
        let rows: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "token": e.token,
                    "resource": e.resource,
                    "action": e.action,
                    "description": e.description,
                })
            })
            .collect();
        return serde_json::Value::Array(rows).to_string();
    }

    let width = entries.iter().map(|e| e.token.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("{:<width$}  {}", e.token, e.description))
        .collect::<Vec<_>>()
        .join("\n")
}
