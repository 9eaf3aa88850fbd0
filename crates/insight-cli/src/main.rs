//! Insight CLI - permission model inspector
//!
//! Answers authorization questions against the active role table, the
//! same way route handlers do at runtime.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`INSIGHT_*`)
//! 3. Project config (`.insight/config.toml` under `-C` or the current directory)
//! 4. Global config (`~/.insight/config.toml`)
//! 5. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `INSIGHT_LOG_LEVEL`: Default log filter when `RUST_LOG` is unset
//! - `INSIGHT_LOG_FORMAT`: `text` or `json`
//! - `INSIGHT_TABLE_PATH`: Role table file
//! - `INSIGHT_VERIFY_HIERARCHY`: Reject non-monotonic tables at startup (`true`/`false`)

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::Command;
use config::{ConfigError, ConfigLoader, ConfigResolver, InsightConfig, LogFormat};
use insight_auth::{ErrorCode, PermissionModel};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Insight CLI - permission model inspector
#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Role table file (also: INSIGHT_TABLE_PATH)
    #[arg(long, value_name = "PATH", global = true)]
    table: Option<PathBuf>,

    /// Skip the startup hierarchy check (also: INSIGHT_VERIFY_HIERARCHY=false)
    #[arg(long, global = true)]
    no_verify: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Exit with status 1 when a yes/no query answers no
    #[arg(long, global = true)]
    exit_code: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    table: Option<PathBuf>,
    no_verify: bool,
    skip_global: bool,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to get current directory, using '.'");
                PathBuf::from(".")
            })
        });

        Self {
            project_root,
            table: args.table.clone(),
            no_verify: args.no_verify,
            skip_global: false,
        }
    }

    /// The file/env loader this resolver layers its overrides on.
    fn loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new().with_project_root(&self.project_root);
        if self.skip_global {
            loader.skip_global_config()
        } else {
            loader
        }
    }
}

impl ConfigResolver for CliConfigResolver {
    fn resolve(&self) -> Result<InsightConfig, ConfigError> {
        let mut config = self.loader().load()?;

        // CLI args override (highest priority)
        if let Some(ref p) = self.table {
            config.table.path = Some(p.clone());
        }
        if self.no_verify {
            config.table.verify_hierarchy = false;
        }

        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let resolver = CliConfigResolver::from_args(&args);

    // Resolve config early to access logging settings for tracing initialization.
    let resolved_config = resolver
        .resolve()
        .map_err(|e| anyhow::anyhow!("Config error: {e} [{}]", e.code()))?;

    init_tracing(&args, &resolved_config);

    // Config is read before the subscriber exists; report the layers now.
    info!(
        path = %resolver.project_root.display(),
        "Project root"
    );
    for path in resolver.loader().sources() {
        debug!(path = %path.display(), "Applied config file");
    }

    let mut table_config = resolved_config.table.clone();
    if args.command.loads_unverified() {
        table_config.verify_hierarchy = false;
    }
    let table = config::load_table(&table_config)
        .map_err(|e| anyhow::anyhow!("{e} [{}]", e.code()))?;
    let model = PermissionModel::new(table);

    let outcome = commands::execute(&args.command, &model, &resolved_config, args.json)?;
    if !outcome.output.is_empty() {
        println!("{}", outcome.output);
    }

    if args.exit_code && outcome.answer == Some(false) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Installs the stderr subscriber.
///
/// Filter: --debug > --verbose > RUST_LOG env > `logging.level`.
fn init_tracing(args: &Args, config: &InsightConfig) {
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let layer = match config.logging.format {
        LogFormat::Text => fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PROJECT_CONFIG_DIR;
    use tempfile::TempDir;

    /// Helper: a resolver over an empty temp project, ignoring global config.
    fn resolver_with(table: Option<PathBuf>, no_verify: bool) -> (TempDir, CliConfigResolver) {
        let dir = TempDir::new().expect("should create temp dir for test");
        let resolver = CliConfigResolver {
            project_root: dir.path().to_path_buf(),
            table,
            no_verify,
            skip_global: true,
        };
        (dir, resolver)
    }

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("args should parse")
    }

    #[test]
    fn resolve_defaults_no_overrides() {
        let (_dir, resolver) = resolver_with(None, false);
        let config = resolver.resolve().expect("resolve should succeed");

        assert!(config.table.path.is_none());
        assert!(config.table.verify_hierarchy);
    }

    #[test]
    fn resolve_table_override() {
        let path = PathBuf::from("/custom/roles.toml");
        let (_dir, resolver) = resolver_with(Some(path.clone()), false);
        let config = resolver.resolve().expect("resolve should succeed");

        assert_eq!(config.table.path, Some(path));
    }

    #[test]
    fn resolve_no_verify_override() {
        let (_dir, resolver) = resolver_with(None, true);
        let config = resolver.resolve().expect("resolve should succeed");

        assert!(!config.table.verify_hierarchy);
    }

    /// A CLI flag left at false does not override file config values.
    #[test]
    fn false_flags_preserve_loader_values() {
        let (dir, resolver) = resolver_with(None, false);
        let config_dir = dir.path().join(PROJECT_CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[table]\nverify_hierarchy = false\n",
        )
        .unwrap();

        let config = resolver.resolve().expect("resolve should succeed");
        assert!(!config.table.verify_hierarchy);
    }

    #[test]
    fn loader_honors_skip_global() {
        let (dir, resolver) = resolver_with(None, false);
        let expected = dir.path().join(PROJECT_CONFIG_DIR).join("config.toml");
        assert_eq!(resolver.loader().candidates(), vec![expected]);
    }

    #[test]
    fn from_args_defaults() {
        let args = parse(&["insight", "catalog"]);
        let resolver = CliConfigResolver::from_args(&args);

        assert!(resolver.table.is_none());
        assert!(!resolver.no_verify);
        assert!(!resolver.skip_global);
        // project defaults to cwd
        assert!(resolver.project_root.exists());
    }

    #[test]
    fn from_args_with_all_flags() {
        let args = parse(&[
            "insight",
            "-C",
            "/tmp",
            "--table",
            "/etc/roles.toml",
            "--no-verify",
            "--json",
            "--exit-code",
            "-d",
            "check",
            "ADMIN",
            "agents:delete",
        ]);
        let resolver = CliConfigResolver::from_args(&args);

        assert!(args.debug);
        assert!(args.json);
        assert!(args.exit_code);
        assert!(resolver.no_verify);
        assert_eq!(resolver.project_root, PathBuf::from("/tmp"));
        assert_eq!(resolver.table, Some(PathBuf::from("/etc/roles.toml")));
        assert_eq!(
            args.command,
            Command::Check {
                role: "ADMIN".into(),
                capability: "agents:delete".into(),
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = parse(&["insight", "list", "VIEWER", "--json"]);
        assert!(args.json);
        assert_eq!(
            args.command,
            Command::List {
                role: "VIEWER".into()
            }
        );
    }

    #[test]
    fn any_accepts_empty_list() {
        let args = parse(&["insight", "any", "OWNER"]);
        assert_eq!(
            args.command,
            Command::Any {
                role: "OWNER".into(),
                capabilities: vec![],
            }
        );
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Args::try_parse_from(["insight"]).is_err());
    }
}
