//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.insight/config.toml`)
//! 3. Project config (`.insight/config.toml`)
//! 4. Environment variables (`INSIGHT_*`)
//!
//! Each layer overrides the previous. A relative `table.path` is resolved
//! against the directory holding the `.insight/` that named it.

use super::types::{ConfigLayer, LogFormat};
use super::{
    default_config_path, ConfigError, InsightConfig, PROJECT_CONFIG_DIR, PROJECT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Helper macro for parsing boolean environment variables.
macro_rules! parse_env_bool {
    ($env:expr, $field:expr, $var:literal) => {
        if let Some(val) = $env($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```ignore
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .skip_env_vars()
///     .load()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Global config file path (defaults to ~/.insight/config.toml).
    global_config_path: Option<PathBuf>,

    /// Project root directory.
    project_root: Option<PathBuf>,

    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a new loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config will be loaded from `<project_root>/.insight/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read or
    /// parsed, or if an `INSIGHT_*` variable holds an invalid value.
    /// Missing config files are silently ignored.
    pub fn load(&self) -> Result<InsightConfig, ConfigError> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Like [`load`](Self::load), reading variables through `env`.
    pub(crate) fn load_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<InsightConfig, ConfigError> {
        let mut config = InsightConfig::default();

        for path in self.sources() {
            if let Some(layer) = Self::load_file(&path)? {
                debug!(path = %path.display(), "Loaded config layer");
                config.apply(&layer);
            }
        }

        if !self.skip_env {
            Self::apply_env_vars(&mut config, env)?;
        }

        Ok(config)
    }

    /// The config files this loader reads, lowest priority first.
    ///
    /// Lists global then project. Skipped layers are omitted; files that
    /// do not exist are listed.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if !self.skip_global {
            paths.push(self.global_config_path.clone().unwrap_or_else(default_config_path));
        }

        if !self.skip_project {
            if let Some(ref project_root) = self.project_root {
                paths.push(project_root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE));
            }
        }

        paths
    }

    /// The config files that exist and will be applied, lowest priority first.
    #[must_use]
    pub fn sources(&self) -> Vec<PathBuf> {
        self.candidates().into_iter().filter(|p| p.exists()).collect()
    }

    /// Loads a config layer, returning None if the file doesn't exist.
    ///
    /// A relative `table.path` is anchored to the file's `.insight/` parent.
    fn load_file(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let mut layer =
            ConfigLayer::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;

        if let Some(anchor) = path.parent().and_then(Path::parent) {
            layer.table.path = layer.table.path.map(|p| anchor.join(p));
        }

        Ok(Some(layer))
    }

    /// Applies environment variable overrides.
    fn apply_env_vars(
        config: &mut InsightConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        parse_env_bool!(env, config.table.verify_hierarchy, "INSIGHT_VERIFY_HIERARCHY");

        if let Some(val) = env("INSIGHT_LOG_LEVEL") {
            config.logging.level = val;
        }

        if let Some(val) = env("INSIGHT_LOG_FORMAT") {
            config.logging.format = LogFormat::parse(&val).ok_or_else(|| {
                ConfigError::invalid_env_var("INSIGHT_LOG_FORMAT", "expected 'text' or 'json'")
            })?;
        }

        if let Some(val) = env("INSIGHT_TABLE_PATH") {
            config.table.path = Some(PathBuf::from(val));
        }

        Ok(())
    }
}

/// Parses a boolean from string.
///
/// Accepts: "true", "false", "1", "0", "yes", "no", "on", "off" (case-insensitive).
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
