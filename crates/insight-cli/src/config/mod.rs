//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌────────────────────────────────────────────┐
//! │  1. CLI flags (--table, --debug, ...)      │  Per invocation
//! ├────────────────────────────────────────────┤
//! │  2. Environment Variables (INSIGHT_*)      │  Runtime override
//! ├────────────────────────────────────────────┤
//! │  3. Project Config (.insight/config.toml)  │  Project-specific
//! ├────────────────────────────────────────────┤
//! │  4. Global Config (~/.insight/config.toml) │  User defaults
//! ├────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)          │  Fallback
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `INSIGHT_LOG_LEVEL` | `logging.level` | String |
//! | `INSIGHT_LOG_FORMAT` | `logging.format` | `text` / `json` |
//! | `INSIGHT_TABLE_PATH` | `table.path` | PathBuf |
//! | `INSIGHT_VERIFY_HIERARCHY` | `table.verify_hierarchy` | bool |
//!
//! # Example Configuration
//!
//! ```toml
//! # <project>/.insight/config.toml
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [table]
//! path = "roles.toml"
//! verify_hierarchy = true
//! ```

mod error;
mod loader;
mod resolver;
mod table;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use table::load_table;
pub use types::{InsightConfig, LogFormat, TableConfig};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".insight")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".insight";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
