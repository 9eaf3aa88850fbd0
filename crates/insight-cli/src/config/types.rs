//! Configuration types.
//!
//! [`InsightConfig`] is the resolved configuration; every type in it
//! implements [`Default`] for compile-time fallback values.
//! [`ConfigLayer`] is what one config file says, with every key optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
///
/// This is the unified configuration after applying all layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InsightConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Permission table configuration.
    pub table: TableConfig,
}

impl InsightConfig {
    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Applies one layer on top of this config.
    ///
    /// Every key the layer sets wins, including one equal to the default.
    pub fn apply(&mut self, layer: &ConfigLayer) {
        self.logging.apply(&layer.logging);
        self.table.apply(&layer.table);
    }
}

/// One configuration layer, as written in a config file.
///
/// An absent key leaves the value from lower layers untouched.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    /// `[logging]` overrides.
    pub logging: LoggingLayer,

    /// `[table]` overrides.
    pub table: TableLayer,
}

impl ConfigLayer {
    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// `[logging]` keys of a layer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingLayer {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

/// `[table]` keys of a layer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableLayer {
    pub path: Option<PathBuf>,
    pub verify_hierarchy: Option<bool>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when neither a CLI flag nor `RUST_LOG` is set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    fn apply(&mut self, layer: &LoggingLayer) {
        if let Some(ref level) = layer.level {
            self.level.clone_from(level);
        }
        if let Some(format) = layer.format {
            self.format = format;
        }
    }
}

/// Permission table configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Role table file. The built-in table is used when unset.
    pub path: Option<PathBuf>,

    /// Reject tables where a lower role holds something a higher role does not.
    pub verify_hierarchy: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            path: None,
            verify_hierarchy: true,
        }
    }
}

impl TableConfig {
    fn apply(&mut self, layer: &TableLayer) {
        if let Some(ref path) = layer.path {
            self.path = Some(path.clone());
        }
        if let Some(verify) = layer.verify_hierarchy {
            self.verify_hierarchy = verify;
        }
    }
}
