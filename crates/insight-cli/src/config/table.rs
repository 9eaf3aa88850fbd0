//! Role table loading.

use super::{ConfigError, TableConfig};
use insight_auth::{PermissionTable, TableSpec};
use std::path::Path;
use tracing::{debug, info};

/// Builds the active permission table.
///
/// Reads `config.path` when set, otherwise uses the built-in table. When
/// `verify_hierarchy` is on, a table where a lower role holds something a
/// higher role does not is rejected.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed, names an
/// unknown role or token, or fails the hierarchy check.
pub fn load_table(config: &TableConfig) -> Result<PermissionTable, ConfigError> {
    let Some(path) = config.path.as_deref() else {
        debug!("Using built-in permission table");
        return Ok(PermissionTable::shipped());
    };

    let table = read_table_file(path)?;

    if config.verify_hierarchy {
        table
            .verify_hierarchy()
            .map_err(|e| ConfigError::table(path, e))?;
    }

    info!(
        path = %path.display(),
        verified = config.verify_hierarchy,
        "Loaded permission table"
    );
    Ok(table)
}

/// Parses a role table file without checking the hierarchy.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
/// or is rejected by [`PermissionTable::from_spec`].
pub fn read_table_file(path: &Path) -> Result<PermissionTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let spec: TableSpec = toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    PermissionTable::from_spec(&spec).map_err(|e| ConfigError::table(path, e))
}
