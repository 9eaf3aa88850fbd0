//! Shared E2E test helpers for `insight` binary tests.

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Variables that would leak the developer's environment into a test.
const ISOLATED_VARS: &[&str] = &[
    "RUST_LOG",
    "INSIGHT_LOG_LEVEL",
    "INSIGHT_LOG_FORMAT",
    "INSIGHT_TABLE_PATH",
    "INSIGHT_VERIFY_HIERARCHY",
];

/// Build a Command for the `insight` binary inside a fresh workspace.
///
/// `HOME` and the working directory both point at the temp dir, so no
/// global or project config is picked up unless the test writes one.
/// Keep the returned guard alive for the duration of the test.
pub fn insight_cmd() -> (assert_cmd::Command, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("create temp dir for workspace");
    let cmd = insight_cmd_in(tmp.path());
    (cmd, tmp)
}

/// Build a Command rooted at an existing directory.
pub fn insight_cmd_in(dir: &Path) -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("insight");
    cmd.timeout(TIMEOUT_BASIC);
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", dir);
    cmd.current_dir(dir);
    cmd
}

/// Writes a role table file into `dir` and returns its path.
pub fn write_table(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write table file");
    path
}

/// Writes `<dir>/.insight/config.toml`.
pub fn write_project_config(dir: &Path, content: &str) {
    let config_dir = dir.join(".insight");
    std::fs::create_dir_all(&config_dir).expect("create .insight dir");
    std::fs::write(config_dir.join("config.toml"), content).expect("write config");
}

/// A small monotonic table over the agents family.
pub const SMALL_TABLE: &str = r#"
[roles]
OWNER = ["admin:*"]
ADMIN = ["agents:read", "agents:write", "agents:delete"]
MEMBER = ["agents:read", "agents:write"]
VIEWER = ["agents:read"]
"#;

/// A table where VIEWER holds something MEMBER does not.
pub const INVERTED_TABLE: &str = r#"
[roles]
OWNER = ["admin:*"]
ADMIN = ["agents:read"]
MEMBER = ["agents:read"]
VIEWER = ["agents:read", "billing:manage"]
"#;
