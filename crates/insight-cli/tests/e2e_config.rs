//! E2E tests for table files and configuration layering.

mod common;

use common::{insight_cmd, write_project_config, write_table, INVERTED_TABLE, SMALL_TABLE};
use predicates::str::contains;

#[test]
fn table_flag_replaces_shipped_table() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", SMALL_TABLE);

    cmd.arg("--table")
        .arg(&path)
        .args(["check", "ADMIN", "team:manage"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn owner_wildcard_survives_custom_table() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", SMALL_TABLE);

    cmd.arg("--table")
        .arg(&path)
        .args(["check", "OWNER", "billing:manage"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn inverted_table_rejected_at_startup() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", INVERTED_TABLE);

    cmd.arg("--table")
        .arg(&path)
        .args(["check", "VIEWER", "agents:read"])
        .assert()
        .failure()
        .stderr(contains("TABLE_NOT_MONOTONIC"));
}

#[test]
fn no_verify_accepts_inverted_table() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", INVERTED_TABLE);

    cmd.arg("--table")
        .arg(&path)
        .args(["--no-verify", "check", "VIEWER", "billing:manage"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn verify_reports_violation() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", INVERTED_TABLE);

    cmd.arg("--table")
        .arg(&path)
        .arg("verify")
        .assert()
        .failure()
        .stderr(contains("MEMBER"))
        .stderr(contains("billing:manage"));
}

#[test]
fn unknown_token_in_table_is_error() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", "[roles]\nVIEWER = [\"agents:fly\"]\n");

    cmd.arg("--table")
        .arg(&path)
        .arg("catalog")
        .assert()
        .failure()
        .stderr(contains("TABLE_UNKNOWN_CAPABILITY"));
}

#[test]
fn project_config_selects_table() {
    let (mut cmd, guard) = insight_cmd();
    write_table(guard.path(), "roles.toml", SMALL_TABLE);
    write_project_config(guard.path(), "[table]\npath = \"roles.toml\"\n");

    cmd.args(["list", "MEMBER"])
        .assert()
        .success()
        .stdout("agents:read\nagents:write\n");
}

#[test]
fn env_var_selects_table() {
    let (mut cmd, guard) = insight_cmd();
    let path = write_table(guard.path(), "roles.toml", SMALL_TABLE);

    cmd.env("INSIGHT_TABLE_PATH", &path)
        .args(["list", "VIEWER"])
        .assert()
        .success()
        .stdout("agents:read\n");
}

#[test]
fn invalid_env_bool_is_config_error() {
    let (mut cmd, _guard) = insight_cmd();
    cmd.env("INSIGHT_VERIFY_HIERARCHY", "maybe")
        .arg("catalog")
        .assert()
        .failure()
        .stderr(contains("INSIGHT_VERIFY_HIERARCHY"));
}

#[test]
fn json_log_format_from_env() {
    let (mut cmd, _guard) = insight_cmd();
    cmd.env("INSIGHT_LOG_FORMAT", "json")
        .args(["check", "NOBODY", "agents:read"])
        .assert()
        .success()
        .stdout("false\n")
        .stderr(contains("\"level\":\"WARN\""));
}

#[test]
fn config_command_shows_layers() {
    let (mut cmd, guard) = insight_cmd();
    write_project_config(guard.path(), "[logging]\nlevel = \"info\"\n");

    cmd.arg("config")
        .assert()
        .success()
        .stdout(contains("level = \"info\""))
        .stdout(contains("verify_hierarchy = true"));
}

#[test]
fn project_config_restores_verification_over_global() {
    let (mut cmd, guard) = insight_cmd();
    let global_dir = guard.path().join("home");
    write_project_config(&global_dir, "[table]\nverify_hierarchy = false\n");
    write_project_config(guard.path(), "[table]\nverify_hierarchy = true\n");
    let path = write_table(guard.path(), "roles.toml", INVERTED_TABLE);

    cmd.env("HOME", &global_dir)
        .arg("--table")
        .arg(&path)
        .args(["check", "VIEWER", "agents:read"])
        .assert()
        .failure()
        .stderr(contains("TABLE_NOT_MONOTONIC"));
}

#[test]
fn debug_reports_applied_config_files() {
    let (mut cmd, guard) = insight_cmd();
    write_project_config(guard.path(), "[logging]\nlevel = \"info\"\n");

    cmd.args(["-d", "catalog"])
        .assert()
        .success()
        .stderr(contains("Applied config file"))
        .stderr(contains(".insight"));
}
