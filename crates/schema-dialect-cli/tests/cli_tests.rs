//! CLI integration tests for schema-dialect.
//!
//! These tests verify command-line argument parsing, help output,
//! the offline commands and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the schema-dialect binary.
fn cmd() -> Command {
    Command::cargo_bin("schema-dialect").unwrap()
}

fn config_file(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", yaml).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drivers"))
        .stdout(predicate::str::contains("parse-dsn"))
        .stdout(predicate::str::contains("tables"))
        .stdout(predicate::str::contains("columns"))
        .stdout(predicate::str::contains("indexes"))
        .stdout(predicate::str::contains("ddl"));
}

#[test]
fn test_ddl_subcommand_help() {
    cmd()
        .args(["ddl", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--table"));
}

#[test]
fn test_columns_requires_table() {
    cmd().arg("columns").assert().failure().code(2);
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema-dialect"));
}

// =============================================================================
// Global Flags Tests
// =============================================================================

#[test]
fn test_global_flags_exist() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--driver"))
        .stdout(predicate::str::contains("--dsn"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("--show-sql"));
}

#[test]
fn test_log_format_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: warn]"));
}

#[test]
fn test_config_default_path() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[default: config.yaml]"));
}

// =============================================================================
// Offline Commands
// =============================================================================

#[test]
fn test_drivers_lists_builtins() {
    cmd()
        .args(["--config", "nonexistent_config_file.yaml", "drivers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mssql"))
        .stdout(predicate::str::contains("pgx"))
        .stdout(predicate::str::contains("sqlite3"))
        .stdout(predicate::str::contains("goracle"));
}

#[test]
fn test_drivers_json() {
    cmd()
        .args(["--output-json", "drivers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mymysql\": \"mysql\""))
        .stdout(predicate::str::contains("\"oci8\": \"oracle\""));
}

#[test]
fn test_parse_dsn_from_flags() {
    cmd()
        .args([
            "--config",
            "nonexistent_config_file.yaml",
            "--driver",
            "mysql",
            "--dsn",
            "root:secret@tcp(db.internal:3307)/shop?charset=utf8mb4",
            "parse-dsn",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database: shop"))
        .stdout(predicate::str::contains("Host: db.internal"))
        .stdout(predicate::str::contains("Port: 3307"))
        .stdout(predicate::str::contains("Charset: utf8mb4"));
}

#[test]
fn test_parse_dsn_from_config_json() {
    let file = config_file(
        "connection:\n  driver: postgres\n  data_source: \"postgres://app@localhost:5432/app?search_path=sales\"\n",
    );
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "--output-json", "parse-dsn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"db_name\": \"app\""))
        .stdout(predicate::str::contains("\"schema\": \"sales\""));
}

#[test]
fn test_dsn_flag_overrides_config() {
    let file = config_file(
        "connection:\n  driver: postgres\n  data_source: \"postgres://app@localhost/app\"\n",
    );
    cmd()
        .args([
            "--config",
            file.path().to_str().unwrap(),
            "--dsn",
            "postgres://app@localhost/reports",
            "parse-dsn",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database: reports"));
}

#[test]
fn test_parse_dsn_missing_database_exits_with_code_1() {
    cmd()
        .args([
            "--config",
            "nonexistent_config_file.yaml",
            "--driver",
            "mssql",
            "--dsn",
            "server=localhost;user id=sa",
            "parse-dsn",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No database name"));
}

#[test]
fn test_unknown_driver_exits_with_code_1() {
    cmd()
        .args([
            "--config",
            "nonexistent_config_file.yaml",
            "--driver",
            "db2",
            "--dsn",
            "db2://host/db",
            "parse-dsn",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported driver: db2"));
}

#[test]
fn test_oracle_has_no_bundled_transport() {
    cmd()
        .args([
            "--config",
            "nonexistent_config_file.yaml",
            "--driver",
            "oci8",
            "--dsn",
            "oracle://scott:tiger@db:1521/ORCL",
            "tables",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no bundled transport"));
}

// =============================================================================
// Exit Code Tests - Config Errors
// =============================================================================

#[test]
fn test_missing_config_exits_with_code_7() {
    // Missing file is an IO error (code 7), not config error (code 1)
    cmd()
        .args(["--config", "nonexistent_config_file.yaml", "tables"])
        .assert()
        .code(7);
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let file = config_file("invalid: yaml: content: [\n");
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "tables"])
        .assert()
        .code(1);
}

#[test]
fn test_empty_config_exits_with_code_1() {
    let file = tempfile::NamedTempFile::new().unwrap();
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "parse-dsn"])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_settings_exit_with_code_1() {
    let file = config_file("connection:\n  driver: mssql\n  data_source: x\n  max_connections: 0\n");
    cmd()
        .args(["--config", file.path().to_str().unwrap(), "parse-dsn"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

// =============================================================================
// No Subcommand Tests
// =============================================================================

#[test]
fn test_no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}
