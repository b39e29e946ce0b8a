//! Binary-level tests for lprobe that need no network access
//!
//! Every case here is rejected before a connection is attempted, or only
//! uses the offline `resolve` command.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run lprobe with an isolated environment
fn run_lprobe(args: &[&str], envs: &[(&str, &str)], config_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lprobe"));
    cmd.args(args)
        .env_remove("LANCEDB_URI")
        .env_remove("TOS_REGION")
        .env_remove("LANCEDB_METADATA_URI")
        .env_remove("RUST_LOG")
        .env("LPROBE_CONFIG", config_dir.join("config.toml"));

    for (key, value) in envs {
        cmd.env(key, value);
    }

    cmd.output().expect("Failed to execute lprobe")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn invalid_primary_flag_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(&["--uri", "not-a-uri", "--no-color"], &[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Invalid LANCEDB_URI: not-a-uri"));
    assert!(!out.contains("Trying metadata table"));
    assert!(!stderr(&output).contains("Invalid LANCEDB_URI"));
}

#[test]
fn invalid_primary_from_env_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(
        &["probe", "--no-color"],
        &[("LANCEDB_URI", "tos://onlybucket")],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Invalid LANCEDB_URI: tos://onlybucket"));
}

#[test]
fn invalid_primary_json_report() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(&["--uri", "s3://", "--json"], &[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["outcome"]["status"], "invalid_primary");
    assert_eq!(report["attempts"].as_array().unwrap().len(), 1);
    assert_eq!(report["attempts"][0]["result"]["status"], "invalid_uri");
}

#[test]
fn invalid_primary_is_reported_in_quiet_mode() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(&["--uri", "s3://", "--quiet", "--no-color"], &[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).trim(), "✗ Invalid LANCEDB_URI: s3://");
}

#[test]
fn table_flags_after_subcommand_are_used() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(
        &["probe", "--uri", "s3://", "--fallback-uri", "tos://x", "--no-color"],
        &[],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Invalid LANCEDB_URI: s3://"));
}

#[test]
fn table_flags_before_subcommand_are_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(&["--uri", "s3://b/db/t", "probe"], &[], dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error"));
}

#[test]
fn newer_config_schema_exits_three() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "schema_version = 99\n").unwrap();

    let output = run_lprobe(&["--no-color"], &[], dir.path());

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("newer than supported"));
}

#[test]
fn config_file_primary_uri_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "schema_version = 1\n\n[probe]\nuri = \"tos://from-config\"\n",
    )
    .unwrap();

    let output = run_lprobe(&["--no-color"], &[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Invalid LANCEDB_URI: tos://from-config"));
}

#[test]
fn resolve_nested_uri_json() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(
        &["resolve", "s3://bucket/a/b/table", "--region", "cn-shanghai", "--json"],
        &[],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["openable"], true);
    assert_eq!(value["location"]["bucket"], "bucket");
    assert_eq!(value["location"]["root_uri"], "s3://bucket/a/b");
    assert_eq!(value["location"]["table_name"], "table");
    assert_eq!(
        value["options"]["aws_endpoint"],
        "https://bucket.tos-s3-cn-shanghai.volces.com"
    );
    assert_eq!(value["options"]["virtual_hosted_style_request"], "true");
    assert!(value["options"].get("aws_secret_access_key").is_none());
}

#[test]
fn resolve_single_segment_is_not_openable() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(&["resolve", "tos://onlybucket", "--json"], &[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["openable"], false);
    assert_eq!(value["location"]["bucket"], "onlybucket");
    assert_eq!(value["location"]["table_name"], "onlybucket");
    assert!(value["location"]["root_uri"].is_null());
}

#[test]
fn completions_bash() {
    let dir = TempDir::new().unwrap();
    let output = run_lprobe(&["completions", "bash"], &[], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("lprobe"));
}
