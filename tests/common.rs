#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn clg() -> Command {
    cargo_bin_cmd!("carelog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_carelog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` and require success.
pub fn ok(db_path: &str, args: &[&str]) {
    let mut full = vec!["--db", db_path];
    full.extend_from_slice(args);
    clg().args(&full).assert().success();
}

pub fn init_db(db_path: &str) {
    clg()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh DB with:
/// - service #1 "Body care" (60 min), service #2 "Housework" (45 min)
/// - helper #1 Tanaka Yui
/// - client #1 Sato Hana (default service #1)
/// - slot #1: client 1, service 1, Monday 09:00-09:40
pub fn init_db_with_catalog(db_path: &str) {
    init_db(db_path);
    ok(db_path, &["service", "add", "Body care", "--minutes", "60"]);
    ok(db_path, &["service", "add", "Housework", "--minutes", "45"]);
    ok(db_path, &["helper", "add", "Tanaka", "Yui"]);
    ok(db_path, &["client", "add", "Sato", "Hana", "--service", "1"]);
    ok(
        db_path,
        &[
            "slot", "add", "--client", "1", "--service", "1", "--day", "mon", "--start", "09:00",
            "--end", "09:40",
        ],
    );
}

/// Log a visit of client 1 by helper 1.
pub fn add_visit(db_path: &str, date: &str, service: &str, start: &str, end: &str) {
    ok(
        db_path,
        &[
            "record", "add", "--client", "1", "--helper", "1", "--service", service, "--date",
            date, "--start", start, "--end", end,
        ],
    );
}
