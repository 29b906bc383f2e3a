use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{clg, init_db_with_catalog, ok, setup_test_db, temp_out};

#[test]
fn test_backup_plain_copy() {
    let db_path = setup_test_db("backup_plain");
    init_db_with_catalog(&db_path);
    let dest = temp_out("backup_plain", "sqlite");

    clg()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    let original = fs::metadata(&db_path).expect("db metadata").len();
    let copy = fs::metadata(&dest).expect("backup metadata").len();
    assert!(copy > 0);
    assert!(copy <= original);

    clg()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("backup"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_catalog(&db_path);
    let dest = temp_out("backup_zip", "sqlite");
    let zipped = Path::new(&dest).with_extension("zip");
    fs::remove_file(&zipped).ok();

    clg()
        .args(["--db", &db_path, "backup", "--file", &dest, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed backup created"));

    assert!(zipped.exists());
    assert!(!Path::new(&dest).exists());
    assert!(fs::read(&zipped).expect("read zip").starts_with(b"PK"));
}

#[test]
fn test_backup_overwrite_declined() {
    let db_path = setup_test_db("backup_declined");
    init_db_with_catalog(&db_path);
    let dest = temp_out("backup_declined", "sqlite");
    fs::write(&dest, "keep me").expect("write placeholder");

    clg()
        .args(["--db", &db_path, "backup", "--file", &dest])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Backup cancelled"));

    assert_eq!(fs::read_to_string(&dest).expect("read"), "keep me");
}

#[test]
fn test_backup_auto_requires_backup_dir() {
    let db_path = setup_test_db("backup_auto_unset");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "backup", "--auto"])
        .assert()
        .failure()
        .stderr(contains("backup_dir is not configured"));
}

#[test]
fn test_backup_auto_conflicts_with_compress() {
    let db_path = setup_test_db("backup_auto_conflict");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "backup", "--auto", "--compress"])
        .assert()
        .failure();
}

#[test]
fn test_settings_set_list_unset() {
    let db_path = setup_test_db("settings_roundtrip");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "settings", "--list"])
        .assert()
        .success()
        .stdout(contains("No settings stored"));

    ok(&db_path, &["settings", "--set", "office_name=Sunrise Care"]);
    ok(&db_path, &["settings", "--set", "label.toilet=Restroom"]);

    clg()
        .args(["--db", &db_path, "settings", "--list"])
        .assert()
        .success()
        .stdout(contains("office_name"))
        .stdout(contains("Sunrise Care"))
        .stdout(contains("label.toilet"));

    clg()
        .args(["--db", &db_path, "settings", "--unset", "office_name"])
        .assert()
        .success()
        .stdout(contains("office_name removed"));

    clg()
        .args(["--db", &db_path, "settings", "--unset", "office_name"])
        .assert()
        .success()
        .stdout(contains("was not set"));

    clg()
        .args(["--db", &db_path, "settings", "--list"])
        .assert()
        .success()
        .stdout(contains("Restroom").and(contains("Sunrise Care").not()));
}

#[test]
fn test_settings_rejects_unknown_key() {
    let db_path = setup_test_db("settings_unknown");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "settings", "--set", "colour=blue"])
        .assert()
        .failure()
        .stderr(contains("unknown setting 'colour'"));

    clg()
        .args(["--db", &db_path, "settings", "--set", "label.nap=Sleep"])
        .assert()
        .failure()
        .stderr(contains("unknown setting"));

    clg()
        .args(["--db", &db_path, "settings", "--set", "office_name"])
        .assert()
        .failure()
        .stderr(contains("expected KEY=VALUE"));
}

#[test]
fn test_db_info_counts() {
    let db_path = setup_test_db("db_info");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Clients:"))
        .stdout(contains("Weekly slots:"))
        .stdout(contains("up to date"));
}
