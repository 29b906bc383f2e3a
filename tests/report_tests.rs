use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{add_visit, clg, init_db_with_catalog, ok, setup_test_db, temp_out};

// 2025-09-01 is a Monday; the catalog has a Monday 09:00 slot for client 1.

#[test]
fn test_daily_matched_visit() {
    let db_path = setup_test_db("daily_matched");
    init_db_with_catalog(&db_path);
    add_visit(&db_path, "2025-09-01", "1", "09:05", "09:45");

    clg()
        .args(["--db", &db_path, "daily", "--date", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("09:05-09:45"))
        .stdout(contains("done").and(contains("pending").not()))
        .stdout(contains("Sato Hana"))
        .stdout(contains("Body care"));
}

#[test]
fn test_daily_pending_slot() {
    let db_path = setup_test_db("daily_pending");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "daily", "--date", "2025-09-08"])
        .assert()
        .success()
        .stdout(contains("09:00-09:40"))
        .stdout(contains("pending"));
}

#[test]
fn test_daily_extra_visit_on_tuesday() {
    let db_path = setup_test_db("daily_extra");
    init_db_with_catalog(&db_path);
    add_visit(&db_path, "2025-09-02", "2", "14:00", "14:45");

    clg()
        .args(["--db", &db_path, "daily", "--date", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("extra"))
        .stdout(contains("Housework"))
        .stdout(contains("14:00-14:45"));
}

#[test]
fn test_daily_empty_day() {
    let db_path = setup_test_db("daily_empty");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "daily", "--date", "2025-09-03"])
        .assert()
        .success()
        .stdout(contains("Nothing planned or logged"));
}

#[test]
fn test_daily_invalid_date() {
    let db_path = setup_test_db("daily_invalid_date");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "daily", "--date", "2025-02-30"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

// March 2024: Mondays 4, 11, 18, 25.

#[test]
fn test_performance_counts() {
    let db_path = setup_test_db("performance_counts");
    init_db_with_catalog(&db_path);
    add_visit(&db_path, "2024-03-04", "1", "09:00", "09:40");
    add_visit(&db_path, "2024-03-11", "1", "09:00", "09:40");
    add_visit(&db_path, "2024-03-25", "1", "09:00", "09:40");

    clg()
        .args(["--db", &db_path, "performance", "--month", "2024-03", "--client", "1"])
        .assert()
        .success()
        .stdout(contains("Sato Hana"))
        .stdout(contains("March 2024"))
        .stdout(contains("Planned visits: 4"))
        .stdout(contains("Actual visits:"));
}

#[test]
fn test_performance_skips_idle_clients() {
    let db_path = setup_test_db("performance_idle");
    init_db_with_catalog(&db_path);
    ok(&db_path, &["client", "add", "Ito", "Ken"]);

    clg()
        .args(["--db", &db_path, "performance", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Sato Hana").and(contains("Ito Ken").not()));
}

#[test]
fn test_performance_invalid_month() {
    let db_path = setup_test_db("performance_invalid_month");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "performance", "--month", "2024-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_performance_pdf() {
    let db_path = setup_test_db("performance_pdf");
    init_db_with_catalog(&db_path);
    add_visit(&db_path, "2024-03-04", "1", "09:00", "09:40");
    ok(&db_path, &["settings", "--set", "office_name=Sunrise Care"]);

    let out = temp_out("performance_pdf", "pdf");

    clg()
        .args([
            "--db", &db_path, "performance", "--month", "2024-03", "--pdf", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("PDF export completed"));

    let bytes = fs::read(&out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));
}
