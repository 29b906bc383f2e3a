use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_visit, clg, init_db, init_db_with_catalog, ok, setup_test_db};

#[test]
fn test_service_add_and_list() {
    let db_path = setup_test_db("service_add_list");
    init_db(&db_path);

    ok(&db_path, &["service", "add", "Body care", "--minutes", "60"]);
    ok(&db_path, &["service", "add", "Assisted bath", "--minutes", "90"]);

    clg()
        .args(["--db", &db_path, "service", "list"])
        .assert()
        .success()
        .stdout(contains("Body care").and(contains("Assisted bath")))
        .stdout(contains("01h 30m"));
}

#[test]
fn test_service_zero_minutes_rejected() {
    let db_path = setup_test_db("service_zero_minutes");
    init_db(&db_path);

    clg()
        .args(["--db", &db_path, "service", "add", "Nothing", "--minutes", "0"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 1440"));
}

#[test]
fn test_service_minutes_capped_at_one_day() {
    let db_path = setup_test_db("service_minutes_cap");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "service", "add", "Forever", "--minutes", "4294967295"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 1440"));

    clg()
        .args(["--db", &db_path, "service", "edit", "1", "--minutes", "1441"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 1440"));

    ok(&db_path, &["service", "add", "Night shift", "--minutes", "1440"]);
}

#[test]
fn test_service_in_use_is_deactivated() {
    let db_path = setup_test_db("service_in_use");
    init_db_with_catalog(&db_path);

    // Service #1 is used by the weekly slot and as the client default.
    clg()
        .args(["--db", &db_path, "service", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("deactivated"));

    clg()
        .args(["--db", &db_path, "service", "list"])
        .assert()
        .success()
        .stdout(contains("Housework").and(contains("Body care").not()));

    // Slots keep their label through the inactive service.
    clg()
        .args(["--db", &db_path, "slot", "list", "--client", "1"])
        .assert()
        .success()
        .stdout(contains("Body care"));
}

#[test]
fn test_service_unused_is_deleted() {
    let db_path = setup_test_db("service_unused");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "service", "del", "2", "-y"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    clg()
        .args(["--db", &db_path, "service", "edit", "2", "--minutes", "30"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_delete_cancelled_without_confirmation() {
    let db_path = setup_test_db("delete_cancelled");
    init_db_with_catalog(&db_path);

    clg()
        .args(["--db", &db_path, "service", "del", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    clg()
        .args(["--db", &db_path, "service", "list"])
        .assert()
        .success()
        .stdout(contains("Housework"));
}

#[test]
fn test_guest_helpers_hidden_by_default() {
    let db_path = setup_test_db("helper_guest");
    init_db(&db_path);

    ok(&db_path, &["helper", "add", "Tanaka", "Yui"]);
    ok(&db_path, &["helper", "add", "Mori", "Ken", "--guest"]);

    clg()
        .args(["--db", &db_path, "helper", "list"])
        .assert()
        .success()
        .stdout(contains("Tanaka Yui").and(contains("Mori Ken").not()));

    clg()
        .args(["--db", &db_path, "helper", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Tanaka Yui").and(contains("Mori Ken")));
}

#[test]
fn test_helper_with_records_cannot_be_deleted() {
    let db_path = setup_test_db("helper_in_use");
    init_db_with_catalog(&db_path);
    add_visit(&db_path, "2025-09-01", "1", "09:00", "09:40");

    clg()
        .args(["--db", &db_path, "helper", "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("cannot be deleted"));
}

#[test]
fn test_client_edit_and_delete() {
    let db_path = setup_test_db("client_edit_delete");
    init_db_with_catalog(&db_path);

    ok(
        &db_path,
        &["client", "edit", "1", "--first", "Hanako", "--signature-mode", "signature"],
    );

    clg()
        .args(["--db", &db_path, "client", "list"])
        .assert()
        .success()
        .stdout(contains("Sato Hanako").and(contains("signature")));

    // No visits yet: the client goes, and its weekly slots with it.
    ok(&db_path, &["client", "del", "1", "--yes"]);

    clg()
        .args(["--db", &db_path, "slot", "list", "--client", "1"])
        .assert()
        .failure()
        .stderr(contains("Client #1 not found"));
}

#[test]
fn test_client_with_records_cannot_be_deleted() {
    let db_path = setup_test_db("client_in_use");
    init_db_with_catalog(&db_path);
    add_visit(&db_path, "2025-09-01", "1", "09:00", "09:40");

    clg()
        .args(["--db", &db_path, "client", "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("cannot be deleted"));
}

#[test]
fn test_client_bad_signature_mode() {
    let db_path = setup_test_db("client_bad_mode");
    init_db(&db_path);

    clg()
        .args(["--db", &db_path, "client", "add", "Ito", "--signature-mode", "thumb"])
        .assert()
        .failure()
        .stderr(contains("signature mode"));
}

#[test]
fn test_slot_end_defaults_to_service_minutes() {
    let db_path = setup_test_db("slot_default_end");
    init_db_with_catalog(&db_path);

    ok(
        &db_path,
        &[
            "slot", "add", "--client", "1", "--service", "2", "--day", "thursday", "--start",
            "10:00",
        ],
    );

    clg()
        .args(["--db", &db_path, "slot", "list", "--client", "1"])
        .assert()
        .success()
        .stdout(contains("10:00-10:45").and(contains("Thu")))
        .stdout(contains("09:00-09:40").and(contains("Mon")));
}

#[test]
fn test_slot_rejects_reversed_times_and_bad_weekday() {
    let db_path = setup_test_db("slot_invalid");
    init_db_with_catalog(&db_path);

    clg()
        .args([
            "--db", &db_path, "slot", "add", "--client", "1", "--service", "1", "--day", "mon",
            "--start", "10:00", "--end", "09:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));

    clg()
        .args([
            "--db", &db_path, "slot", "add", "--client", "1", "--service", "1", "--day", "funday",
            "--start", "10:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid day of week"));
}
