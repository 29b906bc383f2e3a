use predicates::str::contains;
use std::fs;

mod common;
use common::{add_visit, clg, init_db_with_catalog, ok, setup_test_db, temp_out};

fn seeded(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db_with_catalog(&db_path);
    ok(
        &db_path,
        &[
            "record", "add", "--client", "1", "--helper", "1", "--date", "2025-09-01", "--start",
            "09:00", "--end", "09:40", "--tasks", "meal,cleaning", "--note", "ate well",
            "--stamp",
        ],
    );
    add_visit(&db_path, "2025-08-25", "2", "10:00", "10:45");
    db_path
}

#[test]
fn test_export_csv_has_bom_and_columns() {
    let db_path = seeded("export_csv_bom");
    let out = temp_out("export_csv_bom", "csv");

    clg()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read exported csv");
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));

    let content = String::from_utf8(bytes[3..].to_vec()).expect("utf-8");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("date,client,start,end,minutes,service,tasks,note,helper,confirmed")
    );
    // Chronological order.
    assert_eq!(
        lines.next(),
        Some("2025-08-25,Sato Hana,10:00,10:45,45,Housework,,,Tanaka Yui,")
    );
    assert_eq!(
        lines.next(),
        Some("2025-09-01,Sato Hana,09:00,09:40,40,Body care,Meal assistance/Cleaning,ate well,Tanaka Yui,stamp")
    );
}

#[test]
fn test_export_json_range() {
    let db_path = seeded("export_json_range");
    let out = temp_out("export_json_range", "json");

    clg()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--range", "2025-09",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2025-09-01");
    assert_eq!(rows[0]["minutes"], 40);
}

#[test]
fn test_export_task_labels_follow_settings() {
    let db_path = seeded("export_labels");
    ok(&db_path, &["settings", "--set", "label.meal=Lunch"]);
    let out = temp_out("export_labels", "csv");

    clg()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2025-09-01"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Lunch/Cleaning"));
}

#[test]
fn test_export_xlsx_and_pdf() {
    let db_path = seeded("export_xlsx_pdf");

    let xlsx = temp_out("export_xlsx_pdf", "xlsx");
    clg()
        .args(["--db", &db_path, "export", "--format", "xlsx", "--file", &xlsx])
        .assert()
        .success();
    // xlsx is a zip container
    assert!(fs::read(&xlsx).expect("read xlsx").starts_with(b"PK"));

    let pdf = temp_out("export_xlsx_pdf", "pdf");
    clg()
        .args([
            "--db", &db_path, "export", "--format", "pdf", "--file", &pdf, "--range", "2025",
        ])
        .assert()
        .success();
    assert!(fs::read(&pdf).expect("read pdf").starts_with(b"%PDF"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = seeded("export_empty_range");
    let out = temp_out("export_empty_range", "csv");

    clg()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2020"])
        .assert()
        .success()
        .stdout(contains("No records found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = seeded("export_relative");

    clg()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = seeded("export_force");
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").expect("write placeholder");

    clg()
        .args(["--db", &db_path, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("was not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "old");

    clg()
        .args(["--db", &db_path, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").contains("2025-09-01"));
}

#[test]
fn test_export_bad_range() {
    let db_path = seeded("export_bad_range");
    let out = temp_out("export_bad_range", "csv");

    clg()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2025-09:2025"])
        .assert()
        .failure()
        .stderr(contains("same format"));
}

fn pdf_contains(bytes: &[u8], needle: &str) -> bool {
    bytes.windows(needle.len()).any(|w| w == needle.as_bytes())
}

#[test]
fn test_export_pdf_one_sheet_per_client() {
    let db_path = seeded("export_pdf_sheets");
    ok(&db_path, &["client", "add", "Ito", "Ken", "--service", "2"]);
    ok(
        &db_path,
        &[
            "record", "add", "--client", "2", "--helper", "1", "--date", "2025-09-03", "--start",
            "14:00", "--end", "14:30",
        ],
    );
    ok(&db_path, &["settings", "--set", "office_name=Sunrise Care"]);
    ok(&db_path, &["settings", "--set", "coordinator=Kato Mei"]);

    let pdf = temp_out("export_pdf_sheets", "pdf");
    clg()
        .args(["--db", &db_path, "export", "--format", "pdf", "--file", &pdf])
        .assert()
        .success();

    let bytes = fs::read(&pdf).expect("read pdf");
    assert!(pdf_contains(&bytes, "/Count 2"));

    assert!(pdf_contains(&bytes, "Client: Sato Hana"));
    assert!(pdf_contains(&bytes, "Client: Ito Ken"));
    assert!(pdf_contains(&bytes, "Office: Sunrise Care"));
    assert!(pdf_contains(&bytes, "Coordinator: Kato Mei"));

    // Sato Hana: 45 + 40 minutes over August and September.
    assert!(pdf_contains(&bytes, "Service month: 2025-08-25 to 2025-09-01"));
    assert!(pdf_contains(&bytes, "Visits: 2   Total time: 01h 25m = 85 min"));
    assert!(pdf_contains(&bytes, "Service month: September 2025"));
    assert!(pdf_contains(&bytes, "Visits: 1   Total time: 00h 30m = 30 min"));

    assert!(pdf_contains(&bytes, "[Body] Meal assistance  [Life] Cleaning"));
}
