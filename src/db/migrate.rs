use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// A schema step. Applied versions are recorded in `log` as
/// `migration_applied` and never run twice.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260105_0001_base_schema",
        description: "Created service_types, helpers, clients, records and settings tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS service_types (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL UNIQUE,
            default_minutes  INTEGER NOT NULL CHECK(default_minutes > 0),
            active           INTEGER NOT NULL DEFAULT 1,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS helpers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name   TEXT NOT NULL DEFAULT '',
            first_name  TEXT NOT NULL DEFAULT '',
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clients (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            last_name           TEXT NOT NULL DEFAULT '',
            first_name          TEXT NOT NULL DEFAULT '',
            gender              TEXT NOT NULL DEFAULT '',
            default_service_id  INTEGER REFERENCES service_types(id) ON DELETE SET NULL,
            active              INTEGER NOT NULL DEFAULT 1,
            created_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS records (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id        INTEGER NOT NULL REFERENCES clients(id),
            helper_id        INTEGER NOT NULL REFERENCES helpers(id),
            service_type_id  INTEGER NOT NULL REFERENCES service_types(id),
            date             TEXT NOT NULL,
            start_time       TEXT NOT NULL,
            end_time         TEXT NOT NULL,
            total_minutes    INTEGER NOT NULL CHECK(total_minutes >= 0),
            care_tasks       TEXT NOT NULL DEFAULT '',
            note             TEXT NOT NULL DEFAULT '',
            confirmed        INTEGER NOT NULL DEFAULT 0,
            signature_data   BLOB,
            created_at       TEXT NOT NULL,
            updated_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_client_date ON records(client_id, date);
        CREATE INDEX IF NOT EXISTS idx_records_helper_date ON records(helper_id, date);

        CREATE TABLE IF NOT EXISTS settings (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260112_0002_weekly_slots",
        description: "Created default_weekly_slots table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS default_weekly_slots (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id        INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            service_type_id  INTEGER NOT NULL REFERENCES service_types(id),
            day_of_week      INTEGER NOT NULL CHECK(day_of_week BETWEEN 0 AND 6),
            start_time       TEXT NOT NULL,
            end_time         TEXT NOT NULL,
            CHECK(start_time < end_time)
        );

        CREATE INDEX IF NOT EXISTS idx_slots_client_dow ON default_weekly_slots(client_id, day_of_week);
        "#,
    },
    Migration {
        version: "20260203_0003_helper_guest_flag",
        description: "Added is_guest flag to helpers",
        sql: "ALTER TABLE helpers ADD COLUMN is_guest INTEGER NOT NULL DEFAULT 0;",
    },
    Migration {
        version: "20260218_0004_client_signature_mode",
        description: "Added signature_mode to clients",
        sql: "ALTER TABLE clients ADD COLUMN signature_mode TEXT NOT NULL DEFAULT 'stamp' \
              CHECK(signature_mode IN ('stamp','signature'));",
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql).map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Migration {} failed: {}", m.version, e)),
        )
    })?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet applied, in order.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::path::Path;

    let backup_name = format!(
        "{}-carelog_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let Some(dir) = Path::new(db_path).parent() else {
        warning("Could not determine DB folder, backup skipped.");
        return Ok(());
    };
    let backup_path = dir.join(&backup_name);

    crate::core::backup::zip_file(Path::new(db_path), &backup_path, "database.sqlite").map_err(
        |e| {
            Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
                "Backup failed: {}",
                e
            ))))
        },
    )?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    let pending = pending_migrations(conn)?;
    if pending.is_empty() {
        return Ok(());
    }

    // An existing database gets a safety copy before its schema changes.
    let has_history = pending.len() < MIGRATIONS.len();
    if has_history {
        warning("Schema upgrade needed, creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path, backup skipped.");
        }
    }

    for m in MIGRATIONS.iter().filter(|m| pending.contains(&m.version)) {
        apply(conn, m)?;
    }

    Ok(())
}
