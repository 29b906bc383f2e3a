use crate::db::migrate::pending_migrations;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TABLE COUNTS
    //
    for (label, table) in [
        ("Clients", "clients"),
        ("Helpers", "helpers"),
        ("Service types", "service_types"),
        ("Weekly slots", "default_weekly_slots"),
        ("Visit records", "records"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM records", [], |row| row.get(0))?;

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM records", [], |row| row.get(0))?;

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Record range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE VISITS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date) {
        let d1 = parse_date(&f)?;
        let d2 = parse_date(&l)?;
        let days = (d2 - d1).num_days().max(1);

        let visits = count(pool, "records")?;
        println!(
            "{}• Average visits/day:{} {:.2}",
            CYAN,
            RESET,
            visits as f64 / days as f64
        );
    }

    //
    // 5) SCHEMA
    //
    let pending = pending_migrations(&pool.conn)?;
    if pending.is_empty() {
        println!("{}• Schema:{} up to date", CYAN, RESET);
    } else {
        println!(
            "{}• Schema:{} {}{} pending migration(s){}",
            CYAN,
            RESET,
            YELLOW,
            pending.len(),
            RESET
        );
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
