use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::helper::Helper;
use chrono::Local;
use rusqlite::{OptionalExtension, Result, Row, params};

const COLUMNS: &str = "id, last_name, first_name, active, is_guest";

fn map_row(row: &Row) -> Result<Helper> {
    Ok(Helper {
        id: row.get("id")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        active: row.get::<_, i32>("active")? == 1,
        is_guest: row.get::<_, i32>("is_guest")? == 1,
    })
}

/// Active helpers sorted by last name; guests only when `include_guests`.
pub fn list(pool: &DbPool, include_guests: bool) -> AppResult<Vec<Helper>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM helpers
         WHERE active = 1 AND (?1 = 1 OR is_guest = 0)
         ORDER BY last_name ASC, first_name ASC"
    );
    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map([include_guests as i32], map_row)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn get(pool: &DbPool, id: i64) -> AppResult<Helper> {
    pool.conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM helpers WHERE id = ?1"),
            [id],
            map_row,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("Helper", id))
}

pub fn insert(pool: &DbPool, last_name: &str, first_name: &str, is_guest: bool) -> AppResult<i64> {
    pool.conn.execute(
        "INSERT INTO helpers (last_name, first_name, active, is_guest, created_at)
         VALUES (?1, ?2, 1, ?3, ?4)",
        params![last_name, first_name, is_guest as i32, Local::now().to_rfc3339()],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

pub fn update(pool: &DbPool, id: i64, last_name: &str, first_name: &str) -> AppResult<()> {
    let n = pool.conn.execute(
        "UPDATE helpers SET last_name = ?1, first_name = ?2 WHERE id = ?3",
        params![last_name, first_name, id],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Helper", id));
    }
    Ok(())
}

pub fn record_count(pool: &DbPool, id: i64) -> AppResult<i64> {
    Ok(pool.conn.query_row(
        "SELECT COUNT(*) FROM records WHERE helper_id = ?1",
        [id],
        |row| row.get(0),
    )?)
}

pub fn delete(pool: &DbPool, id: i64) -> AppResult<()> {
    let n = pool.conn.execute("DELETE FROM helpers WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Helper", id));
    }
    Ok(())
}
