use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::{OptionalExtension, Result, params};
use std::collections::HashMap;

pub const OFFICE_NAME: &str = "office_name";
pub const COORDINATOR: &str = "coordinator";
pub const LAST_BACKUP_AT: &str = "last_backup_at";

pub fn all(pool: &DbPool) -> AppResult<HashMap<String, String>> {
    let mut stmt = pool.conn.prepare("SELECT key, value FROM settings")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;
    Ok(rows.collect::<Result<HashMap<_, _>>>()?)
}

pub fn get(pool: &DbPool, key: &str) -> AppResult<Option<String>> {
    Ok(pool
        .conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?)
}

pub fn set(pool: &DbPool, key: &str, value: &str) -> AppResult<()> {
    pool.conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Returns whether a value was removed.
pub fn unset(pool: &DbPool, key: &str) -> AppResult<bool> {
    Ok(pool
        .conn
        .execute("DELETE FROM settings WHERE key = ?1", [key])?
        > 0)
}
