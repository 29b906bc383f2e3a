use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::service_type::ServiceType;
use chrono::Local;
use rusqlite::{OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<ServiceType> {
    Ok(ServiceType {
        id: row.get("id")?,
        name: row.get("name")?,
        default_minutes: row.get("default_minutes")?,
        active: row.get::<_, i32>("active")? == 1,
    })
}

/// Active service types sorted by name.
pub fn list_active(pool: &DbPool) -> AppResult<Vec<ServiceType>> {
    let mut stmt = pool.conn.prepare(
        "SELECT id, name, default_minutes, active FROM service_types
         WHERE active = 1
         ORDER BY name ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn get(pool: &DbPool, id: i64) -> AppResult<ServiceType> {
    pool.conn
        .query_row(
            "SELECT id, name, default_minutes, active FROM service_types WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("Service type", id))
}

pub fn insert(pool: &DbPool, name: &str, default_minutes: u32) -> AppResult<i64> {
    pool.conn.execute(
        "INSERT INTO service_types (name, default_minutes, active, created_at)
         VALUES (?1, ?2, 1, ?3)",
        params![name, default_minutes, Local::now().to_rfc3339()],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

pub fn update(pool: &DbPool, id: i64, name: &str, default_minutes: u32) -> AppResult<()> {
    let n = pool.conn.execute(
        "UPDATE service_types SET name = ?1, default_minutes = ?2 WHERE id = ?3",
        params![name, default_minutes, id],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Service type", id));
    }
    Ok(())
}

/// Number of records, slots and client defaults pointing at a service type.
pub fn usage_count(pool: &DbPool, id: i64) -> AppResult<i64> {
    let n: i64 = pool.conn.query_row(
        "SELECT (SELECT COUNT(*) FROM records WHERE service_type_id = ?1)
              + (SELECT COUNT(*) FROM default_weekly_slots WHERE service_type_id = ?1)
              + (SELECT COUNT(*) FROM clients WHERE default_service_id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    Ok(n)
}

pub fn deactivate(pool: &DbPool, id: i64) -> AppResult<()> {
    pool.conn
        .execute("UPDATE service_types SET active = 0 WHERE id = ?1", [id])?;
    Ok(())
}

pub fn delete(pool: &DbPool, id: i64) -> AppResult<()> {
    pool.conn
        .execute("DELETE FROM service_types WHERE id = ?1", [id])?;
    Ok(())
}
