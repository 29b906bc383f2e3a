use crate::db::conversion_error;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::confirmation::SignatureMode;
use chrono::Local;
use rusqlite::{OptionalExtension, Result, Row, params};
use std::collections::HashMap;

const COLUMNS: &str = "id, last_name, first_name, gender, default_service_id, signature_mode, active";

/// Fields an administrator can set on a client.
#[derive(Debug, Clone)]
pub struct ClientInput {
    pub last_name: String,
    pub first_name: String,
    pub gender: String,
    pub default_service_id: Option<i64>,
    pub signature_mode: SignatureMode,
}

fn map_row(row: &Row) -> Result<Client> {
    let mode_str: String = row.get("signature_mode")?;
    let signature_mode = SignatureMode::from_db_str(&mode_str).ok_or_else(|| {
        conversion_error(
            5,
            AppError::InvalidInput(format!("signature mode '{}'", mode_str)),
        )
    })?;

    Ok(Client {
        id: row.get("id")?,
        last_name: row.get("last_name")?,
        first_name: row.get("first_name")?,
        gender: row.get("gender")?,
        default_service_id: row.get("default_service_id")?,
        signature_mode,
        active: row.get::<_, i32>("active")? == 1,
    })
}

/// Active clients sorted by last name.
pub fn list(pool: &DbPool) -> AppResult<Vec<Client>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM clients WHERE active = 1 ORDER BY last_name ASC, first_name ASC"
    );
    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn get(pool: &DbPool, id: i64) -> AppResult<Client> {
    pool.conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM clients WHERE id = ?1"),
            [id],
            map_row,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("Client", id))
}

/// Display names of every client (active or not), keyed by id.
pub fn name_map(pool: &DbPool) -> AppResult<HashMap<i64, String>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, last_name, first_name FROM clients")?;
    let rows = stmt.query_map([], |row| {
        let last: String = row.get(1)?;
        let first: String = row.get(2)?;
        Ok((row.get::<_, i64>(0)?, format!("{} {}", last, first)))
    })?;
    Ok(rows.collect::<Result<HashMap<_, _>>>()?)
}

pub fn insert(pool: &DbPool, c: &ClientInput) -> AppResult<i64> {
    pool.conn.execute(
        "INSERT INTO clients (last_name, first_name, gender, default_service_id, signature_mode, active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        params![
            c.last_name,
            c.first_name,
            c.gender,
            c.default_service_id,
            c.signature_mode.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

pub fn update(pool: &DbPool, id: i64, c: &ClientInput) -> AppResult<()> {
    let n = pool.conn.execute(
        "UPDATE clients
         SET last_name = ?1, first_name = ?2, gender = ?3, default_service_id = ?4, signature_mode = ?5
         WHERE id = ?6",
        params![
            c.last_name,
            c.first_name,
            c.gender,
            c.default_service_id,
            c.signature_mode.to_db_str(),
            id,
        ],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Client", id));
    }
    Ok(())
}

pub fn record_count(pool: &DbPool, id: i64) -> AppResult<i64> {
    Ok(pool.conn.query_row(
        "SELECT COUNT(*) FROM records WHERE client_id = ?1",
        [id],
        |row| row.get(0),
    )?)
}

/// Removes the client; weekly slots go with it (ON DELETE CASCADE).
pub fn delete(pool: &DbPool, id: i64) -> AppResult<()> {
    let n = pool.conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Client", id));
    }
    Ok(())
}
