use crate::db::conversion_error;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::slot::DefaultWeeklySlot;
use crate::models::weekday::DayOfWeek;
use crate::utils::time::{format_time, parse_time};
use chrono::NaiveTime;
use rusqlite::{Result, Row, params};

const SELECT: &str = "
    SELECT d.id, d.client_id, d.service_type_id, d.day_of_week, d.start_time, d.end_time,
           s.name AS service_type_name, COALESCE(s.default_minutes, 0) AS default_minutes
    FROM default_weekly_slots d
    LEFT JOIN service_types s ON s.id = d.service_type_id";

fn time_col(row: &Row, idx: usize, name: &str) -> Result<NaiveTime> {
    let raw: String = row.get(name)?;
    parse_time(&raw).ok_or_else(|| conversion_error(idx, AppError::InvalidTime(raw)))
}

fn map_row(row: &Row) -> Result<DefaultWeeklySlot> {
    let dow: i64 = row.get("day_of_week")?;
    let day_of_week = DayOfWeek::from_index(dow)
        .ok_or_else(|| conversion_error(3, AppError::InvalidWeekday(dow.to_string())))?;

    Ok(DefaultWeeklySlot {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        service_type_id: row.get("service_type_id")?,
        service_type_name: row.get("service_type_name")?,
        default_minutes: row.get("default_minutes")?,
        day_of_week,
        start_time: time_col(row, 4, "start_time")?,
        end_time: time_col(row, 5, "end_time")?,
    })
}

/// Weekly schedule of one client, ordered by weekday then start time.
pub fn list_for_client(pool: &DbPool, client_id: i64) -> AppResult<Vec<DefaultWeeklySlot>> {
    let sql = format!("{SELECT} WHERE d.client_id = ?1 ORDER BY d.day_of_week, d.start_time");
    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map([client_id], map_row)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

/// Slots due on `day` for active clients, optionally for one client only.
pub fn list_for_weekday(
    pool: &DbPool,
    day: DayOfWeek,
    client_id: Option<i64>,
) -> AppResult<Vec<DefaultWeeklySlot>> {
    let sql = format!(
        "{SELECT}
         JOIN clients c ON c.id = d.client_id
         WHERE d.day_of_week = ?1 AND c.active = 1 AND (?2 IS NULL OR d.client_id = ?2)
         ORDER BY d.start_time, d.id"
    );
    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map(params![day.index(), client_id], map_row)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn insert(
    pool: &DbPool,
    client_id: i64,
    service_type_id: i64,
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
) -> AppResult<i64> {
    if start >= end {
        return Err(AppError::time_range(format_time(start), format_time(end)));
    }
    pool.conn.execute(
        "INSERT INTO default_weekly_slots (client_id, service_type_id, day_of_week, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            client_id,
            service_type_id,
            day.index(),
            format_time(start),
            format_time(end),
        ],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

pub fn delete(pool: &DbPool, id: i64) -> AppResult<()> {
    let n = pool
        .conn
        .execute("DELETE FROM default_weekly_slots WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Weekly slot", id));
    }
    Ok(())
}
