use crate::db::conversion_error;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::care_task::CareTasks;
use crate::models::confirmation::Confirmation;
use crate::models::record::{RecordView, VisitRecord};
use crate::utils::date::format_date;
use crate::utils::time::{format_time, parse_time};
use chrono::{Local, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{OptionalExtension, Result, Row, params, params_from_iter};

const SELECT: &str = "
    SELECT r.*,
           s.name AS service_type_name,
           COALESCE(c.last_name || ' ' || c.first_name, '') AS client_name,
           COALESCE(h.last_name || ' ' || h.first_name, '') AS helper_name
    FROM records r
    LEFT JOIN service_types s ON s.id = r.service_type_id
    LEFT JOIN clients c ON c.id = r.client_id
    LEFT JOIN helpers h ON h.id = r.helper_id";

/// Values written when a visit is logged or edited.
#[derive(Debug, Clone)]
pub struct RecordInput {
    pub client_id: i64,
    pub helper_id: i64,
    pub service_type_id: i64,
    pub date: NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    pub total_minutes: i64,
    pub care_tasks: CareTasks,
    pub note: String,
    pub confirmation: Option<Confirmation>,
}

impl RecordInput {
    pub fn from_record(r: &VisitRecord) -> Self {
        Self {
            client_id: r.client_id,
            helper_id: r.helper_id,
            service_type_id: r.service_type_id,
            date: r.date,
            start_time: r.start_time,
            end_time: r.end_time,
            total_minutes: r.total_minutes,
            care_tasks: r.care_tasks.clone(),
            note: r.note.clone(),
            confirmation: r.confirmation.clone(),
        }
    }
}

/// Optional filters for [`query`].
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub client_id: Option<i64>,
    pub helper_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn on_date(date: NaiveDate, client_id: Option<i64>) -> Self {
        Self {
            client_id,
            from: Some(date),
            to: Some(date),
            ..Self::default()
        }
    }
}

pub fn map_row(row: &Row) -> Result<RecordView> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let start_time =
        parse_time(&start_str).ok_or_else(|| conversion_error(0, AppError::InvalidTime(start_str)))?;

    let end_str: String = row.get("end_time")?;
    let end_time =
        parse_time(&end_str).ok_or_else(|| conversion_error(0, AppError::InvalidTime(end_str)))?;

    let tasks: String = row.get("care_tasks")?;
    let confirmed = row.get::<_, i32>("confirmed")? == 1;
    let signature: Option<Vec<u8>> = row.get("signature_data")?;

    let record = VisitRecord {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        helper_id: row.get("helper_id")?,
        service_type_id: row.get("service_type_id")?,
        service_type_name: row.get("service_type_name")?,
        date,
        start_time,
        end_time,
        total_minutes: row.get("total_minutes")?,
        care_tasks: CareTasks::from_db_str(&tasks),
        note: row.get("note")?,
        confirmation: Confirmation::from_columns(confirmed, signature),
    };

    Ok(RecordView {
        record,
        client_name: row.get("client_name")?,
        helper_name: row.get("helper_name")?,
    })
}

/// Records matching `filter`, newest date first, then by start time.
pub fn query(pool: &DbPool, filter: &RecordFilter) -> AppResult<Vec<RecordView>> {
    let mut sql = format!("{SELECT} WHERE 1=1");
    let mut args: Vec<Value> = Vec::new();

    if let Some(c) = filter.client_id {
        args.push(Value::Integer(c));
        sql.push_str(&format!(" AND r.client_id = ?{}", args.len()));
    }
    if let Some(h) = filter.helper_id {
        args.push(Value::Integer(h));
        sql.push_str(&format!(" AND r.helper_id = ?{}", args.len()));
    }
    if let Some(from) = filter.from {
        args.push(Value::Text(format_date(from)));
        sql.push_str(&format!(" AND r.date >= ?{}", args.len()));
    }
    if let Some(to) = filter.to {
        args.push(Value::Text(format_date(to)));
        sql.push_str(&format!(" AND r.date <= ?{}", args.len()));
    }
    sql.push_str(" ORDER BY r.date DESC, r.start_time ASC, r.id ASC");

    let mut stmt = pool.conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_row)?;
    Ok(rows.collect::<Result<Vec<_>>>()?)
}

pub fn get(pool: &DbPool, id: i64) -> AppResult<RecordView> {
    pool.conn
        .query_row(&format!("{SELECT} WHERE r.id = ?1"), [id], map_row)
        .optional()?
        .ok_or_else(|| AppError::not_found("Record", id))
}

pub fn insert(pool: &DbPool, r: &RecordInput) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    pool.conn.execute(
        "INSERT INTO records (
            client_id, helper_id, service_type_id, date, start_time, end_time, total_minutes,
            care_tasks, note, confirmed, signature_data, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
        params![
            r.client_id,
            r.helper_id,
            r.service_type_id,
            format_date(r.date),
            format_time(r.start_time),
            format_time(r.end_time),
            r.total_minutes,
            r.care_tasks.to_db_str(),
            r.note,
            r.confirmation.is_some() as i32,
            r.confirmation.as_ref().and_then(|c| c.signature_bytes()),
            now,
        ],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

pub fn update(pool: &DbPool, id: i64, r: &RecordInput) -> AppResult<()> {
    let n = pool.conn.execute(
        "UPDATE records SET
            client_id = ?1, helper_id = ?2, service_type_id = ?3, date = ?4,
            start_time = ?5, end_time = ?6, total_minutes = ?7,
            care_tasks = ?8, note = ?9, confirmed = ?10, signature_data = ?11,
            updated_at = ?12
         WHERE id = ?13",
        params![
            r.client_id,
            r.helper_id,
            r.service_type_id,
            format_date(r.date),
            format_time(r.start_time),
            format_time(r.end_time),
            r.total_minutes,
            r.care_tasks.to_db_str(),
            r.note,
            r.confirmation.is_some() as i32,
            r.confirmation.as_ref().and_then(|c| c.signature_bytes()),
            Local::now().to_rfc3339(),
            id,
        ],
    )?;
    if n == 0 {
        return Err(AppError::not_found("Record", id));
    }
    Ok(())
}

pub fn delete(pool: &DbPool, id: i64) -> AppResult<()> {
    let n = pool.conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::not_found("Record", id));
    }
    Ok(())
}
