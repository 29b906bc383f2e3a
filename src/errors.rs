//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid time range: {start} → {end}")]
    InvalidTimeRange { start: String, end: String },

    #[error("Invalid day of week: {0} (use sun, mon, tue, wed, thu, fri, sat or 0-6)")]
    InvalidWeekday(String),

    #[error("Invalid care task code: {0}")]
    InvalidCareTask(String),

    #[error("Invalid value: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{0}")]
    InUse(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export / backup errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Backup error: {0}")]
    Backup(String),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        AppError::NotFound { kind, id }
    }

    pub fn time_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        AppError::InvalidTimeRange {
            start: start.into(),
            end: end.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
