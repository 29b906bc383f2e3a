pub mod clients;
pub mod helpers;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod records;
pub mod service_types;
pub mod settings;
pub mod slots;
pub mod stats;

use crate::errors::AppError;

/// Wrap a domain parse failure into a rusqlite row-mapping error.
pub(crate) fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}
