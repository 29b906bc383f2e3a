use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::performance::PerformanceLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::export::performance_pdf::{SheetHeader, export_performance_pdf};
use crate::utils::date::{current_month, parse_month};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Performance {
        month,
        client,
        pdf,
        force,
    } = cmd
    {
        let (year, month) = match month {
            Some(m) => parse_month(m)?,
            None => current_month(),
        };

        let pool = DbPool::new(&cfg.database)?;
        let sheets = PerformanceLogic::build(&pool, year, month, *client)?;
        PerformanceLogic::print(cfg, &sheets, year, month);

        if let Some(file) = pdf {
            let path = Path::new(file);
            if !path.is_absolute() {
                return Err(AppError::Export(format!(
                    "output file path must be absolute: {file}"
                )));
            }
            ensure_writable(path, *force)?;

            let head = SheetHeader::from_settings(&pool)?;
            export_performance_pdf(&sheets, year, month, &head, path)?;
        }
    }

    Ok(())
}
