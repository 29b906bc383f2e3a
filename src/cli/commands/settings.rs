use crate::cli::commands::separator;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings::{self, COORDINATOR, LAST_BACKUP_AT, OFFICE_NAME};
use crate::errors::{AppError, AppResult};
use crate::models::care_task::CareTask;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

/// Keys the application reads; `label.<task-code>` is accepted as well.
fn check_key(key: &str) -> AppResult<()> {
    if [OFFICE_NAME, COORDINATOR, LAST_BACKUP_AT].contains(&key) {
        return Ok(());
    }
    if let Some(code) = key.strip_prefix("label.")
        && CareTask::from_code(code).is_some()
    {
        return Ok(());
    }
    Err(AppError::InvalidInput(format!(
        "unknown setting '{key}' (known: {OFFICE_NAME}, {COORDINATOR}, {LAST_BACKUP_AT}, label.<task-code>)"
    )))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Settings { list, set, unset } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    if let Some(pair) = set {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| AppError::InvalidInput(format!("expected KEY=VALUE, got '{pair}'")))?;
        let key = key.trim();
        check_key(key)?;
        settings::set(&pool, key, value.trim())?;
        ttlog(&pool.conn, "settings", key, &format!("set to '{}'", value.trim()))?;
        success(format!("{key} = {}", value.trim()));
    }

    if let Some(key) = unset {
        let key = key.trim();
        if settings::unset(&pool, key)? {
            ttlog(&pool.conn, "settings", key, "removed")?;
            success(format!("{key} removed."));
        } else {
            warning(format!("{key} was not set."));
        }
    }

    if *list {
        let mut all: Vec<(String, String)> = settings::all(&pool)?.into_iter().collect();
        if all.is_empty() {
            info("No settings stored.");
            return Ok(());
        }
        all.sort();
        let mut table = Table::new(vec!["Key", "Value"], separator(cfg));
        for (k, v) in all {
            table.add_row(vec![k, v]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
