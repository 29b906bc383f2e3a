use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        auto,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *auto {
            let dest = BackupLogic::auto_backup(&pool, cfg)?;
            success(format!("Backup created: {}", dest.display()));
        }

        if let Some(f) = file {
            BackupLogic::backup(&pool, cfg, f, *compress, *force)?;
        }
    }

    Ok(())
}
