use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::migrate::pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        let pending = pending_migrations(&pool.conn)?;
        if pending.is_empty() {
            info("Schema already up to date.");
        } else {
            info(format!("Applying {} migration(s)…", pending.len()));
            init_db(&pool.conn)?;
            success("Migration completed.");
        }
    }

    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        info("Running integrity check…");
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        // Rows pointing at a deleted client or helper survive a plain integrity check.
        let orphans: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM pragma_foreign_key_check", [], |row| {
                row.get(0)
            })?;

        if integrity == "ok" && orphans == 0 {
            success("Integrity check passed.");
        } else if integrity != "ok" {
            warning(format!("Integrity check failed: {integrity}"));
        } else {
            warning(format!("{orphans} row(s) violate foreign keys."));
        }
    }

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
