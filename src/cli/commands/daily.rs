use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::daily::DailyLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::{self, parse_date_strict};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Daily { date: d, client } = cmd {
        let day = match d {
            Some(s) => parse_date_strict(s)?,
            None => date::today(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        DailyLogic::show(&mut pool, cfg, day, *client)?;
    }

    Ok(())
}
