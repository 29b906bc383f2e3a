use crate::cli::commands::separator;
use crate::cli::parser::{Commands, SlotCmd};
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::pool::DbPool;
use crate::db::{clients, slots};
use crate::errors::AppResult;
use crate::models::weekday::DayOfWeek;
use crate::ui::messages::{confirm, header, info, success};
use crate::utils::formatting::service_label;
use crate::utils::table::Table;
use crate::utils::time::{format_time, parse_optional_time, parse_time_strict};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Slot { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        SlotCmd::Add {
            client,
            service,
            day,
            start,
            end,
        } => {
            let day = DayOfWeek::parse(day)?;
            let start = parse_time_strict(start)?;
            let end = parse_optional_time(end.as_ref())?;
            let id = CatalogLogic::add_slot(&mut pool, *client, *service, day, start, end)?;
            success(format!("Weekly slot #{id} added ({} {}).", day.short(), format_time(start)));
        }
        SlotCmd::List { client } => {
            let c = clients::get(&pool, *client)?;
            let list = slots::list_for_client(&pool, c.id)?;
            header(format!("Weekly schedule of {}", c.full_name()));
            if list.is_empty() {
                info("No weekly slots.");
                return Ok(());
            }
            let mut table = Table::new(vec!["ID", "Day", "Time", "Service"], separator(cfg));
            for s in list {
                table.add_row(vec![
                    s.id.to_string(),
                    s.day_of_week.short().to_string(),
                    format!("{}-{}", format_time(s.start_time), format_time(s.end_time)),
                    service_label(s.service_type_name.as_deref()).to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        SlotCmd::Del { id, yes } => {
            if !*yes && !confirm(format!("Remove weekly slot #{id}?")) {
                info("Operation cancelled.");
                return Ok(());
            }
            CatalogLogic::remove_slot(&mut pool, *id)?;
            success(format!("Weekly slot #{id} removed."));
        }
    }

    Ok(())
}
