use crate::cli::commands::separator;
use crate::cli::parser::{Commands, HelperCmd};
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::helpers;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Helper { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        HelperCmd::Add { last, first, guest } => {
            let id = CatalogLogic::add_helper(&mut pool, last, first, *guest)?;
            success(format!("Helper #{id} added."));
        }
        HelperCmd::List { all } => {
            let list = helpers::list(&pool, *all)?;
            if list.is_empty() {
                info("No helpers found.");
                return Ok(());
            }
            let mut table = Table::new(vec!["ID", "Name", "Guest"], separator(cfg));
            for h in list {
                table.add_row(vec![
                    h.id.to_string(),
                    h.full_name(),
                    if h.is_guest { "yes".into() } else { String::new() },
                ]);
            }
            print!("{}", table.render());
        }
        HelperCmd::Edit { id, last, first } => {
            CatalogLogic::edit_helper(&mut pool, *id, last.as_deref(), first.as_deref())?;
            success(format!("Helper #{id} updated."));
        }
        HelperCmd::Del { id, yes } => {
            if !*yes && !confirm(format!("Delete helper #{id}? This action is irreversible.")) {
                info("Operation cancelled.");
                return Ok(());
            }
            CatalogLogic::remove_helper(&mut pool, *id)?;
            success(format!("Helper #{id} deleted."));
        }
    }

    Ok(())
}
