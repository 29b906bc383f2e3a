use crate::cli::commands::separator;
use crate::cli::parser::{Commands, ServiceCmd};
use crate::config::Config;
use crate::core::catalog::{CatalogLogic, ServiceRemoval};
use crate::db::pool::DbPool;
use crate::db::service_types;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::formatting::mins2readable;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Service { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ServiceCmd::Add { name, minutes } => {
            let id = CatalogLogic::add_service(&mut pool, name, *minutes)?;
            success(format!("Service type #{id} '{}' added ({minutes} min).", name.trim()));
        }
        ServiceCmd::List => {
            let list = service_types::list_active(&pool)?;
            if list.is_empty() {
                info("No service types defined.");
                return Ok(());
            }
            let mut table = Table::new(vec!["ID", "Name", "Minutes", "Length"], separator(cfg));
            for st in list {
                table.add_row(vec![
                    st.id.to_string(),
                    st.name,
                    st.default_minutes.to_string(),
                    mins2readable(i64::from(st.default_minutes), false),
                ]);
            }
            print!("{}", table.render());
        }
        ServiceCmd::Edit { id, name, minutes } => {
            CatalogLogic::edit_service(&mut pool, *id, name.as_deref(), *minutes)?;
            success(format!("Service type #{id} updated."));
        }
        ServiceCmd::Del { id, yes } => {
            if !*yes && !confirm(format!("Delete service type #{id}?")) {
                info("Operation cancelled.");
                return Ok(());
            }
            match CatalogLogic::remove_service(&mut pool, *id)? {
                ServiceRemoval::Deleted => success(format!("Service type #{id} deleted.")),
                ServiceRemoval::Deactivated => warning(format!(
                    "Service type #{id} is still referenced; it was deactivated instead."
                )),
            }
        }
    }

    Ok(())
}
