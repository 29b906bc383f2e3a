use crate::cli::commands::separator;
use crate::cli::parser::{ClientCmd, Commands};
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::db::clients::{self, ClientInput};
use crate::db::pool::DbPool;
use crate::db::service_types;
use crate::errors::{AppError, AppResult};
use crate::models::confirmation::SignatureMode;
use crate::ui::messages::{confirm, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

fn parse_mode(s: &str) -> AppResult<SignatureMode> {
    SignatureMode::from_db_str(s).ok_or_else(|| {
        AppError::InvalidInput(format!("signature mode '{s}' (use stamp or signature)"))
    })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Client { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ClientCmd::Add {
            last,
            first,
            gender,
            service,
            signature_mode,
        } => {
            let input = ClientInput {
                last_name: last.trim().to_string(),
                first_name: first.trim().to_string(),
                gender: gender.trim().to_string(),
                default_service_id: *service,
                signature_mode: parse_mode(signature_mode)?,
            };
            let id = CatalogLogic::add_client(&mut pool, &input)?;
            success(format!("Client #{id} added."));
        }
        ClientCmd::List => {
            let list = clients::list(&pool)?;
            if list.is_empty() {
                info("No clients found.");
                return Ok(());
            }
            let services = service_types::list_active(&pool)?;
            let mut table = Table::new(
                vec!["ID", "Name", "Gender", "Default service", "Confirmation"],
                separator(cfg),
            );
            for c in list {
                let service = c
                    .default_service_id
                    .map(|sid| {
                        services
                            .iter()
                            .find(|s| s.id == sid)
                            .map(|s| s.name.clone())
                            .unwrap_or_else(|| format!("#{sid}"))
                    })
                    .unwrap_or_else(|| "--".to_string());
                table.add_row(vec![
                    c.id.to_string(),
                    c.full_name(),
                    c.gender.clone(),
                    colorize_optional(&service),
                    c.signature_mode.to_db_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
        ClientCmd::Edit {
            id,
            last,
            first,
            gender,
            service,
            no_service,
            signature_mode,
        } => {
            let current = clients::get(&pool, *id)?;
            let input = ClientInput {
                last_name: last.clone().unwrap_or(current.last_name),
                first_name: first.clone().unwrap_or(current.first_name),
                gender: gender.clone().unwrap_or(current.gender),
                default_service_id: if *no_service {
                    None
                } else {
                    service.or(current.default_service_id)
                },
                signature_mode: match signature_mode {
                    Some(m) => parse_mode(m)?,
                    None => current.signature_mode,
                },
            };
            CatalogLogic::edit_client(&mut pool, *id, &input)?;
            success(format!("Client #{id} updated."));
        }
        ClientCmd::Del { id, yes } => {
            if !*yes
                && !confirm(format!(
                    "Delete client #{id} and its weekly schedule? This action is irreversible."
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }
            CatalogLogic::remove_client(&mut pool, *id)?;
            success(format!("Client #{id} deleted."));
        }
    }

    Ok(())
}
