use crate::cli::commands::separator;
use crate::cli::parser::{Commands, RecordCmd};
use crate::config::Config;
use crate::core::record::{RecordDraft, RecordLogic};
use crate::db::pool::DbPool;
use crate::db::records::{self, RecordFilter};
use crate::db::settings;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::care_task::CareTasks;
use crate::models::confirmation::Confirmation;
use crate::ui::messages::{confirm, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::{self, parse_date_strict};
use crate::utils::formatting::service_label;
use crate::utils::table::Table;
use crate::utils::time::{format_time, parse_optional_time, parse_time_strict};
use std::fs;

/// Read a signature image; an empty file is not a signature.
fn load_signature(path: &str) -> AppResult<Confirmation> {
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(AppError::InvalidInput(format!("signature file '{path}' is empty")));
    }
    Ok(Confirmation::Signature(bytes))
}

fn parse_tasks(tasks: &Option<String>) -> AppResult<Option<CareTasks>> {
    tasks.as_deref().map(CareTasks::parse_list).transpose()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Record { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        RecordCmd::Add {
            client,
            helper,
            service,
            date: d,
            start,
            end,
            tasks,
            note,
            stamp,
            signature,
        } => {
            let confirmation = match (stamp, signature) {
                (_, Some(path)) => Some(load_signature(path)?),
                (true, None) => Some(Confirmation::Stamp),
                (false, None) => None,
            };

            let draft = RecordDraft {
                client_id: Some(*client),
                helper_id: Some(*helper),
                service_type_id: *service,
                date: Some(match d {
                    Some(s) => parse_date_strict(s)?,
                    None => date::today(),
                }),
                start_time: Some(parse_time_strict(start)?),
                end_time: parse_optional_time(end.as_ref())?,
                care_tasks: parse_tasks(tasks)?,
                note: note.clone(),
                confirmation: Some(confirmation),
            };

            let id = RecordLogic::add(&mut pool, draft)?;
            let view = records::get(&pool, id)?;
            success(format!(
                "Visit #{id} logged: {} {}-{} ({} min)",
                view.record.date,
                format_time(view.record.start_time),
                format_time(view.record.end_time),
                view.record.total_minutes
            ));
        }
        RecordCmd::Edit {
            id,
            client,
            helper,
            service,
            date: d,
            start,
            end,
            tasks,
            note,
            stamp,
            signature,
            unconfirm,
        } => {
            let confirmation = if *unconfirm {
                Some(None)
            } else if let Some(path) = signature {
                Some(Some(load_signature(path)?))
            } else if *stamp {
                Some(Some(Confirmation::Stamp))
            } else {
                None
            };

            let draft = RecordDraft {
                client_id: *client,
                helper_id: *helper,
                service_type_id: *service,
                date: d.as_deref().map(parse_date_strict).transpose()?,
                start_time: parse_optional_time(start.as_ref())?,
                end_time: parse_optional_time(end.as_ref())?,
                care_tasks: parse_tasks(tasks)?,
                note: note.clone(),
                confirmation,
            };

            RecordLogic::edit(&mut pool, *id, draft)?;
            success(format!("Visit #{id} updated."));
        }
        RecordCmd::Del { id, yes } => {
            if !*yes && !confirm(format!("Delete visit #{id}? This action is irreversible.")) {
                info("Operation cancelled.");
                return Ok(());
            }
            RecordLogic::delete(&mut pool, *id)?;
            success(format!("Visit #{id} deleted."));
        }
        RecordCmd::List {
            client,
            helper,
            range,
        } => {
            let bounds = match range.as_deref() {
                None => None,
                Some(r) if r.eq_ignore_ascii_case("all") => None,
                Some(r) => Some(parse_range(r)?),
            };
            let filter = RecordFilter {
                client_id: *client,
                helper_id: *helper,
                from: bounds.map(|b| b.0),
                to: bounds.map(|b| b.1),
            };

            let list = records::query(&pool, &filter)?;
            if list.is_empty() {
                info("No visits found.");
                return Ok(());
            }

            let labels = settings::all(&pool)?;
            let mut table = Table::new(
                vec!["ID", "Date", "Time", "Min", "Client", "Helper", "Service", "Tasks", "Conf"],
                separator(cfg),
            );
            for v in &list {
                let r = &v.record;
                table.add_row(vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    format!("{}-{}", format_time(r.start_time), format_time(r.end_time)),
                    r.total_minutes.to_string(),
                    v.client_name.clone(),
                    v.helper_name.clone(),
                    service_label(r.service_type_name.as_deref()).to_string(),
                    colorize_optional(&r.care_tasks.describe(&labels)),
                    colorize_optional(r.confirmation.as_ref().map(|c| c.label()).unwrap_or("--")),
                ]);
            }
            print!("{}", table.render());
            info(format!("{} visit(s).", list.len()));
        }
    }

    Ok(())
}
