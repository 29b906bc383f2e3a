use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::records::{self, RecordInput};
use crate::db::{clients, helpers, service_types};
use crate::errors::{AppError, AppResult};
use crate::models::care_task::CareTasks;
use crate::models::confirmation::{Confirmation, SignatureMode};
use crate::ui::messages::warning;
use crate::utils::time::{add_minutes, format_time, minutes_between_times};
use chrono::{NaiveDate, NaiveTime};

/// Visit fields as typed on the command line. `None` means "not given":
/// on add the default applies, on edit the stored value is kept.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub client_id: Option<i64>,
    pub helper_id: Option<i64>,
    pub service_type_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub care_tasks: Option<CareTasks>,
    pub note: Option<String>,
    /// `Some(None)` clears an existing confirmation.
    pub confirmation: Option<Option<Confirmation>>,
}

pub struct RecordLogic;

impl RecordLogic {
    /// Validate and store a new visit. Returns the new record id.
    pub fn add(pool: &mut DbPool, draft: RecordDraft) -> AppResult<i64> {
        let missing = |what: &str| AppError::InvalidInput(format!("{what} is required"));

        let client_id = draft.client_id.ok_or_else(|| missing("--client"))?;
        let helper_id = draft.helper_id.ok_or_else(|| missing("--helper"))?;
        let service_type_id = match draft.service_type_id {
            Some(id) => id,
            None => clients::get(pool, client_id)?
                .default_service_id
                .ok_or_else(|| missing("--service (client has no default service)"))?,
        };
        let date = draft.date.ok_or_else(|| missing("--date"))?;
        let start_time = draft.start_time.ok_or_else(|| missing("--start"))?;

        let input = Self::complete(
            pool,
            RecordInput {
                client_id,
                helper_id,
                service_type_id,
                date,
                start_time,
                end_time: start_time,
                total_minutes: 0,
                care_tasks: draft.care_tasks.unwrap_or_default(),
                note: draft.note.unwrap_or_default(),
                confirmation: draft.confirmation.flatten(),
            },
            draft.end_time,
        )?;

        let id = records::insert(pool, &input)?;

        ttlog(
            &pool.conn,
            "add",
            &format!("record #{id}"),
            &format!(
                "{} {}-{} client #{} helper #{} service #{}",
                input.date,
                format_time(input.start_time),
                format_time(input.end_time),
                input.client_id,
                input.helper_id,
                input.service_type_id
            ),
        )?;

        Ok(id)
    }

    /// Apply the given fields on top of an existing record.
    pub fn edit(pool: &mut DbPool, id: i64, draft: RecordDraft) -> AppResult<()> {
        let current = records::get(pool, id)?.record;
        let mut input = RecordInput::from_record(&current);

        if let Some(c) = draft.client_id {
            input.client_id = c;
        }
        if let Some(h) = draft.helper_id {
            input.helper_id = h;
        }
        if let Some(s) = draft.service_type_id {
            input.service_type_id = s;
        }
        if let Some(d) = draft.date {
            input.date = d;
        }
        if let Some(t) = draft.start_time {
            input.start_time = t;
        }
        if let Some(t) = draft.care_tasks {
            input.care_tasks = t;
        }
        if let Some(n) = draft.note {
            input.note = n;
        }
        if let Some(c) = draft.confirmation {
            input.confirmation = c;
        }

        // A new start without a new end keeps the stored end.
        let end = draft.end_time.or(Some(current.end_time));
        let input = Self::complete(pool, input, end)?;

        records::update(pool, id, &input)?;

        ttlog(
            &pool.conn,
            "edit",
            &format!("record #{id}"),
            &format!(
                "{} {}-{} ({} min)",
                input.date,
                format_time(input.start_time),
                format_time(input.end_time),
                input.total_minutes
            ),
        )?;

        Ok(())
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let view = records::get(pool, id)?;
        records::delete(pool, id)?;

        ttlog(
            &pool.conn,
            "del",
            &format!("record #{id}"),
            &format!(
                "{} {} {}",
                view.record.date,
                format_time(view.record.start_time),
                view.client_name
            ),
        )?;
        Ok(())
    }

    /// Resolve references, derive the end time and the duration.
    fn complete(
        pool: &DbPool,
        mut input: RecordInput,
        end: Option<NaiveTime>,
    ) -> AppResult<RecordInput> {
        let client = clients::get(pool, input.client_id)?;
        helpers::get(pool, input.helper_id)?;
        let service = service_types::get(pool, input.service_type_id)?;

        input.end_time = match end {
            Some(e) => e,
            None => add_minutes(input.start_time, service.default_minutes),
        };
        input.total_minutes = minutes_between_times(input.start_time, input.end_time)?;

        if client.signature_mode == SignatureMode::Signature
            && input.confirmation == Some(Confirmation::Stamp)
        {
            warning(format!(
                "{} usually confirms with a signature; a stamp was recorded.",
                client.full_name()
            ));
        }

        Ok(input)
    }
}
