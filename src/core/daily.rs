use crate::config::Config;
use crate::core::schedule::reconcile::{progress, reconcile_day};
use crate::db::pool::DbPool;
use crate::db::records::{self, RecordFilter};
use crate::db::{clients, slots};
use crate::errors::AppResult;
use crate::models::record::VisitRecord;
use crate::models::weekday::DayOfWeek;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, YELLOW, color_for_status, colorize_optional, paint};
use crate::utils::formatting::service_label;
use crate::utils::table::Table;
use crate::utils::time::format_time;
use chrono::NaiveDate;
use std::collections::HashMap;

pub struct DailyLogic;

impl DailyLogic {
    /// Print the worklist of `date`; returns `(done, pending)`.
    pub fn show(
        pool: &mut DbPool,
        cfg: &Config,
        date: NaiveDate,
        client_id: Option<i64>,
    ) -> AppResult<(usize, usize)> {
        let weekday = DayOfWeek::of(date);
        let day_slots = slots::list_for_weekday(pool, weekday, client_id)?;

        let views = records::query(pool, &RecordFilter::on_date(date, client_id))?;
        let helper_names: HashMap<i64, String> = views
            .iter()
            .map(|v| (v.record.id, v.helper_name.clone()))
            .collect();
        let day_records: Vec<VisitRecord> = views.into_iter().map(|v| v.record).collect();

        let names = clients::name_map(pool)?;
        let items = reconcile_day(date, &day_slots, &day_records, &names);

        header(format!("{} ({})", date, weekday.short()));

        if items.is_empty() {
            info("Nothing planned or logged for this day.");
            return Ok((0, 0));
        }

        let sep = cfg.separator_char.chars().next().unwrap_or('-');
        let mut table = Table::new(
            vec!["Time", "Client", "Service", "Status", "Helper", "Rec", "Conf"],
            sep,
        );

        for item in &items {
            let helper = item
                .record
                .and_then(|r| helper_names.get(&r.id))
                .cloned()
                .unwrap_or_else(|| "--".to_string());
            let rec_id = item
                .record
                .map(|r| format!("#{}", r.id))
                .unwrap_or_else(|| "--".to_string());
            let confirmed = match item.record {
                Some(r) if r.confirmed() => "✔",
                Some(_) => "",
                None => "--",
            };

            table.add_row(vec![
                format!("{}-{}", format_time(item.start_time), format_time(item.end_time)),
                item.client_name
                    .clone()
                    .unwrap_or_else(|| format!("client #{}", item.client_id)),
                service_label(item.service_type_name.as_deref()).to_string(),
                paint(color_for_status(item.status), item.status.label()),
                colorize_optional(&helper),
                colorize_optional(&rec_id),
                colorize_optional(confirmed),
            ]);
        }

        print!("{}", table.render());

        let (done, pending) = progress(&items);
        println!(
            "\nLogged: {}   Pending: {}",
            paint(GREEN, &done.to_string()),
            paint(YELLOW, &pending.to_string())
        );

        Ok((done, pending))
    }
}
