use crate::config::Config;
use crate::core::schedule::build_performance_groups;
use crate::core::schedule::performance::totals;
use crate::db::pool::DbPool;
use crate::db::records::{self, RecordFilter};
use crate::db::{clients, slots};
use crate::errors::AppResult;
use crate::models::client::Client;
use crate::models::performance::PerformanceGroup;
use crate::models::record::VisitRecord;
use crate::models::weekday::DayOfWeek;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RESET, color_for_balance, paint};
use crate::utils::date::{days_in_month, month_bounds, month_name};
use crate::utils::formatting::service_label;
use crate::utils::table::Table;
use crate::utils::time::format_time;

/// Planned/actual sheet of one client for one month.
#[derive(Debug, Clone)]
pub struct ClientPerformance {
    pub client: Client,
    pub groups: Vec<PerformanceGroup>,
}

impl ClientPerformance {
    pub fn totals(&self) -> (usize, usize) {
        totals(&self.groups)
    }
}

pub struct PerformanceLogic;

impl PerformanceLogic {
    /// One sheet per client (or only `client_id`). When every client is
    /// requested, clients with neither slots nor visits are left out.
    pub fn build(
        pool: &DbPool,
        year: i32,
        month: u32,
        client_id: Option<i64>,
    ) -> AppResult<Vec<ClientPerformance>> {
        let (first, last) = month_bounds(year, month)?;

        let targets = match client_id {
            Some(id) => vec![clients::get(pool, id)?],
            None => clients::list(pool)?,
        };

        let mut out = Vec::new();
        for client in targets {
            let client_slots = slots::list_for_client(pool, client.id)?;
            let filter = RecordFilter {
                client_id: Some(client.id),
                from: Some(first),
                to: Some(last),
                ..RecordFilter::default()
            };
            let month_records: Vec<VisitRecord> = records::query(pool, &filter)?
                .into_iter()
                .map(|v| v.record)
                .collect();

            let groups = build_performance_groups(&client_slots, &month_records, year, month)?;
            if groups.is_empty() && client_id.is_none() {
                continue;
            }
            out.push(ClientPerformance { client, groups });
        }

        Ok(out)
    }

    pub fn print(cfg: &Config, sheets: &[ClientPerformance], year: i32, month: u32) {
        if sheets.is_empty() {
            info("No schedule or visits found for this month.");
            return;
        }

        let last_day = days_in_month(year, month).unwrap_or(0);
        let sep = cfg.separator_char.chars().next().unwrap_or('-');

        for sheet in sheets {
            header(format!(
                "{} · {} {}",
                sheet.client.full_name(),
                month_name(month),
                year
            ));

            let mut headers = vec![
                "Service".to_string(),
                "Time".to_string(),
                "#".to_string(),
                String::new(),
            ];
            headers.extend((1..=last_day).map(|d| {
                let weekend = matches!(
                    DayOfWeek::of_ymd(year, month, d),
                    Some(DayOfWeek::Sunday | DayOfWeek::Saturday)
                );
                if weekend {
                    paint(CYAN, &d.to_string())
                } else {
                    d.to_string()
                }
            }));

            let mut table = Table::new(headers, sep);

            for g in &sheet.groups {
                let label = service_label(g.service_type_name.as_deref()).to_string();
                let time = format_time(g.start_time);
                let balance = color_for_balance(g.planned_count(), g.actual_count());

                for (kind, days, count) in [
                    ("P", &g.planned_days, g.planned_count()),
                    ("A", &g.actual_days, g.actual_count()),
                ] {
                    let mut row = vec![
                        if kind == "P" { label.clone() } else { String::new() },
                        time.clone(),
                        if kind == "A" {
                            paint(balance, &count.to_string())
                        } else {
                            count.to_string()
                        },
                        kind.to_string(),
                    ];
                    row.extend((1..=last_day).map(|d| {
                        if days.contains(&d) {
                            "●".to_string()
                        } else {
                            format!("{GREY}·{RESET}")
                        }
                    }));
                    table.add_row(row);
                }
            }

            print!("{}", table.render());

            let (planned, actual) = sheet.totals();
            println!(
                "Planned visits: {}   Actual visits: {}",
                planned,
                paint(color_for_balance(planned, actual), &actual.to_string())
            );
        }
    }
}
