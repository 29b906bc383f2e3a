//! Monthly planned / actual aggregation per `(service type, start time)`.

use crate::errors::{AppError, AppResult};
use crate::models::performance::PerformanceGroup;
use crate::models::record::VisitRecord;
use crate::models::slot::DefaultWeeklySlot;
use crate::models::weekday::DayOfWeek;
use crate::utils::date::days_in_month;
use chrono::{Datelike, NaiveTime};
use std::collections::{BTreeSet, HashMap};

/// Build the planned/actual grid of one client for `year`-`month`.
///
/// `month_records` must already be restricted to that month.
pub fn build_performance_groups(
    slots: &[DefaultWeeklySlot],
    month_records: &[VisitRecord],
    year: i32,
    month: u32,
) -> AppResult<Vec<PerformanceGroup>> {
    let last_day = days_in_month(year, month)
        .ok_or_else(|| AppError::InvalidDate(format!("{year:04}-{month:02}")))?;

    let mut groups: Vec<PerformanceGroup> = Vec::new();
    let mut index: HashMap<(i64, NaiveTime), usize> = HashMap::new();

    let mut group_for = |service_type_id: i64,
                         start_time: NaiveTime,
                         name: &Option<String>,
                         groups: &mut Vec<PerformanceGroup>|
     -> usize {
        *index.entry((service_type_id, start_time)).or_insert_with(|| {
            groups.push(PerformanceGroup {
                service_type_id,
                start_time,
                service_type_name: name.clone(),
                planned_days: BTreeSet::new(),
                actual_days: BTreeSet::new(),
            });
            groups.len() - 1
        })
    };

    for day in 1..=last_day {
        let Some(weekday) = DayOfWeek::of_ymd(year, month, day) else {
            continue;
        };
        for slot in slots.iter().filter(|s| s.day_of_week == weekday) {
            let g = group_for(
                slot.service_type_id,
                slot.start_time,
                &slot.service_type_name,
                &mut groups,
            );
            groups[g].planned_days.insert(day);
        }
    }

    for rec in month_records {
        let g = group_for(
            rec.service_type_id,
            rec.start_time,
            &rec.service_type_name,
            &mut groups,
        );
        groups[g].actual_days.insert(rec.date.day());
    }

    groups.sort_by_key(|g| g.start_time);
    Ok(groups)
}

/// Planned and actual totals over all groups.
pub fn totals(groups: &[PerformanceGroup]) -> (usize, usize) {
    groups.iter().fold((0, 0), |(p, a), g| {
        (p + g.planned_count(), a + g.actual_count())
    })
}
