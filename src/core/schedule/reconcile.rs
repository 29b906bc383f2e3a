//! Daily reconciliation: weekly default slots against the visits logged on
//! one date.

use crate::models::reconciled::{ReconcileStatus, ReconciledItem};
use crate::models::record::VisitRecord;
use crate::models::slot::DefaultWeeklySlot;
use crate::models::weekday::DayOfWeek;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Merge the slots due on `date` with `day_records` into one worklist.
///
/// - each slot takes the first not-yet-used record with the same
///   `(client_id, service_type_id)`; a record satisfies at most one slot;
/// - matched items carry the record's actual times and the slot's label;
/// - slots without a record are `Pending` at their nominal times;
/// - records left over are `Unplanned`;
/// - output is ordered by start time, ties keep append order.
pub fn reconcile_day<'a>(
    date: NaiveDate,
    slots: &[DefaultWeeklySlot],
    day_records: &'a [VisitRecord],
    client_names: &HashMap<i64, String>,
) -> Vec<ReconciledItem<'a>> {
    let weekday = DayOfWeek::of(date);
    let name_of = |id: i64| client_names.get(&id).cloned();

    let mut consumed = vec![false; day_records.len()];
    let mut items = Vec::new();

    for slot in slots.iter().filter(|s| s.day_of_week == weekday) {
        let found = day_records.iter().enumerate().position(|(i, r)| {
            !consumed[i]
                && r.client_id == slot.client_id
                && r.service_type_id == slot.service_type_id
        });

        let item = match found {
            Some(i) => {
                consumed[i] = true;
                let rec = &day_records[i];
                ReconciledItem {
                    client_id: slot.client_id,
                    client_name: name_of(slot.client_id),
                    start_time: rec.start_time,
                    end_time: rec.end_time,
                    service_type_name: slot.service_type_name.clone(),
                    status: ReconcileStatus::Matched,
                    record: Some(rec),
                }
            }
            None => ReconciledItem {
                client_id: slot.client_id,
                client_name: name_of(slot.client_id),
                start_time: slot.start_time,
                end_time: slot.end_time,
                service_type_name: slot.service_type_name.clone(),
                status: ReconcileStatus::Pending,
                record: None,
            },
        };
        items.push(item);
    }

    for (rec, _) in day_records.iter().zip(&consumed).filter(|(_, used)| !**used) {
        items.push(ReconciledItem {
            client_id: rec.client_id,
            client_name: name_of(rec.client_id),
            start_time: rec.start_time,
            end_time: rec.end_time,
            service_type_name: rec.service_type_name.clone(),
            status: ReconcileStatus::Unplanned,
            record: Some(rec),
        });
    }

    // Vec::sort_by_key is stable.
    items.sort_by_key(|i| i.start_time);
    items
}

/// `(done, pending)` counters of a worklist; unplanned visits count as done.
pub fn progress(items: &[ReconciledItem<'_>]) -> (usize, usize) {
    let done = items.iter().filter(|i| i.status.is_done()).count();
    (done, items.len() - done)
}
