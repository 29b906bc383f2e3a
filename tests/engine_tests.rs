use carelog::core::schedule::performance::totals;
use carelog::core::schedule::reconcile::progress;
use carelog::core::schedule::{build_performance_groups, reconcile_day};
use carelog::models::care_task::CareTasks;
use carelog::models::reconciled::ReconcileStatus;
use carelog::models::record::VisitRecord;
use carelog::models::slot::DefaultWeeklySlot;
use carelog::models::weekday::DayOfWeek;
use carelog::utils::date::days_in_month;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn slot(id: i64, client: i64, service: i64, day: DayOfWeek, start: &str, end: &str) -> DefaultWeeklySlot {
    DefaultWeeklySlot {
        id,
        client_id: client,
        service_type_id: service,
        service_type_name: Some(format!("service {service}")),
        default_minutes: 40,
        day_of_week: day,
        start_time: t(start),
        end_time: t(end),
    }
}

fn record(id: i64, client: i64, service: i64, date: &str, start: &str, end: &str) -> VisitRecord {
    VisitRecord {
        id,
        client_id: client,
        helper_id: 1,
        service_type_id: service,
        service_type_name: Some(format!("service {service}")),
        date: d(date),
        start_time: t(start),
        end_time: t(end),
        total_minutes: 0,
        care_tasks: CareTasks::default(),
        note: String::new(),
        confirmation: None,
    }
}

fn names() -> HashMap<i64, String> {
    HashMap::from([(1, "Sato Hana".to_string()), (2, "Ito Ken".to_string())])
}

// 2025-09-01 is a Monday, 2025-09-02 a Tuesday.

#[test]
fn test_matched_slot_takes_record_times() {
    let slots = [slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40")];
    let recs = [record(10, 1, 1, "2025-09-01", "09:05", "09:45")];

    let items = reconcile_day(d("2025-09-01"), &slots, &recs, &names());

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, ReconcileStatus::Matched);
    assert_eq!(items[0].start_time, t("09:05"));
    assert_eq!(items[0].end_time, t("09:45"));
    assert_eq!(items[0].record.map(|r| r.id), Some(10));
    assert_eq!(items[0].client_name.as_deref(), Some("Sato Hana"));
}

#[test]
fn test_slot_without_record_is_pending() {
    let slots = [slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40")];

    let items = reconcile_day(d("2025-09-01"), &slots, &[], &names());

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, ReconcileStatus::Pending);
    assert_eq!(items[0].start_time, t("09:00"));
    assert!(items[0].record.is_none());
}

#[test]
fn test_visit_without_slot_is_unplanned() {
    let slots = [slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40")];
    let recs = [record(10, 1, 1, "2025-09-02", "14:00", "15:00")];

    let items = reconcile_day(d("2025-09-02"), &slots, &recs, &names());

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].status, ReconcileStatus::Unplanned);
    assert_eq!(items[0].start_time, t("14:00"));
}

#[test]
fn test_record_satisfies_at_most_one_slot() {
    let slots = [
        slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40"),
        slot(2, 1, 1, DayOfWeek::Monday, "17:00", "17:40"),
    ];
    let recs = [record(10, 1, 1, "2025-09-01", "09:10", "09:50")];

    let items = reconcile_day(d("2025-09-01"), &slots, &recs, &names());

    assert_eq!(items.len(), 2);
    let matched: Vec<_> = items
        .iter()
        .filter(|i| i.status == ReconcileStatus::Matched)
        .collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(items[1].status, ReconcileStatus::Pending);
    assert_eq!(items[1].start_time, t("17:00"));
}

#[test]
fn test_same_service_twice_pairs_in_input_order() {
    let slots = [
        slot(1, 1, 1, DayOfWeek::Monday, "08:00", "08:30"),
        slot(2, 1, 1, DayOfWeek::Monday, "18:00", "18:30"),
    ];
    let recs = [
        record(10, 1, 1, "2025-09-01", "08:05", "08:35"),
        record(11, 1, 1, "2025-09-01", "18:10", "18:40"),
    ];

    let items = reconcile_day(d("2025-09-01"), &slots, &recs, &names());

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].record.map(|r| r.id), Some(10));
    assert_eq!(items[1].record.map(|r| r.id), Some(11));
    assert!(items.iter().all(|i| i.status == ReconcileStatus::Matched));
}

#[test]
fn test_other_client_or_service_does_not_match() {
    let slots = [slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40")];
    let recs = [
        record(10, 2, 1, "2025-09-01", "09:00", "09:40"),
        record(11, 1, 2, "2025-09-01", "11:00", "11:45"),
    ];

    let items = reconcile_day(d("2025-09-01"), &slots, &recs, &names());

    let statuses: Vec<_> = items.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![
            ReconcileStatus::Pending,
            ReconcileStatus::Unplanned,
            ReconcileStatus::Unplanned
        ]
    );
    // Completeness: every slot and every record appears exactly once.
    assert_eq!(items.len(), slots.len() + recs.len());
}

#[test]
fn test_output_sorted_and_ties_keep_append_order() {
    let slots = [
        slot(1, 2, 1, DayOfWeek::Monday, "10:00", "10:40"),
        slot(2, 1, 1, DayOfWeek::Monday, "08:00", "08:40"),
    ];
    // Unplanned visit at the same time as the pending 10:00 slot.
    let recs = [record(10, 1, 2, "2025-09-01", "10:00", "10:30")];

    let items = reconcile_day(d("2025-09-01"), &slots, &recs, &names());

    let times: Vec<_> = items.iter().map(|i| i.start_time).collect();
    assert_eq!(times, vec![t("08:00"), t("10:00"), t("10:00")]);
    assert_eq!(items[1].status, ReconcileStatus::Pending);
    assert_eq!(items[2].status, ReconcileStatus::Unplanned);
}

#[test]
fn test_slots_of_other_weekdays_are_ignored() {
    let slots = [slot(1, 1, 1, DayOfWeek::Friday, "09:00", "09:40")];
    assert!(reconcile_day(d("2025-09-01"), &slots, &[], &names()).is_empty());
}

#[test]
fn test_unknown_client_and_service_resolve_to_none() {
    let mut s = slot(1, 9, 1, DayOfWeek::Monday, "09:00", "09:40");
    s.service_type_name = None;

    let items = reconcile_day(d("2025-09-01"), &[s], &[], &names());

    assert_eq!(items[0].client_name, None);
    assert_eq!(items[0].service_type_name, None);
}

#[test]
fn test_progress_counts_unplanned_as_done() {
    let slots = [
        slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40"),
        slot(2, 1, 2, DayOfWeek::Monday, "13:00", "13:45"),
    ];
    let recs = [
        record(10, 1, 1, "2025-09-01", "09:00", "09:40"),
        record(11, 2, 1, "2025-09-01", "15:00", "16:00"),
    ];

    let items = reconcile_day(d("2025-09-01"), &slots, &recs, &names());
    assert_eq!(progress(&items), (2, 1));
}

#[test]
fn test_empty_inputs_give_empty_output() {
    assert!(reconcile_day(d("2025-09-01"), &[], &[], &HashMap::new()).is_empty());
    assert!(build_performance_groups(&[], &[], 2025, 9).unwrap().is_empty());
}

// March 2024 has 31 days and Mondays on the 4th, 11th, 18th and 25th.

#[test]
fn test_monthly_planned_and_actual_days() {
    let slots = [slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40")];
    let recs = [
        record(10, 1, 1, "2024-03-04", "09:00", "09:40"),
        record(11, 1, 1, "2024-03-11", "09:00", "09:40"),
        record(12, 1, 1, "2024-03-25", "09:00", "09:40"),
    ];

    let groups = build_performance_groups(&slots, &recs, 2024, 3).unwrap();

    assert_eq!(groups.len(), 1);
    let g = &groups[0];
    assert_eq!(g.planned_days.iter().copied().collect::<Vec<_>>(), vec![4, 11, 18, 25]);
    assert_eq!(g.planned_count(), 4);
    assert_eq!(g.actual_count(), 3);
    assert_eq!(totals(&groups), (4, 3));
}

#[test]
fn test_two_visits_same_day_count_once() {
    let recs = [
        record(10, 1, 1, "2024-03-04", "09:00", "09:40"),
        record(11, 1, 1, "2024-03-04", "09:00", "09:30"),
    ];

    let groups = build_performance_groups(&[], &recs, 2024, 3).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].actual_count(), 1);
    assert_eq!(groups[0].planned_count(), 0);
}

#[test]
fn test_off_schedule_time_forms_its_own_group() {
    let slots = [slot(1, 1, 1, DayOfWeek::Monday, "09:00", "09:40")];
    let recs = [record(10, 1, 1, "2024-03-04", "09:05", "09:45")];

    let groups = build_performance_groups(&slots, &recs, 2024, 3).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].start_time, t("09:00"));
    assert_eq!(groups[0].actual_count(), 0);
    assert_eq!(groups[1].start_time, t("09:05"));
    assert_eq!(groups[1].planned_count(), 0);
    assert_eq!(groups[1].actual_count(), 1);
}

#[test]
fn test_groups_sorted_by_start_time() {
    let slots = [
        slot(1, 1, 2, DayOfWeek::Tuesday, "14:00", "14:45"),
        slot(2, 1, 1, DayOfWeek::Monday, "09:00", "09:40"),
    ];

    let groups = build_performance_groups(&slots, &[], 2024, 3).unwrap();

    let starts: Vec<_> = groups.iter().map(|g| g.start_time).collect();
    assert_eq!(starts, vec![t("09:00"), t("14:00")]);
    assert_eq!(groups[1].planned_count(), 4); // Tuesdays 5, 12, 19, 26
}

#[test]
fn test_leap_february() {
    assert_eq!(days_in_month(2024, 2), Some(29));
    assert_eq!(days_in_month(2023, 2), Some(28));
    assert_eq!(days_in_month(2000, 2), Some(29));
    assert_eq!(days_in_month(1900, 2), Some(28));

    // Thursday 2024-02-29 only exists in a leap year.
    let slots = [slot(1, 1, 1, DayOfWeek::Thursday, "09:00", "09:40")];
    let g24 = build_performance_groups(&slots, &[], 2024, 2).unwrap();
    assert!(g24[0].planned_days.contains(&29));
    assert_eq!(g24[0].planned_count(), 5);
}

#[test]
fn test_invalid_month_is_an_error() {
    assert!(build_performance_groups(&[], &[], 2024, 13).is_err());
    assert!(build_performance_groups(&[], &[], 2024, 0).is_err());
}
