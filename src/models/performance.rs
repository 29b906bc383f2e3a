use chrono::NaiveTime;
use std::collections::BTreeSet;

/// Planned vs. actual days of one `(service type, start time)` slot in a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceGroup {
    pub service_type_id: i64,
    pub start_time: NaiveTime,
    pub service_type_name: Option<String>,
    pub planned_days: BTreeSet<u32>,
    pub actual_days: BTreeSet<u32>,
}

impl PerformanceGroup {
    pub fn planned_count(&self) -> usize {
        self.planned_days.len()
    }

    pub fn actual_count(&self) -> usize {
        self.actual_days.len()
    }
}
