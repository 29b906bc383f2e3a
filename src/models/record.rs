use super::care_task::CareTasks;
use super::confirmation::Confirmation;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One visit actually performed by a helper.
#[derive(Debug, Clone, Serialize)]
pub struct VisitRecord {
    pub id: i64,
    pub client_id: i64,
    pub helper_id: i64,
    pub service_type_id: i64,
    pub service_type_name: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub total_minutes: i64,
    pub care_tasks: CareTasks,
    pub note: String,
    pub confirmation: Option<Confirmation>,
}

impl VisitRecord {
    pub fn confirmed(&self) -> bool {
        self.confirmation.is_some()
    }
}

/// Record joined with the display names the reports need.
#[derive(Debug, Clone)]
pub struct RecordView {
    pub record: VisitRecord,
    pub client_name: String,
    pub helper_name: String,
}
