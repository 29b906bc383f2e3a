use super::weekday::DayOfWeek;
use chrono::NaiveTime;
use serde::Serialize;

/// Recurring weekly commitment of a client.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultWeeklySlot {
    pub id: i64,
    pub client_id: i64,
    pub service_type_id: i64,
    /// `None` when the service type can no longer be joined.
    pub service_type_name: Option<String>,
    pub default_minutes: u32,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
