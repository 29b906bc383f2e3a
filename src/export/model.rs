use crate::models::care_task::CareCategory;
use crate::models::record::RecordView;
use crate::utils::date::format_date;
use crate::utils::formatting::service_label;
use crate::utils::time::format_time;
use serde::Serialize;
use std::collections::HashMap;

/// Flat row of the record export, one per visit.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RecordExport {
    pub date: String,
    pub client: String,
    pub start: String,
    pub end: String,
    pub minutes: i64,
    pub service: String,
    pub tasks: String,
    pub note: String,
    pub helper: String,
    pub confirmed: String,

    // Used by the PDF record sheet only.
    #[serde(skip)]
    pub client_id: i64,
    #[serde(skip)]
    pub body_tasks: String,
    #[serde(skip)]
    pub life_tasks: String,
}

impl RecordExport {
    /// `labels` holds the settings store, for `label.<code>` overrides.
    pub fn from_view(view: &RecordView, labels: &HashMap<String, String>) -> Self {
        let r = &view.record;
        Self {
            date: format_date(r.date),
            client: view.client_name.clone(),
            start: format_time(r.start_time),
            end: format_time(r.end_time),
            minutes: r.total_minutes,
            service: service_label(r.service_type_name.as_deref()).to_string(),
            tasks: r.care_tasks.describe(labels),
            note: r.note.clone(),
            helper: view.helper_name.clone(),
            confirmed: r
                .confirmation
                .as_ref()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            client_id: r.client_id,
            body_tasks: r.care_tasks.describe_category(CareCategory::BodyCare, labels),
            life_tasks: r
                .care_tasks
                .describe_category(CareCategory::LifeSupport, labels),
        }
    }

    pub(crate) fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.client.clone(),
            self.start.clone(),
            self.end.clone(),
            self.minutes.to_string(),
            self.service.clone(),
            self.tasks.clone(),
            self.note.clone(),
            self.helper.clone(),
            self.confirmed.clone(),
        ]
    }
}

/// Column order shared by every export format.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "client",
        "start",
        "end",
        "minutes",
        "service",
        "tasks",
        "note",
        "helper",
        "confirmed",
    ]
}
