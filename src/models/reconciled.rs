use super::record::VisitRecord;
use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStatus {
    /// A planned slot satisfied by a logged visit.
    Matched,
    /// A planned slot with no visit logged yet.
    Pending,
    /// A logged visit with no planned slot left to satisfy.
    Unplanned,
}

impl ReconcileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileStatus::Matched => "done",
            ReconcileStatus::Pending => "pending",
            ReconcileStatus::Unplanned => "extra",
        }
    }

    pub fn is_done(&self) -> bool {
        !matches!(self, ReconcileStatus::Pending)
    }
}

/// One line of the daily worklist.
#[derive(Debug, Clone)]
pub struct ReconciledItem<'a> {
    pub client_id: i64,
    pub client_name: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service_type_name: Option<String>,
    pub status: ReconcileStatus,
    pub record: Option<&'a VisitRecord>,
}
