pub mod care_task;
pub mod client;
pub mod confirmation;
pub mod helper;
pub mod performance;
pub mod reconciled;
pub mod record;
pub mod service_type;
pub mod slot;
pub mod weekday;
