pub mod backup;
pub mod catalog;
pub mod daily;
pub mod log;
pub mod performance;
pub mod record;
pub mod schedule;
