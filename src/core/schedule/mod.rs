//! Schedule reconciliation and monthly aggregation engine.
//!
//! Pure functions over already loaded slots and records; no I/O.

pub mod performance;
pub mod reconcile;

pub use performance::build_performance_groups;
pub use reconcile::reconcile_day;
