use serde::Serialize;

/// Catalog entry: a named care service with its nominal duration.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
    pub default_minutes: u32,
    pub active: bool,
}
