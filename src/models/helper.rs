use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Helper {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub active: bool,
    /// Guest helpers are hidden from the regular list.
    pub is_guest: bool,
}

impl Helper {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}
