use super::confirmation::SignatureMode;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub gender: String,
    pub default_service_id: Option<i64>,
    pub signature_mode: SignatureMode,
    pub active: bool,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}
