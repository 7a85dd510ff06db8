use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lessee company shown in the calculator's client selector.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub vat_number: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub hub_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub vat_number: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        hub_id: i32,
        name: String,
        email: Option<String>,
        vat_number: Option<String>,
    ) -> Self {
        Self {
            hub_id,
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            vat_number: vat_number
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
        }
    }
}
