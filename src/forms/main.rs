use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Form data for adding a client to the lessee directory.
pub struct AddClientForm {
    /// Company name, required.
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub vat_number: String,
}

impl AddClientForm {
    pub fn email(&self) -> Option<String> {
        Some(self.email.trim().to_string()).filter(|s| !s.is_empty())
    }

    pub fn vat_number(&self) -> Option<String> {
        Some(self.vat_number.trim().to_string()).filter(|s| !s.is_empty())
    }
}
