use serde::Deserialize;
use validator::Validate;

use crate::domain::supplier::SupplierType;

#[derive(Deserialize, Validate)]
/// Form data for adding a supplier.
pub struct AddSupplierForm {
    /// Supplier display name, required.
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub supplier_type: String,
    #[serde(default)]
    pub email: String,
}

impl AddSupplierForm {
    pub fn supplier_type(&self) -> SupplierType {
        self.supplier_type.as_str().into()
    }

    pub fn email(&self) -> Option<String> {
        Some(self.email.trim().to_string()).filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing an existing supplier.
pub struct SaveSupplierForm {
    pub id: i32,
    /// Supplier display name, required.
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub supplier_type: String,
    #[serde(default)]
    pub email: String,
}

impl SaveSupplierForm {
    pub fn supplier_type(&self) -> SupplierType {
        self.supplier_type.as_str().into()
    }

    pub fn email(&self) -> Option<String> {
        Some(self.email.trim().to_string()).filter(|s| !s.is_empty())
    }
}
