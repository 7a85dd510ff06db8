use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed VAT rate applied to purchases from Belgian suppliers.
pub const BELGIAN_VAT_RATE: f64 = 0.21;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupplierType {
    Belgian,
    #[default]
    Foreign,
}

impl SupplierType {
    /// VAT multiplier for gross totals. Only Belgian suppliers charge VAT
    /// in this system; everyone else invoices at 0%.
    pub fn vat_rate(self) -> f64 {
        match self {
            SupplierType::Belgian => BELGIAN_VAT_RATE,
            SupplierType::Foreign => 0.0,
        }
    }
}

impl Display for SupplierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SupplierType::Belgian => write!(f, "belgian"),
            SupplierType::Foreign => write!(f, "foreign"),
        }
    }
}

impl From<&str> for SupplierType {
    fn from(s: &str) -> Self {
        match s {
            "belgian" => SupplierType::Belgian,
            _ => SupplierType::Foreign,
        }
    }
}

impl From<String> for SupplierType {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Equipment supplier attached to order items and units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Supplier {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub supplier_type: SupplierType,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSupplier {
    pub hub_id: i32,
    pub name: String,
    pub supplier_type: SupplierType,
    pub email: Option<String>,
}

impl NewSupplier {
    #[must_use]
    pub fn new(
        hub_id: i32,
        name: String,
        supplier_type: SupplierType,
        email: Option<String>,
    ) -> Self {
        Self {
            hub_id,
            name: name.trim().to_string(),
            supplier_type,
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateSupplier {
    pub name: String,
    pub supplier_type: SupplierType,
    pub email: Option<String>,
}

impl UpdateSupplier {
    #[must_use]
    pub fn new(name: String, supplier_type: SupplierType, email: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            supplier_type,
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vat_rate_only_for_belgian_suppliers() {
        assert_eq!(SupplierType::Belgian.vat_rate(), BELGIAN_VAT_RATE);
        assert_eq!(SupplierType::Foreign.vat_rate(), 0.0);
    }

    #[test]
    fn supplier_type_round_trips_through_text() {
        assert_eq!(SupplierType::from("belgian"), SupplierType::Belgian);
        assert_eq!(SupplierType::from("foreign"), SupplierType::Foreign);
        assert_eq!(SupplierType::from("anything else"), SupplierType::Foreign);
        assert_eq!(SupplierType::Belgian.to_string(), "belgian");
    }
}
