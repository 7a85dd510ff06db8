use serde::Deserialize;

use crate::domain::order::{OrderStatus, UpdateOrderUnit};
use crate::forms::{parse_optional_id, parse_optional_price};

#[derive(Deserialize)]
/// Form data for a status button press on an item or unit.
pub struct SetStatusForm {
    pub status: String,
}

impl SetStatusForm {
    pub fn status(&self) -> OrderStatus {
        self.status.as_str().into()
    }
}

#[derive(Deserialize)]
/// Form data for assigning a supplier and negotiated price to an item.
pub struct AssignSupplierForm {
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_price: String,
}

impl AssignSupplierForm {
    pub fn supplier_id(&self) -> Option<i32> {
        parse_optional_id(&self.supplier_id)
    }

    pub fn supplier_price(&self) -> Option<f64> {
        parse_optional_price(&self.supplier_price)
    }
}

#[derive(Deserialize)]
/// Form data for editing one unit of a split item.
pub struct SaveUnitForm {
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_price: String,
}

impl From<&SaveUnitForm> for UpdateOrderUnit {
    fn from(form: &SaveUnitForm) -> Self {
        UpdateOrderUnit::new(
            Some(form.serial_number.clone()),
            parse_optional_id(&form.supplier_id),
            parse_optional_price(&form.supplier_price),
        )
    }
}
