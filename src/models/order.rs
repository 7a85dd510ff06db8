//! Diesel models for equipment fulfillment records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    EquipmentOrderItem as DomainOrderItem, EquipmentOrderUnit as DomainOrderUnit,
    NewEquipmentOrderItem as DomainNewOrderItem, NewEquipmentOrderUnit as DomainNewOrderUnit,
    UpdateOrderUnit as DomainUpdateOrderUnit,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::equipment_order_items)]
/// Diesel model for [`crate::domain::order::EquipmentOrderItem`].
pub struct EquipmentOrderItem {
    pub id: i32,
    pub hub_id: i32,
    pub source_type: String,
    pub source_id: i32,
    pub title: String,
    pub quantity: i32,
    pub purchase_price: f64,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
    pub order_status: String,
    pub order_date: Option<NaiveDateTime>,
    pub reception_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::equipment_order_items)]
/// Insertable form of [`EquipmentOrderItem`].
pub struct NewEquipmentOrderItem<'a> {
    pub hub_id: i32,
    pub source_type: String,
    pub source_id: i32,
    pub title: &'a str,
    pub quantity: i32,
    pub purchase_price: f64,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
    pub order_status: String,
}

/// Status change written by the state machine; dates are passed through
/// fully resolved so re-entries never move an existing stamp.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::equipment_order_items)]
#[diesel(treat_none_as_null = true)]
pub struct OrderItemStatusChangeset {
    pub order_status: String,
    pub order_date: Option<NaiveDateTime>,
    pub reception_date: Option<NaiveDateTime>,
}

/// Supplier assignment written from the orders dashboard.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::equipment_order_items)]
#[diesel(treat_none_as_null = true)]
pub struct OrderItemSupplierChangeset {
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::equipment_order_units)]
#[diesel(belongs_to(EquipmentOrderItem, foreign_key = item_id))]
/// Diesel model for [`crate::domain::order::EquipmentOrderUnit`].
pub struct EquipmentOrderUnit {
    pub id: i32,
    pub item_id: i32,
    pub unit_index: i32,
    pub serial_number: Option<String>,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
    pub order_status: String,
    pub order_date: Option<NaiveDateTime>,
    pub reception_date: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::equipment_order_units)]
/// Insertable form of [`EquipmentOrderUnit`].
pub struct NewEquipmentOrderUnit {
    pub item_id: i32,
    pub unit_index: i32,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
    pub order_status: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::equipment_order_units)]
#[diesel(treat_none_as_null = true)]
pub struct OrderUnitStatusChangeset {
    pub order_status: String,
    pub order_date: Option<NaiveDateTime>,
    pub reception_date: Option<NaiveDateTime>,
}

/// Serial number and supplier terms edited per unit.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::equipment_order_units)]
#[diesel(treat_none_as_null = true)]
pub struct OrderUnitSaveChangeset<'a> {
    pub serial_number: Option<&'a str>,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
}

impl<'a> From<&'a DomainUpdateOrderUnit> for OrderUnitSaveChangeset<'a> {
    fn from(updates: &'a DomainUpdateOrderUnit) -> Self {
        Self {
            serial_number: updates.serial_number.as_deref(),
            supplier_id: updates.supplier_id,
            supplier_price: updates.supplier_price,
        }
    }
}

impl From<EquipmentOrderItem> for DomainOrderItem {
    fn from(item: EquipmentOrderItem) -> Self {
        Self {
            id: item.id,
            hub_id: item.hub_id,
            source_type: item.source_type.into(),
            source_id: item.source_id,
            title: item.title,
            quantity: item.quantity,
            purchase_price: item.purchase_price,
            supplier_id: item.supplier_id,
            supplier_price: item.supplier_price,
            order_status: item.order_status.into(),
            order_date: item.order_date,
            reception_date: item.reception_date,
            created_at: item.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewOrderItem> for NewEquipmentOrderItem<'a> {
    fn from(item: &'a DomainNewOrderItem) -> Self {
        Self {
            hub_id: item.hub_id,
            source_type: item.source_type.to_string(),
            source_id: item.source_id,
            title: item.title.as_str(),
            quantity: item.quantity,
            purchase_price: item.purchase_price,
            supplier_id: item.supplier_id,
            supplier_price: item.supplier_price,
            order_status: crate::domain::order::OrderStatus::ToOrder.to_string(),
        }
    }
}

impl From<EquipmentOrderUnit> for DomainOrderUnit {
    fn from(unit: EquipmentOrderUnit) -> Self {
        Self {
            id: unit.id,
            item_id: unit.item_id,
            unit_index: unit.unit_index,
            serial_number: unit.serial_number,
            supplier_id: unit.supplier_id,
            supplier_price: unit.supplier_price,
            order_status: unit.order_status.into(),
            order_date: unit.order_date,
            reception_date: unit.reception_date,
        }
    }
}

impl From<&DomainNewOrderUnit> for NewEquipmentOrderUnit {
    fn from(unit: &DomainNewOrderUnit) -> Self {
        Self {
            item_id: unit.item_id,
            unit_index: unit.unit_index,
            supplier_id: unit.supplier_id,
            supplier_price: unit.supplier_price,
            order_status: crate::domain::order::OrderStatus::ToOrder.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderSource, OrderStatus};
    use chrono::Utc;

    #[test]
    fn item_into_domain_parses_enums() {
        let db_item = EquipmentOrderItem {
            id: 1,
            hub_id: 1,
            source_type: "contract".to_string(),
            source_id: 9,
            title: "Lenovo T14".to_string(),
            quantity: 3,
            purchase_price: 950.0,
            supplier_id: None,
            supplier_price: None,
            order_status: "ordered".to_string(),
            order_date: Some(Utc::now().naive_utc()),
            reception_date: None,
            created_at: Utc::now().naive_utc(),
        };

        let domain: DomainOrderItem = db_item.into();
        assert_eq!(domain.source_type, OrderSource::Contract);
        assert_eq!(domain.order_status, OrderStatus::Ordered);
        assert_eq!(domain.effective_price(), 950.0);
    }

    #[test]
    fn new_items_and_units_always_start_to_order() {
        let domain = DomainNewOrderItem {
            hub_id: 1,
            source_type: OrderSource::Offer,
            source_id: 4,
            title: "Scanner".to_string(),
            quantity: 1,
            purchase_price: 100.0,
            supplier_id: None,
            supplier_price: None,
        };
        let new_item: NewEquipmentOrderItem = (&domain).into();
        assert_eq!(new_item.order_status, "to_order");

        let domain_unit = DomainNewOrderUnit {
            item_id: 1,
            unit_index: 2,
            supplier_id: Some(5),
            supplier_price: Some(90.0),
        };
        let new_unit: NewEquipmentOrderUnit = (&domain_unit).into();
        assert_eq!(new_unit.order_status, "to_order");
        assert_eq!(new_unit.supplier_id, Some(5));
    }
}
