//! DTOs used by the equipment orders dashboard.

use serde::Serialize;

use crate::domain::order::{EquipmentOrderItem, EquipmentOrderUnit};
use crate::domain::supplier::Supplier;
use crate::domain::types::round_cents;
use crate::pagination::Paginated;

/// Net and VAT-inclusive money for one status column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusBucket {
    pub net: f64,
    pub gross: f64,
}

/// Money totals shown in the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrderTotals {
    pub to_order: StatusBucket,
    pub ordered: StatusBucket,
    pub received: StatusBucket,
}

impl OrderTotals {
    /// Rounds every figure to cents after accumulation.
    pub fn round(&mut self) {
        for bucket in [&mut self.to_order, &mut self.ordered, &mut self.received] {
            bucket.net = round_cents(bucket.net);
            bucket.gross = round_cents(bucket.gross);
        }
    }
}

/// One unit row rendered under a split item.
#[derive(Debug, Serialize)]
pub struct UnitRow {
    pub unit: EquipmentOrderUnit,
    pub supplier_name: Option<String>,
    pub effective_price: f64,
}

/// One dashboard row: the item, its display status (own status or the unit
/// rollup once split), and its units.
#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub item: EquipmentOrderItem,
    pub supplier_name: Option<String>,
    pub status_label: String,
    pub units: Vec<UnitRow>,
}

/// Data required to render the orders dashboard.
#[derive(Debug, Serialize)]
pub struct OrdersPageData {
    pub orders: Paginated<OrderRow>,
    pub totals: OrderTotals,
    /// Suppliers offered in the assignment dropdowns.
    pub suppliers: Vec<Supplier>,
}
