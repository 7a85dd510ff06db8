//! Fulfillment tracking for equipment attached to accepted offers and
//! signed contracts.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fulfillment state of an order item or unit.
///
/// `to_order -> ordered -> received`, with `cancelled` reachable from any
/// non-terminal state. `received` and `cancelled` are terminal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    ToOrder,
    Ordered,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    /// Re-asserting the current status is allowed and treated as a no-op
    /// write by callers.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self == next {
            return true;
        }
        match (self, next) {
            (OrderStatus::ToOrder, OrderStatus::Ordered) => true,
            (OrderStatus::Ordered, OrderStatus::Received) => true,
            (OrderStatus::ToOrder | OrderStatus::Ordered, OrderStatus::Cancelled) => true,
            _ => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::ToOrder => write!(f, "to_order"),
            OrderStatus::Ordered => write!(f, "ordered"),
            OrderStatus::Received => write!(f, "received"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "ordered" => OrderStatus::Ordered,
            "received" => OrderStatus::Received,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::ToOrder,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Where an order item came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    #[default]
    Offer,
    Contract,
}

impl Display for OrderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSource::Offer => write!(f, "offer"),
            OrderSource::Contract => write!(f, "contract"),
        }
    }
}

impl From<&str> for OrderSource {
    fn from(s: &str) -> Self {
        match s {
            "contract" => OrderSource::Contract,
            _ => OrderSource::Offer,
        }
    }
}

impl From<String> for OrderSource {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Date stamps carried by anything the state machine drives.
///
/// Entering `ordered` stamps the order date once; entering `received`
/// stamps the reception date once. Existing stamps are never overwritten,
/// so toggling a status back and forth keeps the original dates.
pub fn stamped_dates(
    next: OrderStatus,
    order_date: Option<NaiveDateTime>,
    reception_date: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
    let order_date = match next {
        OrderStatus::Ordered if order_date.is_none() => Some(now),
        _ => order_date,
    };
    let reception_date = match next {
        OrderStatus::Received if reception_date.is_none() => Some(now),
        _ => reception_date,
    };
    (order_date, reception_date)
}

/// One equipment line of an accepted offer or signed contract.
/// `purchase_price` and `supplier_price` are per-unit amounts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct EquipmentOrderItem {
    pub id: i32,
    pub hub_id: i32,
    pub source_type: OrderSource,
    pub source_id: i32,
    pub title: String,
    pub quantity: i32,
    pub purchase_price: f64,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
    pub order_status: OrderStatus,
    pub order_date: Option<NaiveDateTime>,
    pub reception_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl EquipmentOrderItem {
    /// Supplier price when negotiated, purchase price otherwise.
    pub fn effective_price(&self) -> f64 {
        self.supplier_price.unwrap_or(self.purchase_price)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEquipmentOrderItem {
    pub hub_id: i32,
    pub source_type: OrderSource,
    pub source_id: i32,
    pub title: String,
    pub quantity: i32,
    pub purchase_price: f64,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
}

/// One physical unit of a split order item, tracked by serial number.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct EquipmentOrderUnit {
    pub id: i32,
    pub item_id: i32,
    pub unit_index: i32,
    pub serial_number: Option<String>,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
    pub order_status: OrderStatus,
    pub order_date: Option<NaiveDateTime>,
    pub reception_date: Option<NaiveDateTime>,
}

impl EquipmentOrderUnit {
    /// Unit-level price. `supplier_price` holds the value inherited from
    /// the parent at split time (or a later edit); units split off a parent
    /// without a negotiated price fall back to the per-unit purchase price.
    /// The parent's own supplier price is not consulted here: it is the
    /// synced mean of these values and must not feed back into them.
    pub fn effective_price(&self, parent: &EquipmentOrderItem) -> f64 {
        self.supplier_price.unwrap_or(parent.purchase_price)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEquipmentOrderUnit {
    pub item_id: i32,
    pub unit_index: i32,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
}

/// Serial number and supplier terms edited on a single unit.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateOrderUnit {
    pub serial_number: Option<String>,
    pub supplier_id: Option<i32>,
    pub supplier_price: Option<f64>,
}

impl UpdateOrderUnit {
    #[must_use]
    pub fn new(
        serial_number: Option<String>,
        supplier_id: Option<i32>,
        supplier_price: Option<f64>,
    ) -> Self {
        Self {
            serial_number: serial_number
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            supplier_id,
            supplier_price,
        }
    }
}

/// Human-readable rollup of unit statuses, shown in place of a split
/// parent's own status, e.g. "2 received, 1 ordered".
pub fn status_summary(units: &[EquipmentOrderUnit]) -> String {
    let order = [
        OrderStatus::Received,
        OrderStatus::Ordered,
        OrderStatus::ToOrder,
        OrderStatus::Cancelled,
    ];

    order
        .iter()
        .filter_map(|status| {
            let count = units.iter().filter(|u| u.order_status == *status).count();
            (count > 0).then(|| format!("{count} {status}"))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(12, 0, secs)
            .unwrap()
    }

    #[test]
    fn transitions_follow_the_state_machine() {
        use OrderStatus::*;

        assert!(ToOrder.can_transition_to(Ordered));
        assert!(Ordered.can_transition_to(Received));
        assert!(ToOrder.can_transition_to(Cancelled));
        assert!(Ordered.can_transition_to(Cancelled));

        assert!(!ToOrder.can_transition_to(Received));
        assert!(!Received.can_transition_to(Ordered));
        assert!(!Received.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(ToOrder));
        assert!(!Ordered.can_transition_to(ToOrder));
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Received.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::ToOrder.is_terminal());
        assert!(!OrderStatus::Ordered.is_terminal());
    }

    #[test]
    fn date_stamps_are_idempotent() {
        let (order_date, reception_date) =
            stamped_dates(OrderStatus::Ordered, None, None, at(0));
        assert_eq!(order_date, Some(at(0)));
        assert_eq!(reception_date, None);

        // Re-entering `ordered` later must not move the stamp.
        let (order_date, _) = stamped_dates(OrderStatus::Ordered, order_date, None, at(30));
        assert_eq!(order_date, Some(at(0)));

        let (order_date, reception_date) =
            stamped_dates(OrderStatus::Received, order_date, None, at(45));
        assert_eq!(order_date, Some(at(0)));
        assert_eq!(reception_date, Some(at(45)));

        let (_, reception_date) =
            stamped_dates(OrderStatus::Received, order_date, reception_date, at(59));
        assert_eq!(reception_date, Some(at(45)));
    }

    #[test]
    fn summary_counts_units_per_status() {
        let unit = |status| EquipmentOrderUnit {
            order_status: status,
            ..Default::default()
        };
        let units = vec![
            unit(OrderStatus::Received),
            unit(OrderStatus::Received),
            unit(OrderStatus::Ordered),
        ];

        assert_eq!(status_summary(&units), "2 received, 1 ordered");
        assert_eq!(status_summary(&[]), "");
    }
}
