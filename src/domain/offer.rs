use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::calculator::OfferKind;

/// A submitted calculator session: the selected financing terms frozen at
/// submission time together with the equipment list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Offer {
    pub id: i32,
    pub hub_id: i32,
    pub client_id: i32,
    pub leaser_id: i32,
    pub kind: OfferKind,
    pub ambassador_email: Option<String>,
    pub duration_months: i32,
    pub coefficient: f64,
    pub total_budget: f64,
    pub monthly_payment: f64,
    pub accepted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl Offer {
    pub fn is_accepted(&self) -> bool {
        self.accepted_at.is_some()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOffer {
    pub hub_id: i32,
    pub client_id: i32,
    pub leaser_id: i32,
    pub kind: OfferKind,
    pub ambassador_email: Option<String>,
    pub duration_months: i32,
    pub coefficient: f64,
    pub total_budget: f64,
    pub monthly_payment: f64,
}

/// Equipment line frozen onto a submitted offer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct OfferEquipment {
    pub id: i32,
    pub offer_id: i32,
    pub object_type: String,
    pub manufacturer: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
}

impl OfferEquipment {
    pub fn total_price(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// Title used for the fulfillment record derived from this line.
    pub fn order_title(&self) -> String {
        format!("{} {}", self.manufacturer, self.description)
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewOfferEquipment {
    pub object_type: String,
    pub manufacturer: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
}
