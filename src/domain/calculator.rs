//! Value objects backing the broker calculator session.
//!
//! The session is an explicit, serializable value carried in the cookie
//! session between requests. Nothing in here touches storage; the pricing
//! and budget logic lives in [`crate::services::calculator`].

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the price/payment relation the user is typing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CalcMode {
    /// The input amount is the purchase price; payments are derived.
    #[default]
    PurchasePrice,
    /// The input amount is the target monthly payment; prices are derived.
    Rent,
}

impl Display for CalcMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcMode::PurchasePrice => write!(f, "purchase_price"),
            CalcMode::Rent => write!(f, "rent"),
        }
    }
}

impl From<&str> for CalcMode {
    fn from(s: &str) -> Self {
        match s {
            "rent" => CalcMode::Rent,
            _ => CalcMode::PurchasePrice,
        }
    }
}

impl From<String> for CalcMode {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Derived pricing row for one contract duration. Never persisted;
/// recomputed from the leaser's coefficient table on every input change.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub duration_months: i32,
    pub purchase_price: f64,
    pub monthly_payment: f64,
    pub coefficient: f64,
}

/// How the submitted offer is brokered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    #[default]
    Direct,
    Ambassador,
}

impl Display for OfferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferKind::Direct => write!(f, "direct"),
            OfferKind::Ambassador => write!(f, "ambassador"),
        }
    }
}

impl From<&str> for OfferKind {
    fn from(s: &str) -> Self {
        match s {
            "ambassador" => OfferKind::Ambassador,
            _ => OfferKind::Direct,
        }
    }
}

impl From<String> for OfferKind {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// One line of the draft equipment list. Identifiers are generated locally
/// when the line is added; the list only becomes durable on offer submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EquipmentLineItem {
    pub id: Uuid,
    pub object_type: String,
    pub manufacturer: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
}

impl EquipmentLineItem {
    pub fn total_price(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// In-progress equipment form state, kept alongside the list so an edit can
/// reload a line back into the form under its original identifier.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EquipmentDraft {
    pub object_type: String,
    pub manufacturer: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Option<f64>,
    /// Set while an existing line is being edited; its id is reused on re-add.
    pub editing: Option<Uuid>,
}

impl Default for EquipmentDraft {
    fn default() -> Self {
        Self {
            object_type: String::new(),
            manufacturer: String::new(),
            description: String::new(),
            quantity: 1,
            unit_price: None,
            editing: None,
        }
    }
}

/// The whole calculator state for one user session.
///
/// Owned explicitly and passed by reference into the budget logic; there is
/// no module-level mutable state anywhere in the calculator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct CalculatorSession {
    pub mode: CalcMode,
    pub input_amount: f64,
    pub leaser_id: Option<i32>,
    pub client_id: Option<i32>,
    pub selected_duration: Option<i32>,
    pub offer_kind: OfferKind,
    pub ambassador_email: Option<String>,
    pub equipment: Vec<EquipmentLineItem>,
    pub draft: EquipmentDraft,
}

impl CalculatorSession {
    /// Clears the draft form back to its initial state (quantity 1, empty
    /// fields), keeping the rest of the session untouched.
    pub fn reset_draft(&mut self) {
        self.draft = EquipmentDraft::default();
    }
}
