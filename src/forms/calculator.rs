use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::calculator::CalculatorSession;
use crate::forms::{parse_optional_id, parse_optional_price};

/// Form data for the calculator's input panel.
///
/// Selects post empty strings when nothing is chosen, so the optional
/// fields arrive as raw text and are parsed leniently.
#[derive(Deserialize)]
pub struct CalculatorForm {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub input_amount: String,
    #[serde(default)]
    pub leaser_id: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub offer_kind: String,
    #[serde(default)]
    pub ambassador_email: String,
}

impl CalculatorForm {
    /// Applies the posted inputs onto the session, leaving the equipment
    /// list and draft untouched.
    pub fn apply_to(&self, session: &mut CalculatorSession) {
        session.mode = self.mode.as_str().into();
        session.input_amount = parse_optional_price(&self.input_amount).unwrap_or(0.0);
        session.leaser_id = parse_optional_id(&self.leaser_id);
        session.client_id = parse_optional_id(&self.client_id);
        session.selected_duration = parse_optional_id(&self.duration);
        session.offer_kind = self.offer_kind.as_str().into();
        session.ambassador_email = Some(self.ambassador_email.trim().to_lowercase())
            .filter(|email| !email.is_empty());
    }
}

#[derive(Deserialize, Validate)]
/// Form data for adding an equipment line to the draft list.
pub struct AddEquipmentForm {
    /// Equipment category, required.
    #[validate(length(min = 1))]
    pub object_type: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i32,
    #[serde(default)]
    pub unit_price: String,
}

impl AddEquipmentForm {
    /// Loads the posted fields into the session draft for validation by the
    /// budget reconciler.
    pub fn apply_to(&self, session: &mut CalculatorSession) {
        session.draft.object_type = self.object_type.clone();
        session.draft.manufacturer = self.manufacturer.clone();
        session.draft.description = self.description.clone();
        session.draft.quantity = self.quantity;
        session.draft.unit_price = parse_optional_price(&self.unit_price);
    }
}

#[derive(Deserialize)]
/// Form data addressing one equipment line by its local identifier.
pub struct EquipmentActionForm {
    pub id: Uuid,
}

#[derive(Deserialize)]
/// Form data for the explicit list-reorder operation.
pub struct MoveEquipmentForm {
    pub id: Uuid,
    pub new_index: usize,
}
