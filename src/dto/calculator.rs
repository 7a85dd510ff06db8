//! DTOs used by the calculator index page.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::calculator::{CalculationResult, CalculatorSession};
use crate::domain::client::Client;
use crate::domain::leaser::Leaser;

/// Data required to render the calculator page.
#[derive(Serialize)]
pub struct CalculatorPageData {
    pub session: CalculatorSession,
    pub leasers: Vec<Leaser>,
    pub clients: Vec<Client>,
    /// One pricing row per duration the selected leaser supports.
    pub results: BTreeMap<i32, CalculationResult>,
    pub total_budget: f64,
    pub used_budget: f64,
    pub remaining_budget: f64,
    pub suggested_unit_price: Option<f64>,
    pub can_submit: bool,
}
