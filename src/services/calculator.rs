//! Broker calculator: pricing conversion and budget reconciliation.
//!
//! Everything here is pure computation over the [`CalculatorSession`] value
//! object; persistence only happens at offer submission.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::calculator::{
    CalcMode, CalculationResult, CalculatorSession, EquipmentLineItem, OfferKind,
};
use crate::domain::leaser::Leaser;
use crate::domain::offer::{NewOffer, NewOfferEquipment, Offer};
use crate::domain::types::round_cents;
use crate::dto::calculator::CalculatorPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ClientReader, LeaserReader, OfferWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Tolerance for budget comparisons on cent amounts.
const BUDGET_EPSILON: f64 = 1e-6;

/// Derives one pricing row per supported duration from the leaser's
/// coefficient table.
///
/// The coefficient is percentage points of purchase price per month, so
/// `monthly = price * c / 100` and `price = monthly * 100 / c`. Entries with
/// a non-positive coefficient are omitted rather than producing NaN rows.
pub fn compute_results(
    leaser: &Leaser,
    mode: CalcMode,
    input_amount: f64,
) -> BTreeMap<i32, CalculationResult> {
    let mut results = BTreeMap::new();

    if !input_amount.is_finite() || input_amount <= 0.0 {
        return results;
    }

    for entry in leaser.coefficients.iter().filter(|e| e.is_valid()) {
        let (purchase_price, monthly_payment) = match mode {
            CalcMode::PurchasePrice => (
                input_amount,
                round_cents(input_amount * entry.coefficient / 100.0),
            ),
            CalcMode::Rent => (
                round_cents(input_amount * 100.0 / entry.coefficient),
                input_amount,
            ),
        };

        results.insert(
            entry.duration_months,
            CalculationResult {
                duration_months: entry.duration_months,
                purchase_price,
                monthly_payment,
                coefficient: entry.coefficient,
            },
        );
    }

    results
}

/// Purchase price of the selected duration; the equipment list must fit
/// inside it.
pub fn total_budget(
    session: &CalculatorSession,
    results: &BTreeMap<i32, CalculationResult>,
) -> f64 {
    session
        .selected_duration
        .and_then(|duration| results.get(&duration))
        .map(|result| result.purchase_price)
        .unwrap_or(0.0)
}

pub fn used_budget(session: &CalculatorSession) -> f64 {
    session.equipment.iter().map(|line| line.total_price()).sum()
}

pub fn remaining_budget(
    session: &CalculatorSession,
    results: &BTreeMap<i32, CalculationResult>,
) -> f64 {
    total_budget(session, results) - used_budget(session)
}

/// Pre-fill for the draft's unit price: the remaining budget spread over the
/// draft quantity. Only offered while the user has not typed a price and is
/// not editing an existing line.
pub fn suggested_unit_price(
    session: &CalculatorSession,
    results: &BTreeMap<i32, CalculationResult>,
) -> Option<f64> {
    if session.draft.unit_price.is_some() || session.draft.editing.is_some() {
        return None;
    }
    if session.draft.quantity < 1 {
        return None;
    }

    let remaining = remaining_budget(session, results);
    (remaining > 0.0).then(|| round_cents(remaining / session.draft.quantity as f64))
}

/// Validates the draft against the remaining budget and appends it to the
/// equipment list. A line consuming exactly the remaining budget passes.
/// On success the draft is cleared back to quantity 1 and empty fields.
pub fn add_equipment(
    session: &mut CalculatorSession,
    results: &BTreeMap<i32, CalculationResult>,
) -> ServiceResult<()> {
    let draft = session.draft.clone();

    if draft.object_type.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Equipment type is required".to_string(),
        ));
    }
    if draft.quantity <= 0 {
        return Err(ServiceError::Validation(
            "Quantity must be at least 1".to_string(),
        ));
    }
    let unit_price = match draft.unit_price {
        Some(price) if price > 0.0 => price,
        _ => {
            return Err(ServiceError::Validation(
                "Unit price must be greater than zero".to_string(),
            ));
        }
    };

    let total_price = draft.quantity as f64 * unit_price;
    let remaining = remaining_budget(session, results);
    if total_price > remaining + BUDGET_EPSILON {
        return Err(ServiceError::Validation(format!(
            "Equipment total {total_price:.2} exceeds the remaining budget {remaining:.2}"
        )));
    }

    session.equipment.push(EquipmentLineItem {
        id: draft.editing.unwrap_or_else(Uuid::new_v4),
        object_type: draft.object_type.trim().to_string(),
        manufacturer: draft.manufacturer.trim().to_string(),
        description: draft.description.trim().to_string(),
        quantity: draft.quantity,
        unit_price,
    });
    session.reset_draft();

    Ok(())
}

/// Removes the matching line. Absent ids are a no-op.
pub fn remove_equipment(session: &mut CalculatorSession, id: Uuid) {
    session.equipment.retain(|line| line.id != id);
}

/// Takes the line out of the list and loads it back into the draft form so
/// it can be re-submitted under the same id. Re-adding re-validates against
/// the budget freed by the removal.
pub fn edit_equipment(session: &mut CalculatorSession, id: Uuid) {
    let Some(position) = session.equipment.iter().position(|line| line.id == id) else {
        return;
    };

    let line = session.equipment.remove(position);
    session.draft.object_type = line.object_type;
    session.draft.manufacturer = line.manufacturer;
    session.draft.description = line.description;
    session.draft.quantity = line.quantity;
    session.draft.unit_price = Some(line.unit_price);
    session.draft.editing = Some(line.id);
}

/// Explicit list reorder; the target index is clamped to the list bounds.
pub fn move_equipment(session: &mut CalculatorSession, id: Uuid, new_index: usize) {
    let Some(position) = session.equipment.iter().position(|line| line.id == id) else {
        return;
    };

    let line = session.equipment.remove(position);
    let new_index = new_index.min(session.equipment.len());
    session.equipment.insert(new_index, line);
}

/// The submission gate: everything the offer needs must be selected and the
/// equipment list non-empty.
pub fn can_submit(
    session: &CalculatorSession,
    results: &BTreeMap<i32, CalculationResult>,
) -> bool {
    validate_submission(session, results).is_ok()
}

fn validate_submission(
    session: &CalculatorSession,
    results: &BTreeMap<i32, CalculationResult>,
) -> ServiceResult<CalculationResult> {
    if session.leaser_id.is_none() {
        return Err(ServiceError::Validation("Select a leaser".to_string()));
    }
    if session.client_id.is_none() {
        return Err(ServiceError::Validation("Select a client".to_string()));
    }
    if session.input_amount <= 0.0 {
        return Err(ServiceError::Validation(
            "Enter a positive amount".to_string(),
        ));
    }
    if results.is_empty() {
        return Err(ServiceError::Validation(
            "No calculation results for the selected leaser".to_string(),
        ));
    }
    let result = session
        .selected_duration
        .and_then(|duration| results.get(&duration))
        .ok_or_else(|| ServiceError::Validation("Select a contract duration".to_string()))?;
    if session.equipment.is_empty() {
        return Err(ServiceError::Validation(
            "Add at least one equipment line".to_string(),
        ));
    }
    if session.offer_kind == OfferKind::Ambassador
        && session
            .ambassador_email
            .as_deref()
            .is_none_or(|email| email.trim().is_empty())
    {
        return Err(ServiceError::Validation(
            "Select an ambassador".to_string(),
        ));
    }

    Ok(*result)
}

/// Results for the session's currently selected leaser; empty when no
/// leaser is selected or the leaser is gone.
pub fn session_results<R>(
    repo: &R,
    user: &AuthenticatedUser,
    session: &CalculatorSession,
) -> ServiceResult<BTreeMap<i32, CalculationResult>>
where
    R: LeaserReader + ?Sized,
{
    let Some(leaser_id) = session.leaser_id else {
        return Ok(BTreeMap::new());
    };

    Ok(repo
        .get_leaser_by_id(leaser_id, user.hub_id)?
        .map(|leaser| compute_results(&leaser, session.mode, session.input_amount))
        .unwrap_or_default())
}

/// Validates the session draft against the current results and appends it.
pub fn add_equipment_to_session<R>(
    repo: &R,
    user: &AuthenticatedUser,
    session: &mut CalculatorSession,
) -> ServiceResult<()>
where
    R: LeaserReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let results = session_results(repo, user, session)?;
    add_equipment(session, &results)
}

/// Loads everything the calculator page needs for the current session.
pub fn calculator_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    session: CalculatorSession,
) -> ServiceResult<CalculatorPageData>
where
    R: LeaserReader + ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let leasers = repo.list_leasers(user.hub_id)?;
    let clients = repo.list_clients(user.hub_id)?;
    let results = session_results(repo, user, &session)?;

    let total_budget = total_budget(&session, &results);
    let used_budget = used_budget(&session);
    let remaining_budget = total_budget - used_budget;
    let suggested_unit_price = suggested_unit_price(&session, &results);
    let can_submit = can_submit(&session, &results);

    Ok(CalculatorPageData {
        session,
        leasers,
        clients,
        results,
        total_budget,
        used_budget,
        remaining_budget,
        suggested_unit_price,
        can_submit,
    })
}

/// Freezes the session into a persisted offer with its equipment lines and
/// clears the calculator.
pub fn submit_offer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    session: &mut CalculatorSession,
) -> ServiceResult<Offer>
where
    R: OfferWriter + LeaserReader + ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let leaser_id = session
        .leaser_id
        .ok_or_else(|| ServiceError::Validation("Select a leaser".to_string()))?;
    let leaser = repo
        .get_leaser_by_id(leaser_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let client_id = session
        .client_id
        .ok_or_else(|| ServiceError::Validation("Select a client".to_string()))?;
    repo.get_client_by_id(client_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let results = compute_results(&leaser, session.mode, session.input_amount);
    let result = validate_submission(session, &results)?;

    let new_offer = NewOffer {
        hub_id: user.hub_id,
        client_id,
        leaser_id,
        kind: session.offer_kind,
        ambassador_email: session
            .ambassador_email
            .as_deref()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty()),
        duration_months: result.duration_months,
        coefficient: result.coefficient,
        total_budget: result.purchase_price,
        monthly_payment: result.monthly_payment,
    };

    let lines: Vec<NewOfferEquipment> = session
        .equipment
        .iter()
        .map(|line| NewOfferEquipment {
            object_type: line.object_type.clone(),
            manufacturer: line.manufacturer.clone(),
            description: line.description.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect();

    let offer = repo.create_offer(&new_offer, &lines)?;

    *session = CalculatorSession::default();

    Ok(offer)
}
