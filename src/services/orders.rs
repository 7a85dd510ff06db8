//! Services driving the equipment orders dashboard: status transitions,
//! unit splitting, price synchronization, and per-status totals.

use std::collections::HashMap;

use chrono::Utc;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::order::{
    EquipmentOrderItem, EquipmentOrderUnit, NewEquipmentOrderUnit, OrderStatus, UpdateOrderUnit,
    stamped_dates, status_summary,
};
use crate::domain::supplier::Supplier;
use crate::domain::types::round_cents;
use crate::dto::orders::{OrderRow, OrderTotals, OrdersPageData, StatusBucket, UnitRow};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{OrderItemListQuery, OrderReader, OrderWriter, SupplierReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Filters accepted by the orders dashboard.
#[derive(Debug, Default)]
pub struct OrdersQuery {
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Loads the dashboard page: filtered items with their units, supplier
/// names, aggregate status labels, and the per-status money totals.
///
/// Totals are computed over the whole filtered set, not just the current
/// page, so the header figures stay meaningful while paging.
pub fn list_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + SupplierReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = OrderItemListQuery::new(user.hub_id);
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(search) = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query = query.search(search);
    }

    let (_, all_items) = repo.list_order_items(query.clone())?;
    let all_item_ids: Vec<i32> = all_items.iter().map(|item| item.id).collect();
    let all_units = repo.list_units_for_items(&all_item_ids)?;

    let suppliers: HashMap<i32, Supplier> = repo
        .list_suppliers(user.hub_id)?
        .into_iter()
        .map(|supplier| (supplier.id, supplier))
        .collect();

    let totals = order_totals(&all_items, &all_units, &suppliers);

    let page = params.page.unwrap_or(1);
    let (total, items) =
        repo.list_order_items(query.paginate(page, DEFAULT_ITEMS_PER_PAGE))?;

    let item_ids: Vec<i32> = items.iter().map(|item| item.id).collect();
    let mut units_by_item: HashMap<i32, Vec<EquipmentOrderUnit>> = HashMap::new();
    for unit in repo.list_units_for_items(&item_ids)? {
        units_by_item.entry(unit.item_id).or_default().push(unit);
    }

    let rows: Vec<OrderRow> = items
        .into_iter()
        .map(|item| {
            let units = units_by_item.remove(&item.id).unwrap_or_default();
            let status_label = if units.is_empty() {
                item.order_status.to_string()
            } else {
                status_summary(&units)
            };
            let supplier_name = item
                .supplier_id
                .and_then(|id| suppliers.get(&id))
                .map(|supplier| supplier.name.clone());

            let unit_rows = units
                .into_iter()
                .map(|unit| {
                    let supplier_name = unit
                        .supplier_id
                        .and_then(|id| suppliers.get(&id))
                        .map(|supplier| supplier.name.clone());
                    let effective_price = unit.effective_price(&item);
                    UnitRow {
                        unit,
                        supplier_name,
                        effective_price,
                    }
                })
                .collect();

            OrderRow {
                item,
                supplier_name,
                status_label,
                units: unit_rows,
            }
        })
        .collect();

    Ok(OrdersPageData {
        orders: Paginated::new(rows, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE)),
        totals,
        suppliers: suppliers.into_values().collect(),
    })
}

/// Moves an item through the fulfillment state machine, stamping order and
/// reception dates exactly once. Split items are driven by their units.
pub fn set_item_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    item_id: i32,
    new_status: OrderStatus,
) -> ServiceResult<EquipmentOrderItem>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let item = repo
        .get_order_item_by_id(item_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if !repo.list_units(item.id)?.is_empty() {
        return Err(ServiceError::Validation(
            "Split items are tracked through their units".to_string(),
        ));
    }

    if !item.order_status.can_transition_to(new_status) {
        return Err(ServiceError::InvalidTransition {
            from: item.order_status,
            to: new_status,
        });
    }

    let (order_date, reception_date) = stamped_dates(
        new_status,
        item.order_date,
        item.reception_date,
        Utc::now().naive_utc(),
    );

    Ok(repo.set_item_status(item.id, new_status, order_date, reception_date)?)
}

/// Unit-level counterpart of [`set_item_status`].
pub fn set_unit_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    unit_id: i32,
    new_status: OrderStatus,
) -> ServiceResult<EquipmentOrderUnit>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let unit = repo
        .get_unit_by_id(unit_id)?
        .ok_or(ServiceError::NotFound)?;
    // The unit's parent carries the hub; make sure it belongs to the caller.
    repo.get_order_item_by_id(unit.item_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if !unit.order_status.can_transition_to(new_status) {
        return Err(ServiceError::InvalidTransition {
            from: unit.order_status,
            to: new_status,
        });
    }

    let (order_date, reception_date) = stamped_dates(
        new_status,
        unit.order_date,
        unit.reception_date,
        Utc::now().naive_utc(),
    );

    Ok(repo.set_unit_status(unit.id, new_status, order_date, reception_date)?)
}

/// Breaks a multi-quantity item into per-serial-number unit records.
///
/// Creates exactly `quantity` units, indexed 1..=quantity, each inheriting
/// the parent's supplier and price and starting at `to_order` regardless of
/// the parent's current status. Fails with [`ServiceError::AlreadySplit`]
/// when unit rows already exist.
pub fn split_into_units<R>(
    repo: &R,
    user: &AuthenticatedUser,
    item_id: i32,
) -> ServiceResult<usize>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let item = repo
        .get_order_item_by_id(item_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if item.quantity <= 1 {
        return Err(ServiceError::Validation(
            "Only items with more than one unit can be split".to_string(),
        ));
    }
    if !repo.list_units(item.id)?.is_empty() {
        return Err(ServiceError::AlreadySplit);
    }

    let units: Vec<NewEquipmentOrderUnit> = (1..=item.quantity)
        .map(|unit_index| NewEquipmentOrderUnit {
            item_id: item.id,
            unit_index,
            supplier_id: item.supplier_id,
            supplier_price: item.supplier_price,
        })
        .collect();

    Ok(repo.create_units(&units)?)
}

/// Assigns a supplier and negotiated price to an unsplit item.
pub fn assign_item_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    item_id: i32,
    supplier_id: Option<i32>,
    supplier_price: Option<f64>,
) -> ServiceResult<EquipmentOrderItem>
where
    R: OrderReader + OrderWriter + SupplierReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let item = repo
        .get_order_item_by_id(item_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(supplier_id) = supplier_id {
        repo.get_supplier_by_id(supplier_id, user.hub_id)?
            .ok_or(ServiceError::NotFound)?;
    }
    if let Some(price) = supplier_price
        && price < 0.0
    {
        return Err(ServiceError::Validation(
            "Supplier price cannot be negative".to_string(),
        ));
    }

    Ok(repo.set_item_supplier(item.id, supplier_id, supplier_price)?)
}

/// Saves a unit's serial number and supplier terms, then re-synchronizes
/// the parent's supplier price from its units.
pub fn save_unit<R>(
    repo: &R,
    user: &AuthenticatedUser,
    unit_id: i32,
    updates: UpdateOrderUnit,
) -> ServiceResult<EquipmentOrderUnit>
where
    R: OrderReader + OrderWriter + SupplierReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let unit = repo
        .get_unit_by_id(unit_id)?
        .ok_or(ServiceError::NotFound)?;
    let item = repo
        .get_order_item_by_id(unit.item_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(supplier_id) = updates.supplier_id {
        repo.get_supplier_by_id(supplier_id, user.hub_id)?
            .ok_or(ServiceError::NotFound)?;
    }
    if let Some(price) = updates.supplier_price
        && price < 0.0
    {
        return Err(ServiceError::Validation(
            "Supplier price cannot be negative".to_string(),
        ));
    }

    let saved = repo.save_unit(unit.id, &updates)?;
    sync_unit_prices_to_parent(repo, &item)?;

    Ok(saved)
}

/// Recomputes the parent's supplier price as the arithmetic mean of its
/// units' prices (each falling back to its inherited price) and persists it,
/// so aggregate reporting never has to re-read every unit.
pub fn sync_unit_prices_to_parent<R>(
    repo: &R,
    item: &EquipmentOrderItem,
) -> ServiceResult<Option<f64>>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    let units = repo.list_units(item.id)?;
    if units.is_empty() {
        return Ok(None);
    }

    let mean = units
        .iter()
        .map(|unit| unit.effective_price(item))
        .sum::<f64>()
        / units.len() as f64;
    let mean = round_cents(mean);

    repo.set_item_supplier(item.id, item.supplier_id, Some(mean))?;

    Ok(Some(mean))
}

/// Per-status money totals: unsplit items weigh in at
/// `effective_price * quantity` under their own status; split items
/// contribute each unit's price under the unit's status. The gross figure
/// adds VAT for lines whose supplier is Belgian.
pub fn order_totals(
    items: &[EquipmentOrderItem],
    units: &[EquipmentOrderUnit],
    suppliers: &HashMap<i32, Supplier>,
) -> OrderTotals {
    let mut totals = OrderTotals::default();
    let items_by_id: HashMap<i32, &EquipmentOrderItem> =
        items.iter().map(|item| (item.id, item)).collect();

    let vat_rate = |supplier_id: Option<i32>| {
        supplier_id
            .and_then(|id| suppliers.get(&id))
            .map(|supplier| supplier.supplier_type.vat_rate())
            .unwrap_or(0.0)
    };

    let mut split_items = std::collections::HashSet::new();
    for unit in units {
        split_items.insert(unit.item_id);
        let Some(item) = items_by_id.get(&unit.item_id) else {
            continue;
        };
        let net = unit.effective_price(item);
        let rate = vat_rate(unit.supplier_id.or(item.supplier_id));
        add_to_bucket(&mut totals, unit.order_status, net, rate);
    }

    for item in items {
        if split_items.contains(&item.id) {
            continue;
        }
        let net = item.effective_price() * item.quantity as f64;
        let rate = vat_rate(item.supplier_id);
        add_to_bucket(&mut totals, item.order_status, net, rate);
    }

    totals.round();
    totals
}

fn add_to_bucket(totals: &mut OrderTotals, status: OrderStatus, net: f64, vat_rate: f64) {
    let bucket: &mut StatusBucket = match status {
        OrderStatus::ToOrder => &mut totals.to_order,
        OrderStatus::Ordered => &mut totals.ordered,
        OrderStatus::Received => &mut totals.received,
        OrderStatus::Cancelled => return,
    };
    bucket.net += net;
    bucket.gross += net * (1.0 + vat_rate);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use mockall::predicate::eq;

    fn broker() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "broker@example.com".to_string(),
            name: "Broker".to_string(),
            hub_id: 1,
            roles: vec!["leasing".to_string()],
            exp: 4102444800,
        }
    }

    #[test]
    fn split_is_rejected_without_the_leasing_role() {
        let repo = MockRepository::new();
        let mut user = broker();
        user.roles.clear();

        let err = split_into_units(&repo, &user, 7).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn split_reports_already_split_items() {
        let mut repo = MockRepository::new();
        repo.expect_get_order_item_by_id()
            .with(eq(7), eq(1))
            .returning(|_, _| {
                Ok(Some(EquipmentOrderItem {
                    id: 7,
                    hub_id: 1,
                    quantity: 3,
                    ..Default::default()
                }))
            });
        repo.expect_list_units()
            .with(eq(7))
            .returning(|_| Ok(vec![EquipmentOrderUnit::default()]));

        let err = split_into_units(&repo, &broker(), 7).unwrap_err();
        assert!(matches!(err, ServiceError::AlreadySplit));
    }

    #[test]
    fn split_creates_one_unit_per_quantity() {
        let mut repo = MockRepository::new();
        repo.expect_get_order_item_by_id()
            .with(eq(7), eq(1))
            .returning(|_, _| {
                Ok(Some(EquipmentOrderItem {
                    id: 7,
                    hub_id: 1,
                    quantity: 3,
                    supplier_id: Some(4),
                    supplier_price: Some(90.0),
                    order_status: OrderStatus::Ordered,
                    ..Default::default()
                }))
            });
        repo.expect_list_units().with(eq(7)).returning(|_| Ok(vec![]));
        repo.expect_create_units()
            .withf(|units| {
                units.len() == 3
                    && units
                        .iter()
                        .enumerate()
                        .all(|(i, u)| u.unit_index == i as i32 + 1)
                    && units.iter().all(|u| u.supplier_id == Some(4))
                    && units.iter().all(|u| u.supplier_price == Some(90.0))
            })
            .returning(|units| Ok(units.len()));

        assert_eq!(split_into_units(&repo, &broker(), 7).unwrap(), 3);
    }
}
