use std::collections::HashMap;

use leasedesk::domain::order::{
    NewEquipmentOrderItem, OrderSource, OrderStatus, UpdateOrderUnit,
};
use leasedesk::domain::supplier::{NewSupplier, Supplier, SupplierType};
use leasedesk::repository::{
    DieselRepository, OrderItemListQuery, OrderReader, OrderWriter, SupplierWriter,
};
use leasedesk::services::orders::{
    self, OrdersQuery, save_unit, set_item_status, set_unit_status, split_into_units,
    sync_unit_prices_to_parent,
};
use leasedesk::services::ServiceError;

mod common;

fn seed_item(repo: &DieselRepository, title: &str, quantity: i32, price: f64) -> i32 {
    repo.create_order_items(&[NewEquipmentOrderItem {
        hub_id: 1,
        source_type: OrderSource::Offer,
        source_id: 1,
        title: title.to_string(),
        quantity,
        purchase_price: price,
        supplier_id: None,
        supplier_price: None,
    }])
    .unwrap();

    let (_, items) = repo
        .list_order_items(OrderItemListQuery::new(1).search(title))
        .unwrap();
    items[0].id
}

fn seed_supplier(repo: &DieselRepository, name: &str, supplier_type: SupplierType) -> Supplier {
    repo.create_supplier(&NewSupplier::new(1, name.to_string(), supplier_type, None))
        .unwrap()
}

#[test]
fn status_transitions_follow_machine_and_stamp_dates_once() {
    let test_db = common::TestDb::new("test_order_status.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Lenovo T14", 1, 950.0);

    // to_order cannot jump straight to received.
    let err = set_item_status(&repo, &user, item_id, OrderStatus::Received).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));

    let item = set_item_status(&repo, &user, item_id, OrderStatus::Ordered).unwrap();
    assert_eq!(item.order_status, OrderStatus::Ordered);
    let stamped_order_date = item.order_date.expect("order_date must be stamped");

    // Re-asserting the same status keeps the original stamp.
    let item = set_item_status(&repo, &user, item_id, OrderStatus::Ordered).unwrap();
    assert_eq!(item.order_date, Some(stamped_order_date));

    let item = set_item_status(&repo, &user, item_id, OrderStatus::Received).unwrap();
    assert_eq!(item.order_status, OrderStatus::Received);
    assert_eq!(item.order_date, Some(stamped_order_date));
    assert!(item.reception_date.is_some());

    // Terminal: no way out of received.
    let err = set_item_status(&repo, &user, item_id, OrderStatus::Cancelled).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));
}

#[test]
fn cancel_is_reachable_from_non_terminal_states_only() {
    let test_db = common::TestDb::new("test_order_cancel.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "HP scanner", 1, 240.0);

    let item = set_item_status(&repo, &user, item_id, OrderStatus::Cancelled).unwrap();
    assert_eq!(item.order_status, OrderStatus::Cancelled);

    let err = set_item_status(&repo, &user, item_id, OrderStatus::Ordered).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));
}

#[test]
fn split_creates_indexed_units_and_is_one_shot() {
    let test_db = common::TestDb::new("test_order_split.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Dell monitor", 3, 180.0);

    // Parent status does not constrain the freshly created units.
    set_item_status(&repo, &user, item_id, OrderStatus::Ordered).unwrap();

    let created = split_into_units(&repo, &user, item_id).unwrap();
    assert_eq!(created, 3);

    let units = repo.list_units(item_id).unwrap();
    assert_eq!(units.len(), 3);
    assert_eq!(
        units.iter().map(|u| u.unit_index).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(units.iter().all(|u| u.order_status == OrderStatus::ToOrder));

    // Second split is rejected and creates nothing.
    let err = split_into_units(&repo, &user, item_id).unwrap_err();
    assert!(matches!(err, ServiceError::AlreadySplit));
    assert_eq!(repo.list_units(item_id).unwrap().len(), 3);

    // A split parent is driven through its units from now on.
    let err = set_item_status(&repo, &user, item_id, OrderStatus::Received).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn split_requires_more_than_one_unit() {
    let test_db = common::TestDb::new("test_order_split_single.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Server rack", 1, 2400.0);

    let err = split_into_units(&repo, &user, item_id).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn units_inherit_supplier_terms_from_parent() {
    let test_db = common::TestDb::new("test_order_split_inherit.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let supplier = seed_supplier(&repo, "Leasing Hardware BV", SupplierType::Belgian);
    let item_id = seed_item(&repo, "Thinkpad batch", 2, 900.0);
    orders::assign_item_supplier(&repo, &user, item_id, Some(supplier.id), Some(850.0)).unwrap();

    split_into_units(&repo, &user, item_id).unwrap();

    let units = repo.list_units(item_id).unwrap();
    assert!(units.iter().all(|u| u.supplier_id == Some(supplier.id)));
    assert!(units.iter().all(|u| u.supplier_price == Some(850.0)));
}

#[test]
fn unit_status_transitions_stamp_dates_idempotently() {
    let test_db = common::TestDb::new("test_unit_status.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Laptop pair", 2, 1000.0);
    split_into_units(&repo, &user, item_id).unwrap();
    let unit_id = repo.list_units(item_id).unwrap()[0].id;

    let unit = set_unit_status(&repo, &user, unit_id, OrderStatus::Ordered).unwrap();
    let stamped = unit.order_date.expect("order_date must be stamped");

    let unit = set_unit_status(&repo, &user, unit_id, OrderStatus::Ordered).unwrap();
    assert_eq!(unit.order_date, Some(stamped));

    let unit = set_unit_status(&repo, &user, unit_id, OrderStatus::Received).unwrap();
    assert_eq!(unit.order_date, Some(stamped));
    assert!(unit.reception_date.is_some());

    let err = set_unit_status(&repo, &user, unit_id, OrderStatus::ToOrder).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidTransition { .. }));
}

#[test]
fn unit_price_edits_sync_mean_back_to_parent() {
    let test_db = common::TestDb::new("test_unit_price_sync.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Monitor pair", 2, 200.0);
    split_into_units(&repo, &user, item_id).unwrap();
    let units = repo.list_units(item_id).unwrap();

    save_unit(
        &repo,
        &user,
        units[0].id,
        UpdateOrderUnit::new(Some("SN-001".to_string()), None, Some(100.0)),
    )
    .unwrap();
    save_unit(
        &repo,
        &user,
        units[1].id,
        UpdateOrderUnit::new(Some("SN-002".to_string()), None, Some(150.0)),
    )
    .unwrap();

    let item = repo.get_order_item_by_id(item_id, 1).unwrap().unwrap();
    assert_eq!(item.supplier_price, Some(125.0));

    let units = repo.list_units(item_id).unwrap();
    assert_eq!(units[0].serial_number.as_deref(), Some("SN-001"));
    assert_eq!(units[1].supplier_price, Some(150.0));
}

#[test]
fn unedited_units_fall_back_to_inherited_price_in_sync() {
    let test_db = common::TestDb::new("test_unit_price_fallback.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Printer pair", 2, 300.0);
    split_into_units(&repo, &user, item_id).unwrap();
    let units = repo.list_units(item_id).unwrap();

    // One unit renegotiated to 200, the other keeps the parent's 300.
    save_unit(
        &repo,
        &user,
        units[0].id,
        UpdateOrderUnit::new(None, None, Some(200.0)),
    )
    .unwrap();

    let item = repo.get_order_item_by_id(item_id, 1).unwrap().unwrap();
    assert_eq!(item.supplier_price, Some(250.0));

    let mean = sync_unit_prices_to_parent(&repo, &item).unwrap();
    assert_eq!(mean, Some(250.0));
}

#[test]
fn totals_bucket_by_status_with_belgian_vat() {
    let test_db = common::TestDb::new("test_order_totals.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let belgian = seed_supplier(&repo, "Belgian BV", SupplierType::Belgian);
    let foreign = seed_supplier(&repo, "Foreign GmbH", SupplierType::Foreign);

    // 2 x 100 from a Belgian supplier, still to order.
    let to_order_id = seed_item(&repo, "Desks", 2, 100.0);
    orders::assign_item_supplier(&repo, &user, to_order_id, Some(belgian.id), None).unwrap();

    // 1 x 500 from a foreign supplier, ordered.
    let ordered_id = seed_item(&repo, "Plotter", 1, 500.0);
    orders::assign_item_supplier(&repo, &user, ordered_id, Some(foreign.id), None).unwrap();
    set_item_status(&repo, &user, ordered_id, OrderStatus::Ordered).unwrap();

    let data = orders::list_orders(&repo, &user, OrdersQuery::default()).unwrap();

    assert!((data.totals.to_order.net - 200.0).abs() < 0.005);
    assert!((data.totals.to_order.gross - 242.0).abs() < 0.005);
    assert!((data.totals.ordered.net - 500.0).abs() < 0.005);
    assert!((data.totals.ordered.gross - 500.0).abs() < 0.005);
    assert_eq!(data.totals.received.net, 0.0);
}

#[test]
fn split_item_totals_use_unit_prices_and_statuses() {
    let test_db = common::TestDb::new("test_split_totals.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let item_id = seed_item(&repo, "Laptops", 2, 1000.0);
    split_into_units(&repo, &user, item_id).unwrap();
    let units = repo.list_units(item_id).unwrap();

    // One unit renegotiated and received, the other untouched.
    save_unit(
        &repo,
        &user,
        units[0].id,
        UpdateOrderUnit::new(None, None, Some(900.0)),
    )
    .unwrap();
    set_unit_status(&repo, &user, units[0].id, OrderStatus::Ordered).unwrap();
    set_unit_status(&repo, &user, units[0].id, OrderStatus::Received).unwrap();

    let data = orders::list_orders(&repo, &user, OrdersQuery::default()).unwrap();

    assert!((data.totals.received.net - 900.0).abs() < 0.005);
    // The remaining unit reports under to_order at its fallback price, the
    // per-unit purchase price; the parent's synced mean stays out of it.
    assert!((data.totals.to_order.net - 1000.0).abs() < 0.005);
    let item = repo.get_order_item_by_id(item_id, 1).unwrap().unwrap();
    assert_eq!(item.supplier_price, Some(950.0));

    // The dashboard rolls the parent's status up from its units.
    let row = data
        .orders
        .items
        .iter()
        .find(|row| row.item.id == item_id)
        .unwrap();
    assert_eq!(row.status_label, "1 received, 1 to_order");
}

#[test]
fn orders_dashboard_requires_the_leasing_role() {
    let test_db = common::TestDb::new("test_orders_role.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["billing"]);

    let err = orders::list_orders(&repo, &user, OrdersQuery::default()).unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[test]
fn hub_scoping_hides_other_tenants_items() {
    let test_db = common::TestDb::new("test_orders_hub_scope.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    repo.create_order_items(&[NewEquipmentOrderItem {
        hub_id: 2,
        source_type: OrderSource::Contract,
        source_id: 9,
        title: "Other hub".to_string(),
        quantity: 1,
        purchase_price: 50.0,
        supplier_id: None,
        supplier_price: None,
    }])
    .unwrap();

    let (total, items) = repo.list_order_items(OrderItemListQuery::new(1)).unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());

    let foreign_item = repo.list_order_items(OrderItemListQuery::new(2)).unwrap().1[0].id;
    let err = set_item_status(&repo, &user, foreign_item, OrderStatus::Ordered).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[test]
fn totals_math_is_pure_and_skips_cancelled() {
    use leasedesk::domain::order::{EquipmentOrderItem, EquipmentOrderUnit};

    let belgian = Supplier {
        id: 1,
        hub_id: 1,
        supplier_type: SupplierType::Belgian,
        ..Default::default()
    };
    let suppliers: HashMap<i32, Supplier> = [(1, belgian)].into();

    let cancelled = EquipmentOrderItem {
        id: 1,
        quantity: 4,
        purchase_price: 100.0,
        order_status: OrderStatus::Cancelled,
        ..Default::default()
    };
    let to_order = EquipmentOrderItem {
        id: 2,
        quantity: 1,
        purchase_price: 100.0,
        supplier_id: Some(1),
        supplier_price: Some(80.0),
        order_status: OrderStatus::ToOrder,
        ..Default::default()
    };

    let totals = orders::order_totals(
        &[cancelled, to_order],
        &[] as &[EquipmentOrderUnit],
        &suppliers,
    );

    assert_eq!(totals.to_order.net, 80.0);
    assert!((totals.to_order.gross - 96.8).abs() < 0.005);
    assert_eq!(totals.ordered.net, 0.0);
    assert_eq!(totals.received.net, 0.0);
}
