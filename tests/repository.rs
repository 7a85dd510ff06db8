use leasedesk::domain::calculator::OfferKind;
use leasedesk::domain::client::NewClient;
use leasedesk::domain::leaser::{CoefficientEntry, NewLeaser};
use leasedesk::domain::offer::{NewOffer, NewOfferEquipment};
use leasedesk::domain::order::OrderStatus;
use leasedesk::domain::supplier::{NewSupplier, SupplierType, UpdateSupplier};
use leasedesk::repository::{
    ClientReader, ClientWriter, DieselRepository, LeaserReader, LeaserWriter, OfferListQuery,
    OfferReader, OfferWriter, OrderItemListQuery, OrderReader, SupplierReader, SupplierWriter,
};
use leasedesk::services::ServiceError;
use leasedesk::services::offers::accept_offer;

mod common;

#[test]
fn test_leaser_repository_with_coefficients() {
    let test_db = common::TestDb::new("test_leaser_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let leaser = repo
        .create_leaser(&NewLeaser::new(1, "Grenke".to_string()))
        .unwrap();
    assert_eq!(leaser.name, "Grenke");
    assert!(leaser.coefficients.is_empty());

    let entries = vec![
        CoefficientEntry {
            duration_months: 36,
            coefficient: 3.67,
        },
        CoefficientEntry {
            duration_months: 12,
            coefficient: 9.21,
        },
    ];
    assert_eq!(repo.replace_coefficients(leaser.id, &entries).unwrap(), 2);

    let loaded = repo.get_leaser_by_id(leaser.id, 1).unwrap().unwrap();
    assert_eq!(loaded.coefficients.len(), 2);
    // Coefficients come back sorted by duration.
    assert_eq!(loaded.coefficients[0].duration_months, 12);
    assert_eq!(loaded.coefficient_for(36), Some(3.67));

    // Replacing again swaps the whole table.
    let entries = vec![CoefficientEntry {
        duration_months: 24,
        coefficient: 4.82,
    }];
    repo.replace_coefficients(leaser.id, &entries).unwrap();
    let loaded = repo.get_leaser_by_id(leaser.id, 1).unwrap().unwrap();
    assert_eq!(loaded.coefficients.len(), 1);
    assert_eq!(loaded.coefficient_for(36), None);

    // Hub scoping: the leaser is invisible from another hub.
    assert!(repo.get_leaser_by_id(leaser.id, 2).unwrap().is_none());
    assert!(repo.list_leasers(2).unwrap().is_empty());
}

#[test]
fn test_supplier_repository_crud() {
    let test_db = common::TestDb::new("test_supplier_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let supplier = repo
        .create_supplier(&NewSupplier::new(
            1,
            "Leasing Hardware BV".to_string(),
            SupplierType::Belgian,
            Some("Sales@Hardware.example".to_string()),
        ))
        .unwrap();
    assert_eq!(supplier.supplier_type, SupplierType::Belgian);
    assert_eq!(supplier.email.as_deref(), Some("sales@hardware.example"));

    let updated = repo
        .update_supplier(
            supplier.id,
            &UpdateSupplier::new("Hardware International".to_string(), SupplierType::Foreign, None),
        )
        .unwrap();
    assert_eq!(updated.name, "Hardware International");
    assert_eq!(updated.supplier_type, SupplierType::Foreign);
    assert_eq!(updated.email, None);

    let listed = repo.list_suppliers(1).unwrap();
    assert_eq!(listed.len(), 1);
    assert!(repo.get_supplier_by_id(supplier.id, 2).unwrap().is_none());
}

#[test]
fn test_client_repository_crud() {
    let test_db = common::TestDb::new("test_client_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let client = repo
        .create_client(&NewClient::new(
            1,
            "Acme SPRL".to_string(),
            Some("Billing@Acme.example".to_string()),
            Some("be0123456789".to_string()),
        ))
        .unwrap();
    assert_eq!(client.email.as_deref(), Some("billing@acme.example"));
    assert_eq!(client.vat_number.as_deref(), Some("BE0123456789"));

    let clients = repo.list_clients(1).unwrap();
    assert_eq!(clients.len(), 1);
    assert!(repo.get_client_by_id(client.id, 1).unwrap().is_some());
    assert!(repo.get_client_by_id(client.id, 2).unwrap().is_none());
}

fn seed_offer(repo: &DieselRepository) -> i32 {
    let client = repo
        .create_client(&NewClient::new(1, "Acme SPRL".to_string(), None, None))
        .unwrap();
    let leaser = repo
        .create_leaser(&NewLeaser::new(1, "Grenke".to_string()))
        .unwrap();

    let offer = repo
        .create_offer(
            &NewOffer {
                hub_id: 1,
                client_id: client.id,
                leaser_id: leaser.id,
                kind: OfferKind::Direct,
                ambassador_email: None,
                duration_months: 36,
                coefficient: 3.67,
                total_budget: 2000.0,
                monthly_payment: 73.4,
            },
            &[
                NewOfferEquipment {
                    object_type: "Laptop".to_string(),
                    manufacturer: "Lenovo".to_string(),
                    description: "T14 Gen 5".to_string(),
                    quantity: 2,
                    unit_price: 850.0,
                },
                NewOfferEquipment {
                    object_type: "Dock".to_string(),
                    manufacturer: "Lenovo".to_string(),
                    description: "USB-C dock".to_string(),
                    quantity: 1,
                    unit_price: 300.0,
                },
            ],
        )
        .unwrap();

    offer.id
}

#[test]
fn test_offer_repository_create_and_list() {
    let test_db = common::TestDb::new("test_offer_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let offer_id = seed_offer(&repo);

    let (total, offers) = repo.list_offers(OfferListQuery::new(1)).unwrap();
    assert_eq!(total, 1);
    assert_eq!(offers[0].id, offer_id);
    assert!(!offers[0].is_accepted());

    let lines = repo.list_offer_equipment(offer_id).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].order_title(), "Lenovo T14 Gen 5");
    assert_eq!(lines[0].total_price(), 1700.0);

    assert!(repo.get_offer_by_id(offer_id, 2).unwrap().is_none());
}

#[test]
fn accepting_an_offer_queues_equipment_once() {
    let test_db = common::TestDb::new("test_offer_accept.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let offer_id = seed_offer(&repo);

    let offer = accept_offer(&repo, &user, offer_id).unwrap();
    assert!(offer.is_accepted());

    let (total, items) = repo.list_order_items(OrderItemListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|i| i.order_status == OrderStatus::ToOrder));
    let laptops = items
        .iter()
        .find(|i| i.title == "Lenovo T14 Gen 5")
        .unwrap();
    assert_eq!(laptops.quantity, 2);
    assert_eq!(laptops.purchase_price, 850.0);
    assert_eq!(laptops.source_id, offer_id);

    // Accepting again must not duplicate the fulfillment records.
    let err = accept_offer(&repo, &user, offer_id).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    let (total, _) = repo.list_order_items(OrderItemListQuery::new(1)).unwrap();
    assert_eq!(total, 2);
}

#[test]
fn order_item_list_filters_by_status_and_title() {
    let test_db = common::TestDb::new("test_order_filters.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let user = common::test_user(&["leasing"]);

    let offer_id = seed_offer(&repo);
    accept_offer(&repo, &user, offer_id).unwrap();

    let (total, _) = repo
        .list_order_items(OrderItemListQuery::new(1).status(OrderStatus::ToOrder))
        .unwrap();
    assert_eq!(total, 2);

    let (total, items) = repo
        .list_order_items(OrderItemListQuery::new(1).search("dock"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "Lenovo USB-C dock");

    let (total, _) = repo
        .list_order_items(OrderItemListQuery::new(1).status(OrderStatus::Received))
        .unwrap();
    assert_eq!(total, 0);
}
