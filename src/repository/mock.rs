//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::leaser::{CoefficientEntry, Leaser, NewLeaser};
use crate::domain::offer::{NewOffer, NewOfferEquipment, Offer, OfferEquipment};
use crate::domain::order::{
    EquipmentOrderItem, EquipmentOrderUnit, NewEquipmentOrderItem, NewEquipmentOrderUnit,
    OrderStatus, UpdateOrderUnit,
};
use crate::domain::supplier::{NewSupplier, Supplier, UpdateSupplier};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientReader, ClientWriter, LeaserReader, LeaserWriter, OfferListQuery, OfferReader,
    OfferWriter, OrderItemListQuery, OrderReader, OrderWriter, SupplierReader, SupplierWriter,
};

mock! {
    pub Repository {}

    impl LeaserReader for Repository {
        fn get_leaser_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Leaser>>;
        fn list_leasers(&self, hub_id: i32) -> RepositoryResult<Vec<Leaser>>;
    }

    impl LeaserWriter for Repository {
        fn create_leaser(&self, new_leaser: &NewLeaser) -> RepositoryResult<Leaser>;
        fn replace_coefficients(
            &self,
            leaser_id: i32,
            entries: &[CoefficientEntry],
        ) -> RepositoryResult<usize>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, hub_id: i32) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    }

    impl SupplierReader for Repository {
        fn get_supplier_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Supplier>>;
        fn list_suppliers(&self, hub_id: i32) -> RepositoryResult<Vec<Supplier>>;
    }

    impl SupplierWriter for Repository {
        fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier>;
        fn update_supplier(
            &self,
            supplier_id: i32,
            updates: &UpdateSupplier,
        ) -> RepositoryResult<Supplier>;
    }

    impl OfferReader for Repository {
        fn get_offer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Offer>>;
        fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<(usize, Vec<Offer>)>;
        fn list_offer_equipment(&self, offer_id: i32) -> RepositoryResult<Vec<OfferEquipment>>;
    }

    impl OfferWriter for Repository {
        fn create_offer(
            &self,
            new_offer: &NewOffer,
            lines: &[NewOfferEquipment],
        ) -> RepositoryResult<Offer>;
        fn mark_offer_accepted(&self, offer_id: i32, at: NaiveDateTime) -> RepositoryResult<Offer>;
    }

    impl OrderReader for Repository {
        fn get_order_item_by_id(
            &self,
            id: i32,
            hub_id: i32,
        ) -> RepositoryResult<Option<EquipmentOrderItem>>;
        fn list_order_items(
            &self,
            query: OrderItemListQuery,
        ) -> RepositoryResult<(usize, Vec<EquipmentOrderItem>)>;
        fn get_unit_by_id(&self, id: i32) -> RepositoryResult<Option<EquipmentOrderUnit>>;
        fn list_units(&self, item_id: i32) -> RepositoryResult<Vec<EquipmentOrderUnit>>;
        fn list_units_for_items(
            &self,
            item_ids: &[i32],
        ) -> RepositoryResult<Vec<EquipmentOrderUnit>>;
    }

    impl OrderWriter for Repository {
        fn create_order_items(&self, items: &[NewEquipmentOrderItem]) -> RepositoryResult<usize>;
        fn set_item_status(
            &self,
            item_id: i32,
            status: OrderStatus,
            order_date: Option<NaiveDateTime>,
            reception_date: Option<NaiveDateTime>,
        ) -> RepositoryResult<EquipmentOrderItem>;
        fn set_item_supplier(
            &self,
            item_id: i32,
            supplier_id: Option<i32>,
            supplier_price: Option<f64>,
        ) -> RepositoryResult<EquipmentOrderItem>;
        fn create_units(&self, units: &[NewEquipmentOrderUnit]) -> RepositoryResult<usize>;
        fn set_unit_status(
            &self,
            unit_id: i32,
            status: OrderStatus,
            order_date: Option<NaiveDateTime>,
            reception_date: Option<NaiveDateTime>,
        ) -> RepositoryResult<EquipmentOrderUnit>;
        fn save_unit(
            &self,
            unit_id: i32,
            updates: &UpdateOrderUnit,
        ) -> RepositoryResult<EquipmentOrderUnit>;
    }
}
