use crate::{
    db::DbPool,
    domain::{
        client::{Client, NewClient},
        leaser::{CoefficientEntry, Leaser, NewLeaser},
        offer::{NewOffer, NewOfferEquipment, Offer, OfferEquipment},
        order::{
            EquipmentOrderItem, EquipmentOrderUnit, NewEquipmentOrderItem, NewEquipmentOrderUnit,
            OrderStatus, UpdateOrderUnit,
        },
        supplier::{NewSupplier, Supplier, UpdateSupplier},
    },
    repository::errors::RepositoryResult,
};

use chrono::NaiveDateTime;

pub mod client;
pub mod errors;
pub mod leaser;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod offer;
pub mod order;
pub mod supplier;

/// Diesel-backed implementation of every repository trait below.
///
/// Cloning is cheap; the inner pool is reference counted.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Filters applied to the orders dashboard and the JSON API.
#[derive(Debug, Clone)]
pub struct OrderItemListQuery {
    pub hub_id: i32,
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl OrderItemListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            status: None,
            search: None,
            pagination: None,
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct OfferListQuery {
    pub hub_id: i32,
    pub pagination: Option<Pagination>,
}

impl OfferListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait LeaserReader {
    /// Loads a leaser together with its coefficient table.
    fn get_leaser_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Leaser>>;
    fn list_leasers(&self, hub_id: i32) -> RepositoryResult<Vec<Leaser>>;
}

pub trait LeaserWriter {
    fn create_leaser(&self, new_leaser: &NewLeaser) -> RepositoryResult<Leaser>;
    /// Atomically replaces the leaser's whole coefficient table.
    fn replace_coefficients(
        &self,
        leaser_id: i32,
        entries: &[CoefficientEntry],
    ) -> RepositoryResult<usize>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, hub_id: i32) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
}

pub trait SupplierReader {
    fn get_supplier_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Supplier>>;
    fn list_suppliers(&self, hub_id: i32) -> RepositoryResult<Vec<Supplier>>;
}

pub trait SupplierWriter {
    fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier>;
    fn update_supplier(
        &self,
        supplier_id: i32,
        updates: &UpdateSupplier,
    ) -> RepositoryResult<Supplier>;
}

pub trait OfferReader {
    fn get_offer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Offer>>;
    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<(usize, Vec<Offer>)>;
    fn list_offer_equipment(&self, offer_id: i32) -> RepositoryResult<Vec<OfferEquipment>>;
}

pub trait OfferWriter {
    /// Persists the offer and its equipment lines in one transaction.
    fn create_offer(
        &self,
        new_offer: &NewOffer,
        lines: &[NewOfferEquipment],
    ) -> RepositoryResult<Offer>;
    /// Stamps `accepted_at`; keeps an existing stamp untouched.
    fn mark_offer_accepted(&self, offer_id: i32, at: NaiveDateTime) -> RepositoryResult<Offer>;
}

pub trait OrderReader {
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
    /// Units for a batch of items, used when rendering the dashboard.
    fn list_units_for_items(
        &self,
        item_ids: &[i32],
    ) -> RepositoryResult<Vec<EquipmentOrderUnit>>;
}

pub trait OrderWriter {
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
    /// Inserts all unit rows of a split in one transaction.
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
