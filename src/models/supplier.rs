use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::supplier::{
    NewSupplier as DomainNewSupplier, Supplier as DomainSupplier,
    UpdateSupplier as DomainUpdateSupplier,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::suppliers)]
/// Diesel model for [`crate::domain::supplier::Supplier`].
pub struct Supplier {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub supplier_type: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::suppliers)]
/// Insertable form of [`Supplier`].
pub struct NewSupplier<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub supplier_type: String,
    pub email: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::suppliers)]
/// Data used when updating a [`Supplier`] record.
pub struct UpdateSupplier<'a> {
    pub name: &'a str,
    pub supplier_type: String,
    pub email: Option<&'a str>,
}

impl From<Supplier> for DomainSupplier {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            hub_id: supplier.hub_id,
            name: supplier.name,
            supplier_type: supplier.supplier_type.into(),
            email: supplier.email,
            created_at: supplier.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewSupplier> for NewSupplier<'a> {
    fn from(supplier: &'a DomainNewSupplier) -> Self {
        Self {
            hub_id: supplier.hub_id,
            name: supplier.name.as_str(),
            supplier_type: supplier.supplier_type.to_string(),
            email: supplier.email.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateSupplier> for UpdateSupplier<'a> {
    fn from(supplier: &'a DomainUpdateSupplier) -> Self {
        Self {
            name: supplier.name.as_str(),
            supplier_type: supplier.supplier_type.to_string(),
            email: supplier.email.as_deref(),
        }
    }
}
