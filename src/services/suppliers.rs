//! Services handling supplier administration.

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::supplier::{NewSupplier, Supplier, SupplierType, UpdateSupplier};
use crate::domain::types::NonEmptyString;
use crate::dto::leasers::SuppliersPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{SupplierReader, SupplierWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads all suppliers of the hub.
pub fn list_suppliers<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<SuppliersPageData>
where
    R: SupplierReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let suppliers = repo.list_suppliers(user.hub_id)?;

    Ok(SuppliersPageData { suppliers })
}

/// Validates and persists a new supplier.
pub fn add_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    name: String,
    supplier_type: SupplierType,
    email: Option<String>,
) -> ServiceResult<Supplier>
where
    R: SupplierWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let name = NonEmptyString::new(name)
        .map_err(|_| ServiceError::Validation("Supplier name is required".to_string()))?;

    let new_supplier = NewSupplier::new(user.hub_id, name.into_inner(), supplier_type, email);

    Ok(repo.create_supplier(&new_supplier)?)
}

/// Applies the edited fields to an existing supplier of the caller's hub.
pub fn save_supplier<R>(
    repo: &R,
    user: &AuthenticatedUser,
    supplier_id: i32,
    name: String,
    supplier_type: SupplierType,
    email: Option<String>,
) -> ServiceResult<Supplier>
where
    R: SupplierReader + SupplierWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let supplier = repo
        .get_supplier_by_id(supplier_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let name = NonEmptyString::new(name)
        .map_err(|_| ServiceError::Validation("Supplier name is required".to_string()))?;

    let updates = UpdateSupplier::new(name.into_inner(), supplier_type, email);

    Ok(repo.update_supplier(supplier.id, &updates)?)
}
