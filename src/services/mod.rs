use thiserror::Error;

use crate::domain::order::OrderStatus;
use crate::domain::types::TypeConstraintError;
use crate::models::auth::{AuthenticatedUser, check_role};
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod calculator;
pub mod clients;
pub mod leasers;
pub mod offers;
pub mod orders;
pub mod suppliers;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// User input problem; flashed back to the user verbatim, never retried.
    #[error("{0}")]
    Validation(String),

    /// A second split attempt on an item that already has unit rows.
    #[error("equipment item is already split into units")]
    AlreadySplit,

    #[error("cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Fails with [`ServiceError::Unauthorized`] unless the user carries the role.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
