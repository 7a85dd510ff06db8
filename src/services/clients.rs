//! Services for the lessee directory behind the calculator's client
//! selector.

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::client::{Client, NewClient};
use crate::domain::types::NonEmptyString;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Lists the hub's clients for the selector.
pub fn list_clients<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo.list_clients(user.hub_id)?)
}

/// Validates and persists a new client.
pub fn add_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    name: String,
    email: Option<String>,
    vat_number: Option<String>,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let name = NonEmptyString::new(name)
        .map_err(|_| ServiceError::Validation("Client name is required".to_string()))?;

    let new_client = NewClient::new(user.hub_id, name.into_inner(), email, vat_number);

    Ok(repo.create_client(&new_client)?)
}
