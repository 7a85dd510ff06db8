//! Services backing the JSON API consumed by integration partners.

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::order::{EquipmentOrderItem, OrderStatus};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{OrderItemListQuery, OrderReader};
use crate::services::{ServiceResult, ensure_role};

/// Query parameters accepted by the `/api/v1/orders` service.
#[derive(Debug, Default)]
pub struct OrdersQuery {
    /// Optional status filter (`to_order`, `ordered`, `received`,
    /// `cancelled`).
    pub status: Option<String>,
    /// Optional free-form search string applied to item titles.
    pub search: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`list_orders`].
#[derive(Debug)]
pub struct OrdersResponse {
    /// Total number of items matching the filter.
    pub total: usize,
    /// Page of items requested by the caller.
    pub items: Vec<EquipmentOrderItem>,
}

/// Returns the filtered, hub-scoped list of order items.
pub fn list_orders<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: OrdersQuery,
) -> ServiceResult<OrdersResponse>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = OrderItemListQuery::new(user.hub_id);

    if let Some(status) = params.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query = query.status(OrderStatus::from(status));
    }
    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query = query.search(search);
    }
    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    let (total, items) = repo.list_order_items(query)?;

    Ok(OrdersResponse { total, items })
}
