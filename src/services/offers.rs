//! Services for the offers listing and acceptance workflow.

use std::collections::HashMap;

use chrono::Utc;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::offer::Offer;
use crate::domain::order::{NewEquipmentOrderItem, OrderSource};
use crate::dto::offers::{OfferRow, OffersPageData};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    ClientReader, LeaserReader, OfferListQuery, OfferReader, OfferWriter, OrderWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads the paginated offers page with client/leaser names and equipment
/// lines resolved.
pub fn list_offers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: usize,
) -> ServiceResult<OffersPageData>
where
    R: OfferReader + ClientReader + LeaserReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (total, offers) = repo.list_offers(
        OfferListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE),
    )?;

    let client_names: HashMap<i32, String> = repo
        .list_clients(user.hub_id)?
        .into_iter()
        .map(|client| (client.id, client.name))
        .collect();
    let leaser_names: HashMap<i32, String> = repo
        .list_leasers(user.hub_id)?
        .into_iter()
        .map(|leaser| (leaser.id, leaser.name))
        .collect();

    let rows = offers
        .into_iter()
        .map(|offer| {
            let equipment = repo.list_offer_equipment(offer.id)?;
            Ok(OfferRow {
                client_name: client_names
                    .get(&offer.client_id)
                    .cloned()
                    .unwrap_or_default(),
                leaser_name: leaser_names
                    .get(&offer.leaser_id)
                    .cloned()
                    .unwrap_or_default(),
                equipment,
                offer,
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(OffersPageData {
        offers: Paginated::new(rows, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE)),
    })
}

/// Accepts an offer: stamps `accepted_at` and creates one fulfillment
/// record per equipment line, all starting at `to_order`.
///
/// A second acceptance is rejected so the fulfillment records are never
/// duplicated.
pub fn accept_offer<R>(repo: &R, user: &AuthenticatedUser, offer_id: i32) -> ServiceResult<Offer>
where
    R: OfferReader + OfferWriter + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let offer = repo
        .get_offer_by_id(offer_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    if offer.is_accepted() {
        return Err(ServiceError::Validation(
            "Offer has already been accepted".to_string(),
        ));
    }

    let items: Vec<NewEquipmentOrderItem> = repo
        .list_offer_equipment(offer.id)?
        .iter()
        .map(|line| NewEquipmentOrderItem {
            hub_id: user.hub_id,
            source_type: OrderSource::Offer,
            source_id: offer.id,
            title: line.order_title(),
            quantity: line.quantity,
            purchase_price: line.unit_price,
            supplier_id: None,
            supplier_price: None,
        })
        .collect();

    if items.is_empty() {
        return Err(ServiceError::Validation(
            "Offer has no equipment lines".to_string(),
        ));
    }

    repo.create_order_items(&items)?;

    Ok(repo.mark_offer_accepted(offer.id, Utc::now().naive_utc())?)
}
