//! DTOs used by the offers listing.

use serde::Serialize;

use crate::domain::offer::{Offer, OfferEquipment};
use crate::pagination::Paginated;

/// One offer with the names resolved for display.
#[derive(Serialize)]
pub struct OfferRow {
    pub offer: Offer,
    pub client_name: String,
    pub leaser_name: String,
    pub equipment: Vec<OfferEquipment>,
}

/// Data required to render the offers page.
#[derive(Serialize)]
pub struct OffersPageData {
    pub offers: Paginated<OfferRow>,
}
