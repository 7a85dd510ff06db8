//! DTOs used in leaser administration pages.

use serde::Serialize;

use crate::domain::leaser::Leaser;
use crate::domain::supplier::Supplier;

/// Data required to render the leasers admin page.
#[derive(Serialize)]
pub struct LeasersPageData {
    /// Leasers with their coefficient tables.
    pub leasers: Vec<Leaser>,
}

/// Data required to render the suppliers admin page.
#[derive(Serialize)]
pub struct SuppliersPageData {
    pub suppliers: Vec<Supplier>,
}
