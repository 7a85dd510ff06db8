//! Diesel models for submitted offers and their equipment lines.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::offer::{
    NewOffer as DomainNewOffer, NewOfferEquipment as DomainNewOfferEquipment,
    Offer as DomainOffer, OfferEquipment as DomainOfferEquipment,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::offers)]
/// Diesel model for [`crate::domain::offer::Offer`].
pub struct Offer {
    pub id: i32,
    pub hub_id: i32,
    pub client_id: i32,
    pub leaser_id: i32,
    pub kind: String,
    pub ambassador_email: Option<String>,
    pub duration_months: i32,
    pub coefficient: f64,
    pub total_budget: f64,
    pub monthly_payment: f64,
    pub accepted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::offers)]
/// Insertable form of [`Offer`].
pub struct NewOffer<'a> {
    pub hub_id: i32,
    pub client_id: i32,
    pub leaser_id: i32,
    pub kind: String,
    pub ambassador_email: Option<&'a str>,
    pub duration_months: i32,
    pub coefficient: f64,
    pub total_budget: f64,
    pub monthly_payment: f64,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(table_name = crate::schema::offer_equipment)]
#[diesel(belongs_to(Offer, foreign_key = offer_id))]
pub struct OfferEquipment {
    pub id: i32,
    pub offer_id: i32,
    pub object_type: String,
    pub manufacturer: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::offer_equipment)]
pub struct NewOfferEquipment<'a> {
    pub offer_id: i32,
    pub object_type: &'a str,
    pub manufacturer: &'a str,
    pub description: &'a str,
    pub quantity: i32,
    pub unit_price: f64,
}

impl From<Offer> for DomainOffer {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id,
            hub_id: offer.hub_id,
            client_id: offer.client_id,
            leaser_id: offer.leaser_id,
            kind: offer.kind.into(),
            ambassador_email: offer.ambassador_email,
            duration_months: offer.duration_months,
            coefficient: offer.coefficient,
            total_budget: offer.total_budget,
            monthly_payment: offer.monthly_payment,
            accepted_at: offer.accepted_at,
            created_at: offer.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewOffer> for NewOffer<'a> {
    fn from(offer: &'a DomainNewOffer) -> Self {
        Self {
            hub_id: offer.hub_id,
            client_id: offer.client_id,
            leaser_id: offer.leaser_id,
            kind: offer.kind.to_string(),
            ambassador_email: offer.ambassador_email.as_deref(),
            duration_months: offer.duration_months,
            coefficient: offer.coefficient,
            total_budget: offer.total_budget,
            monthly_payment: offer.monthly_payment,
        }
    }
}

impl From<OfferEquipment> for DomainOfferEquipment {
    fn from(line: OfferEquipment) -> Self {
        Self {
            id: line.id,
            offer_id: line.offer_id,
            object_type: line.object_type,
            manufacturer: line.manufacturer,
            description: line.description,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

impl<'a> NewOfferEquipment<'a> {
    /// Ties a domain equipment line to its parent offer row.
    pub fn from_domain(offer_id: i32, line: &'a DomainNewOfferEquipment) -> Self {
        Self {
            offer_id,
            object_type: line.object_type.as_str(),
            manufacturer: line.manufacturer.as_str(),
            description: line.description.as_str(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}
