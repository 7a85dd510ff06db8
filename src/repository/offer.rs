use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::{
    domain::offer::{NewOffer, NewOfferEquipment, Offer, OfferEquipment},
    repository::{
        DieselRepository, OfferListQuery, OfferReader, OfferWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl OfferReader for DieselRepository {
    fn get_offer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Offer>> {
        use crate::models::offer::Offer as DbOffer;
        use crate::schema::offers;

        let mut conn = self.conn()?;
        let offer = offers::table
            .find(id)
            .filter(offers::hub_id.eq(hub_id))
            .first::<DbOffer>(&mut conn)
            .optional()?;

        Ok(offer.map(Into::into))
    }

    fn list_offers(&self, query: OfferListQuery) -> RepositoryResult<(usize, Vec<Offer>)> {
        use crate::models::offer::Offer as DbOffer;
        use crate::schema::offers;

        let mut conn = self.conn()?;

        let total = offers::table
            .filter(offers::hub_id.eq(query.hub_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = offers::table
            .filter(offers::hub_id.eq(query.hub_id))
            .order(offers::created_at.desc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            items = items.offset(offset).limit(pagination.per_page as i64);
        }

        let offers = items
            .load::<DbOffer>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((total, offers))
    }

    fn list_offer_equipment(&self, offer_id: i32) -> RepositoryResult<Vec<OfferEquipment>> {
        use crate::models::offer::OfferEquipment as DbOfferEquipment;
        use crate::schema::offer_equipment;

        let mut conn = self.conn()?;
        let lines = offer_equipment::table
            .filter(offer_equipment::offer_id.eq(offer_id))
            .order(offer_equipment::id.asc())
            .load::<DbOfferEquipment>(&mut conn)?;

        Ok(lines.into_iter().map(Into::into).collect())
    }
}

impl OfferWriter for DieselRepository {
    fn create_offer(
        &self,
        new_offer: &NewOffer,
        lines: &[NewOfferEquipment],
    ) -> RepositoryResult<Offer> {
        use crate::models::offer::{
            NewOffer as DbNewOffer, NewOfferEquipment as DbNewOfferEquipment, Offer as DbOffer,
        };
        use crate::schema::{offer_equipment, offers};

        let mut conn = self.conn()?;
        let insertable: DbNewOffer = new_offer.into();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let offer = diesel::insert_into(offers::table)
                .values(&insertable)
                .get_result::<DbOffer>(conn)?;

            let line_rows: Vec<DbNewOfferEquipment> = lines
                .iter()
                .map(|line| DbNewOfferEquipment::from_domain(offer.id, line))
                .collect();

            diesel::insert_into(offer_equipment::table)
                .values(&line_rows)
                .execute(conn)?;

            Ok(offer.into())
        })
    }

    fn mark_offer_accepted(&self, offer_id: i32, at: NaiveDateTime) -> RepositoryResult<Offer> {
        use crate::models::offer::Offer as DbOffer;
        use crate::schema::offers;

        let mut conn = self.conn()?;

        // Only stamp offers that have not been accepted yet; a second
        // acceptance leaves the original timestamp in place.
        diesel::update(
            offers::table
                .find(offer_id)
                .filter(offers::accepted_at.is_null()),
        )
        .set(offers::accepted_at.eq(Some(at)))
        .execute(&mut conn)?;

        let offer = offers::table
            .find(offer_id)
            .first::<DbOffer>(&mut conn)?;

        Ok(offer.into())
    }
}
