use diesel::prelude::*;

use crate::{
    domain::leaser::{CoefficientEntry, Leaser, NewLeaser},
    repository::{DieselRepository, LeaserReader, LeaserWriter, errors::RepositoryResult},
};

impl LeaserReader for DieselRepository {
    fn get_leaser_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Leaser>> {
        use crate::models::leaser::{Leaser as DbLeaser, LeaserCoefficient};
        use crate::schema::{leaser_coefficients, leasers};

        let mut conn = self.conn()?;

        let leaser = leasers::table
            .find(id)
            .filter(leasers::hub_id.eq(hub_id))
            .first::<DbLeaser>(&mut conn)
            .optional()?;

        let Some(leaser) = leaser else {
            return Ok(None);
        };

        let coefficients = leaser_coefficients::table
            .filter(leaser_coefficients::leaser_id.eq(leaser.id))
            .load::<LeaserCoefficient>(&mut conn)?;

        Ok(Some(leaser.into_domain(coefficients)))
    }

    fn list_leasers(&self, hub_id: i32) -> RepositoryResult<Vec<Leaser>> {
        use crate::models::leaser::{Leaser as DbLeaser, LeaserCoefficient};
        use crate::schema::{leaser_coefficients, leasers};

        let mut conn = self.conn()?;

        let db_leasers = leasers::table
            .filter(leasers::hub_id.eq(hub_id))
            .order(leasers::name.asc())
            .load::<DbLeaser>(&mut conn)?;

        let leaser_ids: Vec<i32> = db_leasers.iter().map(|l| l.id).collect();
        let mut coefficients_by_leaser = std::collections::HashMap::<i32, Vec<_>>::new();
        for row in leaser_coefficients::table
            .filter(leaser_coefficients::leaser_id.eq_any(leaser_ids))
            .load::<LeaserCoefficient>(&mut conn)?
        {
            coefficients_by_leaser
                .entry(row.leaser_id)
                .or_default()
                .push(row);
        }

        Ok(db_leasers
            .into_iter()
            .map(|leaser| {
                let coefficients = coefficients_by_leaser
                    .remove(&leaser.id)
                    .unwrap_or_default();
                leaser.into_domain(coefficients)
            })
            .collect())
    }
}

impl LeaserWriter for DieselRepository {
    fn create_leaser(&self, new_leaser: &NewLeaser) -> RepositoryResult<Leaser> {
        use crate::models::leaser::{Leaser as DbLeaser, NewLeaser as DbNewLeaser};
        use crate::schema::leasers;

        let mut conn = self.conn()?;
        let insertable: DbNewLeaser = new_leaser.into();

        let created = diesel::insert_into(leasers::table)
            .values(&insertable)
            .get_result::<DbLeaser>(&mut conn)?;

        Ok(created.into())
    }

    fn replace_coefficients(
        &self,
        leaser_id: i32,
        entries: &[CoefficientEntry],
    ) -> RepositoryResult<usize> {
        use crate::models::leaser::LeaserCoefficient;
        use crate::repository::errors::RepositoryError;
        use crate::schema::leaser_coefficients;

        let mut conn = self.conn()?;

        let rows: Vec<LeaserCoefficient> = entries
            .iter()
            .map(|entry| LeaserCoefficient {
                leaser_id,
                duration_months: entry.duration_months,
                coefficient: entry.coefficient,
            })
            .collect();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                leaser_coefficients::table.filter(leaser_coefficients::leaser_id.eq(leaser_id)),
            )
            .execute(conn)?;

            let inserted = diesel::insert_into(leaser_coefficients::table)
                .values(&rows)
                .execute(conn)?;

            Ok(inserted)
        })
    }
}
