//! Diesel models for leasers and their coefficient tables.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::leaser::{
    CoefficientEntry as DomainCoefficientEntry, Leaser as DomainLeaser,
    NewLeaser as DomainNewLeaser,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::leasers)]
/// Diesel model for [`crate::domain::leaser::Leaser`].
pub struct Leaser {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leasers)]
/// Insertable form of [`Leaser`].
pub struct NewLeaser<'a> {
    pub hub_id: i32,
    pub name: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Insertable, Associations)]
#[diesel(table_name = crate::schema::leaser_coefficients)]
#[diesel(belongs_to(Leaser, foreign_key = leaser_id))]
#[diesel(primary_key(leaser_id, duration_months))]
pub struct LeaserCoefficient {
    pub leaser_id: i32,
    pub duration_months: i32,
    pub coefficient: f64,
}

impl Leaser {
    /// Combine the leaser row with its coefficient rows into the domain
    /// entity. Entries are sorted by duration for stable display.
    pub fn into_domain(self, mut coefficients: Vec<LeaserCoefficient>) -> DomainLeaser {
        coefficients.sort_by_key(|c| c.duration_months);
        DomainLeaser {
            id: self.id,
            hub_id: self.hub_id,
            name: self.name,
            created_at: self.created_at,
            coefficients: coefficients.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Leaser> for DomainLeaser {
    fn from(leaser: Leaser) -> Self {
        leaser.into_domain(Vec::new())
    }
}

impl From<LeaserCoefficient> for DomainCoefficientEntry {
    fn from(row: LeaserCoefficient) -> Self {
        Self {
            duration_months: row.duration_months,
            coefficient: row.coefficient,
        }
    }
}

impl<'a> From<&'a DomainNewLeaser> for NewLeaser<'a> {
    fn from(leaser: &'a DomainNewLeaser) -> Self {
        Self {
            hub_id: leaser.hub_id,
            name: leaser.name.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn into_domain_sorts_coefficients_by_duration() {
        let leaser = Leaser {
            id: 1,
            hub_id: 2,
            name: "Grenke".to_string(),
            created_at: Utc::now().naive_utc(),
        };
        let rows = vec![
            LeaserCoefficient {
                leaser_id: 1,
                duration_months: 48,
                coefficient: 2.51,
            },
            LeaserCoefficient {
                leaser_id: 1,
                duration_months: 24,
                coefficient: 4.82,
            },
        ];

        let domain = leaser.into_domain(rows);
        assert_eq!(domain.name, "Grenke");
        assert_eq!(
            domain
                .coefficients
                .iter()
                .map(|c| c.duration_months)
                .collect::<Vec<_>>(),
            vec![24, 48]
        );
    }
}
