//! Services handling leaser administration: catalog CRUD and coefficient
//! table uploads.

use std::collections::BTreeMap;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::leaser::{CoefficientEntry, Leaser, NewLeaser};
use crate::domain::types::NonEmptyString;
use crate::dto::leasers::LeasersPageData;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{LeaserReader, LeaserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads all leasers of the hub with their coefficient tables.
pub fn list_leasers<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<LeasersPageData>
where
    R: LeaserReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let leasers = repo.list_leasers(user.hub_id)?;

    Ok(LeasersPageData { leasers })
}

/// Validates the name and persists a new leaser with an empty coefficient
/// table.
pub fn add_leaser<R>(repo: &R, user: &AuthenticatedUser, name: String) -> ServiceResult<Leaser>
where
    R: LeaserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let name = NonEmptyString::new(name)
        .map_err(|_| ServiceError::Validation("Leaser name is required".to_string()))?;

    let new_leaser = NewLeaser::new(user.hub_id, name.into_inner());

    Ok(repo.create_leaser(&new_leaser)?)
}

/// Parses an uploaded `duration_months,coefficient` CSV and atomically
/// replaces the leaser's coefficient table with its rows.
///
/// Duplicate durations collapse to the last row; non-positive durations or
/// coefficients reject the whole file so a half-imported table never lands.
pub fn upload_coefficients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    leaser_id: i32,
    csv_data: impl std::io::Read,
) -> ServiceResult<usize>
where
    R: LeaserReader + LeaserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let leaser = repo
        .get_leaser_by_id(leaser_id, user.hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let entries = parse_coefficients_csv(csv_data)?;
    if entries.is_empty() {
        return Err(ServiceError::Validation(
            "Coefficient file contains no rows".to_string(),
        ));
    }

    Ok(repo.replace_coefficients(leaser.id, &entries)?)
}

fn parse_coefficients_csv(data: impl std::io::Read) -> ServiceResult<Vec<CoefficientEntry>> {
    let mut rdr = csv::Reader::from_reader(data);

    let headers = rdr
        .headers()
        .map_err(|e| ServiceError::Validation(format!("Invalid CSV header: {e}")))?
        .clone();

    let duration_col = headers
        .iter()
        .position(|h| h.trim() == "duration_months")
        .ok_or_else(|| {
            ServiceError::Validation("Missing column: duration_months".to_string())
        })?;
    let coefficient_col = headers
        .iter()
        .position(|h| h.trim() == "coefficient")
        .ok_or_else(|| ServiceError::Validation("Missing column: coefficient".to_string()))?;

    let mut entries = BTreeMap::new();

    for (line, result) in rdr.records().enumerate() {
        let record =
            result.map_err(|e| ServiceError::Validation(format!("Invalid CSV row: {e}")))?;

        let duration_months: i32 = record
            .get(duration_col)
            .map(str::trim)
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| {
                ServiceError::Validation(format!("Row {}: invalid duration", line + 1))
            })?;
        let coefficient: f64 = record
            .get(coefficient_col)
            .map(str::trim)
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| {
                ServiceError::Validation(format!("Row {}: invalid coefficient", line + 1))
            })?;

        let entry = CoefficientEntry {
            duration_months,
            coefficient,
        };
        if !entry.is_valid() {
            return Err(ServiceError::Validation(format!(
                "Row {}: duration and coefficient must be positive",
                line + 1
            )));
        }

        entries.insert(duration_months, entry);
    }

    Ok(entries.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_csv() {
        let csv = "duration_months,coefficient\n12,9.21\n36,3.67\n60,2.41\n";
        let entries = parse_coefficients_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].duration_months, 36);
        assert_eq!(entries[1].coefficient, 3.67);
    }

    #[test]
    fn last_row_wins_for_duplicate_durations() {
        let csv = "duration_months,coefficient\n36,3.67\n36,3.70\n";
        let entries = parse_coefficients_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].coefficient, 3.70);
    }

    #[test]
    fn rejects_missing_columns_and_bad_values() {
        assert!(parse_coefficients_csv("months,value\n12,9.21\n".as_bytes()).is_err());
        assert!(
            parse_coefficients_csv("duration_months,coefficient\n12,zero\n".as_bytes()).is_err()
        );
        assert!(
            parse_coefficients_csv("duration_months,coefficient\n12,-1.0\n".as_bytes()).is_err()
        );
        assert!(
            parse_coefficients_csv("duration_months,coefficient\n0,2.5\n".as_bytes()).is_err()
        );
    }
}
