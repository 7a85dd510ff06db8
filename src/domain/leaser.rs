use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Financing partner providing a duration/coefficient table.
///
/// The coefficient table is owned by the catalog and read-only to the
/// calculator; it is loaded alongside the leaser when present.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Leaser {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    /// Coefficient entries ordered by duration.
    pub coefficients: Vec<CoefficientEntry>,
}

/// One row of a leaser's coefficient table.
///
/// The coefficient is expressed in percentage points of the purchase price
/// per month: `monthly_payment = purchase_price * coefficient / 100`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CoefficientEntry {
    pub duration_months: i32,
    pub coefficient: f64,
}

impl CoefficientEntry {
    /// A usable entry has a positive duration and a positive, finite
    /// coefficient. Anything else is skipped by the calculator.
    pub fn is_valid(&self) -> bool {
        self.duration_months > 0 && self.coefficient.is_finite() && self.coefficient > 0.0
    }
}

impl Leaser {
    /// Looks up the coefficient for the given contract duration.
    pub fn coefficient_for(&self, duration_months: i32) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|entry| entry.duration_months == duration_months && entry.is_valid())
            .map(|entry| entry.coefficient)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewLeaser {
    pub hub_id: i32,
    pub name: String,
}

impl NewLeaser {
    #[must_use]
    pub fn new(hub_id: i32, name: String) -> Self {
        Self {
            hub_id,
            name: name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficient_lookup_skips_invalid_entries() {
        let leaser = Leaser {
            coefficients: vec![
                CoefficientEntry {
                    duration_months: 36,
                    coefficient: 3.67,
                },
                CoefficientEntry {
                    duration_months: 48,
                    coefficient: 0.0,
                },
            ],
            ..Default::default()
        };

        assert_eq!(leaser.coefficient_for(36), Some(3.67));
        assert_eq!(leaser.coefficient_for(48), None);
        assert_eq!(leaser.coefficient_for(60), None);
    }
}
