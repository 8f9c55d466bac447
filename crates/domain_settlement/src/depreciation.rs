//! Age-based depreciation of replacement parts

use rust_decimal::Decimal;

use core_kernel::Rate;

/// Depreciation rule: vehicles strictly older than `age_threshold` years
/// have `rate` of their parts cost written off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepreciationRule {
    pub rate: Rate,
    pub age_threshold: u32,
}

/// Outcome of applying the rule to one claim
#[derive(Debug, Clone, PartialEq)]
pub struct Depreciation {
    pub amount: Decimal,
    pub adjusted_parts_cost: Decimal,
    /// Informational only
    pub note: String,
}

impl DepreciationRule {
    pub fn new(rate: Rate, age_threshold: u32) -> Self {
        Self { rate, age_threshold }
    }

    /// Returns true if a vehicle of this age is depreciated
    pub fn applies_to(&self, vehicle_age_years: i64) -> bool {
        vehicle_age_years > i64::from(self.age_threshold)
    }

    /// Applies the rule to a parts cost
    ///
    /// A negative age (registration year in the future) never qualifies.
    pub fn apply(&self, parts_cost: Decimal, vehicle_age_years: i64) -> Depreciation {
        if self.applies_to(vehicle_age_years) {
            let amount = self.rate.apply(parts_cost);
            Depreciation {
                amount,
                adjusted_parts_cost: parts_cost - amount,
                note: format!(
                    "Vehicle is {} years old: {} depreciation applied to parts.",
                    vehicle_age_years, self.rate
                ),
            }
        } else {
            Depreciation {
                amount: Decimal::ZERO,
                adjusted_parts_cost: parts_cost,
                note: format!(
                    "Vehicle is {} years old (not older than {}): no depreciation.",
                    vehicle_age_years, self.age_threshold
                ),
            }
        }
    }
}
