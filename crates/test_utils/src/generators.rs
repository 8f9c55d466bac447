//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random claim data that stays
//! within the domain the settlement rules are defined for.

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::builders::RawClaimBuilder;
use crate::fixtures::REFERENCE_YEAR;

/// Strategy for non-negative costs with cent precision, up to 1,000,000
pub fn cost_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for coverage labels: the known ones, case variants and noise
pub fn coverage_label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("TERCEROS".to_string()),
        Just("terceros".to_string()),
        Just("TODO_RIESGO".to_string()),
        Just("Todo_Riesgo".to_string()),
        Just("TODO_RIESGO_FRANQUICIA".to_string()),
        Just("franquicia_premium".to_string()),
        "[A-Z_]{1,16}",
    ]
}

/// Strategy for registration years, including a few in the future
pub fn registration_year_strategy() -> impl Strategy<Value = i32> {
    (REFERENCE_YEAR - 40)..=(REFERENCE_YEAR + 2)
}

/// Strategy for complete raw claim payloads
pub fn raw_claim_strategy() -> impl Strategy<Value = Value> {
    (
        coverage_label_strategy(),
        cost_strategy(),
        cost_strategy(),
        cost_strategy(),
        cost_strategy(),
        registration_year_strategy(),
    )
        .prop_map(|(label, deductible, limit, labor, parts, year)| {
            RawClaimBuilder::new()
                .with_coverage(label)
                .with_deductible(deductible)
                .with_limit(limit)
                .with_costs(labor, parts)
                .with_registration_year(year)
                .build()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn costs_are_never_negative(cost in cost_strategy()) {
            prop_assert!(cost >= Decimal::ZERO);
            prop_assert!(cost.scale() <= 2);
        }

        #[test]
        fn raw_claims_carry_every_section(payload in raw_claim_strategy()) {
            for section in ["customer", "vehicle", "policy", "repair"] {
                prop_assert!(payload[section].is_object());
            }
        }
    }
}
