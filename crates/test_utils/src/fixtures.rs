//! Pre-built Test Fixtures
//!
//! Raw payloads for the reference settlement scenarios. All of them assume
//! the current year is [`REFERENCE_YEAR`]; pair them with [`test_engine`].

use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;

use core_kernel::{FixedClock, Timezone};
use domain_settlement::{SettlementConfig, SettlementEngine};

use crate::builders::RawClaimBuilder;

/// Calendar year the fixtures are written against
pub const REFERENCE_YEAR: i32 = 2025;

/// A clock frozen in the reference year, in the default settlement timezone
pub fn reference_clock() -> Arc<FixedClock> {
    reference_clock_in(SettlementConfig::default().timezone)
}

/// A clock frozen in the reference year, in `timezone`
pub fn reference_clock_in(timezone: Timezone) -> Arc<FixedClock> {
    let clock = FixedClock::at_year(REFERENCE_YEAR).expect("valid reference year");
    Arc::new(clock.with_timezone(timezone))
}

/// Engine with default parameters and a clock frozen in the reference year
pub fn test_engine() -> SettlementEngine {
    test_engine_with(SettlementConfig::default())
}

/// Engine with custom parameters and a clock frozen in the reference year
pub fn test_engine_with(config: SettlementConfig) -> SettlementEngine {
    let clock = reference_clock_in(config.timezone);
    SettlementEngine::new(config, clock).expect("valid settlement config")
}

/// Fixture for raw claim payloads
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Third-party policy, 15-year-old vehicle: customer pays 1694
    pub fn third_party_old_vehicle() -> Value {
        RawClaimBuilder::new()
            .with_claim_id("SIN-SCN-1")
            .aged(15)
            .with_coverage("TERCEROS")
            .with_limit(dec!(5000))
            .build()
    }

    /// Comprehensive policy over its 1000 limit: insurer 1000, customer 694
    pub fn comprehensive_over_limit() -> Value {
        RawClaimBuilder::new()
            .with_claim_id("SIN-SCN-2")
            .aged(15)
            .with_coverage("TODO_RIESGO")
            .with_limit(dec!(1000))
            .build()
    }

    /// Deductible 300 then limit 1000 on a 1694 total: insurer 1000, customer 694
    pub fn deductible_then_limit() -> Value {
        RawClaimBuilder::new()
            .with_claim_id("SIN-SCN-3")
            .aged(15)
            .with_coverage("FRANQUICIA")
            .with_deductible(dec!(300))
            .with_limit(dec!(1000))
            .build()
    }

    /// Total of 121 under a 500 deductible: customer pays everything
    pub fn below_deductible() -> Value {
        RawClaimBuilder::new()
            .with_claim_id("SIN-SCN-4")
            .with_coverage("TODO_RIESGO_FRANQUICIA")
            .with_deductible(dec!(500))
            .with_limit(dec!(1000))
            .with_costs(dec!(100), dec!(0))
            .build()
    }

    /// Unrecognised coverage label
    pub fn unknown_coverage() -> Value {
        RawClaimBuilder::new()
            .with_claim_id("SIN-SCN-5")
            .aged(15)
            .with_coverage("RARO")
            .build()
    }

    /// Negative parts cost, rejected by validation
    pub fn negative_parts_cost() -> Value {
        RawClaimBuilder::new()
            .with_claim_id("SIN-SCN-6")
            .with_costs(dec!(1000), dec!(-500))
            .build()
    }

    /// A payload that is not a JSON object
    pub fn not_an_object() -> Value {
        json!(["not", "a", "claim"])
    }
}
