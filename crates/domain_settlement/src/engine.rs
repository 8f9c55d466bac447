//! Settlement engine
//!
//! Runs the pipeline `normalize → depreciate → tax → resolve coverage →
//! assemble` for one claim at a time. The engine holds no mutable state;
//! concurrent calls only share the read-only configuration and clock.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{Clock, SystemClock, Timezone};
use crate::claim::ClaimInput;
use crate::config::SettlementConfig;
use crate::coverage::resolve_coverage;
use crate::depreciation::DepreciationRule;
use crate::error::SettlementError;
use crate::normalizer::normalize_claim;
use crate::settlement::{assemble_settlement, SettlementResult};
use crate::tax::compute_tax;

/// Computes settlements under one configuration
#[derive(Clone)]
pub struct SettlementEngine {
    config: SettlementConfig,
    depreciation: DepreciationRule,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SettlementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SettlementEngine {
    /// Creates an engine after validating the configuration
    ///
    /// Calendar years are read from `clock`, which should be built in
    /// `config.timezone`.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidConfiguration` if a rate is outside
    /// 0%..=100%.
    pub fn new(config: SettlementConfig, clock: Arc<dyn Clock>) -> Result<Self, SettlementError> {
        config.validate()?;
        if clock.timezone() != config.timezone {
            warn!(
                configured = %config.timezone,
                clock = %clock.timezone(),
                "Clock timezone differs from the configured timezone; using the clock's"
            );
        }
        let depreciation =
            DepreciationRule::new(config.depreciation_rate, config.depreciation_age_threshold);
        Ok(Self {
            config,
            depreciation,
            clock,
        })
    }

    /// Engine reading the system clock in the configured timezone
    pub fn with_system_clock(config: SettlementConfig) -> Result<Self, SettlementError> {
        let clock = Arc::new(SystemClock::new(config.timezone));
        Self::new(config, clock)
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// The engine clock's current instant
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Timezone deciding calendar years, as reported by the clock
    pub fn timezone(&self) -> Timezone {
        self.clock.timezone()
    }

    /// Calendar year in the clock's timezone, read once per call
    pub fn current_year(&self) -> i32 {
        self.clock.current_year()
    }

    /// Normalizes a raw payload as of the current year
    pub fn normalize(&self, payload: &Value) -> Result<ClaimInput, SettlementError> {
        normalize_claim(payload, self.current_year())
    }

    /// Settles a normalized claim as of the current year
    pub fn settle(&self, claim: &ClaimInput) -> Result<SettlementResult, SettlementError> {
        self.settle_as_of(claim, self.current_year())
    }

    /// Settles a normalized claim as of `current_year`
    ///
    /// Deterministic: the same claim, year and configuration always give the
    /// same result.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::Validation` for negative amounts and
    /// `SettlementError::Overflow` if the decimal range is exceeded.
    pub fn settle_as_of(
        &self,
        claim: &ClaimInput,
        current_year: i32,
    ) -> Result<SettlementResult, SettlementError> {
        claim.validate()?;

        let vehicle_age = claim.vehicle.age_in(current_year);
        let depreciation = self.depreciation.apply(claim.repair.parts_cost, vehicle_age);
        let tax = compute_tax(
            claim.repair.labor_cost,
            depreciation.adjusted_parts_cost,
            self.config.tax_rate,
        )?;
        let coverage = resolve_coverage(tax.total_cost, &claim.policy);

        let result = assemble_settlement(
            claim.claim_id.clone(),
            self.config.currency,
            vehicle_age,
            depreciation,
            tax,
            coverage,
        );

        info!(
            claim_id = %result.claim_id(),
            coverage = %result.coverage_type(),
            vehicle_age = vehicle_age,
            total = %result.total_money(),
            insurer = %result.insurer_money(),
            customer = %result.customer_money(),
            "Claim settled"
        );

        Ok(result)
    }

    /// Normalizes and settles a raw payload with a single clock reading
    pub fn settle_raw(
        &self,
        payload: &Value,
    ) -> Result<(ClaimInput, SettlementResult), SettlementError> {
        let current_year = self.current_year();
        let claim = normalize_claim(payload, current_year)?;
        let result = self.settle_as_of(&claim, current_year)?;
        Ok((claim, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Customer, PolicyTerms, RepairDetails, Vehicle};
    use crate::coverage::CoverageType;
    use chrono::TimeZone;
    use core_kernel::{ClaimId, FixedClock, Rate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::json;

    pub(super) fn engine() -> SettlementEngine {
        let clock = FixedClock::at_year(2025).unwrap();
        SettlementEngine::new(SettlementConfig::default(), Arc::new(clock)).unwrap()
    }

    pub(super) fn claim(label: &str, deductible: Decimal, limit: Decimal, labor: Decimal, parts: Decimal, year: i32) -> ClaimInput {
        ClaimInput {
            claim_id: ClaimId::new("SIN-T"),
            customer: Customer::default(),
            vehicle: Vehicle::registered_in(year),
            policy: PolicyTerms::new(label, deductible, limit),
            repair: RepairDetails::new(labor, parts),
        }
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let config = SettlementConfig::default().with_tax_rate(Rate::new(dec!(1.5)));
        let clock = FixedClock::at_year(2025).unwrap();
        let err = SettlementEngine::new(config, Arc::new(clock)).unwrap_err();
        assert!(matches!(err, SettlementError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_current_year_comes_from_clock() {
        assert_eq!(engine().current_year(), 2025);
    }

    #[test]
    fn test_year_boundary_follows_clock_timezone() {
        let new_years_eve = Utc.with_ymd_and_hms(2024, 12, 31, 23, 30, 0).unwrap();
        let madrid: Timezone = "Europe/Madrid".parse().unwrap();

        let utc_clock = FixedClock::new(new_years_eve, Timezone::default());
        let utc_engine = SettlementEngine::new(SettlementConfig::default(), Arc::new(utc_clock)).unwrap();
        assert_eq!(utc_engine.current_year(), 2024);
        assert_eq!(utc_engine.timezone(), Timezone::default());

        let madrid_clock = FixedClock::new(new_years_eve, madrid);
        let madrid_engine = SettlementEngine::new(SettlementConfig::default(), Arc::new(madrid_clock)).unwrap();
        assert_eq!(madrid_engine.current_year(), 2025);
        assert_eq!(madrid_engine.current_year(), madrid_clock.current_year());
    }

    #[test]
    fn test_settle_uses_clock_year() {
        let result = engine()
            .settle(&claim("TERCEROS", dec!(0), dec!(0), dec!(1000), dec!(500), 2010))
            .unwrap();
        assert_eq!(result.vehicle_age_years(), 15);
        assert_eq!(result.total_cost(), dec!(1694.00));
    }

    #[test]
    fn test_settle_raw_returns_normalized_claim() {
        let payload = json!({
            "claimId": "SIN-R",
            "vehicle": {"registrationYear": 2020},
            "policy": {"coverageType": "TODO_RIESGO", "coverageLimit": 5000},
            "repair": {"laborCost": 100, "partsCost": 100}
        });
        let (claim, result) = engine().settle_raw(&payload).unwrap();
        assert_eq!(claim.claim_id.as_str(), "SIN-R");
        assert_eq!(result.coverage_type(), CoverageType::Comprehensive);
        assert_eq!(result.total_cost(), dec!(242.00));
        assert_eq!(result.insurer_payment(), dec!(242.00));
    }

    #[test]
    fn test_custom_tax_rate_and_threshold() {
        let config = SettlementConfig::default()
            .with_tax_rate(Rate::new(dec!(0.10)))
            .with_depreciation(Rate::new(dec!(0.50)), 5);
        let clock = FixedClock::at_year(2025).unwrap();
        let engine = SettlementEngine::new(config, Arc::new(clock)).unwrap();

        let result = engine
            .settle(&claim("TERCEROS", dec!(0), dec!(0), dec!(100), dec!(100), 2019))
            .unwrap();
        assert_eq!(result.depreciation_applied(), dec!(50.00));
        assert_eq!(result.total_cost(), dec!(165.00));
    }

    #[test]
    fn test_settlement_is_idempotent() {
        let engine = engine();
        let input = claim("TODO_RIESGO_FRANQUICIA", dec!(300), dec!(1000), dec!(1000), dec!(500), 2010);
        let first = engine.settle_as_of(&input, 2025).unwrap();
        let second = engine.settle_as_of(&input, 2025).unwrap();
        assert_eq!(first, second);
    }

}
