//! Comprehensive tests for domain_settlement

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{FixedClock, Rate};

use domain_settlement::config::SettlementConfig;
use domain_settlement::coverage::CoverageType;
use domain_settlement::engine::SettlementEngine;
use domain_settlement::error::SettlementError;
use domain_settlement::settlement::SettlementResult;

const YEAR: i32 = 2025;

fn engine_with(config: SettlementConfig) -> SettlementEngine {
    let clock = FixedClock::at_year(YEAR).unwrap();
    SettlementEngine::new(config, Arc::new(clock)).unwrap()
}

fn engine() -> SettlementEngine {
    engine_with(SettlementConfig::default())
}

fn payload(coverage: &str, deductible: Decimal, limit: Decimal, age: i32) -> Value {
    json!({
        "claimId": "SIN-2025-001",
        "customer": {"name": "Marta Ruiz", "nationalId": "12345678Z", "email": "marta@example.com"},
        "vehicle": {
            "registrationPlate": "1234ABC",
            "make": "Seat",
            "model": "Leon",
            "registrationYear": YEAR - age
        },
        "policy": {
            "coverageType": coverage,
            "deductible": deductible.to_string(),
            "coverageLimit": limit.to_string()
        },
        "repair": {"laborCost": 1000, "partsCost": 500, "workshopName": "Talleres Norte"}
    })
}

fn settle(body: &Value) -> SettlementResult {
    engine().settle_raw(body).unwrap().1
}

fn assert_reconciles(result: &SettlementResult) {
    assert_eq!(
        result.insurer_payment() + result.customer_payment(),
        result.total_cost()
    );
}

// ============================================================================
// Reference Scenarios
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_third_party_old_vehicle() {
        let result = settle(&payload("TERCEROS", dec!(0), dec!(5000), 15));

        assert_eq!(result.vehicle_age_years(), 15);
        assert_eq!(result.depreciation_applied(), dec!(100));
        assert_eq!(result.adjusted_parts_cost(), dec!(400));
        assert_eq!(result.taxable_base(), dec!(1400));
        assert_eq!(result.tax_amount(), dec!(294));
        assert_eq!(result.total_cost(), dec!(1694));
        assert_eq!(result.insurer_payment(), dec!(0));
        assert_eq!(result.customer_payment(), dec!(1694));
        assert_eq!(result.coverage_type(), CoverageType::ThirdParty);
    }

    #[test]
    fn test_comprehensive_over_limit_old_vehicle() {
        let result = settle(&payload("TODO_RIESGO", dec!(0), dec!(1000), 15));

        assert_eq!(result.total_cost(), dec!(1694));
        assert_eq!(result.insurer_payment(), dec!(1000));
        assert_eq!(result.customer_payment(), dec!(694));
    }

    #[test]
    fn test_comprehensive_over_limit_recent_vehicle() {
        let result = settle(&payload("TODO_RIESGO", dec!(0), dec!(1000), 10));

        assert_eq!(result.depreciation_applied(), dec!(0));
        assert_eq!(result.taxable_base(), dec!(1500));
        assert_eq!(result.total_cost(), dec!(1815));
        assert_eq!(result.insurer_payment(), dec!(1000));
        assert_eq!(result.customer_payment(), dec!(815));
    }

    #[test]
    fn test_deductible_then_limit() {
        let result = settle(&payload("FRANQUICIA", dec!(300), dec!(1000), 15));

        assert_eq!(result.coverage_type(), CoverageType::ComprehensiveWithDeductible);
        assert_eq!(result.total_cost(), dec!(1694));
        assert_eq!(result.insurer_payment(), dec!(1000));
        // 300 deductible + 394 over the limit
        assert_eq!(result.customer_payment(), dec!(694));
    }

    #[test]
    fn test_total_below_deductible() {
        let engine = engine_with(SettlementConfig::default().with_tax_rate(Rate::new(dec!(0))));
        let body = json!({
            "policy": {"coverageType": "TODO_RIESGO_FRANQUICIA", "deductible": 500, "coverageLimit": 1000},
            "repair": {"laborCost": 200, "partsCost": 0}
        });

        let (_, result) = engine.settle_raw(&body).unwrap();

        assert_eq!(result.total_cost(), dec!(200));
        assert_eq!(result.insurer_payment(), dec!(0));
        assert_eq!(result.customer_payment(), dec!(200));
    }

    #[test]
    fn test_unknown_coverage_type() {
        let result = settle(&payload("RARO", dec!(0), dec!(5000), 15));

        assert_eq!(result.coverage_type(), CoverageType::Unknown);
        assert_eq!(result.insurer_payment(), dec!(0));
        assert_eq!(result.customer_payment(), result.total_cost());
        assert!(result.resolution_note().contains("'RARO'"));
        assert!(result.resolution_note().contains("not recognised"));
    }

    #[test]
    fn test_negative_parts_cost_is_rejected() {
        let mut body = payload("TERCEROS", dec!(0), dec!(0), 15);
        body["repair"]["partsCost"] = json!(-10);

        let err = engine().settle_raw(&body).unwrap_err();

        assert!(matches!(err, SettlementError::Validation(_)));
        assert!(err.is_client_error());
    }
}

// ============================================================================
// Edge Cases
// ============================================================================

mod edge_case_tests {
    use super::*;

    #[test]
    fn test_zero_limit_comprehensive_charges_customer() {
        let result = settle(&payload("TODO_RIESGO", dec!(0), dec!(0), 15));
        assert_eq!(result.insurer_payment(), dec!(0));
        assert_eq!(result.customer_payment(), dec!(1694));
    }

    #[test]
    fn test_zero_limit_with_deductible() {
        let result = settle(&payload("FRANQUICIA", dec!(300), dec!(0), 15));
        assert_eq!(result.insurer_payment(), dec!(0));
        assert_eq!(result.customer_payment(), dec!(1694));
    }

    #[test]
    fn test_future_registration_year_gives_negative_age() {
        let result = settle(&payload("TERCEROS", dec!(0), dec!(0), -2));
        assert_eq!(result.vehicle_age_years(), -2);
        assert_eq!(result.depreciation_applied(), dec!(0));
        assert_eq!(result.total_cost(), dec!(1815));
    }

    #[test]
    fn test_threshold_age_is_not_depreciated() {
        let result = settle(&payload("TERCEROS", dec!(0), dec!(0), 10));
        assert_eq!(result.depreciation_applied(), dec!(0));

        let result = settle(&payload("TERCEROS", dec!(0), dec!(0), 11));
        assert_eq!(result.depreciation_applied(), dec!(100));
    }

    #[test]
    fn test_lowercase_label_with_spaces() {
        let result = settle(&payload("  todo_riesgo  ", dec!(0), dec!(5000), 15));
        assert_eq!(result.coverage_type(), CoverageType::Comprehensive);
        assert_eq!(result.insurer_payment(), dec!(1694));
    }

    #[test]
    fn test_missing_coverage_defaults_to_third_party() {
        let body = json!({"repair": {"laborCost": 100}});
        let result = settle(&body);
        assert_eq!(result.coverage_type(), CoverageType::ThirdParty);
        assert_eq!(result.customer_payment(), dec!(121));
    }

    #[test]
    fn test_negative_deductible_is_rejected() {
        let body = payload("FRANQUICIA", dec!(-1), dec!(1000), 15);
        assert!(matches!(
            engine().settle_raw(&body),
            Err(SettlementError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_payload_settles_to_zero() {
        let (claim, result) = engine().settle_raw(&json!({})).unwrap();
        assert!(claim.claim_id.is_unknown());
        assert_eq!(result.total_cost(), dec!(0));
        assert_reconciles(&result);
    }

    #[test]
    fn test_cent_amounts_reconcile() {
        let body = json!({
            "policy": {"coverageType": "FRANQUICIA", "deductible": "0.33", "coverageLimit": "10.01"},
            "repair": {"laborCost": "12.34", "partsCost": "0.07"}
        });
        let result = settle(&body);
        assert_eq!(result.total_cost().scale(), 2);
        assert_reconciles(&result);
    }
}

// ============================================================================
// Invariants
// ============================================================================

mod invariant_tests {
    use super::*;

    #[test]
    fn test_all_branches_reconcile() {
        for label in ["TERCEROS", "TODO_RIESGO", "TODO_RIESGO_FRANQUICIA", "RARO"] {
            for age in [0, 10, 11, 30] {
                let result = settle(&payload(label, dec!(300), dec!(1000), age));
                assert_reconciles(&result);
                assert!(result.insurer_payment() >= dec!(0));
                assert!(result.customer_payment() >= dec!(0));
            }
        }
    }

    #[test]
    fn test_raising_limit_never_raises_customer_share() {
        let mut previous = None;
        for limit in [dec!(0), dec!(500), dec!(1000), dec!(1694), dec!(5000)] {
            let result = settle(&payload("TODO_RIESGO", dec!(0), limit, 15));
            if let Some(prev) = previous {
                assert!(result.customer_payment() <= prev);
            }
            previous = Some(result.customer_payment());
        }
    }

    #[test]
    fn test_identical_input_identical_output() {
        let body = payload("FRANQUICIA", dec!(300), dec!(1000), 15);
        assert_eq!(settle(&body), settle(&body));
    }

    #[test]
    fn test_legacy_and_camel_case_payloads_agree() {
        let legacy = json!({
            "id_siniestro": "SIN-2025-001",
            "vehiculo": {"matricula": "1234ABC", "anio": YEAR - 15},
            "poliza": {"tipo": "FRANQUICIA", "franquicia": 300, "limite": 1000},
            "reparacion": {"mo": 1000, "piezas": 500}
        });
        let legacy_result = settle(&legacy);
        let camel_result = settle(&payload("FRANQUICIA", dec!(300), dec!(1000), 15));

        assert_eq!(legacy_result.total_cost(), camel_result.total_cost());
        assert_eq!(legacy_result.insurer_payment(), camel_result.insurer_payment());
        assert_eq!(legacy_result.customer_payment(), camel_result.customer_payment());
    }
}
