//! Coverage resolution
//!
//! Splits the total repair cost between insurer and customer according to
//! the policy type. The decision table is:
//!
//! ```text
//! THIRD_PARTY                  insurer 0                  customer total
//! COMPREHENSIVE                insurer min(total, limit)  customer max(0, total - limit)
//! COMPREHENSIVE_WITH_DEDUCTIBLE deductible first, then the limit on the residual
//! UNKNOWN                      insurer 0                  customer total
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::claim::PolicyTerms;

/// Label of third-party-only policies
pub const THIRD_PARTY_LABEL: &str = "TERCEROS";

/// Label of comprehensive policies without deductible
pub const COMPREHENSIVE_LABEL: &str = "TODO_RIESGO";

/// Marker that makes any label a deductible-bearing comprehensive policy
pub const DEDUCTIBLE_MARKER: &str = "FRANQUICIA";

/// Closed set of coverage branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageType {
    /// Own damage is never covered
    ThirdParty,
    /// Covered up to the policy limit
    Comprehensive,
    /// Customer bears the deductible, insurer covers the rest up to the limit
    ComprehensiveWithDeductible,
    /// Unrecognised label; the customer bears the full cost
    Unknown,
}

impl CoverageType {
    /// Canonical form of an incoming label: trimmed and upper-cased
    pub fn normalize_label(label: &str) -> String {
        label.trim().to_uppercase()
    }

    /// Maps a policy label to its branch
    ///
    /// Matching is case-insensitive and checked in order: exact third-party
    /// label, exact comprehensive label, deductible marker, fallback.
    pub fn classify(label: &str) -> Self {
        let label = Self::normalize_label(label);
        match label.as_str() {
            THIRD_PARTY_LABEL => CoverageType::ThirdParty,
            COMPREHENSIVE_LABEL => CoverageType::Comprehensive,
            other if carries_deductible(other) => CoverageType::ComprehensiveWithDeductible,
            _ => CoverageType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageType::ThirdParty => "THIRD_PARTY",
            CoverageType::Comprehensive => "COMPREHENSIVE",
            CoverageType::ComprehensiveWithDeductible => "COMPREHENSIVE_WITH_DEDUCTIBLE",
            CoverageType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only place the deductible marker is interpreted.
///
/// Any normalized label containing the marker qualifies, which admits
/// product variants such as `TODO_RIESGO_FRANQUICIA_PREMIUM` but also any
/// future label that merely mentions it.
pub fn carries_deductible(normalized_label: &str) -> bool {
    normalized_label.contains(DEDUCTIBLE_MARKER)
}

/// Outcome of the coverage resolution
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSplit {
    pub coverage_type: CoverageType,
    pub insurer_payment: Decimal,
    pub customer_payment: Decimal,
    pub note: String,
}

impl CoverageSplit {
    fn customer_only(coverage_type: CoverageType, total_cost: Decimal, note: String) -> Self {
        Self {
            coverage_type,
            insurer_payment: Decimal::ZERO,
            customer_payment: total_cost,
            note,
        }
    }
}

/// Splits `amount` into the part within `limit` and the excess over it
fn cap_at_limit(amount: Decimal, limit: Decimal) -> (Decimal, Decimal) {
    if amount > limit {
        (limit, amount - limit)
    } else {
        (amount, Decimal::ZERO)
    }
}

/// Resolves who pays what for a non-negative `total_cost`
pub fn resolve_coverage(total_cost: Decimal, policy: &PolicyTerms) -> CoverageSplit {
    let limit = policy.coverage_limit;
    let deductible = policy.deductible;

    match policy.coverage_type {
        CoverageType::ThirdParty => CoverageSplit::customer_only(
            CoverageType::ThirdParty,
            total_cost,
            "Third-party policy: own damage to the insured vehicle is not covered.".to_string(),
        ),

        CoverageType::Comprehensive => {
            let (insurer, excess) = cap_at_limit(total_cost, limit);
            let note = if excess > Decimal::ZERO {
                format!("Comprehensive policy: covered up to the policy limit of {:.2}.", limit)
            } else {
                "Comprehensive policy: full coverage applied.".to_string()
            };
            CoverageSplit {
                coverage_type: CoverageType::Comprehensive,
                insurer_payment: insurer,
                customer_payment: excess,
                note,
            }
        }

        CoverageType::ComprehensiveWithDeductible => {
            if total_cost <= deductible {
                return CoverageSplit::customer_only(
                    CoverageType::ComprehensiveWithDeductible,
                    total_cost,
                    format!(
                        "Repair cost ({:.2}) does not exceed the deductible ({:.2}); nothing is claimable.",
                        total_cost, deductible
                    ),
                );
            }

            // Deductible is taken first, the limit then caps what remains
            let residual = total_cost - deductible;
            let (insurer, excess) = cap_at_limit(residual, limit);
            let note = if excess > Decimal::ZERO {
                format!(
                    "Deductible of {:.2} applied; the insurer covers the remainder up to the policy limit of {:.2}.",
                    deductible, limit
                )
            } else {
                format!(
                    "Deductible of {:.2} applied; the insurer covers the remainder.",
                    deductible
                )
            };
            CoverageSplit {
                coverage_type: CoverageType::ComprehensiveWithDeductible,
                insurer_payment: insurer,
                customer_payment: deductible + excess,
                note,
            }
        }

        CoverageType::Unknown => {
            warn!(
                coverage_label = %policy.coverage_label,
                "Unrecognised coverage type, charging full cost to customer"
            );
            CoverageSplit::customer_only(
                CoverageType::Unknown,
                total_cost,
                format!(
                    "Coverage type '{}' is not recognised; coverage rejected by default.",
                    policy.coverage_label
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms(label: &str, deductible: Decimal, limit: Decimal) -> PolicyTerms {
        PolicyTerms::new(label, deductible, limit)
    }

    #[test]
    fn test_classify_exact_labels_case_insensitive() {
        assert_eq!(CoverageType::classify("terceros"), CoverageType::ThirdParty);
        assert_eq!(CoverageType::classify("Todo_Riesgo"), CoverageType::Comprehensive);
    }

    #[test]
    fn test_classify_deductible_marker_anywhere() {
        assert_eq!(
            CoverageType::classify("TODO_RIESGO_FRANQUICIA"),
            CoverageType::ComprehensiveWithDeductible
        );
        assert_eq!(
            CoverageType::classify("franquicia_premium"),
            CoverageType::ComprehensiveWithDeductible
        );
    }

    #[test]
    fn test_classify_unknown_labels() {
        assert_eq!(CoverageType::classify("RARO"), CoverageType::Unknown);
        assert_eq!(CoverageType::classify(""), CoverageType::Unknown);
        assert_eq!(CoverageType::classify("TERCEROS_PLUS"), CoverageType::Unknown);
    }

    #[test]
    fn test_third_party_customer_pays_all() {
        let split = resolve_coverage(dec!(1694), &terms("TERCEROS", dec!(0), dec!(5000)));
        assert_eq!(split.insurer_payment, dec!(0));
        assert_eq!(split.customer_payment, dec!(1694));
    }

    #[test]
    fn test_comprehensive_within_limit() {
        let split = resolve_coverage(dec!(800), &terms("TODO_RIESGO", dec!(0), dec!(1000)));
        assert_eq!(split.insurer_payment, dec!(800));
        assert_eq!(split.customer_payment, dec!(0));
        assert!(split.note.contains("full coverage"));
    }

    #[test]
    fn test_comprehensive_over_limit() {
        let split = resolve_coverage(dec!(1694), &terms("TODO_RIESGO", dec!(0), dec!(1000)));
        assert_eq!(split.insurer_payment, dec!(1000));
        assert_eq!(split.customer_payment, dec!(694));
        assert!(split.note.contains("1000.00"));
    }

    #[test]
    fn test_comprehensive_ignores_deductible() {
        let split = resolve_coverage(dec!(800), &terms("TODO_RIESGO", dec!(300), dec!(1000)));
        assert_eq!(split.customer_payment, dec!(0));
    }

    #[test]
    fn test_deductible_then_limit() {
        let split = resolve_coverage(
            dec!(1694),
            &terms("TODO_RIESGO_FRANQUICIA", dec!(300), dec!(1000)),
        );
        assert_eq!(split.insurer_payment, dec!(1000));
        assert_eq!(split.customer_payment, dec!(694));
    }

    #[test]
    fn test_claim_equal_to_deductible_is_not_claimable() {
        let split = resolve_coverage(dec!(500), &terms("FRANQUICIA", dec!(500), dec!(1000)));
        assert_eq!(split.insurer_payment, dec!(0));
        assert_eq!(split.customer_payment, dec!(500));
    }

    #[test]
    fn test_unknown_type_note_names_label() {
        let split = resolve_coverage(dec!(120), &terms("raro", dec!(0), dec!(1000)));
        assert_eq!(split.coverage_type, CoverageType::Unknown);
        assert_eq!(split.customer_payment, dec!(120));
        assert!(split.note.contains("'RARO'"));
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&CoverageType::ComprehensiveWithDeductible).unwrap();
        assert_eq!(json, "\"COMPREHENSIVE_WITH_DEDUCTIBLE\"");
    }
}
