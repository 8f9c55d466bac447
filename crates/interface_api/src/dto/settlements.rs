//! Settlement DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{ClaimId, Currency};
use domain_settlement::{ClaimInput, CoverageType, SettlementResult};

use crate::service::SettledClaim;

/// Financial summary returned by the synchronous settlement
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub currency: Currency,
    pub coverage_type: CoverageType,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurer_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub customer_payment: Decimal,
}

impl From<&SettlementResult> for FinancialSummary {
    fn from(result: &SettlementResult) -> Self {
        Self {
            currency: result.currency(),
            coverage_type: result.coverage_type(),
            total: result.total_cost(),
            insurer_payment: result.insurer_payment(),
            customer_payment: result.customer_payment(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    pub claim_id: ClaimId,
    pub document_key: String,
    pub document_location: String,
    pub summary: FinancialSummary,
    pub resolution_note: String,
}

impl From<SettledClaim> for SettlementResponse {
    fn from(settled: SettledClaim) -> Self {
        Self {
            claim_id: settled.claim.claim_id,
            summary: FinancialSummary::from(&settled.result),
            resolution_note: settled.result.resolution_note().to_string(),
            document_key: settled.document.key,
            document_location: settled.document.location,
        }
    }
}

/// Normalized claim and full settlement, nothing persisted
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub claim: ClaimInput,
    pub settlement: SettlementResult,
}
