//! Settlement message published for downstream consumers
//!
//! The message carries the claim identity, the parties involved and the
//! financial detail of the settlement. Amounts are already rounded to the
//! currency's minor unit and serialize as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{ClaimId, Currency};
use crate::claim::{ClaimInput, Customer, Vehicle};
use crate::coverage::CoverageType;
use crate::settlement::SettlementResult;

/// Financial part of a settlement message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDetail {
    pub currency: Currency,
    pub coverage_type: CoverageType,
    pub vehicle_age_years: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub depreciation_applied: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub insurer_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub customer_payment: Decimal,
    pub resolution_note: String,
}

impl From<&SettlementResult> for FinancialDetail {
    fn from(result: &SettlementResult) -> Self {
        Self {
            currency: result.currency(),
            coverage_type: result.coverage_type(),
            vehicle_age_years: result.vehicle_age_years(),
            depreciation_applied: result.depreciation_applied(),
            taxable_base: result.taxable_base(),
            tax: result.tax_amount(),
            total_cost: result.total_cost(),
            insurer_payment: result.insurer_payment(),
            customer_payment: result.customer_payment(),
            resolution_note: result.resolution_note().to_string(),
        }
    }
}

/// Message emitted once a claim has been settled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementMessage {
    /// Time-ordered identifier, unique per message
    pub message_id: Uuid,
    pub claim_id: ClaimId,
    pub issued_at: DateTime<Utc>,
    pub customer: Customer,
    pub vehicle: Vehicle,
    pub workshop_name: String,
    pub financial_detail: FinancialDetail,
}

impl SettlementMessage {
    /// Builds the message for a settled claim
    pub fn new(claim: &ClaimInput, result: &SettlementResult, issued_at: DateTime<Utc>) -> Self {
        Self {
            message_id: Uuid::now_v7(),
            claim_id: result.claim_id().clone(),
            issued_at,
            customer: claim.customer.clone(),
            vehicle: claim.vehicle.clone(),
            workshop_name: claim.repair.workshop_name.clone(),
            financial_detail: FinancialDetail::from(result),
        }
    }
}
