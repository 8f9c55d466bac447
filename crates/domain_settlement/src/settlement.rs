//! Settlement result and its assembly
//!
//! The assembler is the only place amounts are rounded to the currency's
//! minor unit. The customer share is derived from the rounded total and the
//! rounded insurer share so that both payments always add up to the
//! published total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Currency, Money};
use crate::coverage::{CoverageSplit, CoverageType};
use crate::depreciation::Depreciation;
use crate::tax::TaxBreakdown;

/// The settlement facts of one claim
///
/// Computed once and never mutated; consumers receive it by value or
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResult {
    claim_id: ClaimId,
    currency: Currency,
    coverage_type: CoverageType,
    vehicle_age_years: i64,
    #[serde(with = "rust_decimal::serde::float")]
    depreciation_applied: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    adjusted_parts_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    taxable_base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    insurer_payment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    customer_payment: Decimal,
    depreciation_note: String,
    coverage_note: String,
    resolution_note: String,
}

impl SettlementResult {
    pub fn claim_id(&self) -> &ClaimId {
        &self.claim_id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Branch of the coverage table that fired
    pub fn coverage_type(&self) -> CoverageType {
        self.coverage_type
    }

    pub fn vehicle_age_years(&self) -> i64 {
        self.vehicle_age_years
    }

    pub fn depreciation_applied(&self) -> Decimal {
        self.depreciation_applied
    }

    pub fn adjusted_parts_cost(&self) -> Decimal {
        self.adjusted_parts_cost
    }

    pub fn taxable_base(&self) -> Decimal {
        self.taxable_base
    }

    pub fn tax_amount(&self) -> Decimal {
        self.tax_amount
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn insurer_payment(&self) -> Decimal {
        self.insurer_payment
    }

    pub fn customer_payment(&self) -> Decimal {
        self.customer_payment
    }

    /// Explanation of the depreciation decision
    pub fn depreciation_note(&self) -> &str {
        &self.depreciation_note
    }

    /// Explanation of the coverage decision
    pub fn coverage_note(&self) -> &str {
        &self.coverage_note
    }

    /// Human-readable explanation of both decisions. Not meant to be parsed.
    pub fn resolution_note(&self) -> &str {
        &self.resolution_note
    }

    /// Total cost as money, for display
    pub fn total_money(&self) -> Money {
        Money::new(self.total_cost, self.currency)
    }

    pub fn insurer_money(&self) -> Money {
        Money::new(self.insurer_payment, self.currency)
    }

    pub fn customer_money(&self) -> Money {
        Money::new(self.customer_payment, self.currency)
    }
}

/// Combines the stage outputs into a [`SettlementResult`]
pub fn assemble_settlement(
    claim_id: ClaimId,
    currency: Currency,
    vehicle_age_years: i64,
    depreciation: Depreciation,
    tax: TaxBreakdown,
    coverage: CoverageSplit,
) -> SettlementResult {
    let round = |amount: Decimal| Money::new(amount, currency).round_to_currency().amount();

    let total_cost = round(tax.total_cost);
    let insurer_payment = round(coverage.insurer_payment);
    let customer_payment = total_cost - insurer_payment;

    let resolution_note = format!("{} {}", depreciation.note, coverage.note);

    SettlementResult {
        claim_id,
        currency,
        coverage_type: coverage.coverage_type,
        vehicle_age_years,
        depreciation_applied: round(depreciation.amount),
        adjusted_parts_cost: round(depreciation.adjusted_parts_cost),
        taxable_base: round(tax.taxable_base),
        tax_amount: round(tax.tax_amount),
        total_cost,
        insurer_payment,
        customer_payment,
        depreciation_note: depreciation.note,
        coverage_note: coverage.note,
        resolution_note,
    }
}
