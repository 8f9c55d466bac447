//! Normalized claim record
//!
//! A [`ClaimInput`] is built fresh for every invocation, either by the
//! normalizer from an untyped payload or directly by a caller. Every text
//! field holds a value (sentinels stand in for missing data), so downstream
//! formatting never checks for absence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, RegistrationPlate, NOT_AVAILABLE};
use crate::coverage::CoverageType;
use crate::error::SettlementError;

/// The insured party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub national_id: String,
    pub email: String,
}

impl Default for Customer {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            national_id: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
        }
    }
}

/// The damaged vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub registration_plate: RegistrationPlate,
    pub make: String,
    pub model: String,
    pub registration_year: i32,
}

impl Vehicle {
    /// A vehicle with unknown plate, make and model
    pub fn registered_in(registration_year: i32) -> Self {
        Self {
            registration_plate: RegistrationPlate::unknown(),
            make: NOT_AVAILABLE.to_string(),
            model: NOT_AVAILABLE.to_string(),
            registration_year,
        }
    }

    /// Age in whole calendar years as of `current_year`
    ///
    /// Not clamped: a registration year in the future yields a negative age.
    pub fn age_in(&self, current_year: i32) -> i64 {
        i64::from(current_year) - i64::from(self.registration_year)
    }
}

/// Policy terms relevant to the settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTerms {
    pub coverage_type: CoverageType,
    /// Upper-cased label as received, kept for notes and documents
    pub coverage_label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub deductible: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub coverage_limit: Decimal,
}

impl PolicyTerms {
    /// Builds policy terms from a raw coverage label
    pub fn new(label: &str, deductible: Decimal, coverage_limit: Decimal) -> Self {
        let coverage_label = CoverageType::normalize_label(label);
        Self {
            coverage_type: CoverageType::classify(&coverage_label),
            coverage_label,
            deductible,
            coverage_limit,
        }
    }
}

/// Workshop repair quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairDetails {
    #[serde(with = "rust_decimal::serde::float")]
    pub labor_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub parts_cost: Decimal,
    pub workshop_name: String,
}

impl RepairDetails {
    pub fn new(labor_cost: Decimal, parts_cost: Decimal) -> Self {
        Self {
            labor_cost,
            parts_cost,
            workshop_name: NOT_AVAILABLE.to_string(),
        }
    }
}

/// A claim ready to be settled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInput {
    pub claim_id: ClaimId,
    pub customer: Customer,
    pub vehicle: Vehicle,
    pub policy: PolicyTerms,
    pub repair: RepairDetails,
}

impl ClaimInput {
    /// Rejects amounts the settlement rules are not defined for
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::Validation` when a repair cost, the
    /// deductible or the coverage limit is negative.
    pub fn validate(&self) -> Result<(), SettlementError> {
        if self.repair.labor_cost < Decimal::ZERO || self.repair.parts_cost < Decimal::ZERO {
            return Err(SettlementError::validation("negative cost"));
        }
        if self.policy.deductible < Decimal::ZERO {
            return Err(SettlementError::validation("negative deductible"));
        }
        if self.policy.coverage_limit < Decimal::ZERO {
            return Err(SettlementError::validation("negative coverage limit"));
        }
        Ok(())
    }
}
