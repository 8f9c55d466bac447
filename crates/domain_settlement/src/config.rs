//! Settlement parameters
//!
//! The tax rate and the depreciation rule are policy decisions, not code.
//! They are injected into the engine at construction time.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Rate, Timezone};
use crate::error::SettlementError;

/// Parameters shared by every settlement computed by one engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Currency all amounts are expressed in
    pub currency: Currency,
    /// Tax applied on the taxable base
    pub tax_rate: Rate,
    /// Share of the parts cost written off for old vehicles
    pub depreciation_rate: Rate,
    /// Vehicles strictly older than this many years are depreciated
    pub depreciation_age_threshold: u32,
    /// Jurisdiction used to decide the current calendar year
    pub timezone: Timezone,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            currency: Currency::EUR,
            tax_rate: Rate::new(dec!(0.21)),
            depreciation_rate: Rate::new(dec!(0.20)),
            depreciation_age_threshold: 10,
            timezone: Timezone::new(chrono_tz::Europe::Madrid),
        }
    }
}

impl SettlementConfig {
    /// Sets the tax rate
    pub fn with_tax_rate(mut self, rate: Rate) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Sets the depreciation rule
    pub fn with_depreciation(mut self, rate: Rate, age_threshold: u32) -> Self {
        self.depreciation_rate = rate;
        self.depreciation_age_threshold = age_threshold;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Checks that both rates are fractions between 0% and 100%
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::InvalidConfiguration` naming the offending rate
    pub fn validate(&self) -> Result<(), SettlementError> {
        if !self.tax_rate.is_fraction() {
            return Err(SettlementError::invalid_configuration(format!(
                "tax rate {} must lie between 0% and 100%",
                self.tax_rate
            )));
        }
        if !self.depreciation_rate.is_fraction() {
            return Err(SettlementError::invalid_configuration(format!(
                "depreciation rate {} must lie between 0% and 100%",
                self.depreciation_rate
            )));
        }
        Ok(())
    }
}
