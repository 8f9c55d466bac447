//! Taxable base and tax

use rust_decimal::Decimal;

use core_kernel::Rate;
use crate::error::SettlementError;

/// Unrounded tax figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub taxable_base: Decimal,
    pub tax_amount: Decimal,
    pub total_cost: Decimal,
}

/// Computes base, tax and total at `rate`. No rounding is applied.
///
/// # Errors
///
/// Returns `SettlementError::Overflow` if an amount exceeds the decimal range.
pub fn compute_tax(
    labor_cost: Decimal,
    adjusted_parts_cost: Decimal,
    rate: Rate,
) -> Result<TaxBreakdown, SettlementError> {
    let taxable_base = labor_cost
        .checked_add(adjusted_parts_cost)
        .ok_or(SettlementError::Overflow("taxable base"))?;
    let tax_amount = taxable_base
        .checked_mul(rate.as_decimal())
        .ok_or(SettlementError::Overflow("tax amount"))?;
    let total_cost = taxable_base
        .checked_add(tax_amount)
        .ok_or(SettlementError::Overflow("total cost"))?;

    Ok(TaxBreakdown {
        taxable_base,
        tax_amount,
        total_cost,
    })
}
