//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for settlement results that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_settlement::SettlementResult;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that insurer and customer shares add up to the total exactly
pub fn assert_payments_reconcile(result: &SettlementResult) {
    let sum = result.insurer_payment() + result.customer_payment();
    assert_eq!(
        sum,
        result.total_cost(),
        "Payments do not reconcile for {}: insurer={}, customer={}, total={}",
        result.claim_id(),
        result.insurer_payment(),
        result.customer_payment(),
        result.total_cost()
    );
}

/// Asserts that neither party is asked to pay a negative amount
pub fn assert_payments_non_negative(result: &SettlementResult) {
    assert!(
        !result.insurer_money().is_negative(),
        "Negative insurer payment for {}: {}",
        result.claim_id(),
        result.insurer_money()
    );
    assert!(
        !result.customer_money().is_negative(),
        "Negative customer payment for {}: {}",
        result.claim_id(),
        result.customer_money()
    );
}

/// Asserts the split of a settlement in whole currency units
pub fn assert_split(result: &SettlementResult, total: Decimal, insurer: Decimal, customer: Decimal) {
    assert_eq!(result.total_cost(), total, "total cost of {}", result.claim_id());
    assert_eq!(result.insurer_payment(), insurer, "insurer share of {}", result.claim_id());
    assert_eq!(result.customer_payment(), customer, "customer share of {}", result.claim_id());
}
