use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::months_for_term;
use crate::types::{Money, Percent};

/// Input for a fixed-rate, fixed-term loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub principal: Money,
    /// Annual rate as a percentage (5.5 = 5.5% per year)
    pub annual_rate_percent: Percent,
    pub term_years: i32,
}

impl LoanRequest {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_years: i32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn months(&self) -> i64 {
        months_for_term(self.term_years)
    }
}

/// A single month in the amortization schedule. All amounts are rounded to
/// cents when the row is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub month: u32,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub cumulative_interest: Money,
    pub remaining_balance: Money,
}

/// Amortization output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_cost: Money,
    pub schedule: Vec<PaymentRow>,
}

impl LoanResult {
    pub fn number_of_payments(&self) -> usize {
        self.schedule.len()
    }

    /// Sum of the recorded (rounded) principal portions.
    pub fn total_principal_paid(&self) -> Money {
        self.schedule.iter().map(|row| row.principal_portion).sum()
    }

    /// Amount by which the recorded principal portions exceed the original
    /// principal. Positive when the last payment overpays and the balance clamp
    /// absorbs the difference.
    pub fn final_payment_overpay(&self, principal: Money) -> Money {
        (self.total_principal_paid() - principal).max(Decimal::ZERO)
    }
}
