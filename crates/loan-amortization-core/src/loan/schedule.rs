use log::{debug, trace, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;

use super::model::{LoanRequest, LoanResult, PaymentRow};
use super::validation::validate_request;
use crate::error::{AmortizationError, LoanField};
use crate::time_value::{monthly_payment, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::AmortizationResult;

/// Decimal places every recorded amount is rounded to.
const CENTS: u32 = 2;

/// Build the month-by-month amortization schedule for a fixed-rate loan.
///
/// Interest and balance are carried at full precision; amounts are rounded to
/// cents only when a row is recorded and when the totals are reported.
pub fn generate_schedule(loan: &LoanRequest) -> AmortizationResult<LoanResult> {
    let loan = validate_request(Some(loan))?;

    let payment = monthly_payment(loan.principal, loan.annual_rate_percent, loan.term_years)?;
    let rate = monthly_rate(loan.annual_rate_percent)?;
    let months = u32::try_from(loan.months()).map_err(|_| AmortizationError::OutOfRange {
        field: LoanField::Term,
        value: loan.term_years.to_string(),
        reason: "Loan term exceeds the number of schedulable months".into(),
    })?;

    debug!(
        "amortizing {} over {} months at {} per month: payment {}",
        loan.principal, months, rate, payment
    );

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = loan.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=months {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| AmortizationError::overflow(format!("interest for month {month}")))?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| AmortizationError::overflow(format!("cumulative interest at month {month}")))?;

        let principal_portion = payment
            .checked_sub(interest)
            .ok_or_else(|| AmortizationError::overflow(format!("principal portion for month {month}")))?;
        balance = balance
            .checked_sub(principal_portion)
            .ok_or_else(|| AmortizationError::overflow(format!("balance after month {month}")))?;

        // Rounding drift on the final payment can push the balance just below zero
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        let row = PaymentRow {
            month,
            payment_amount: payment.round_dp(CENTS),
            principal_portion: principal_portion.round_dp(CENTS),
            interest_portion: interest.round_dp(CENTS),
            cumulative_interest: total_interest.round_dp(CENTS),
            remaining_balance: balance.round_dp(CENTS),
        };
        trace!("{row:?}");
        schedule.push(row);
    }

    let total_cost = loan
        .principal
        .checked_add(total_interest)
        .ok_or_else(|| AmortizationError::overflow("total cost"))?;

    let result = LoanResult {
        monthly_payment: payment,
        total_interest: total_interest.round_dp(CENTS),
        total_cost: total_cost.round_dp(CENTS),
        schedule,
    };

    debug!(
        "schedule complete: {} payments, total interest {}, total cost {}",
        result.schedule.len(),
        result.total_interest,
        result.total_cost
    );

    Ok(result)
}

/// Generate a schedule from an untyped JSON request. A JSON `null` is the
/// missing-request case.
pub fn generate_schedule_json(input: &Value) -> AmortizationResult<LoanResult> {
    generate_schedule(&request_from_json(input)?)
}

/// Decode a loan request from JSON, reporting `null` as a missing request
/// rather than a deserialization failure.
pub fn request_from_json(input: &Value) -> AmortizationResult<LoanRequest> {
    if input.is_null() {
        validate_request(None)?;
    }
    Ok(LoanRequest::deserialize(input)?)
}

/// Generate a schedule wrapped in the standard computation envelope, with
/// warnings for inputs the engine accepts but a borrower-facing form would not.
pub fn amortize(loan: &LoanRequest) -> AmortizationResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let result = generate_schedule(loan)?;
    let warnings = schedule_warnings(loan, &result);
    for w in &warnings {
        warn!("{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate level-payment amortization (annuity formula, monthly compounding)",
        &serde_json::json!({
            "principal": loan.principal.to_string(),
            "annual_rate_percent": loan.annual_rate_percent.to_string(),
            "term_years": loan.term_years,
            "months": loan.months(),
            "rounding": "2dp, midpoint to even, applied per recorded row",
        }),
        warnings,
        elapsed,
        result,
    ))
}

fn schedule_warnings(loan: &LoanRequest, result: &LoanResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if loan.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payment is principal divided evenly over the term".into());
    } else if loan.annual_rate_percent > dec!(100) {
        warnings.push(format!(
            "Annual rate {}% is above the conventional 100% ceiling",
            loan.annual_rate_percent
        ));
    }

    if loan.principal < Decimal::ONE {
        warnings.push(format!("Loan amount {} is below the usual minimum of 1", loan.principal));
    }

    if loan.term_years > 100 {
        warnings.push(format!(
            "Term of {} years exceeds the conventional 100-year maximum",
            loan.term_years
        ));
    }

    let overpay: Money = result.final_payment_overpay(loan.principal);
    if overpay > Decimal::ZERO {
        warnings.push(format!(
            "Recorded principal portions exceed the loan amount by {overpay} after per-row rounding"
        ));
    }

    warnings
}
