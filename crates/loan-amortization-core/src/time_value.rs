use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Money, Percent, Rate};
use crate::AmortizationResult;

/// Percent-per-year to decimal-per-month divisor (100 * 12).
const PERCENT_MONTHS: Decimal = dec!(1200);

pub const MONTHS_PER_YEAR: i64 = 12;

/// Convert an annual percentage rate (e.g. 5.5 for 5.5%) into a monthly
/// decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> AmortizationResult<Rate> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::InvalidArgument {
            field: "annual_rate_percent".into(),
            value: annual_rate_percent,
            reason: "Annual interest rate must be non-negative".into(),
        });
    }
    Ok(annual_rate_percent / PERCENT_MONTHS)
}

/// Number of monthly payments for a term in whole years.
pub fn months_for_term(term_years: i32) -> i64 {
    i64::from(term_years) * MONTHS_PER_YEAR
}

/// Level monthly payment for a fixed-rate loan (annuity formula).
///
/// Only the rate is validated here. Principal and term are the caller's
/// responsibility; `schedule::generate_schedule` checks both before calling.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: i32,
) -> AmortizationResult<Money> {
    let rate = monthly_rate(annual_rate_percent)?;
    let months = months_for_term(term_years);

    if months == 0 {
        return Err(AmortizationError::DivisionByZero {
            context: "monthly payment over a zero-month term".into(),
        });
    }
    if months < 0 {
        return Err(AmortizationError::InvalidArgument {
            field: "term_years".into(),
            value: Decimal::from(term_years),
            reason: "Loan term cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return principal
            .checked_div(Decimal::from(months))
            .ok_or_else(|| AmortizationError::overflow("straight-line monthly payment"));
    }

    // (1 + r)^-n, computed on the discount factor so long terms underflow
    // towards zero instead of overflowing. The base is at most 1.
    let discount = Decimal::ONE / (Decimal::ONE + rate);
    let discount_n = discount.powu(months.unsigned_abs());
    let annuity = Decimal::ONE - discount_n;

    if annuity.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "monthly payment annuity factor".into(),
        });
    }

    principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_div(annuity))
        .ok_or_else(|| AmortizationError::overflow("monthly payment"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate_twelve_percent() {
        assert_eq!(monthly_rate(dec!(12)).unwrap(), dec!(0.01));
    }

    #[test]
    fn test_monthly_rate_zero() {
        assert_eq!(monthly_rate(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_rate_negative_names_value() {
        let err = monthly_rate(dec!(-0.5)).unwrap_err();
        match err {
            AmortizationError::InvalidArgument { value, .. } => assert_eq!(value, dec!(-0.5)),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_monthly_payment_one_year_twelve_percent() {
        let pmt = monthly_payment(dec!(1200), dec!(12), 1).unwrap();
        // 12 / (1 - 1.01^-12) = 106.6185...
        assert_eq!(pmt.round_dp(2), dec!(106.62));
    }

    #[test]
    fn test_monthly_payment_thirty_year_mortgage() {
        // 200k at 6% over 30 years: 1199.10 per month
        let pmt = monthly_payment(dec!(200000), dec!(6), 30).unwrap();
        assert_eq!(pmt.round_dp(2), dec!(1199.10));
    }

    #[test]
    fn test_monthly_payment_zero_rate_is_straight_line() {
        let pmt = monthly_payment(dec!(1200), Decimal::ZERO, 1).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_monthly_payment_zero_term_is_error() {
        let err = monthly_payment(dec!(1000), dec!(5), 0).unwrap_err();
        assert!(matches!(err, AmortizationError::DivisionByZero { .. }));
    }

    #[test]
    fn test_monthly_payment_long_term_high_rate() {
        // 100 years at 99%: the discount factor underflows, payment tends to P * r
        let pmt = monthly_payment(dec!(1000), dec!(99), 100).unwrap();
        assert_eq!(pmt.round_dp(2), dec!(82.50));
    }

    #[test]
    fn test_monthly_payment_negative_term_is_invalid() {
        let err = monthly_payment(dec!(1000), dec!(5), -2).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidArgument { .. }));
    }

    #[test]
    fn test_monthly_payment_overflow_is_error() {
        // 2400% a year is 2.0 a month: P * r exceeds the 96-bit mantissa
        let err = monthly_payment(Decimal::MAX, dec!(2400), 1).unwrap_err();
        assert!(matches!(err, AmortizationError::Overflow { .. }));
    }

    #[test]
    fn test_monthly_payment_does_not_guard_principal() {
        let pmt = monthly_payment(dec!(-1200), dec!(12), 1).unwrap();
        assert_eq!(pmt.round_dp(2), dec!(-106.62));
    }
}
