use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::LoanRequest;
use crate::error::{AmortizationError, LoanField};
use crate::AmortizationResult;

/// A closed, open or half-open numeric interval. Shared by the engine checks
/// and the form-layer rules so both read from one definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: Decimal,
    pub min_inclusive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    pub max_inclusive: bool,
}

impl Bound {
    pub const fn greater_than(min: Decimal) -> Self {
        Self {
            min,
            min_inclusive: false,
            max: None,
            max_inclusive: false,
        }
    }

    pub const fn at_least(min: Decimal) -> Self {
        Self {
            min,
            min_inclusive: true,
            max: None,
            max_inclusive: false,
        }
    }

    pub const fn up_to(self, max: Decimal) -> Self {
        Self {
            max: Some(max),
            max_inclusive: true,
            ..self
        }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        let above = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        let below = match self.max {
            Some(max) if self.max_inclusive => value <= max,
            Some(max) => value < max,
            None => true,
        };
        above && below
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        match self.max {
            Some(max) => {
                let close = if self.max_inclusive { ']' } else { ')' };
                write!(f, "{open}{}, {max}{close}", self.min)
            }
            None => write!(f, "{open}{}, ∞)", self.min),
        }
    }
}

/// Principal must be strictly positive.
pub const AMOUNT_RANGE: Bound = Bound::greater_than(Decimal::ZERO);
/// Annual rate percent must be non-negative.
pub const RATE_RANGE: Bound = Bound::at_least(Decimal::ZERO);
/// Longest term the engine will schedule (12,000 monthly rows).
pub const MAX_TERM_YEARS: i32 = 1000;

fn check(field: LoanField, bound: &Bound, value: Decimal, reason: &str) -> AmortizationResult<()> {
    if bound.contains(value) {
        Ok(())
    } else {
        Err(AmortizationError::OutOfRange {
            field,
            value: value.to_string(),
            reason: reason.into(),
        })
    }
}

/// Validate a loan request before any computation.
///
/// Checks run in a fixed order (presence, amount, rate, term) and the first
/// failure is returned.
pub fn validate_request(loan: Option<&LoanRequest>) -> AmortizationResult<&LoanRequest> {
    let loan = loan.ok_or_else(|| AmortizationError::NullArgument {
        context: "loan request".into(),
    })?;

    check(
        LoanField::Amount,
        &AMOUNT_RANGE,
        loan.principal,
        "Loan amount must be positive",
    )?;
    check(
        LoanField::Rate,
        &RATE_RANGE,
        loan.annual_rate_percent,
        "Annual interest rate must be non-negative",
    )?;
    if !(1..=MAX_TERM_YEARS).contains(&loan.term_years) {
        return Err(AmortizationError::OutOfRange {
            field: LoanField::Term,
            value: loan.term_years.to_string(),
            reason: format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }

    Ok(loan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid() -> LoanRequest {
        LoanRequest::new(dec!(250000), dec!(6.5), 30)
    }

    #[test]
    fn test_valid_request_passes() {
        let loan = valid();
        assert_eq!(validate_request(Some(&loan)).unwrap(), &loan);
    }

    #[test]
    fn test_missing_request() {
        let err = validate_request(None).unwrap_err();
        assert!(matches!(err, AmortizationError::NullArgument { .. }));
    }

    #[test]
    fn test_zero_principal_is_amount_error() {
        let mut loan = valid();
        loan.principal = Decimal::ZERO;
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Amount));
    }

    #[test]
    fn test_negative_rate_is_rate_error() {
        let mut loan = valid();
        loan.annual_rate_percent = dec!(-1);
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Rate));
    }

    #[test]
    fn test_zero_rate_is_accepted() {
        let mut loan = valid();
        loan.annual_rate_percent = Decimal::ZERO;
        assert!(validate_request(Some(&loan)).is_ok());
    }

    #[test]
    fn test_zero_term_is_term_error() {
        let mut loan = valid();
        loan.term_years = 0;
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Term));
    }

    #[test]
    fn test_negative_term_is_term_error() {
        let mut loan = valid();
        loan.term_years = -1;
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Term));
    }

    #[test]
    fn test_term_upper_limit() {
        let mut loan = valid();
        loan.term_years = MAX_TERM_YEARS;
        assert!(validate_request(Some(&loan)).is_ok());

        loan.term_years = MAX_TERM_YEARS + 1;
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Term));

        loan.term_years = 357_913_941;
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Term));
    }

    #[test]
    fn test_amount_checked_before_rate_and_term() {
        let loan = LoanRequest::new(dec!(-5), dec!(-5), 0);
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Amount));

        let loan = LoanRequest::new(dec!(5), dec!(-5), 0);
        let err = validate_request(Some(&loan)).unwrap_err();
        assert_eq!(err.field(), Some(LoanField::Rate));
    }

    #[test]
    fn test_bound_display_and_edges() {
        let b = Bound::greater_than(Decimal::ZERO).up_to(dec!(100));
        assert_eq!(b.to_string(), "(0, 100]");
        assert!(!b.contains(Decimal::ZERO));
        assert!(b.contains(dec!(100)));
        assert!(!b.contains(dec!(100.01)));
    }
}
