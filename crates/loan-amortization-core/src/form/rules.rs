use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanField;
use crate::loan::validation::Bound;
use crate::loan::LoanRequest;
use crate::types::{Money, Percent};

/// A single borrower-facing constraint on one form field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldRule {
    pub field: LoanField,
    pub required: bool,
    pub bound: Bound,
    pub message: &'static str,
}

/// Constraints a loan entry form applies before a request reaches the engine.
/// Stricter than the engine's own checks: zero rates are rejected and the rate
/// and term are capped at 100.
pub const FORM_RULES: [FieldRule; 3] = [
    FieldRule {
        field: LoanField::Amount,
        required: true,
        bound: Bound::at_least(Decimal::ONE),
        message: "Loan amount must be at least 1",
    },
    FieldRule {
        field: LoanField::Rate,
        required: false,
        bound: Bound::greater_than(Decimal::ZERO).up_to(dec!(100)),
        message: "Interest rate must be greater than 0 and at most 100",
    },
    FieldRule {
        field: LoanField::Term,
        required: false,
        bound: Bound::at_least(Decimal::ONE).up_to(dec!(100)),
        message: "Term must be between 1 and 100 years",
    },
];

/// Loan entry as submitted by a form; any field may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanForm {
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub rate: Option<Percent>,
    #[serde(default)]
    pub term: Option<i32>,
}

impl LoanForm {
    fn value(&self, field: LoanField) -> Option<Decimal> {
        match field {
            LoanField::Amount => self.amount,
            LoanField::Rate => self.rate,
            LoanField::Term => self.term.map(Decimal::from),
        }
    }

    /// Validate and convert to an engine request.
    pub fn into_request(self) -> Result<LoanRequest, FormReport> {
        let report = validate_form(&self);
        if !report.valid {
            return Err(report);
        }
        Ok(LoanRequest::new(
            self.amount.unwrap_or_default(),
            self.rate.unwrap_or_default(),
            self.term.unwrap_or_default(),
        ))
    }
}

impl From<&LoanRequest> for LoanForm {
    fn from(loan: &LoanRequest) -> Self {
        LoanForm {
            amount: Some(loan.principal),
            rate: Some(loan.annual_rate_percent),
            term: Some(loan.term_years),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: LoanField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    pub message: String,
}

/// Every rule violation on a form, in field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
}

/// Check a form against `FORM_RULES`, collecting every violation rather than
/// stopping at the first.
pub fn validate_form(form: &LoanForm) -> FormReport {
    let mut violations = Vec::new();

    for rule in &FORM_RULES {
        match form.value(rule.field) {
            None if rule.required => violations.push(FieldViolation {
                field: rule.field,
                value: None,
                message: format!("{} is required", rule.field),
            }),
            // Blank optional fields bind to zero
            None => {
                if !rule.bound.contains(Decimal::ZERO) {
                    violations.push(FieldViolation {
                        field: rule.field,
                        value: None,
                        message: rule.message.into(),
                    });
                }
            }
            Some(v) if !rule.bound.contains(v) => violations.push(FieldViolation {
                field: rule.field,
                value: Some(v),
                message: rule.message.into(),
            }),
            Some(_) => {}
        }
    }

    FormReport {
        valid: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn form(amount: Money, rate: Percent, term: i32) -> LoanForm {
        LoanForm {
            amount: Some(amount),
            rate: Some(rate),
            term: Some(term),
        }
    }

    #[test]
    fn test_typical_mortgage_is_valid() {
        let report = validate_form(&form(dec!(350000), dec!(6.75), 30));
        assert!(report.valid);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_boundaries() {
        assert!(validate_form(&form(dec!(1), dec!(100), 100)).valid);
        assert!(validate_form(&form(dec!(1), dec!(0.01), 1)).valid);
        assert!(!validate_form(&form(dec!(0.99), dec!(5), 10)).valid);
        assert!(!validate_form(&form(dec!(1000), dec!(100.01), 10)).valid);
        assert!(!validate_form(&form(dec!(1000), dec!(5), 101)).valid);
    }

    #[test]
    fn test_zero_rate_rejected_by_form_but_not_engine() {
        let loan = LoanRequest::new(dec!(1000), Decimal::ZERO, 5);
        let report = validate_form(&LoanForm::from(&loan));
        assert_eq!(
            report.violations,
            vec![FieldViolation {
                field: LoanField::Rate,
                value: Some(Decimal::ZERO),
                message: "Interest rate must be greater than 0 and at most 100".into(),
            }]
        );
        assert!(crate::loan::validate_request(Some(&loan)).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let report = validate_form(&LoanForm::default());
        assert!(!report.valid);
        let fields: Vec<LoanField> = report.violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec![LoanField::Amount, LoanField::Rate, LoanField::Term]);
        assert_eq!(report.violations[0].message, "Amount is required");
    }

    #[test]
    fn test_negative_term_is_a_violation() {
        let loan_form: LoanForm =
            serde_json::from_value(serde_json::json!({ "amount": "1000", "rate": "5", "term": -3 }))
                .unwrap();
        let report = validate_form(&loan_form);
        assert_eq!(
            report.violations,
            vec![FieldViolation {
                field: LoanField::Term,
                value: Some(dec!(-3)),
                message: "Term must be between 1 and 100 years".into(),
            }]
        );
    }

    #[test]
    fn test_into_request() {
        let loan = form(dec!(1200), dec!(12), 1).into_request().unwrap();
        assert_eq!(loan, LoanRequest::new(dec!(1200), dec!(12), 1));

        let report = form(dec!(1200), dec!(12), 0).into_request().unwrap_err();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, LoanField::Term);
    }
}
