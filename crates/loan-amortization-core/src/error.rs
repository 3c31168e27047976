use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Loan request field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanField {
    Amount,
    Rate,
    Term,
}

impl fmt::Display for LoanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoanField::Amount => "Amount",
            LoanField::Rate => "Rate",
            LoanField::Term => "Term",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AmortizationError {
    #[error("Missing argument: {context}")]
    NullArgument { context: String },

    #[error("Out of range: {field} = {value} — {reason}")]
    OutOfRange {
        field: LoanField,
        value: String,
        reason: String,
    },

    #[error("Invalid argument: {field} = {value} — {reason}")]
    InvalidArgument {
        field: String,
        value: Decimal,
        reason: String,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AmortizationError {
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        AmortizationError::Overflow {
            context: context.into(),
        }
    }

    /// Field tag for range failures, `None` for every other variant.
    pub fn field(&self) -> Option<LoanField> {
        match self {
            AmortizationError::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AmortizationError {
    fn from(e: serde_json::Error) -> Self {
        AmortizationError::SerializationError(e.to_string())
    }
}
