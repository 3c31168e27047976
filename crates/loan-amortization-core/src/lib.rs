pub mod error;
pub mod loan;
pub mod time_value;
pub mod types;

#[cfg(feature = "form")]
pub mod form;

pub use error::{AmortizationError, LoanField};
pub use types::*;

/// Standard result type for all amortization operations
pub type AmortizationResult<T> = Result<T, AmortizationError>;
