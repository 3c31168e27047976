pub mod model;
pub mod schedule;
pub mod validation;

pub use model::{LoanRequest, LoanResult, PaymentRow};
pub use schedule::{amortize, generate_schedule, generate_schedule_json, request_from_json};
pub use validation::validate_request;
