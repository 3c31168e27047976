pub mod rules;

pub use rules::{validate_form, FieldViolation, FormReport, LoanForm, FORM_RULES};
