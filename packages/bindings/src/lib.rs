use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_amortization_core::form::{self, LoanForm};
use loan_amortization_core::loan;
use loan_amortization_core::time_value;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_request(input_json: &str) -> NapiResult<loan::LoanRequest> {
    let value: serde_json::Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    loan::request_from_json(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rates and payments
// ---------------------------------------------------------------------------

/// Annual percentage rate (as a decimal string, e.g. "6.5") to monthly rate.
#[napi]
pub fn monthly_rate(annual_rate_percent: String) -> NapiResult<String> {
    let annual: Decimal = annual_rate_percent.trim().parse().map_err(to_napi_error)?;
    let rate = time_value::monthly_rate(annual).map_err(to_napi_error)?;
    Ok(rate.to_string())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: i32,
}

/// Level monthly payment, unrounded. Does not validate principal or term.
#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment =
        time_value::monthly_payment(input.principal, input.annual_rate_percent, input.term_years)
            .map_err(to_napi_error)?;
    Ok(payment.to_string())
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let request = parse_request(&input_json)?;
    let output = loan::amortize(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form rules
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_loan_form(input_json: String) -> NapiResult<String> {
    let input: LoanForm = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let report = form::validate_form(&input);
    serde_json::to_string(&report).map_err(to_napi_error)
}
