use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_amortization_core::form::{self, LoanForm};
use loan_amortization_core::loan::{self, LoanRequest};
use loan_amortization_core::time_value;

use crate::input;

/// Loan parameters shared by the schedule and payment commands
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Term in whole years
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<i32>,
}

impl LoanArgs {
    fn request(&self) -> Result<LoanRequest, Box<dyn std::error::Error>> {
        if let Some(data) = input::load_request(self.input.as_deref())? {
            return Ok(loan::request_from_json(&data)?);
        }
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let term = self.term.ok_or("--term is required (or provide --input)")?;
        Ok(LoanRequest::new(principal, rate, term))
    }
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.request()?;
    let result = loan::amortize(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = args.request()?;
    // Same checks as the schedule so a bad term never reaches the formula
    loan::validate_request(Some(&request))?;
    let payment = time_value::monthly_payment(
        request.principal,
        request.annual_rate_percent,
        request.term_years,
    )?;
    Ok(json!({
        "result": {
            "monthlyPayment": payment.round_dp(2).to_string(),
            "months": request.months(),
            "exactPayment": payment.to_string(),
        }
    }))
}

/// Arguments for rate conversion
#[derive(Args)]
pub struct RateArgs {
    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly = time_value::monthly_rate(args.rate)?;
    Ok(json!({
        "result": {
            "annualRatePercent": args.rate.to_string(),
            "monthlyRate": monthly.to_string(),
        }
    }))
}

/// Arguments for form-rule validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to JSON form file ({"amount", "rate", "term"})
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<i32>,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_form: LoanForm = match input::load_request(args.input.as_deref())? {
        Some(data) => serde_json::from_value(data)?,
        None => LoanForm {
            amount: args.amount,
            rate: args.rate,
            term: args.term,
        },
    };
    let report = form::validate_form(&loan_form);
    Ok(json!({ "result": report }))
}
