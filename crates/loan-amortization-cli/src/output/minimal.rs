use serde_json::Value;

use super::{format_scalar, result_of};

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    // The payment is the headline number for both schedule and payment output
    let priority_keys = ["monthlyPayment", "monthlyRate", "valid", "totalCost"];

    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                let text = format_scalar(val);
                // Schedules carry the unrounded payment; show cents
                match text.parse::<rust_decimal::Decimal>() {
                    Ok(d) if *key == "monthlyPayment" => println!("{}", d.round_dp(2)),
                    _ => println!("{}", text),
                }
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result));
}
