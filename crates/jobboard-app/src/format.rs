//! Display helpers for job payloads.

use serde_json::Value;

/// Formats a salary that is either a legacy string or `{ min, max, currency }`.
pub fn format_salary(salary: Option<&Value>, fallback: &str) -> String {
    match salary {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Object(range)) => {
            let currency = range
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or("USD");
            let bound = |key: &str| range.get(key).and_then(positive_amount);
            match (bound("min"), bound("max")) {
                (Some(min), Some(max)) => format!("{currency} {min} - {max}"),
                (Some(min), None) => format!("{currency} {min}+"),
                (None, Some(max)) => format!("Up to {currency} {max}"),
                (None, None) => fallback.to_string(),
            }
        }
        _ => fallback.to_string(),
    }
}

/// Renders a positive amount with grouped thousands.
///
/// Integers are printed exactly. Only real fractions go through `f64`.
fn positive_amount(value: &Value) -> Option<String> {
    if let Some(amount) = value.as_u64() {
        return (amount > 0).then(|| group_digits(&amount.to_string(), ""));
    }
    if value.is_i64() {
        return None;
    }

    let amount = value.as_f64().filter(|amount| amount.is_finite() && *amount > 0.0)?;
    let raw = amount.to_string();
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
    Some(group_digits(whole, fraction))
}

/// `("85000", "")` -> `85,000`. The fraction is kept as written.
fn group_digits(digits: &str, fraction: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        grouped
    } else {
        format!("{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const FALLBACK: &str = "Salary not specified";

    #[test]
    fn test_salary_range_variants() {
        let both = json!({ "min": 50000, "max": 85000 });
        assert_eq!(format_salary(Some(&both), FALLBACK), "USD 50,000 - 85,000");

        let min = json!({ "min": 1200, "currency": "EUR" });
        assert_eq!(format_salary(Some(&min), FALLBACK), "EUR 1,200+");

        let max = json!({ "max": 999 });
        assert_eq!(format_salary(Some(&max), FALLBACK), "Up to USD 999");
    }

    #[test]
    fn test_salary_legacy_and_missing() {
        let legacy = json!("Competitive");
        assert_eq!(format_salary(Some(&legacy), FALLBACK), "Competitive");
        assert_eq!(format_salary(None, FALLBACK), FALLBACK);
        assert_eq!(format_salary(Some(&json!({})), FALLBACK), FALLBACK);
        assert_eq!(format_salary(Some(&json!("")), FALLBACK), FALLBACK);
    }

    #[test]
    fn test_amounts_keep_integer_precision() {
        assert_eq!(positive_amount(&json!(1_234_567)), Some("1,234,567".to_string()));
        assert_eq!(positive_amount(&json!(100)), Some("100".to_string()));
        assert_eq!(positive_amount(&json!(1500.5)), Some("1,500.5".to_string()));
        assert_eq!(
            positive_amount(&json!(9_007_199_254_740_993_u64)),
            Some("9,007,199,254,740,993".to_string())
        );
        assert_eq!(
            positive_amount(&json!(1e21)),
            Some("1,000,000,000,000,000,000,000".to_string())
        );
    }

    #[test]
    fn test_non_positive_amounts_are_dropped() {
        assert_eq!(positive_amount(&json!(0)), None);
        assert_eq!(positive_amount(&json!(-5)), None);
        assert_eq!(positive_amount(&json!(-2.5)), None);
        assert_eq!(positive_amount(&json!("50000")), None);
    }
}
