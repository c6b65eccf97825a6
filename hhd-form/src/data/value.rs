//! Defaults and options in the settings schema are loosely typed. The
//! helpers here pin down how such values print and compare.

use serde_json::{Number, Value};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Render a value the way it shows up as a form value or option text.
///
/// Integral floats print without a fractional part, so `15.0` and `15` both
/// become `"15"`. `null` prints as `"null"`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => display_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Format a number without a trailing `.0` for integral values.
pub fn display_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Strict equality: same JSON type and same value.
///
/// Numbers compare numerically, so `15` equals `15.0`. Arrays and objects
/// never compare equal.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        _ => false,
    }
}

/// Truthiness of a value when used as a checkbox state.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Short type name used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("mode")), "mode");
        assert_eq!(display_value(&json!(15)), "15");
        assert_eq!(display_value(&json!(15.0)), "15");
        assert_eq!(display_value(&json!(7.5)), "7.5");
        assert_eq!(display_value(&json!(-3)), "-3");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&Value::Null), "null");
    }

    #[test]
    fn test_strict_eq() {
        assert!(strict_eq(&json!(15), &json!(15.0)));
        assert!(strict_eq(&json!("a"), &json!("a")));
        assert!(!strict_eq(&json!(15), &json!("15")));
        assert!(!strict_eq(&json!(true), &json!(1)));
        assert!(!strict_eq(&json!([1]), &json!([1])));
        assert!(strict_eq(&Value::Null, &Value::Null));
    }

    #[test]
    fn test_truthy() {
        assert!(truthy(&json!(true)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&Value::Null));
        assert!(!truthy(&json!(0)));
        assert!(truthy(&json!(2)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("off")));
        assert!(truthy(&json!({})));
    }
}
