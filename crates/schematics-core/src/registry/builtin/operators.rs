//! Built-in operators
//!
//! String operators leave non-string values untouched. Arithmetic operators
//! require a numeric value and a numeric attribute; results that are whole
//! numbers are written back as integers.

use super::{attr_f64, expect_f64};
use crate::error::FunctionError;
use crate::registry::Attributes;
use serde_json::{Number, Value};

/// Upper-case the first character and lower-case the rest
pub fn capitalize(value: &Value, _: &Attributes) -> Result<Option<Value>, FunctionError> {
    let Some(text) = value.as_str() else {
        return Ok(None);
    };
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    };
    Ok(Some(Value::String(capitalized)))
}

pub fn upper_case(value: &Value, _: &Attributes) -> Result<Option<Value>, FunctionError> {
    Ok(value.as_str().map(|text| Value::String(text.to_uppercase())))
}

pub fn lower_case(value: &Value, _: &Attributes) -> Result<Option<Value>, FunctionError> {
    Ok(value.as_str().map(|text| Value::String(text.to_lowercase())))
}

pub fn trim(value: &Value, _: &Attributes) -> Result<Option<Value>, FunctionError> {
    Ok(value.as_str().map(|text| Value::String(text.trim().to_string())))
}

pub fn add(value: &Value, attrs: &Attributes) -> Result<Option<Value>, FunctionError> {
    arithmetic(value, attrs, "add_with", |a, b| a + b)
}

pub fn subtract(value: &Value, attrs: &Attributes) -> Result<Option<Value>, FunctionError> {
    arithmetic(value, attrs, "subtract_with", |a, b| a - b)
}

pub fn multiply(value: &Value, attrs: &Attributes) -> Result<Option<Value>, FunctionError> {
    arithmetic(value, attrs, "multiply_with", |a, b| a * b)
}

pub fn divide(value: &Value, attrs: &Attributes) -> Result<Option<Value>, FunctionError> {
    if attr_f64(attrs, "divide_with")? == 0.0 {
        return Err(FunctionError::new("division by zero"));
    }
    arithmetic(value, attrs, "divide_with", |a, b| a / b)
}

fn arithmetic(
    value: &Value,
    attrs: &Attributes,
    attribute: &str,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Option<Value>, FunctionError> {
    let operand = expect_f64(value)?;
    let argument = attr_f64(attrs, attribute)?;
    number_value(op(operand, argument)).map(Some)
}

/// Convert an arithmetic result back into a JSON number
fn number_value(result: f64) -> Result<Value, FunctionError> {
    if result.fract() == 0.0 && result.abs() < i64::MAX as f64 {
        return Ok(Value::Number(Number::from(result as i64)));
    }
    Number::from_f64(result)
        .map(Value::Number)
        .ok_or_else(|| FunctionError::new(format!("result {} is not a finite number", result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_string_operators() {
        let none = Attributes::new();
        assert_eq!(capitalize(&json!("hELLO"), &none).unwrap(), Some(json!("Hello")));
        assert_eq!(capitalize(&json!(""), &none).unwrap(), Some(json!("")));
        assert_eq!(upper_case(&json!("abc"), &none).unwrap(), Some(json!("ABC")));
        assert_eq!(lower_case(&json!("ÀBC"), &none).unwrap(), Some(json!("àbc")));
        assert_eq!(trim(&json!("  x  "), &none).unwrap(), Some(json!("x")));
    }

    #[test]
    fn test_string_operators_skip_non_strings() {
        let none = Attributes::new();
        assert_eq!(capitalize(&json!(1), &none).unwrap(), None);
        assert_eq!(upper_case(&json!(null), &none).unwrap(), None);
        assert_eq!(trim(&json!([]), &none).unwrap(), None);
    }

    #[test]
    fn test_arithmetic_keeps_integers() {
        assert_eq!(add(&json!(5), &attrs(json!({"add_with": 3}))).unwrap(), Some(json!(8)));
        assert_eq!(
            subtract(&json!(5), &attrs(json!({"subtract_with": 7}))).unwrap(),
            Some(json!(-2))
        );
        assert_eq!(
            multiply(&json!(8), &attrs(json!({"multiply_with": 2}))).unwrap(),
            Some(json!(16))
        );
        assert_eq!(divide(&json!(9), &attrs(json!({"divide_with": 2}))).unwrap(), Some(json!(4.5)));
        assert_eq!(add(&json!(0.5), &attrs(json!({"add_with": 0.25}))).unwrap(), Some(json!(0.75)));
    }

    #[test]
    fn test_arithmetic_errors() {
        let err = divide(&json!(1), &attrs(json!({"divide_with": 0}))).unwrap_err();
        assert_eq!(err.message, "division by zero");

        assert!(add(&json!("5"), &attrs(json!({"add_with": 1}))).is_err());
        let err = add(&json!(5), &Attributes::new()).unwrap_err();
        assert_eq!(err.message, "attribute 'add_with' is missing or is not a number");
    }
}
