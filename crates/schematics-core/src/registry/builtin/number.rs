//! Numeric validators
//!
//! Range bounds are inclusive.

use super::{attr_f64, expect_f64};
use crate::error::{FunctionError, ValueKind};
use crate::registry::Attributes;
use serde_json::Value;

pub fn is_number(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if value.is_number() {
        Ok(())
    } else {
        Err(FunctionError::new(format!("is not a number, found {}", ValueKind::of(value))))
    }
}

/// Integer-valued numbers pass, including floats such as `3.0`
pub fn is_int(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let integral = match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    };
    if integral {
        Ok(())
    } else {
        Err(FunctionError::new(format!("{} is not an integer", value)))
    }
}

pub fn max_allowed(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let n = expect_f64(value)?;
    let max = attr_f64(attrs, "max")?;
    if n > max {
        return Err(FunctionError::new(format!("{} is greater than {}", value, max)));
    }
    Ok(())
}

pub fn min_allowed(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let n = expect_f64(value)?;
    let min = attr_f64(attrs, "min")?;
    if n < min {
        return Err(FunctionError::new(format!("{} is less than {}", value, min)));
    }
    Ok(())
}

pub fn in_between(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let n = expect_f64(value)?;
    let min = attr_f64(attrs, "min")?;
    let max = attr_f64(attrs, "max")?;
    if n < min || n > max {
        return Err(FunctionError::new(format!(
            "{} is not between {} and {}",
            value, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_number_types() {
        let none = Attributes::new();
        assert!(is_number(&json!(1.5), &none).is_ok());
        assert!(is_number(&json!("1.5"), &none).is_err());

        assert!(is_int(&json!(7), &none).is_ok());
        assert!(is_int(&json!(-7), &none).is_ok());
        assert!(is_int(&json!(3.0), &none).is_ok());
        assert!(is_int(&json!(3.5), &none).is_err());
        assert!(is_int(&json!("3"), &none).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let max = attrs(json!({"max": 10}));
        assert!(max_allowed(&json!(10), &max).is_ok());
        assert_eq!(
            max_allowed(&json!(11), &max).unwrap_err().message,
            "11 is greater than 10"
        );

        let min = attrs(json!({"min": 0.5}));
        assert!(min_allowed(&json!(0.5), &min).is_ok());
        assert!(min_allowed(&json!(0.4), &min).is_err());

        let range = attrs(json!({"min": 1, "max": 3}));
        assert!(in_between(&json!(2), &range).is_ok());
        assert!(in_between(&json!(4), &range).is_err());
    }

    #[test]
    fn test_missing_attribute_and_wrong_type() {
        let err = max_allowed(&json!(1), &Attributes::new()).unwrap_err();
        assert_eq!(err.message, "attribute 'max' is missing or is not a number");
        assert!(min_allowed(&json!("1"), &attrs(json!({"min": 0}))).is_err());
    }
}
