//! Array length validators
//!
//! The engine hands validators flat leaves, so these only see arrays that
//! are empty (kept whole by flattening) or that a caller passes directly.

use super::attr_usize;
use crate::error::{FunctionError, ValueKind};
use crate::registry::Attributes;
use serde_json::Value;

fn expect_array(value: &Value) -> Result<&Vec<Value>, FunctionError> {
    value.as_array().ok_or_else(|| {
        FunctionError::new(format!(
            "only arrays are allowed, found {}",
            ValueKind::of(value)
        ))
    })
}

pub fn array_length_max(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let len = expect_array(value)?.len();
    let max = attr_usize(attrs, "max")?;
    if len > max {
        return Err(FunctionError::new(format!("array length can not be greater than {}", max)));
    }
    Ok(())
}

pub fn array_length_min(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let len = expect_array(value)?.len();
    let min = attr_usize(attrs, "min")?;
    if len < min {
        return Err(FunctionError::new(format!("array length can not be less than {}", min)));
    }
    Ok(())
}
