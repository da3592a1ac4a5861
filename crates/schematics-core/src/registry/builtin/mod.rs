//! Built-in validator and operator functions
//!
//! Validators are grouped by the kind of value they inspect:
//!
//! - [`string`] - type, content, length and pattern checks on strings
//! - [`url`] - URL shape, host and query checks
//! - [`number`] - numeric type and range checks
//! - [`date`] - date parsing and comparison against fixed instants or now
//! - [`array`] - array length checks
//!
//! Operators live in [`operators`]. Every function takes its arguments from
//! the schema attributes; a missing or ill-typed attribute is reported as a
//! [`FunctionError`], never a panic.
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod date;
pub mod number;
pub mod operators;
pub mod string;
pub mod url;

use super::{Attributes, OperatorRegistry, ValidatorRegistry};
use crate::error::{FunctionError, ValueKind};
use serde_json::Value;

/// Register every built-in validator
pub fn register_validators(registry: &mut ValidatorRegistry) {
    registry
        .register("IsString", string::is_string)
        .register("NotEmpty", string::not_empty)
        .register("StringInArr", string::string_in_arr)
        .register("LIKE", string::like)
        .register("IsEmail", string::is_email)
        .register("MaxLengthAllowed", string::max_length_allowed)
        .register("MinLengthAllowed", string::min_length_allowed)
        .register("InBetweenLengthAllowed", string::in_between_length_allowed)
        .register("NoSpecialCharacters", string::no_special_characters)
        .register("HaveSpecialCharacters", string::have_special_characters)
        .register("LeastOneUpperCase", string::least_one_upper_case)
        .register("LeastOneLowerCase", string::least_one_lower_case)
        .register("LeastOneDigit", string::least_one_digit)
        .register("IsValidUuid", string::is_valid_uuid)
        .register("Regex", string::regex);

    registry
        .register("IsURL", url::is_url)
        .register("IsNotURL", url::is_not_url)
        .register("HaveURLHostName", url::have_url_host_name)
        .register("HaveQueryParameter", url::have_query_parameter)
        .register("IsHttps", url::is_https);

    registry
        .register("IsNumber", number::is_number)
        .register("IsInt", number::is_int)
        .register("MaxAllowed", number::max_allowed)
        .register("MinAllowed", number::min_allowed)
        .register("InBetween", number::in_between);

    registry
        .register("IsValidDate", date::is_valid_date)
        .register("IsLessThanNow", date::is_less_than_now)
        .register("IsMoreThanNow", date::is_more_than_now)
        .register("IsBefore", date::is_before)
        .register("IsAfter", date::is_after)
        .register("IsInBetweenTime", date::is_in_between_time);

    registry
        .register("ArrayLengthMax", array::array_length_max)
        .register("ArrayLengthMin", array::array_length_min);
}

/// Register every built-in operator
pub fn register_operators(registry: &mut OperatorRegistry) {
    registry
        .register("Capitalize", operators::capitalize)
        .register("UpperCase", operators::upper_case)
        .register("LowerCase", operators::lower_case)
        .register("Trim", operators::trim)
        .register("Add", operators::add)
        .register("Subtract", operators::subtract)
        .register("Multiply", operators::multiply)
        .register("Divide", operators::divide);
}

/// The value as a string slice, or a type error
fn expect_str<'a>(value: &'a Value) -> Result<&'a str, FunctionError> {
    value.as_str().ok_or_else(|| {
        FunctionError::new(format!("expected a string, found {}", ValueKind::of(value)))
    })
}

/// The value as a number, or a type error
fn expect_f64(value: &Value) -> Result<f64, FunctionError> {
    value.as_f64().ok_or_else(|| {
        FunctionError::new(format!("expected a number, found {}", ValueKind::of(value)))
    })
}

/// A string attribute
fn attr_str<'a>(attrs: &'a Attributes, name: &str) -> Result<&'a str, FunctionError> {
    attrs
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| FunctionError::attribute(name, "a string"))
}

/// A numeric attribute; numeric strings are accepted
fn attr_f64(attrs: &Attributes, name: &str) -> Result<f64, FunctionError> {
    match attrs.get(name) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| FunctionError::attribute(name, "a number"))
}

/// A non-negative whole-number attribute, used for lengths
fn attr_usize(attrs: &Attributes, name: &str) -> Result<usize, FunctionError> {
    let n = attr_f64(attrs, name)?;
    if n < 0.0 || n.fract() != 0.0 || n > usize::MAX as f64 {
        return Err(FunctionError::attribute(name, "a non-negative integer"));
    }
    Ok(n as usize)
}
