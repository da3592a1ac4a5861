//! Date validators
//!
//! Dates are strings in one of the accepted layouts. Values without an
//! offset are read as UTC.

use super::expect_str;
use crate::error::FunctionError;
use crate::registry::Attributes;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Layouts tried for values without an explicit offset
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%a %b %e %H:%M:%S %Y",
];

/// Layouts tried for values carrying an offset or zone abbreviation
const OFFSET_LAYOUTS: &[&str] = &["%a %b %e %H:%M:%S %z %Y", "%d %b %y %H:%M %z"];

const DISPLAY_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date string, trying every accepted layout in turn
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(parsed) = DateTime::parse_from_str(text, layout) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

fn expect_date(value: &Value) -> Result<DateTime<Utc>, FunctionError> {
    let text = expect_str(value)?;
    parse_date(text).ok_or_else(|| FunctionError::new(format!("invalid date provided: {}", text)))
}

fn attr_date(attrs: &Attributes, name: &str) -> Result<DateTime<Utc>, FunctionError> {
    attrs
        .get(name)
        .and_then(Value::as_str)
        .and_then(parse_date)
        .ok_or_else(|| FunctionError::attribute(name, "a date"))
}

fn display(date: &DateTime<Utc>) -> String {
    date.format(DISPLAY_LAYOUT).to_string()
}

pub fn is_valid_date(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    expect_date(value).map(|_| ())
}

/// Date must lie in the past
pub fn is_less_than_now(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let date = expect_date(value)?;
    if date >= Utc::now() {
        return Err(FunctionError::new(format!("{} is not in the past", display(&date))));
    }
    Ok(())
}

/// Date must lie in the future
pub fn is_more_than_now(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let date = expect_date(value)?;
    if date <= Utc::now() {
        return Err(FunctionError::new(format!("{} has already passed", display(&date))));
    }
    Ok(())
}

/// Date must not be after `maxTime`
pub fn is_before(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let date = expect_date(value)?;
    let max = attr_date(attrs, "maxTime")?;
    if date > max {
        return Err(FunctionError::new(format!("{} is after {}", display(&date), display(&max))));
    }
    Ok(())
}

/// Date must not be before `minTime`
pub fn is_after(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let date = expect_date(value)?;
    let min = attr_date(attrs, "minTime")?;
    if date < min {
        return Err(FunctionError::new(format!("{} is before {}", display(&date), display(&min))));
    }
    Ok(())
}

/// Date must lie strictly between `minTime` and `maxTime`
pub fn is_in_between_time(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let date = expect_date(value)?;
    let min = attr_date(attrs, "minTime")?;
    let max = attr_date(attrs, "maxTime")?;
    if date <= min || date >= max {
        return Err(FunctionError::new(format!(
            "{} is before {} or after {}",
            display(&date),
            display(&min),
            display(&max)
        )));
    }
    Ok(())
}
