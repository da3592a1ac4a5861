//! String validators
//!
//! Lengths are counted in characters, not bytes.

use super::{attr_str, attr_usize, expect_str};
use crate::error::{FunctionError, ValueKind};
use crate::registry::Attributes;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static UUID_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn static_regex(
    cell: &'static OnceLock<Option<Regex>>,
    pattern: &str,
) -> Result<&'static Regex, FunctionError> {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .ok_or_else(|| {
            FunctionError::new(format!("built-in pattern failed to compile: {}", pattern))
        })
}

pub fn is_string(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(FunctionError::new(format!("is not a string, found {}", ValueKind::of(value))))
    }
}

pub fn not_empty(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if expect_str(value)?.trim().is_empty() {
        return Err(FunctionError::new("this string can not be empty"));
    }
    Ok(())
}

/// Value must equal one of the strings in the `arr` attribute
pub fn string_in_arr(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let allowed = attrs
        .get("arr")
        .and_then(Value::as_array)
        .ok_or_else(|| FunctionError::attribute("arr", "an array of strings"))?;

    if allowed.iter().any(|item| item.as_str() == Some(text)) {
        Ok(())
    } else {
        Err(FunctionError::new(format!("'{}' is not one of the allowed values", text)))
    }
}

/// SQL `LIKE` match: `%` is any run of characters, `_` is one character
pub fn like(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let pattern = attr_str(attrs, "pattern")?;

    let mut expression = String::with_capacity(pattern.len() + 8);
    expression.push('^');
    let mut literal = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '%' => expression.push_str(".*"),
            '_' => expression.push('.'),
            other => expression.push_str(&regex::escape(other.encode_utf8(&mut literal))),
        }
    }
    expression.push('$');

    let re = Regex::new(&expression)
        .map_err(|e| FunctionError::new(format!("invalid LIKE pattern '{}': {}", pattern, e)))?;
    if re.is_match(text) {
        Ok(())
    } else {
        Err(FunctionError::new(format!("'{}' is not LIKE '{}'", text, pattern)))
    }
}

pub fn is_email(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let re = static_regex(&EMAIL_REGEX, r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")?;
    if re.is_match(text) {
        Ok(())
    } else {
        Err(FunctionError::new(format!("{} is not a valid email address", text)))
    }
}

pub fn max_length_allowed(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let length = expect_str(value)?.chars().count();
    let max = attr_usize(attrs, "max")?;
    if length > max {
        return Err(FunctionError::new(format!("length of the string is greater than {}", max)));
    }
    Ok(())
}

pub fn min_length_allowed(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let length = expect_str(value)?.chars().count();
    let min = attr_usize(attrs, "min")?;
    if length < min {
        return Err(FunctionError::new(format!("length of the string is less than {}", min)));
    }
    Ok(())
}

pub fn in_between_length_allowed(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let length = expect_str(value)?.chars().count();
    let min = attr_usize(attrs, "min")?;
    let max = attr_usize(attrs, "max")?;
    if length < min || length > max {
        return Err(FunctionError::new(format!(
            "length of the string should be between {} and {}",
            min, max
        )));
    }
    Ok(())
}

fn has_special_character(text: &str) -> bool {
    text.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Only ASCII letters and digits are allowed
pub fn no_special_characters(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if has_special_character(expect_str(value)?) {
        return Err(FunctionError::new("special characters are not allowed"));
    }
    Ok(())
}

pub fn have_special_characters(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if !has_special_character(expect_str(value)?) {
        return Err(FunctionError::new("special characters are required"));
    }
    Ok(())
}

pub fn least_one_upper_case(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if !expect_str(value)?.chars().any(char::is_uppercase) {
        return Err(FunctionError::new("at least one uppercase letter is required"));
    }
    Ok(())
}

pub fn least_one_lower_case(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if !expect_str(value)?.chars().any(char::is_lowercase) {
        return Err(FunctionError::new("at least one lowercase letter is required"));
    }
    Ok(())
}

pub fn least_one_digit(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    if !expect_str(value)?.chars().any(|c| c.is_ascii_digit()) {
        return Err(FunctionError::new("at least one numeric digit is required"));
    }
    Ok(())
}

pub fn is_valid_uuid(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let re = static_regex(
        &UUID_REGEX,
        r"^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}$",
    )?;
    if re.is_match(text) {
        Ok(())
    } else {
        Err(FunctionError::new(format!("{} is not a valid uuid", text)))
    }
}

/// Value must match the `regex` attribute (unanchored)
pub fn regex(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let pattern = attr_str(attrs, "regex")?;
    let re = Regex::new(pattern)
        .map_err(|e| FunctionError::new(format!("invalid regex '{}': {}", pattern, e)))?;
    if re.is_match(text) {
        Ok(())
    } else {
        Err(FunctionError::new(format!("'{}' does not match {}", text, pattern)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_is_string_and_not_empty() {
        let none = Attributes::new();
        assert!(is_string(&json!("a"), &none).is_ok());
        assert!(is_string(&json!(1), &none).is_err());
        assert!(not_empty(&json!(" x "), &none).is_ok());
        assert_eq!(
            not_empty(&json!("   "), &none).unwrap_err().message,
            "this string can not be empty"
        );
        assert!(not_empty(&json!(3), &none).is_err());
    }

    #[test]
    fn test_string_in_arr() {
        let allowed = attrs(json!({"arr": ["red", "green"]}));
        assert!(string_in_arr(&json!("red"), &allowed).is_ok());
        assert!(string_in_arr(&json!("blue"), &allowed).is_err());

        let err = string_in_arr(&json!("red"), &Attributes::new()).unwrap_err();
        assert!(err.message.contains("'arr'"));
    }

    #[test]
    fn test_like_wildcards() {
        let pattern = attrs(json!({"pattern": "J_hn%"}));
        assert!(like(&json!("John Smith"), &pattern).is_ok());
        assert!(like(&json!("Jahn"), &pattern).is_ok());
        assert!(like(&json!("Jhn"), &pattern).is_err());

        let dotted = attrs(json!({"pattern": "a.c"}));
        assert!(like(&json!("a.c"), &dotted).is_ok());
        assert!(like(&json!("abc"), &dotted).is_err());
    }

    #[test]
    fn test_is_email() {
        let none = Attributes::new();
        assert!(is_email(&json!("ada@example.org"), &none).is_ok());
        assert!(is_email(&json!("ada@example"), &none).is_err());
        assert!(is_email(&json!("not an email"), &none).is_err());
    }

    #[test]
    fn test_length_checks_count_characters() {
        let max = attrs(json!({"max": 3}));
        assert!(max_length_allowed(&json!("äöü"), &max).is_ok());
        assert!(max_length_allowed(&json!("abcd"), &max).is_err());

        let min = attrs(json!({"min": "2"}));
        assert!(min_length_allowed(&json!("ab"), &min).is_ok());
        assert!(min_length_allowed(&json!("a"), &min).is_err());

        let between = attrs(json!({"min": 2, "max": 4}));
        assert!(in_between_length_allowed(&json!("abc"), &between).is_ok());
        assert!(in_between_length_allowed(&json!("abcde"), &between).is_err());
        assert!(in_between_length_allowed(&json!("abc"), &attrs(json!({"min": 1}))).is_err());
    }

    #[test]
    fn test_special_characters() {
        let none = Attributes::new();
        assert!(no_special_characters(&json!("abc123"), &none).is_ok());
        assert!(no_special_characters(&json!("abc-123"), &none).is_err());
        assert!(have_special_characters(&json!("p@ss"), &none).is_ok());
        assert!(have_special_characters(&json!("pass"), &none).is_err());
    }

    #[test]
    fn test_character_classes() {
        let none = Attributes::new();
        assert!(least_one_upper_case(&json!("aB"), &none).is_ok());
        assert!(least_one_upper_case(&json!("ab"), &none).is_err());
        assert!(least_one_lower_case(&json!("Ab"), &none).is_ok());
        assert!(least_one_lower_case(&json!("AB"), &none).is_err());
        assert!(least_one_digit(&json!("a1"), &none).is_ok());
        assert!(least_one_digit(&json!("ab"), &none).is_err());
    }

    #[test]
    fn test_uuid_and_regex() {
        let none = Attributes::new();
        assert!(is_valid_uuid(&json!("123e4567-e89b-12d3-a456-426614174000"), &none).is_ok());
        assert!(is_valid_uuid(&json!("123e4567"), &none).is_err());

        let digits = attrs(json!({"regex": r"^\d{3}$"}));
        assert!(regex(&json!("123"), &digits).is_ok());
        assert!(regex(&json!("12a"), &digits).is_err());
        assert!(regex(&json!("x"), &attrs(json!({"regex": "("}))).is_err());
    }
}
