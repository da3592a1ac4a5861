//! `%placeholder` templates for rendering error records

use super::ErrorRecord;
use serde_json::Value;

/// Template used when the caller does not supply one
pub const DEFAULT_TEMPLATE: &str =
    "validation error %message for %target with validation on %validator, provided: %value";

/// Separator used by [`super::ErrorCollection::collapse`] by default
pub const DEFAULT_JOIN: &str = ",";

const PLACEHOLDERS: &[&str] = &["validator", "message", "target", "value", "data", "id"];

/// Render one record for a locale
///
/// Returns `None` when the record has no message in that locale. Unknown
/// placeholders are copied through unchanged. Substituted text is never
/// scanned again.
pub fn format_record(record: &ErrorRecord, locale: &str, template: &str) -> Option<String> {
    let message = record.message(locale)?;
    let mut out = String::with_capacity(template.len() + message.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        match PLACEHOLDERS.iter().find(|name| after.starts_with(*name)) {
            Some(name) => {
                match *name {
                    "message" => out.push_str(message),
                    "target" => out.push_str(&record.target),
                    "validator" => out.push_str(&record.validator),
                    "value" => out.push_str(&display_value(&record.value)),
                    "id" => {
                        if let Some(id) = &record.row_id {
                            out.push_str(&display_value(id));
                        }
                    }
                    _ => match &record.context {
                        Some(context) => out.push_str(&Value::Object(context.clone()).to_string()),
                        None => out.push_str("{}"),
                    },
                }
                rest = &after[name.len()..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Some(out)
}

/// Strings render bare, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
