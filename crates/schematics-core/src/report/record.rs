//! A single validation error record

use crate::schema::Localized;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data-quality error found during validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Concrete flat key, or the pattern for required and dependency errors
    pub target: String,
    pub validator: String,
    /// Message per locale
    pub messages: Localized,
    /// Offending value, `null` when the field is absent
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl ErrorRecord {
    pub fn new(validator: impl Into<String>, target: impl Into<String>, value: Value) -> Self {
        Self {
            target: target.into(),
            validator: validator.into(),
            messages: Localized::new(),
            value,
            row_id: None,
            context: None,
        }
    }

    /// Set the message for a locale
    pub fn with_message(mut self, locale: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(locale.into(), message.into());
        self
    }

    /// Add messages for locales not already present
    pub fn with_messages<'a>(
        mut self,
        messages: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (locale, message) in messages {
            self.messages
                .entry(locale.clone())
                .or_insert_with(|| message.clone());
        }
        self
    }

    pub fn with_row_id(mut self, row_id: Value) -> Self {
        self.row_id = Some(row_id);
        self
    }

    /// Attach extra data, rendered by the `%data` placeholder
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn message(&self, locale: &str) -> Option<&str> {
        self.messages.get(locale).map(String::as_str)
    }
}
