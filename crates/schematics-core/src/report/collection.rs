//! Ordered, mergeable collection of error records

use super::template::{format_record, DEFAULT_JOIN};
use super::ErrorRecord;
use crate::config::DEFAULT_LOCALE;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Row and target a record is filed under
type RecordKey = (Option<String>, String);

fn record_key(record: &ErrorRecord) -> RecordKey {
    (
        record.row_id.as_ref().map(Value::to_string),
        record.target.clone(),
    )
}

/// Ordered collection of [`ErrorRecord`]s
///
/// [`Self::push`] and [`Self::merge`] upsert: a record whose
/// `(row_id, target)` is already present replaces the latest record filed
/// under that key. [`Self::append`] and [`Self::append_all`] always add, so
/// several failures on one key, or rows sharing an id, stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCollection {
    locale: String,
    records: Vec<ErrorRecord>,
    latest: HashMap<RecordKey, usize>,
}

impl ErrorCollection {
    /// Create an empty collection recording messages under the default locale
    pub fn new() -> Self {
        Self::with_locale(DEFAULT_LOCALE)
    }

    /// Create an empty collection recording messages under `locale`
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            records: Vec::new(),
            latest: HashMap::new(),
        }
    }

    /// Locale used by [`Self::add_error`]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Record an error with a message in the collection's locale
    pub fn add_error(
        &mut self,
        validator: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
        value: Value,
    ) {
        let record =
            ErrorRecord::new(validator, target, value).with_message(self.locale.clone(), message);
        self.push(record);
    }

    /// Record an error belonging to a collection row
    pub fn add_error_for_row(
        &mut self,
        validator: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
        value: Value,
        row_id: Value,
    ) {
        let record = ErrorRecord::new(validator, target, value)
            .with_message(self.locale.clone(), message)
            .with_row_id(row_id);
        self.push(record);
    }

    /// Add a record, replacing any record with the same row and target
    pub fn push(&mut self, record: ErrorRecord) {
        match self.latest.get(&record_key(&record)) {
            Some(&position) => self.records[position] = record,
            None => self.append(record),
        }
    }

    /// Add a record after all existing ones, whatever its key
    pub fn append(&mut self, record: ErrorRecord) {
        self.latest.insert(record_key(&record), self.records.len());
        self.records.push(record);
    }

    /// Add every record of `other` after the existing ones
    pub fn append_all(&mut self, other: ErrorCollection) {
        for record in other.records {
            self.append(record);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    /// Fold another collection into this one
    pub fn merge(&mut self, other: ErrorCollection) {
        for record in other.records {
            self.push(record);
        }
    }

    /// Records belonging to one row
    pub fn for_row(&self, row_id: &Value) -> ErrorCollection {
        let mut subset = ErrorCollection::with_locale(self.locale.clone());
        for record in self.iter().filter(|r| r.row_id.as_ref() == Some(row_id)) {
            subset.append(record.clone());
        }
        subset
    }

    /// Render every record that has a message in `locale`
    pub fn render(&self, locale: &str, template: &str) -> Vec<String> {
        self.iter()
            .filter_map(|record| {
                let rendered = format_record(record, locale, template);
                if rendered.is_none() {
                    tracing::warn!(
                        field = %record.target,
                        validator = %record.validator,
                        locale,
                        "no message for locale, skipping record"
                    );
                }
                rendered
            })
            .collect()
    }

    /// Render and join into a single string, `None` when nothing renders
    pub fn collapse(
        &self,
        locale: &str,
        template: &str,
        join_with: Option<&str>,
    ) -> Option<String> {
        let lines = self.render(locale, template);
        if lines.is_empty() {
            return None;
        }
        Some(lines.join(join_with.unwrap_or(DEFAULT_JOIN)))
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }
}

impl Default for ErrorCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ErrorCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.records)
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
