//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! rendering for validation error collections.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use schematics_core::report::format_record;
use schematics_core::ErrorCollection;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::{trace, warn};

/// How validation errors are rendered
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Locale messages are rendered in
    pub locale: String,
    /// Message template
    pub template: String,
    /// Collapse all messages into one line joined with this separator
    pub join: Option<String>,
}

/// Machine-readable validation result
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub valid: bool,
    pub error_count: usize,
    pub errors: &'a ErrorCollection,
    pub messages: Vec<String>,
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation error collection
    fn format_error_report(
        &self,
        errors: &ErrorCollection,
        options: &ReportOptions,
    ) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Documents have no better human form than indented JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_error_report(
        &self,
        errors: &ErrorCollection,
        options: &ReportOptions,
    ) -> Result<String> {
        if *self == OutputFormat::Human {
            return Ok(format_error_report_human(errors, options));
        }

        let report = ValidationReport {
            valid: errors.is_empty(),
            error_count: errors.len(),
            errors,
            messages: errors.render(&options.locale, &options.template),
        };
        self.format(&report)
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress indicators with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "writing data");

        match self.format {
            // YAML output already ends in a newline
            OutputFormat::Yaml => self.write(&formatted),
            _ => self.writeln(&formatted),
        }
    }

    /// Write a validation error collection
    pub fn error_report(
        &mut self,
        errors: &ErrorCollection,
        options: &ReportOptions,
    ) -> Result<()> {
        let formatted = self.format.format_error_report(errors, options)?;
        match self.format {
            OutputFormat::Yaml => self.write(&formatted),
            _ => self.writeln(&formatted),
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render errors as indented lines grouped by row
fn format_error_report_human(errors: &ErrorCollection, options: &ReportOptions) -> String {
    if let Some(join) = &options.join {
        return errors
            .collapse(&options.locale, &options.template, Some(join))
            .unwrap_or_default();
    }

    let mut lines = Vec::with_capacity(errors.len());
    let mut current_row: Option<&Value> = None;
    for record in errors {
        if record.row_id.is_some() && record.row_id.as_ref() != current_row {
            current_row = record.row_id.as_ref();
            if let Some(id) = current_row {
                lines.push(format!("{}:", format_row_id(id)));
            }
        }

        let indent = if current_row.is_some() { "    " } else { "  " };
        match format_record(record, &options.locale, &options.template) {
            Some(line) => lines.push(format!("{}- {}", indent, line)),
            None => warn!(
                field = %record.target,
                locale = %options.locale,
                "no message for locale, skipping record"
            ),
        }
    }
    lines.join("\n")
}

fn format_row_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
