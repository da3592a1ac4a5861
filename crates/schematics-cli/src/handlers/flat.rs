//! Flatten and deflate command handlers

use super::utils::read_document;
use crate::cli::{DeflateArgs, FlattenArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use schematics_core::{deflate, flatten, FlatView};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, instrument};

/// Handle the flatten command
#[instrument(skip(args, config, output), fields(data = %args.data.display()))]
pub fn handle_flatten(args: FlattenArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let separator = checked_separator(config, args.separator.as_deref())?;
    let data = read_document(&args.data)?;

    // An array root is a list of rows, each flattened on its own
    let flat = match &data {
        Value::Array(rows) => Value::Array(
            rows.iter().map(|row| flat_object(row, &separator)).collect(),
        ),
        other => flat_object(other, &separator),
    };
    output.data(&flat)
}

/// Handle the deflate command
#[instrument(skip(args, config, output), fields(flat = %args.flat.display()))]
pub fn handle_deflate(args: DeflateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let separator = checked_separator(config, args.separator.as_deref())?;
    let flat = read_document(&args.flat)?;

    let nested = match flat {
        Value::Object(map) => deflate_object(map, &separator)?,
        Value::Array(rows) => Value::Array(
            rows.into_iter()
                .map(|row| match row {
                    Value::Object(map) => deflate_object(map, &separator),
                    _ => Err(not_flat(&args.flat)),
                })
                .collect::<Result<Vec<_>>>()?,
        ),
        _ => return Err(not_flat(&args.flat)),
    };
    output.data(&nested)
}

fn checked_separator(config: &Config, flag: Option<&str>) -> Result<String> {
    let separator = config.separator(flag);
    if separator.is_empty() {
        return Err(Error::invalid_args("separator must not be empty"));
    }
    Ok(separator)
}

fn flat_object(value: &Value, separator: &str) -> Value {
    let view = flatten(value, "", separator);
    debug!(entries = view.len(), "flattened");
    Value::Object(view.into_iter().collect())
}

fn deflate_object(map: Map<String, Value>, separator: &str) -> Result<Value> {
    let view: FlatView = map.into_iter().collect();
    Ok(deflate(&view, separator)?)
}

fn not_flat(path: &Path) -> Error {
    Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: "a flat object or an array of flat objects".to_string(),
    }
}
