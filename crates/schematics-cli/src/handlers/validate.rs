//! Validation command handler

use super::utils::{load_schema, read_document};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ReportOptions};
use schematics_core::{ValidationEngine, ValidatorRegistry};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(
    skip(args, config, output),
    fields(data = %args.data.display(), schema = %args.engine.schema.display())
)]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("data: {}", args.data.display()));
    output.info(&format!(
        "Validating {} against {}",
        args.data.display(),
        args.engine.schema.display()
    ))?;

    let schema = load_schema(&args.engine)?;
    let data = read_document(&args.data)?;
    debug!(fields = schema.fields.len(), "schema loaded");

    let engine_config = config.engine_config(&args.engine);
    let options = ReportOptions {
        locale: engine_config.locale.clone(),
        template: args.template.unwrap_or_else(|| config.output.template.clone()),
        join: args.join.or_else(|| config.output.join.clone()),
    };
    let engine = ValidationEngine::new(&schema, ValidatorRegistry::new(), engine_config)?;

    let spinner = output.spinner("Validating...");
    let timer = Timer::new("validation");
    let result = engine.validate(&data);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let errors = result?;
    debug!(
        errors = errors.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "validation finished"
    );

    if errors.is_empty() {
        info!("data is valid");
        output.success("✓ Data is valid")?;
        if output.format() != OutputFormat::Human {
            output.error_report(&errors, &options)?;
        }
        return Ok(());
    }

    warn!(errors = errors.len(), "validation failed");
    output.error(&format!("✗ {} validation error(s)", errors.len()))?;
    output.error_report(&errors, &options)?;
    Err(Error::ValidationFailed { count: errors.len() })
}
