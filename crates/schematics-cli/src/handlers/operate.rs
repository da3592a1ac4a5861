//! Transform command handler

use super::utils::{load_schema, read_document, write_document};
use crate::cli::OperateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schematics_core::{OperatorRegistry, TransformEngine};
use tracing::{debug, instrument};

/// Handle the operate command
#[instrument(
    skip(args, config, output),
    fields(data = %args.data.display(), schema = %args.engine.schema.display())
)]
pub fn handle_operate(args: OperateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("operate_command", &format!("data: {}", args.data.display()));

    let schema = load_schema(&args.engine)?;
    let data = read_document(&args.data)?;
    let engine_config = config.engine_config(&args.engine);
    let engine = TransformEngine::new(&schema, OperatorRegistry::new(), engine_config)?;

    let transformed = engine.operate(&data)?;
    debug!("transform finished");

    match &args.save_to {
        Some(path) => {
            write_document(path, &transformed)?;
            output.success(&format!("✓ Saved transformed data to {}", path.display()))
        }
        None => output.data(&transformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{EngineArgs, OutputFormat};
    use crate::output::tests::SharedBuffer;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::tempdir;

    const SCHEMA: &str = r#"{
        "version": "v1",
        "fields": [
            {"target_key": "name", "operators": {"Trim": {}, "UpperCase": {}}},
            {"target_key": "tags.*", "operators": {"LowerCase": {}}}
        ]
    }"#;

    #[test]
    fn test_operate_to_stdout_and_file() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        let data = dir.path().join("data.json");
        fs::write(&schema, SCHEMA).unwrap();
        fs::write(&data, r#"{"name": "  ada ", "tags": ["A", "B"], "age": 3}"#).unwrap();

        let expected = json!({"name": "ADA", "tags": ["a", "b"], "age": 3});
        let args = OperateArgs {
            data,
            engine: EngineArgs {
                schema,
                ..EngineArgs::default()
            },
            save_to: None,
        };

        let buffer = SharedBuffer::default();
        let writer = Box::new(buffer.clone());
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, false, writer);
        handle_operate(args.clone(), &Config::default(), &mut output).unwrap();
        let printed: Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(printed, expected);

        let target = dir.path().join("out.yaml");
        let writer = Box::new(SharedBuffer::default());
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, true, writer);
        handle_operate(
            OperateArgs {
                save_to: Some(target.clone()),
                ..args
            },
            &Config::default(),
            &mut output,
        )
        .unwrap();
        let saved: Value = serde_yaml::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(saved, expected);
    }
}
