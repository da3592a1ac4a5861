//! Schema loading
//!
//! Reads JSON or YAML schema documents, works out which DSL revision they
//! are written in and decodes them into a [`schematics_core::SchemaDocument`].
//!
//! # Example Usage
//!
//! ```no_run
//! use schematics_schemas::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let loader = SchemaLoader::new();
//! let schema = loader.load_file(Path::new("schema.yaml"))?;
//! println!("{} field rules", schema.fields.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod schema_loader;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use schema_loader::{LoaderConfig, SchemaLoader};
