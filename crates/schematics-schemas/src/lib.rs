//! Schematics Schemas - loading and decoding of schema documents
//!
//! Schemas are written in one of several DSL revisions, selected by the
//! document's `version` tag:
//!
//! - **v0**: `fields` keyed by target pattern, validators and operators
//!   keyed by function name
//! - **v1**: `fields` as a list, functions keyed by name
//! - **v2**: `fields` as a list, functions as ordered `{name, attributes}`
//!   components
//! - **legacy**: functions as name lists, attributes in a shared
//!   `constants` table
//!
//! Every revision decodes into the same [`SchemaDocument`], ready to hand
//! to the engines in `schematics-core`.
//!
//! ## Quick Start
//!
//! ```rust
//! use schematics_schemas::{decode, SchemaVersion};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "version": "2",
//!     "fields": [
//!         {"target_key": "user.email", "required": true, "validators": [{"name": "IsEmail"}]}
//!     ]
//! });
//!
//! let version = SchemaVersion::detect(&raw).unwrap();
//! let schema = decode(version, &raw).unwrap();
//! assert_eq!(schema.fields[0].target_key, "user.email");
//! ```
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod decode;
pub mod loader;
pub mod versioning;

pub use decode::decode;
pub use loader::{Format, LoaderConfig, LoaderError, LoaderResult, SchemaLoader, SchemaParser};
pub use schematics_core::SchemaDocument;
pub use versioning::{SchemaVersion, VersionError};

/// Load a schema file with version detection
pub fn load_schema_file(path: &std::path::Path) -> LoaderResult<SchemaDocument> {
    SchemaLoader::new().load_file(path)
}
