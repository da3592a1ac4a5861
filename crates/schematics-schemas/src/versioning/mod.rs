//! Schema versioning
//!
//! Every schema document carries a `version` tag selecting which DSL
//! revision its `fields` are written in. The tag is read here; the
//! revision-specific decoding lives in [`crate::decode`].
//!
//! Copyright (c) 2025 Schematics Team
//! Licensed under the Apache-2.0 license

pub mod version;

pub use version::{SchemaVersion, VersionError, VERSION_KEY};
