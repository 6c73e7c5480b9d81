//! # Typed Method Configuration Model
//!
//! Immutable data model for a carbon/nitrogen elemental analysis method
//! configuration: document provenance, file-system roles, instrumentation
//! description, and the registry of reference/corrective standards.
//!
//! The whole graph is constructed once by [`crate::loader`] from a static
//! JSON document, validated all-or-nothing, and never mutated afterwards.

mod directories;
mod error;
mod file_meta;
mod method;
mod standards;


pub use directories::LocalDirectories;
pub use error::ConfigError;
pub use file_meta::{ChangeLog, ChangeLogEntry, FileMeta};
pub use method::{Link, MethodConfig, MethodsSection};
pub use standards::{normalize_alias, StandardDefinition, StandardsRegistry};
