//! # cnconfig - CN Method Configuration Loader
//!
//! `cnconfig` loads, validates, and exposes the method configuration document
//! for a carbon/nitrogen elemental analysis (EA-IRMS) system: instrument
//! identity, file-system locations, and the registry of reference/corrective
//! standards used in calibration.
//!
//! ## Key Features
//!
//! - **All-or-nothing validation**: a [`config::MethodConfig`] is either
//!   fully validated or never returned. No partially validated state exists.
//!
//! - **Immutable by construction**: the loaded value is owned, read-only
//!   data, safe to share across any number of concurrent readers without
//!   locking.
//!
//! - **Two document shapes**: both the flat `corrective_measurements` map
//!   and the older nested `standards.other_standards` layout normalize into
//!   one canonical registry at load time.
//!
//! - **Forgiving name resolution**: raw sample names resolve to standards
//!   by exact alias match first, then a case-insensitive,
//!   separator-normalized fallback. A miss is an `Option::None`, not an
//!   error — unmatched names are an everyday outcome during data reduction.
//!
//! - **Round-trip safe**: unknown top-level keys and change-log ordering
//!   survive a serialize/reload cycle.
//!
//! ## Quick Start
//!
//! ```rust
//! use cnconfig::prelude::*;
//!
//! let document = r#"{
//!     "file_meta_data": {
//!         "author": "A. Schauer",
//!         "file": "CN_config.json",
//!         "modification_date": "2024-11-22",
//!         "change_log": {"v0.1": "created"}
//!     },
//!     "local_directories": {
//!         "home": "/home/isolab/",
//!         "python": "scripts/",
//!         "method_data_directory": "data/CN/",
//!         "standards": "reference_materials.json"
//!     },
//!     "methods": {
//!         "instrumentation": "ThermoFinnigan 253 with Eurovector Elemental Analyzer"
//!     },
//!     "corrective_measurements": {
//!         "qtycal": {
//!             "names": ["qtycal_GA1", "qtycal.GA1"],
//!             "material": "GA1",
//!             "fractionN": 0.0952,
//!             "fractionC": 0.4082
//!         }
//!     }
//! }"#;
//!
//! let config = load_str(document)?;
//! let standard = config.standards.resolve("qtycal_GA1").unwrap();
//! assert_eq!(standard.key, "qtycal");
//! assert_eq!(standard.fraction_c, Some(0.4082));
//! # Ok::<(), cnconfig::config::ConfigError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`config`]: the typed, immutable data model
//! - [`loader`]: document shape detection and all-or-nothing validation
//! - [`validator`]: non-fatal, report-style document inspection
//!
//! The crate is a library only: there is no CLI and no network surface. The
//! document itself is the persisted state, edited out-of-band by a human.
//! Soft findings (malformed URLs, unknown top-level keys) are reported
//! through the [`log`] facade; logger choice is left to the consumer.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod loader;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{
        ChangeLog, ChangeLogEntry, ConfigError, FileMeta, Link, LocalDirectories, MethodConfig,
        MethodsSection, StandardDefinition, StandardsRegistry,
    };
    pub use crate::loader::{load_file, load_str, Loader};
    pub use crate::validator::{
        validate_config_file, validate_document, CheckStatus, ValidationCheck, ValidationReport,
    };
}
