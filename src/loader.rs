//! # Method Configuration Loader
//!
//! Reads a method configuration document, validates it against the expected
//! schema, and returns a fully validated, immutable
//! [`MethodConfig`](crate::config::MethodConfig). Validation is
//! all-or-nothing: either every rule passes and a complete value is
//! returned, or the load fails with a [`ConfigError`] and nothing is.
//!
//! Two historical document shapes exist for the standards section and both
//! are supported:
//!
//! - **flat**: a top-level `corrective_measurements` map of canonical key to
//!   standard definition;
//! - **nested**: a top-level `standards` object holding an `other_standards`
//!   map plus parallel `calibration_standards` / `ancillary_standards` name
//!   lists.
//!
//! Shape detection keys off which top-level key is present; both shapes
//! normalize into the one canonical
//! [`StandardsRegistry`](crate::config::StandardsRegistry) at load time, so
//! consumer code never branches on shape.

use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use url::Url;

use crate::config::{
    ConfigError, FileMeta, Link, LocalDirectories, MethodConfig, MethodsSection,
    StandardDefinition, StandardsRegistry,
};

/// Loader options.
///
/// The only knob is URL strictness. URL syntax is a *soft* validation: by
/// default a malformed `procedure_link`/`standards_link` is kept as raw text
/// and reported through `log::warn!`; with [`Loader::strict_urls`] it fails
/// the load with [`ConfigError::Format`] instead.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    strict_urls: bool,
}

impl Loader {
    /// Create a loader with default options (lenient URLs).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the load on malformed link fields instead of warning.
    pub fn strict_urls(mut self, strict: bool) -> Self {
        self.strict_urls = strict;
        self
    }

    /// Load and validate a document from a JSON string.
    pub fn load_str(&self, text: &str) -> Result<MethodConfig, ConfigError> {
        let raw: RawDocument = serde_json::from_str(text)?;
        self.assemble(raw)
    }

    /// Load and validate a document from a file.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<MethodConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        self.load_str(&text)
    }

    fn assemble(&self, raw: RawDocument) -> Result<MethodConfig, ConfigError> {
        let file_meta = raw
            .file_meta_data
            .ok_or(ConfigError::MissingSection("file_meta_data"))?;
        let local_directories = raw
            .local_directories
            .ok_or(ConfigError::MissingSection("local_directories"))?;
        let methods = raw.methods.ok_or(ConfigError::MissingSection("methods"))?;

        let instrumentation = methods
            .instrumentation
            .ok_or(ConfigError::MissingSection("methods.instrumentation"))?;

        // Shape detection: flat corrective_measurements map, or nested
        // standards object with parallel name lists.
        let (defs, mut calibration_standards, mut ancillary_standards) =
            match (raw.corrective_measurements, raw.standards) {
                (Some(flat), _) => (typed_standards(flat)?, Vec::new(), Vec::new()),
                (None, Some(nested)) => (
                    typed_standards(nested.other_standards)?,
                    nested.calibration_standards,
                    nested.ancillary_standards,
                ),
                (None, None) => {
                    return Err(ConfigError::MissingSection(
                        "corrective_measurements or standards",
                    ))
                }
            };

        // Name lists may also sit at the top level (canonical flat shape).
        if calibration_standards.is_empty() {
            calibration_standards = raw.calibration_standards;
        }
        if ancillary_standards.is_empty() {
            ancillary_standards = raw.ancillary_standards;
        }

        let standards = StandardsRegistry::from_definitions(defs)?;

        let methods = MethodsSection {
            instrumentation,
            procedure: methods.procedure,
            procedure_url: self.check_link("procedure_link", methods.procedure_link)?,
            standards_url: self.check_link("standards_link", methods.standards_link)?,
        };

        for key in raw.extra.keys() {
            warn!("unknown top-level key '{key}': preserved for round-trip but not interpreted");
        }

        Ok(MethodConfig {
            file_meta,
            local_directories,
            methods,
            standards,
            calibration_standards,
            ancillary_standards,
            extra: raw.extra,
        })
    }

    fn check_link(
        &self,
        field: &'static str,
        raw: Option<String>,
    ) -> Result<Option<Link>, ConfigError> {
        let Some(raw) = raw else { return Ok(None) };
        match Url::parse(&raw) {
            Ok(url) => Ok(Some(Link::Url(url))),
            Err(source) if self.strict_urls => Err(ConfigError::Format {
                field,
                value: raw,
                source,
            }),
            Err(source) => {
                warn!("{field} is not an absolute URL ({source}); keeping raw text '{raw}'");
                Ok(Some(Link::Raw(raw)))
            }
        }
    }
}

/// Load and validate a document from a JSON string with default options.
pub fn load_str(text: &str) -> Result<MethodConfig, ConfigError> {
    Loader::new().load_str(text)
}

/// Load and validate a document from a file with default options.
pub fn load_file(path: impl AsRef<Path>) -> Result<MethodConfig, ConfigError> {
    Loader::new().load_file(path)
}

/// Top-level document as it appears on disk, before shape normalization.
/// Every section is optional here so that missing sections surface as
/// [`ConfigError::MissingSection`] rather than opaque parse errors.
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    file_meta_data: Option<FileMeta>,
    #[serde(default)]
    local_directories: Option<LocalDirectories>,
    #[serde(default)]
    methods: Option<RawMethods>,
    /// Flat shape: canonical key -> definition, in document order
    #[serde(default)]
    corrective_measurements: Option<Map<String, Value>>,
    /// Nested shape
    #[serde(default)]
    standards: Option<RawNestedStandards>,
    #[serde(default)]
    calibration_standards: Vec<String>,
    #[serde(default)]
    ancillary_standards: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawMethods {
    #[serde(default)]
    instrumentation: Option<String>,
    #[serde(default)]
    procedure: Option<String>,
    #[serde(default)]
    procedure_link: Option<String>,
    #[serde(default)]
    standards_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawNestedStandards {
    #[serde(default)]
    calibration_standards: Vec<String>,
    #[serde(default)]
    ancillary_standards: Vec<String>,
    #[serde(default)]
    other_standards: Map<String, Value>,
}

/// Turn an ordered JSON map of standard objects into typed definitions,
/// injecting the map key as the canonical key.
fn typed_standards(map: Map<String, Value>) -> Result<Vec<StandardDefinition>, ConfigError> {
    map.into_iter()
        .map(|(key, value)| {
            let mut def: StandardDefinition = serde_json::from_value(value)?;
            def.key = key;
            Ok(def)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT_MINIMAL: &str = r#"{
        "file_meta_data": {
            "author": "A. Schauer",
            "file": "CN_config.json",
            "modification_date": "2024-11-22",
            "change_log": {"v0.1": "created"}
        },
        "local_directories": {
            "home": "/home/isolab/",
            "python": "scripts/",
            "method_data_directory": "data/CN/",
            "standards": "reference_materials.json"
        },
        "methods": {
            "instrumentation": "ThermoFinnigan 253 with Eurovector EA",
            "procedure_link": "https://isolab.example.edu/procedures/cn.html"
        },
        "corrective_measurements": {
            "blank": {"names": ["blank"], "material": null, "notes": "no material dropped into EA"}
        }
    }"#;

    #[test]
    fn flat_shape_loads() {
        let config = load_str(FLAT_MINIMAL).unwrap();
        assert_eq!(config.file_meta.author, "A. Schauer");
        assert_eq!(config.standards.len(), 1);
        assert!(config.standards.resolve("blank").is_some());
        assert!(config.calibration_standards.is_empty());
    }

    #[test]
    fn nested_shape_loads() {
        let doc = FLAT_MINIMAL.replace(
            r#""corrective_measurements": {
            "blank": {"names": ["blank"], "material": null, "notes": "no material dropped into EA"}
        }"#,
            r#""standards": {
            "calibration_standards": ["GA1", "GA2", "SA"],
            "ancillary_standards": ["NIST1547", "MAL", "DSM"],
            "other_standards": {
                "blank": {"names": ["blank"], "material": null}
            }
        }"#,
        );
        let config = load_str(&doc).unwrap();
        assert_eq!(config.calibration_standards, vec!["GA1", "GA2", "SA"]);
        assert_eq!(config.ancillary_standards.len(), 3);
        assert!(config.standards.resolve("blank").is_some());
    }

    #[test]
    fn missing_methods_section_is_named() {
        let doc = FLAT_MINIMAL.replace("\"methods\"", "\"methodz\"");
        match load_str(&doc) {
            Err(ConfigError::MissingSection(section)) => assert_eq!(section, "methods"),
            other => panic!("expected MissingSection, got {other:?}"),
        }
    }

    #[test]
    fn missing_standards_section_is_named() {
        let doc = FLAT_MINIMAL.replace("\"corrective_measurements\"", "\"corrections\"");
        match load_str(&doc) {
            Err(ConfigError::MissingSection(section)) => {
                assert_eq!(section, "corrective_measurements or standards");
            }
            other => panic!("expected MissingSection, got {other:?}"),
        }
    }

    #[test]
    fn malformed_url_warns_by_default_and_fails_in_strict_mode() {
        let doc = FLAT_MINIMAL.replace(
            "https://isolab.example.edu/procedures/cn.html",
            "procedures/cn.html",
        );

        let config = load_str(&doc).unwrap();
        let link = config.procedure_url().unwrap();
        assert!(!link.is_valid());
        assert_eq!(link.as_str(), "procedures/cn.html");

        match Loader::new().strict_urls(true).load_str(&doc) {
            Err(ConfigError::Format { field, value, .. }) => {
                assert_eq!(field, "procedure_link");
                assert_eq!(value, "procedures/cn.html");
            }
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_top_level_keys_are_preserved() {
        let doc = FLAT_MINIMAL.replacen('{', r#"{ "operator_notes": "seldom used","#, 1);
        let config = load_str(&doc).unwrap();
        assert_eq!(
            config.extra.get("operator_notes").and_then(|v| v.as_str()),
            Some("seldom used")
        );
    }
}
