use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use url::Url;

use super::directories::LocalDirectories;
use super::error::ConfigError;
use super::file_meta::FileMeta;
use super::standards::StandardsRegistry;

/// A method or standards link: either a well-formed absolute URL, or the raw
/// document text when it did not parse as one.
///
/// URL syntax is a soft validation by default (see
/// [`Loader::strict_urls`](crate::loader::Loader::strict_urls)); the raw
/// variant keeps a malformed link round-trippable instead of dropping it.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    /// A well-formed absolute URL
    Url(Url),
    /// Raw text that is not a well-formed absolute URL
    Raw(String),
}

impl Link {
    /// Parse `raw`, falling back to [`Link::Raw`] when it is not an
    /// absolute URL.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) => Link::Url(url),
            Err(_) => Link::Raw(raw.to_string()),
        }
    }

    /// The link text as written (or as normalized by the URL parser).
    pub fn as_str(&self) -> &str {
        match self {
            Link::Url(url) => url.as_str(),
            Link::Raw(raw) => raw,
        }
    }

    /// True when the link parsed as an absolute URL.
    pub fn is_valid(&self) -> bool {
        matches!(self, Link::Url(_))
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Link::parse(&raw))
    }
}

/// Instrumentation and procedure description block of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodsSection {
    /// Free-text description of the analytical instrumentation
    pub instrumentation: String,

    /// Display text for the procedure link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,

    /// Link to the written analytical procedure
    #[serde(rename = "procedure_link", default, skip_serializing_if = "Option::is_none")]
    pub procedure_url: Option<Link>,

    /// Link to the laboratory's reference-materials overview
    #[serde(rename = "standards_link", default, skip_serializing_if = "Option::is_none")]
    pub standards_url: Option<Link>,
}

/// Root entity: one fully validated, immutable method configuration.
///
/// Constructed once through [`crate::loader`], then shared read-only for the
/// lifetime of the consuming process. Every field is owned data, so the
/// value is `Send + Sync` and safe behind `&` or `Arc` without locking.
/// Pass it explicitly to whatever needs it; there is no ambient singleton.
///
/// Serialization always emits the canonical flat document shape
/// (`corrective_measurements`), regardless of which shape was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// Document provenance: author, identifier, dates, change history
    #[serde(rename = "file_meta_data")]
    pub file_meta: FileMeta,

    /// Named file-system roles
    pub local_directories: LocalDirectories,

    /// Instrumentation description and procedure links
    pub methods: MethodsSection,

    /// Reference/corrective standard definitions, in document order
    #[serde(rename = "corrective_measurements")]
    pub standards: StandardsRegistry,

    /// Names of isotope calibration standards (nested document shape only;
    /// the definitions live in the separate reference-materials file)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calibration_standards: Vec<String>,

    /// Names of ancillary standards (nested document shape only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancillary_standards: Vec<String>,

    /// Unknown top-level keys, preserved verbatim so a round trip never
    /// drops them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MethodConfig {
    /// Free-text instrumentation description.
    pub fn instrumentation(&self) -> &str {
        &self.methods.instrumentation
    }

    /// Link to the written analytical procedure, when present.
    pub fn procedure_url(&self) -> Option<&Link> {
        self.methods.procedure_url.as_ref()
    }

    /// Link to the laboratory's reference-materials overview, when present.
    pub fn standards_url(&self) -> Option<&Link> {
        self.methods.standards_url.as_ref()
    }

    /// Serialize to pretty-printed JSON in the canonical flat shape.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
