/// Errors that can occur while loading or validating a method configuration
/// document.
///
/// Every variant except the wrapped I/O and JSON sources corresponds to one
/// semantic validation rule. All of them are fatal to the load: no partially
/// validated [`MethodConfig`](crate::config::MethodConfig) is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required top-level section is absent from the document
    #[error("missing required section: {0}")]
    MissingSection(&'static str),

    /// Two standards claim the same alias, making name resolution ambiguous
    #[error("duplicate alias '{alias}': claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        /// The conflicting alias as written in the document
        alias: String,
        /// Canonical key of the standard that claimed the alias first
        first: String,
        /// Canonical key of the standard that claimed it again
        second: String,
    },

    /// A mass fraction lies outside the closed interval [0, 1]
    #[error("{field} for standard '{key}' out of range: {value} (expected a value in [0, 1])")]
    Range {
        /// Canonical key of the offending standard
        key: String,
        /// Field name as written in the document (`fractionN` or `fractionC`)
        field: &'static str,
        /// The out-of-range value
        value: f64,
    },

    /// A link field is not a well-formed absolute URL (strict mode only)
    #[error("malformed {field} URL '{value}': {source}")]
    Format {
        /// Field name as written in the document
        field: &'static str,
        /// The raw text that failed to parse
        value: String,
        /// The underlying URL parse error
        #[source]
        source: url::ParseError,
    },

    /// A standard declares no alias, or only aliases that trim to nothing
    #[error("standard '{0}' declares no non-empty alias")]
    EmptyAlias(String),

    /// I/O error reading the document
    #[error("failed to read configuration document: {0}")]
    Io(#[from] std::io::Error),

    /// JSON syntax or type error in the document
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
