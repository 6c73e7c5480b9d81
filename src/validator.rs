//! # Document Validation Module
//!
//! Non-fatal, report-style validation for method configuration documents.
//! Where [`crate::loader`] is all-or-nothing, this module runs the same
//! checks and accumulates every finding into a [`ValidationReport`], which
//! is useful when inspecting a hand-edited document before putting it into
//! service.
//!
//! ## Validation Checklist
//!
//! 1. **Syntax**: the document parses as JSON
//! 2. **Shape**: which standards-section shape is present (flat vs nested)
//! 3. **Sections**: required top-level sections exist
//! 4. **Semantics**: the document passes the full loader validation
//! 5. **Soft findings**: malformed URLs, unknown top-level keys, empty
//!    change log — reported as warnings, never failures
//!
//! ## Usage
//!
//! ```rust
//! use cnconfig::validator::validate_document;
//!
//! let report = validate_document("{}");
//! assert!(report.has_failures());
//! println!("{report}");
//! ```

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::config::ConfigError;
use crate::loader::Loader;

/// Validation check result
#[derive(Debug, Clone)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with a non-fatal finding
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// Individual validation check
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Short name of the check
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ValidationCheck {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Complete validation report for one document
#[derive(Debug)]
pub struct ValidationReport {
    /// All checks in execution order
    pub checks: Vec<ValidationCheck>,
    /// Where the document came from (path or "<string>")
    pub source: String,
}

impl ValidationReport {
    /// Create an empty report for `source`.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            source: source.into(),
        }
    }

    fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// True when any check failed.
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// True when any check produced a warning.
    pub fn has_warnings(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    /// Number of passed checks.
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .count()
    }

    /// Number of failed checks.
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Method Configuration Validation Report")?;
        writeln!(f, "======================================")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f)?;

        for check in &self.checks {
            let symbol = match &check.status {
                CheckStatus::Ok => "✓",
                CheckStatus::Warning(_) => "⚠",
                CheckStatus::Failed(_) => "✗",
            };

            write!(f, "[{}] {}", symbol, check.name)?;

            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;

        if self.has_failures() {
            writeln!(f)?;
            writeln!(f, "Validation FAILED")?;
        } else if self.has_warnings() {
            writeln!(f)?;
            writeln!(f, "Validation PASSED with warnings")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Validation PASSED")?;
        }

        Ok(())
    }
}

/// Validate a document held in a string.
pub fn validate_document(text: &str) -> ValidationReport {
    let mut report = ValidationReport::new("<string>");
    run_checks(text, &mut report);
    report
}

/// Validate a document on disk. Fails only when the file cannot be read;
/// every document-level finding goes into the report.
pub fn validate_config_file(path: &Path) -> Result<ValidationReport, ConfigError> {
    let text = fs::read_to_string(path)?;
    let mut report = ValidationReport::new(path.display().to_string());
    run_checks(&text, &mut report);
    Ok(report)
}

fn run_checks(text: &str, report: &mut ValidationReport) {
    // 1. Syntax
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => {
            report.add_check(ValidationCheck::ok("Document parses as JSON"));
            value
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Document parses as JSON",
                e.to_string(),
            ));
            return;
        }
    };

    let Some(top) = document.as_object() else {
        report.add_check(ValidationCheck::failed(
            "Document is a JSON object",
            format!("found {}", json_type_name(&document)),
        ));
        return;
    };
    report.add_check(ValidationCheck::ok("Document is a JSON object"));

    // 2. Shape detection
    if top.contains_key("corrective_measurements") {
        report.add_check(ValidationCheck::ok("Shape: flat (corrective_measurements)"));
    } else if top.contains_key("standards") {
        report.add_check(ValidationCheck::ok(
            "Shape: nested (standards.other_standards)",
        ));
    } else {
        report.add_check(ValidationCheck::failed(
            "Standards section present",
            "neither 'corrective_measurements' nor 'standards' found",
        ));
    }

    // 3. Required sections
    for section in ["file_meta_data", "local_directories", "methods"] {
        if top.contains_key(section) {
            report.add_check(ValidationCheck::ok(format!("Section: {}", section)));
        } else {
            report.add_check(ValidationCheck::failed(
                format!("Section: {}", section),
                format!("missing required section '{}'", section),
            ));
        }
    }

    // 4. Full semantic validation through the lenient loader
    let config = match Loader::new().load_str(text) {
        Ok(config) => {
            report.add_check(ValidationCheck::ok("Document loads"));
            config
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed("Document loads", e.to_string()));
            return;
        }
    };

    for def in config.standards.iter() {
        report.add_check(ValidationCheck::ok(format!(
            "Standard: {} ({} alias{})",
            def.key,
            def.aliases.len(),
            if def.aliases.len() == 1 { "" } else { "es" }
        )));
    }
    if config.standards.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Standards registry",
            "registry contains no standards",
        ));
    }

    // 5. Soft findings
    for (field, link) in [
        ("procedure_link", config.procedure_url()),
        ("standards_link", config.standards_url()),
    ] {
        if let Some(link) = link {
            if link.is_valid() {
                report.add_check(ValidationCheck::ok(format!("Absolute URL: {}", field)));
            } else {
                report.add_check(ValidationCheck::warning(
                    format!("Absolute URL: {}", field),
                    format!("'{}' is not a well-formed absolute URL", link.as_str()),
                ));
            }
        }
    }

    if config.file_meta.change_log.is_empty() {
        report.add_check(ValidationCheck::warning(
            "Change log",
            "document carries no change history",
        ));
    } else {
        report.add_check(ValidationCheck::ok(format!(
            "Change log ({} entries)",
            config.file_meta.change_log.len()
        )));
    }

    for key in config.extra.keys() {
        report.add_check(ValidationCheck::warning(
            "Unknown top-level key",
            format!("'{}' is preserved but not interpreted", key),
        ));
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_display_renders_all_statuses() {
        let mut report = ValidationReport::new("test.json");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "this is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "this failed"));

        let output = format!("{}", report);
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
    }

    #[test]
    fn invalid_json_fails_early() {
        let report = validate_document("not json");
        assert!(report.has_failures());
        assert_eq!(report.checks.len(), 1);
    }

    #[test]
    fn non_object_document_fails() {
        let report = validate_document("[1, 2, 3]");
        assert!(report.has_failures());
    }
}
