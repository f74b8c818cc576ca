//! Diagnostic types for validation results.

use std::fmt;

use serde::Serialize;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code, e.g. `palettea::validate::missing-brush`.
    pub code: String,
    pub message: String,
    /// 1-based index of the action the diagnostic refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            action: None,
            help: None,
        }
    }

    /// Attach the action position.
    pub fn at(mut self, action: usize) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Collects diagnostics from validation checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(code, message));
    }

    pub fn warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| !d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_error()).count()
    }

    /// True when there are no diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Codes in order, for compact assertions.
    pub fn codes(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.code.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ValidationResult::new();
        assert!(result.is_ok());
        assert!(!result.has_errors());
        assert!(!result.has_warnings());
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_counts() {
        let mut result = ValidationResult::new();
        result.error("palettea::test", "broken");
        result.warning("palettea::test", "odd");
        result.warning("palettea::test", "odder");

        assert!(result.has_errors());
        assert!(result.has_warnings());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 2);
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationResult::new();
        a.error("palettea::a", "error a");

        let mut b = ValidationResult::new();
        b.warning("palettea::b", "warning b");

        a.merge(b);
        assert_eq!(a.codes(), vec!["palettea::a", "palettea::b"]);
    }

    #[test]
    fn test_json_shape() {
        let d = Diagnostic::warning("palettea::validate::empty-stroke", "no points")
            .at(3)
            .with_help("add points");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "severity": "warning",
                "code": "palettea::validate::empty-stroke",
                "message": "no points",
                "action": 3,
                "help": "add points",
            })
        );

        let bare = serde_json::to_value(Diagnostic::error("c", "m")).unwrap();
        assert_eq!(bare, serde_json::json!({"severity": "error", "code": "c", "message": "m"}));
    }
}
