//! Validation system for paint scripts.
//!
//! Runs a suite of checks against a parsed script and reports errors and
//! warnings. Used by `palettea validate` and before playback in
//! `palettea paint`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::canvas::DEFAULT_HISTORY_LIMIT;
use crate::output::Printer;
use crate::types::PaintScript;

/// Run all validation checks against a script, assuming the default undo
/// history depth.
pub fn validate_script(script: &PaintScript) -> ValidationResult {
    validate_script_with_history(script, DEFAULT_HISTORY_LIMIT)
}

/// Run all validation checks, judging undo against `history_limit` steps.
pub fn validate_script_with_history(
    script: &PaintScript,
    history_limit: usize,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_canvas(script));
    result.merge(checks::check_brushes(script));
    result.merge(checks::check_unused_brushes(script));
    result.merge(checks::check_samples(script));
    result.merge(checks::check_actions(script, history_limit));

    result
}

/// Format diagnostics one per line, with help on an indented line below.
pub fn render_diagnostics(result: &ValidationResult, printer: &Printer) -> String {
    let mut out = String::new();
    for d in result.iter() {
        let label = printer.severity(d.severity);
        let location = match d.action {
            Some(n) => format!("action #{}: ", n),
            None => String::new(),
        };
        out.push_str(&format!("  {}[{}]: {}{}\n", label, d.code, location, d.message));
        if let Some(help) = &d.help {
            out.push_str(&format!("    {} {}\n", printer.dim("help:"), help));
        }
    }
    out
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(name: &str, result: &ValidationResult, printer: &Printer) {
    eprint!("{}", render_diagnostics(result, printer));

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{} ({}, {})",
                name,
                crate::output::plural(errors, "error", "errors"),
                crate::output::plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning(
            "Checked",
            &format!("{} ({})", name, crate::output::plural(warnings, "warning", "warnings")),
        );
    } else {
        printer.success("Checked", name);
    }
}
