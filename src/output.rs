//! Status lines for the palettea CLI.
//!
//! Each line is a right-aligned verb followed by a message, written to
//! stderr:
//!
//! ```text
//!     Painting sunset (640x480, 12 strokes)
//!        Wrote dist/sunset.png
//!     Finished 1 image to dist
//! ```
//!
//! stdout is left to `validate --json`.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::Severity;

/// Verbs are padded to this width so messages line up.
const VERB_WIDTH: usize = 12;

const RESET: &str = "\x1b[0m";

/// ANSI styles used by the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Bold,
    Dim,
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Bold => "\x1b[1m",
            Tone::Dim => "\x1b[2m",
            Tone::Red => "\x1b[31m",
            Tone::Green => "\x1b[32m",
            Tone::Yellow => "\x1b[33m",
            Tone::Cyan => "\x1b[36m",
        }
    }
}

/// Writes status lines, colouring them when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    /// Printer with colour forced on or off.
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Work in progress, e.g. `Painting`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Green, verb, message);
    }

    /// A finished step, e.g. `Wrote` or `Finished`.
    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Green, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Cyan, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Yellow, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Red, verb, message);
    }

    /// Secondary detail such as canvas sizes and counts.
    pub fn dim(&self, text: &str) -> String {
        self.paint(&[Tone::Dim], text)
    }

    /// Script and brush names.
    pub fn bold(&self, text: &str) -> String {
        self.paint(&[Tone::Bold], text)
    }

    /// Output paths.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(&[Tone::Cyan], text)
    }

    /// `error` or `warning`, in bold red or yellow.
    pub fn severity(&self, severity: Severity) -> String {
        let tone = match severity {
            Severity::Error => Tone::Red,
            Severity::Warning => Tone::Yellow,
        };
        self.paint(&[Tone::Bold, tone], &severity.to_string())
    }

    fn paint(&self, tones: &[Tone], text: &str) -> String {
        if !self.color || tones.is_empty() {
            return text.to_string();
        }
        let codes: String = tones.iter().map(|t| t.code()).collect();
        format!("{codes}{text}{RESET}")
    }

    fn format_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_WIDTH$}");
        format!("{} {}", self.paint(&[Tone::Bold, tone], &verb), message)
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.format_line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Count with the matching noun: `plural(1, "stroke", "strokes")` is
/// `1 stroke`.
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, noun)
}

/// Path relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "stroke", "strokes"), "1 stroke");
        assert_eq!(plural(0, "layer", "layers"), "0 layers");
        assert_eq!(plural(5, "dab", "dabs"), "5 dabs");
    }

    #[test]
    fn test_plain_printer_formats_without_escapes() {
        let printer = Printer::with_color(false);
        assert_eq!(printer.bold("x"), "x");
        assert_eq!(printer.severity(Severity::Error), "error");
        assert_eq!(
            printer.format_line(Tone::Green, "Painting", "sunset"),
            "    Painting sunset"
        );
    }

    #[test]
    fn test_colour_printer_wraps_text() {
        let printer = Printer::with_color(true);
        assert_eq!(printer.cyan("a"), "\x1b[36ma\x1b[0m");
        assert_eq!(printer.severity(Severity::Warning), "\x1b[1m\x1b[33mwarning\x1b[0m");
        assert_eq!(
            printer.format_line(Tone::Red, "Failed", "x"),
            "\x1b[1m\x1b[31m      Failed\x1b[0m x"
        );
    }

    #[test]
    fn test_display_path() {
        let outside = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(outside), "/nonexistent/path/to/file");

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(display_path(&cwd), ".");
        let inside = cwd.join("dist").join("a.png");
        assert_eq!(display_path(&inside), Path::new("dist").join("a.png").display().to_string());
    }
}
