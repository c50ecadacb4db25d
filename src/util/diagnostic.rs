//! User-friendly diagnostic messages.
//!
//! Fatal errors name the missing or malformed input and suggest a fix.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the descriptor directory cannot be located.
    pub const DESCRIPTORS_DIR: &str =
        "help: Point `--descriptors` at the directory holding the dependency descriptors";

    /// Suggestion when the versioned descriptor files are missing.
    pub const TOOLKIT_VERSION: &str =
        "help: Check that `--toolkit-version` matches an existing `dependencies-X.Y.yml`";

    /// Suggestion when the export listing is missing.
    pub const EXPORTS_MISSING: &str =
        "help: Run the toolkit install step first; it writes the export listing";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI bold color code of the label.
    fn color(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

fn paint(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Lines printed under the message, e.g. the libraries involved.
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
    /// Offending file.
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(message, Severity::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(message, Severity::Warning)
    }

    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let mut lines = vec![format!(
            "{}: {}",
            paint(self.severity.label(), self.severity.color(), color),
            self.message
        )];

        lines.extend(self.location.iter().map(|path| format!("  --> {}", path.display())));
        lines.extend(self.context.iter().map(|ctx| format!("  = {}", ctx)));

        if !self.suggestions.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}: consider:", paint("help", "1;32", color)));
            lines.extend(
                self.suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, suggestion)| format!("  {}. {}", i + 1, suggestion)),
            );
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("descriptor is missing required key `components`")
            .with_location("dependencies/dependencies-27.0.yml")
            .with_context("found keys: libraries, dependencies")
            .with_suggestion("Add a top-level `components:` entry");

        let output = diag.format(false);
        assert!(output.contains("error: descriptor is missing"));
        assert!(output.contains("--> dependencies/dependencies-27.0.yml"));
        assert!(output.contains("= found keys"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Add a top-level"));
    }

    #[test]
    fn test_warning_without_suggestions() {
        let output = Diagnostic::warning("component `web` is absent").format(false);
        assert_eq!(output, "warning: component `web` is absent\n");
    }

    #[test]
    fn test_colored_label() {
        let output = Diagnostic::warning("component `web` is absent").format(true);
        assert!(output.starts_with("\x1b[1;33mwarning\x1b[0m: component"));
    }
}
