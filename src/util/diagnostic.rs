//! User-friendly diagnostic messages.
//!
//! Every error printed by the CLI carries its root cause chain and, where
//! one exists, a suggested next command.

use std::fmt;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str = "Run `modulo init <name>` to create cpkg.json";

    /// Suggestion when a manifest cannot be parsed.
    pub const CORRUPT_MANIFEST: &str =
        "Fix cpkg.json by hand or recreate it with `modulo init <name>`";

    /// Suggestion when a package is not in the registry.
    pub const PACKAGE_NOT_FOUND: &str = "Run `modulo search` to see available packages";

    /// Suggestion when the registry cannot be read.
    pub const NO_REGISTRY: &str =
        "Place registry.json in the current directory or pass `--registry <file>`";

    /// Suggestion for fetch failures.
    pub const FETCH_FAILED: &str = "Check your network connection and the registry URL";

    /// Suggestion when the compiler is not supported.
    pub const UNSUPPORTED_COMPILER: &str = "Use one of: msvc, g++, clang++";

    /// Suggestion when the home directory cannot be found.
    pub const NO_HOME: &str = "Set MODULO_HOME or pass `--home <dir>`";
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Build an error diagnostic from an error chain.
    ///
    /// The outermost error becomes the message; every cause becomes a
    /// context line.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let mut diag = Diagnostic::error(err.to_string());
        for cause in err.chain().skip(1) {
            diag = diag.with_context(cause.to_string());
        }
        diag
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };
        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  caused by: {}\n", ctx));
        }

        let help_prefix = if color {
            "\x1b[1;32mhelp\x1b[0m"
        } else {
            "help"
        };
        for suggestion in &self.suggestions {
            output.push_str(&format!("{}: {}\n", help_prefix, suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
