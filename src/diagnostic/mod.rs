//! Diagnostic model and formatting.
//!
//! A located diagnostic renders as
//!
//! ```text
//! src/a.ts(3,7): error TS2304: Cannot find name 'foo'.
//! ```
//!
//! and an unlocated one as `error CFG5001: Cannot read file 'batchc.toml'.`
//! Lines and columns are stored zero-based and printed one-based.

mod report;


pub use report::{DiagnosticReporter, ExitStatus, ProcessExit, Terminator};

use std::fmt;
use std::path::{Path, PathBuf};

/// Diagnostic category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Lower-case name used in formatted output.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Suggestion => "suggestion",
            Severity::Message => "message",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based position inside a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// A single message from the project provider or the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Option<Location>,
    pub severity: Severity,
    /// Code including its prefix, e.g. `TS2304`.
    pub code: String,
    pub message: String,
    /// Follow-up messages, each one level deeper than the previous.
    pub chain: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: None,
            severity,
            code: code.into(),
            message: message.into(),
            chain: Vec::new(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Attach a source location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Append a follow-up message to the chain.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.chain.push(note.into());
        self
    }

    /// Message text with its chain flattened onto indented lines.
    pub fn flattened_message(&self) -> String {
        let mut text = self.message.clone();
        for (depth, note) in self.chain.iter().enumerate() {
            text.push('\n');
            text.push_str(&"  ".repeat(depth + 1));
            text.push_str(note);
        }
        text
    }

    /// Render for the error log, with the file shown relative to `root`.
    pub fn format(&self, root: &Path) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        if let Some(location) = &self.location {
            let file = location.file.strip_prefix(root).unwrap_or(&location.file);
            write!(
                output,
                "{}({},{}): ",
                file.display(),
                location.line + 1,
                location.column + 1
            )
            .ok();
        }
        write!(
            output,
            "{} {}: {}",
            self.severity,
            self.code,
            self.flattened_message()
        )
        .ok();
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Path::new("")))
    }
}

/// Zero-based line and column of a byte offset in `text`.
///
/// Offsets past the end clamp to the end of the text.
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for (index, ch) in text.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}
