//! Diagnostic types and source-location utilities

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Represents a diagnostic message from linting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique identifier for the rule that generated this diagnostic
    pub rule_id: String,
    /// Severity level of the diagnostic
    pub severity: Severity,
    /// Human-readable message with parameters substituted
    pub message: String,
    /// Location of the offending construct
    pub location: Location,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Hints for improvements
    Hint,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

/// Location information for diagnostics
///
/// The span (offset + length) points at the exact tokens an editor would
/// need to touch, never at an enclosing construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path (annotation only; the engine never reads it)
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in characters)
    pub column: usize,
    /// Optional end position for ranges
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    /// Byte offset in the source
    pub offset: usize,
    /// Length of the span in bytes
    pub length: usize,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            location,
        }
    }

    /// Short identity used when naming diagnostics in errors
    pub fn describe(&self) -> String {
        format!("{} at {}", self.rule_id, self.location)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            line: 0,
            column: 0,
            end_line: None,
            end_column: None,
            offset: 0,
            length: 0,
        }
    }
}

impl Location {
    /// Create a new location
    pub fn new(file: PathBuf, line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            file,
            line,
            column,
            end_line: None,
            end_column: None,
            offset,
            length,
        }
    }

    /// The byte span as (start, end)
    pub fn span(&self) -> (usize, usize) {
        (self.offset, self.offset + self.length)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Source map for efficient byte offset to line/column conversion
///
/// Precomputes a table of line start offsets for O(log n) lookup. Line
/// breaks are recognized for both `\n` and `\r\n` sources: the table is
/// keyed on `\n`, and a `\r` immediately before it never contributes to any
/// column count because it terminates its line.
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Byte offset of each line start (line 1 starts at offset 0)
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a source map from source text
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (idx, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(idx + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert byte offset to 1-based (line, column)
    ///
    /// Columns count characters, not bytes, so multi-byte code points and a
    /// CRLF terminator on the previous line do not skew positions.
    pub fn offset_to_position(&self, offset: usize, source: &str) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        let line = line_idx + 1;

        let line_start = self.line_starts[line_idx];
        let line_text = &source[line_start..offset.min(source.len())];
        let column = line_text.chars().count() + 1;

        (line, column)
    }

    /// Convert a byte span into full location information
    pub fn span_to_location(
        &self,
        start: usize,
        end: usize,
        source: &str,
        file: &std::path::Path,
    ) -> Location {
        let (line, column) = self.offset_to_position(start, source);
        let (end_line, end_column) = self.offset_to_position(end, source);

        Location {
            file: file.to_path_buf(),
            line,
            column,
            end_line: Some(end_line),
            end_column: Some(end_column),
            offset: start,
            length: end - start,
        }
    }
}
