use serde::{Deserialize, Serialize};
use std::fmt;

/// Source position.
///
/// Line and column values are 1-based. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    /// Create a position at a single point.
    pub fn point(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One line as the tokenizer sees it: physical lines ending in `\` are
/// joined with their successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line that contributed.
    pub number: usize,
    /// The joined text, without line breaks or continuation backslashes.
    pub text: String,
}

/// Holds the source text handed over by the caller.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
}

impl SourceFile {
    /// Create a new source file.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Extract a physical line by 1-based line number.
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line(&self, line_number: usize) -> Option<&str> {
        self.source.lines().nth(line_number.checked_sub(1)?)
    }

    /// Get the number of physical lines.
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }

    /// Split the source into logical lines, joining line continuations.
    ///
    /// A trailing `\` is removed and the next physical line is appended
    /// directly. A continuation on the final line simply drops the `\`.
    pub fn logical_lines(&self) -> Vec<LogicalLine> {
        let mut lines = Vec::new();
        let mut physical = self.source.lines().enumerate();

        while let Some((idx, first)) = physical.next() {
            let mut text = first.to_string();
            while text.ends_with('\\') {
                text.pop();
                match physical.next() {
                    Some((_, next)) => text.push_str(next),
                    None => break,
                }
            }
            lines.push(LogicalLine {
                number: idx + 1,
                text,
            });
        }

        lines
    }
}
