//! Tokenizer configuration.

use serde::{Deserialize, Serialize};

/// Options controlling what the [`crate::Tokenizer`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Append a `"\n"` token after every scanned line.
    ///
    /// Off by default: callers assembling a master list append the line
    /// terminator themselves.
    pub emit_line_terminator: bool,
    /// Record a warning diagnostic when a string, character, or include
    /// literal is still open at the end of a line.
    pub report_unterminated: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            emit_line_terminator: false,
            report_unterminated: true,
        }
    }
}
