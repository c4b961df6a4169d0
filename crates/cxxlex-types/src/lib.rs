//! Shared types for the cxxlex tokenizer.
//!
//! This crate defines the error taxonomy, diagnostics, source positions and
//! the logical-line view of a source file used by every other crate.

mod error;
mod span;

pub use error::{Construct, Diagnostic, ErrorCode, Severity, TokenizeError};
pub use span::{LogicalLine, SourceFile, Span};

/// Result type used throughout cxxlex.
pub type Result<T> = std::result::Result<T, TokenizeError>;
