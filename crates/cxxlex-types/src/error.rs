use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity.
///
/// Unterminated constructs at end of line are warnings: the partial token is
/// still emitted and tokenizing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Caller contract violations (E100–E199) ──
    pub const INVALID_ARGUMENT: Self = Self(100);
    pub const EXHAUSTED_CURSOR: Self = Self(101);

    // ── Unterminated constructs (E200–E299) ──
    pub const UNTERMINATED_STRING: Self = Self(200);
    pub const UNTERMINATED_CHAR: Self = Self(201);
    pub const UNTERMINATED_INCLUDE: Self = Self(202);
    pub const UNTERMINATED_BLOCK_COMMENT: Self = Self(203);

    // ── State machine (E300–E399) ──
    pub const UNEXPECTED_TRANSITION: Self = Self(300);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A lexical construct that can be left open at the end of a line or input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Construct {
    StringLiteral,
    CharLiteral,
    IncludeLiteral,
    BlockComment,
}

impl Construct {
    /// The error code reported when this construct is left unterminated.
    pub fn error_code(self) -> ErrorCode {
        match self {
            Self::StringLiteral => ErrorCode::UNTERMINATED_STRING,
            Self::CharLiteral => ErrorCode::UNTERMINATED_CHAR,
            Self::IncludeLiteral => ErrorCode::UNTERMINATED_INCLUDE,
            Self::BlockComment => ErrorCode::UNTERMINATED_BLOCK_COMMENT,
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringLiteral => write!(f, "string literal"),
            Self::CharLiteral => write!(f, "character literal"),
            Self::IncludeLiteral => write!(f, "include literal"),
            Self::BlockComment => write!(f, "block comment"),
        }
    }
}

/// Errors surfaced by the token list and the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A handle that is stale or belongs to another list was passed in.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pull was made after every token had been read.
    #[error("cursor exhausted: no more tokens to read")]
    ExhaustedCursor,

    /// End of input was reached inside a sticky construct.
    #[error("unterminated {construct} opened on line {line}")]
    UnterminatedConstruct { construct: Construct, line: usize },
}

impl TokenizeError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::INVALID_ARGUMENT,
            Self::ExhaustedCursor => ErrorCode::EXHAUSTED_CURSOR,
            Self::UnterminatedConstruct { construct, .. } => construct.error_code(),
        }
    }
}

/// A structured, serializable report about the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code (e.g., E200).
    pub code: ErrorCode,
    /// Diagnostic severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Source location.
    #[serde(flatten)]
    pub span: Span,
}

impl Diagnostic {
    /// Create a warning.
    pub fn warning(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    /// Create an error-severity diagnostic from a [`TokenizeError`].
    pub fn from_error(error: &TokenizeError, span: Span) -> Self {
        Self {
            code: error.code(),
            severity: Severity::Error,
            message: error.to_string(),
            span,
        }
    }

    /// Returns `true` if this diagnostic has error severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.span, self.code, self.message)
    }
}
