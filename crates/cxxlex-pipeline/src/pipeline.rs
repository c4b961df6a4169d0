//! Whole-file tokenization into one master [`TokenList`].

use cxxlex_lexer::{TokenList, Tokenizer};
use cxxlex_types::{Diagnostic, SourceFile, Span, TokenizeError};
use serde::Serialize;
use tracing::debug;

use crate::comments::{strip_comments, CommentCounts};
use crate::options::PipelineOptions;

/// Line terminator token re-inserted after every logical line.
pub const LINE_TERMINATOR: &str = "\n";

/// Result of tokenizing one source file.
#[derive(Debug, Clone, Serialize)]
pub struct TokenizeOutput {
    /// Every token of the file, with `"\n"` after each logical line.
    pub tokens: TokenList,
    pub diagnostics: Vec<Diagnostic>,
    /// Comments removed, all zero unless stripping was requested.
    pub comments: CommentCounts,
}

impl TokenizeOutput {
    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Render the output as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Tokenize a whole source file.
///
/// Each logical line is scanned, drained into the master list and followed
/// by a `"\n"` token. An unterminated block comment at end of input becomes
/// an error diagnostic.
#[tracing::instrument(level = "debug", skip_all, fields(file = %source.name))]
pub fn tokenize_source(source: &SourceFile, options: &PipelineOptions) -> TokenizeOutput {
    let mut tokenizer = Tokenizer::with_config(options.tokenizer);
    let mut tokens = TokenList::new();
    let mut last_line = 0;

    for line in source.logical_lines() {
        tokenizer.set_numbered_string(line.number, &line.text);
        while !tokenizer.is_complete() {
            match tokenizer.get_next_token() {
                Ok(text) => {
                    tokens.append(text);
                }
                Err(_) => break,
            }
        }
        if !options.tokenizer.emit_line_terminator {
            tokens.append(LINE_TERMINATOR);
        }
        last_line = line.number;
    }

    let mut diagnostics = tokenizer.take_diagnostics();
    if let Err(err) = tokenizer.finish() {
        let line = match &err {
            TokenizeError::UnterminatedConstruct { line, .. } => *line,
            _ => last_line,
        };
        diagnostics.push(Diagnostic::from_error(&err, Span::point(line, 1)));
    }

    let comments = if options.strip_comments {
        strip_comments(&mut tokens)
    } else {
        CommentCounts::default()
    };

    debug!(
        tokens = tokens.len(),
        diagnostics = diagnostics.len(),
        inline = comments.inline,
        block = comments.block,
        "source tokenized"
    );

    TokenizeOutput {
        tokens,
        diagnostics,
        comments,
    }
}

/// Tokenize source text held in memory.
pub fn tokenize_str(source: &str, options: &PipelineOptions) -> TokenizeOutput {
    tokenize_source(&SourceFile::new("<input>", source), options)
}
