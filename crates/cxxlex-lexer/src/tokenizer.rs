//! The line-at-a-time tokenizer engine.
//!
//! [`Tokenizer::set_string`] scans a whole line eagerly through the
//! [`crate::fsm`] table and stores the resulting tokens in an internal
//! [`TokenList`]; [`Tokenizer::get_next_token`] then drains them one by one.
//! The scanning mode survives between lines, so a block comment opened on
//! one line is still open on the next.

use cxxlex_types::{Construct, Diagnostic, ErrorCode, Result, Span, TokenizeError};
use tracing::{debug, trace, warn};

use crate::config::TokenizerConfig;
use crate::fsm::{self, Action, CharClass, Mode, State};
use crate::token::TokenList;

/// Splits lines of C++-like source into tokens.
#[derive(Debug, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
    /// Characters of the current token not yet flushed.
    buffer: String,
    /// Offset of the first buffered character.
    token_start: usize,
    state: State,
    mode: Mode,
    /// The current line.
    line: Vec<char>,
    /// Cursor into `line`.
    offset: usize,
    /// 1-based number of the current line.
    line_number: usize,
    /// Line on which the open block comment started.
    block_comment_line: usize,
    /// Tokens of the current line, drained by `get_next_token`.
    tokens: TokenList,
    diagnostics: Vec<Diagnostic>,
}

impl Tokenizer {
    /// Create a tokenizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TokenizerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// The current sticky mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current scanner state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of the line most recently passed to [`Tokenizer::set_string`].
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the recorded diagnostics, leaving none behind.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Tokenize the next line.
    ///
    /// The tokens of the previous line are released first, whether or not
    /// they were drained.
    pub fn set_string(&mut self, line: &str) {
        let number = self.line_number + 1;
        self.set_numbered_string(number, line);
    }

    /// Tokenize `line`, reporting positions as line `number`.
    pub fn set_numbered_string(&mut self, number: usize, line: &str) {
        self.tokens.delete_list();
        self.line = line.chars().collect();
        self.line_number = number;
        self.offset = 0;
        self.buffer.clear();
        self.state = self.mode.start_state();

        self.scan();

        self.mode = self.mode.at_line_end();
        self.state = self.mode.start_state();
        if self.config.emit_line_terminator {
            self.tokens.append("\n");
        }

        debug!(
            line = self.line_number,
            tokens = self.tokens.len(),
            mode = ?self.mode,
            "line scanned"
        );
    }

    /// Pull the next token of the current line.
    pub fn get_next_token(&mut self) -> Result<String> {
        let id = self
            .tokens
            .get_next_in_list()
            .ok_or(TokenizeError::ExhaustedCursor)?;
        self.tokens
            .text(id)
            .map(str::to_string)
            .ok_or(TokenizeError::ExhaustedCursor)
    }

    /// Returns `true` once the current line has been scanned and every
    /// token it produced has been pulled.
    ///
    /// Scanning happens inside [`Tokenizer::set_string`], so this only
    /// becomes `false` again when a line yields at least one token.
    pub fn is_complete(&self) -> bool {
        self.tokens.is_exhausted()
    }

    /// Tokenize `line` and drain every token it produced.
    pub fn tokenize_line(&mut self, line: &str) -> Vec<String> {
        self.set_string(line);
        let mut texts = Vec::with_capacity(self.tokens.len());
        while let Ok(text) = self.get_next_token() {
            texts.push(text);
        }
        texts
    }

    /// Signal the end of input.
    ///
    /// Fails if a block comment is still open; the mode is reset to
    /// [`Mode::Normal`] either way so the tokenizer can be reused.
    pub fn finish(&mut self) -> Result<()> {
        let mode = std::mem::take(&mut self.mode);
        self.state = State::Start;
        match mode {
            Mode::BlockComment => Err(TokenizeError::UnterminatedConstruct {
                construct: Construct::BlockComment,
                line: self.block_comment_line,
            }),
            _ => Ok(()),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn scan(&mut self) {
        while self.offset <= self.line.len() {
            let current = self.line.get(self.offset).copied();
            let class = match current {
                Some(c) => CharClass::classify(c, self.mode),
                None => CharClass::EndOfLine,
            };

            let state = self.state;
            let (next, action) = fsm::step(state, class, &self.buffer);
            if class == CharClass::EndOfLine && action == Action::AcceptBack1 {
                self.check_unterminated(state);
            }
            self.apply(action, current);

            let mode = fsm::next_mode(self.mode, state, action);
            if mode != self.mode {
                trace!(from = ?self.mode, to = ?mode, line = self.line_number, "mode change");
                if mode == Mode::BlockComment {
                    self.block_comment_line = self.line_number;
                }
                self.mode = mode;
                self.state = mode.start_state();
            } else {
                self.state = next;
            }
        }
    }

    fn apply(&mut self, action: Action, current: Option<char>) {
        if action.consumes_char() {
            if let Some(c) = current {
                if self.buffer.is_empty() {
                    self.token_start = self.offset;
                }
                self.buffer.push(c);
            }
        }

        match action {
            Action::Ignore | Action::Store => self.offset += 1,
            Action::Accept
            | Action::StartBlockComment
            | Action::StartInlineComment
            | Action::StopBlockComment => {
                self.flush();
                self.offset += 1;
            }
            Action::AcceptBack1 | Action::StartInclude => self.flush(),
            Action::AcceptBack2 => {
                if self.buffer.pop().is_some() {
                    self.offset -= 1;
                }
                self.flush();
            }
            Action::Error => {
                let message = format!(
                    "no transition from {:?} on {:?}",
                    self.state,
                    current.map_or(CharClass::EndOfLine, |c| CharClass::classify(c, self.mode))
                );
                self.record(ErrorCode::UNEXPECTED_TRANSITION, message, self.offset);
                self.flush();
                self.offset += 1;
            }
        }
    }

    /// Emit the buffer as a token.
    fn flush(&mut self) {
        if self.mode == Mode::InlineComment {
            // The body runs to end of line; trailing blanks are not part of it.
            let len = self.buffer.trim_end().len();
            self.buffer.truncate(len);
        }
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        trace!(text = %text, line = self.line_number, "token");
        self.tokens.append(text);
    }

    fn check_unterminated(&mut self, state: State) {
        if !self.config.report_unterminated {
            return;
        }
        let construct = match state {
            State::Str | State::StrEscape => Construct::StringLiteral,
            State::Char | State::CharEscape => Construct::CharLiteral,
            State::AngleLiteral => Construct::IncludeLiteral,
            _ => return,
        };
        let message = format!("unterminated {construct} at end of line");
        self.record(construct.error_code(), message, self.token_start);
    }

    fn record(&mut self, code: ErrorCode, message: String, offset: usize) {
        let span = Span::point(self.line_number, offset + 1);
        warn!(%code, %span, "{}", message);
        self.diagnostics.push(Diagnostic::warning(code, message, span));
    }
}
