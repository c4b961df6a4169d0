//! Numbered token listing.

use cxxlex_lexer::TokenList;
use std::fmt::Write;

use crate::pipeline::LINE_TERMINATOR;

/// Render `tokens` as one `Token N: text` line per token, followed by the
/// total. Line terminator tokens print as `\n`.
pub fn format_listing(tokens: &TokenList) -> String {
    let mut out = String::new();
    let mut count = 0;
    for text in tokens.texts() {
        count += 1;
        let shown = if text == LINE_TERMINATOR { "\\n" } else { text };
        let _ = writeln!(out, "Token {count}: {shown}");
    }
    let _ = writeln!(out, "Number of tokens processed: {count}");
    out
}
