//! Comment removal over an assembled [`TokenList`].
//!
//! The tokenizer emits `"//"` followed by a single body token, and `"/*"`
//! followed by the comment's words and a closing `"*/"`. Removal works on
//! those marker tokens only.

use cxxlex_lexer::{TokenId, TokenList};
use serde::Serialize;
use tracing::debug;

use crate::pipeline::LINE_TERMINATOR;

pub const INLINE_MARKER: &str = "//";
pub const BLOCK_OPEN: &str = "/*";
pub const BLOCK_CLOSE: &str = "*/";

/// Number of comments removed by [`strip_comments`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommentCounts {
    pub inline: usize,
    pub block: usize,
}

impl CommentCounts {
    pub fn total(&self) -> usize {
        self.inline + self.block
    }
}

/// Delete every `"//"` marker and the tokens after it up to, but not
/// including, the next `"\n"`. Returns the number of comments removed.
///
/// Block comment markers are not recognised; use [`strip_comments`] when
/// both kinds may appear.
pub fn remove_inline_comments(tokens: &mut TokenList) -> usize {
    let removed = strip_where(tokens, |text| text == INLINE_MARKER).inline;
    debug!(removed, "inline comments removed");
    removed
}

/// Delete every `"/*"` through its matching `"*/"` inclusive. An unmatched
/// `"/*"` consumes the rest of the list. Returns the number removed.
///
/// Inline comment markers are not recognised; use [`strip_comments`] when
/// both kinds may appear.
pub fn remove_block_comments(tokens: &mut TokenList) -> usize {
    let removed = strip_where(tokens, |text| text == BLOCK_OPEN).block;
    debug!(removed, "block comments removed");
    removed
}

/// Remove inline and block comments in one left-to-right pass.
///
/// Whichever marker comes first opens a comment, and markers inside that
/// comment are ordinary text: `// /*` opens nothing on the following line,
/// and `/* a // b */` leaves the code after it alone. Running it twice
/// removes nothing the second time.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn strip_comments(tokens: &mut TokenList) -> CommentCounts {
    let counts = strip_where(tokens, |text| text == INLINE_MARKER || text == BLOCK_OPEN);
    debug!(inline = counts.inline, block = counts.block, "comments stripped");
    counts
}

/// Walk the list once, removing each comment whose opening marker satisfies
/// `opens`.
fn strip_where(tokens: &mut TokenList, opens: impl Fn(&str) -> bool) -> CommentCounts {
    let mut counts = CommentCounts::default();
    let mut cur = tokens.get_first();

    while let Some(id) = cur {
        let is_block = match tokens.text(id) {
            Some(text) if opens(text) => text == BLOCK_OPEN,
            _ => {
                cur = tokens.next(id);
                continue;
            }
        };

        if is_block {
            let body = tokens.next(id);
            unlink(tokens, id);
            let close = delete_while(tokens, body, |text| text != BLOCK_CLOSE);
            cur = close.and_then(|close| {
                let after = tokens.next(close);
                unlink(tokens, close);
                after
            });
            counts.block += 1;
        } else {
            cur = delete_while(tokens, Some(id), |text| text != LINE_TERMINATOR);
            counts.inline += 1;
        }
    }

    counts
}

/// Delete tokens from `start` while `keep_going` holds for their text.
/// Returns the first token that stopped the run.
fn delete_while(
    tokens: &mut TokenList,
    start: Option<TokenId>,
    keep_going: impl Fn(&str) -> bool,
) -> Option<TokenId> {
    let mut cur = start;
    while let Some(id) = cur {
        match tokens.text(id) {
            Some(text) if keep_going(text) => {}
            _ => return Some(id),
        }
        cur = tokens.next(id);
        unlink(tokens, id);
    }
    None
}

/// Remove a token reached by traversal, so it is always a live member.
fn unlink(tokens: &mut TokenList, id: TokenId) {
    let removed = tokens.delete_token(id);
    debug_assert!(removed.is_ok(), "token {id} vanished during traversal");
}
