//! Tokens and the arena-backed [`TokenList`].
//!
//! The list is doubly linked, but links are [`TokenId`] handles into a slot
//! arena rather than references. A node never owns its neighbours; the list
//! owns every node. Deleted slots are recycled with a bumped generation so a
//! stale handle can be told apart from the token that reused its slot.

use cxxlex_types::{Result, TokenizeError};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_LIST_TAG: AtomicU32 = AtomicU32::new(0);

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single lexical unit: the characters that form it.
///
/// Any text is accepted, including the empty string. Two tokens with equal
/// text are still distinct entries of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
}

impl Token {
    /// Create a token with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The characters that form the token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the token's text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Consume the token and return its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenId
// ─────────────────────────────────────────────────────────────────────

/// Stable handle to a token inside one [`TokenList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId {
    /// Tag of the list that issued the handle.
    list: u32,
    index: u32,
    generation: u32,
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}v{}", self.list, self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Node {
    token: Token,
    next: Option<TokenId>,
    prev: Option<TokenId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

// ─────────────────────────────────────────────────────────────────────
// TokenList
// ─────────────────────────────────────────────────────────────────────

/// An ordered, mutable collection of tokens.
///
/// Supports append, O(1) removal of any element, forward traversal, and a
/// pull cursor pointing at the next unread token.
#[derive(Debug, Clone)]
pub struct TokenList {
    tag: u32,
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
    /// Next token to be read by [`TokenList::get_next_in_list`].
    cursor: Option<TokenId>,
    len: usize,
}

impl Default for TokenList {
    fn default() -> Self {
        Self {
            tag: NEXT_LIST_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            cursor: None,
            len: 0,
        }
    }
}

impl TokenList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first token, or `None` for an empty list.
    pub fn get_first(&self) -> Option<TokenId> {
        self.head
    }

    /// The last token, or `None` for an empty list.
    pub fn get_last(&self) -> Option<TokenId> {
        self.tail
    }

    /// Returns `true` if `id` refers to a live token of this list.
    pub fn contains(&self, id: TokenId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.node(id).map(|n| &n.token)
    }

    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.node_mut(id).map(|n| &mut n.token)
    }

    /// Text of the token at `id`.
    pub fn text(&self, id: TokenId) -> Option<&str> {
        self.get(id).map(Token::text)
    }

    /// The token after `id`. `None` marks the end of the list.
    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.node(id).and_then(|n| n.next)
    }

    /// The token before `id`. `None` marks the beginning of the list.
    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        self.node(id).and_then(|n| n.prev)
    }

    /// Create a token from `text` and append it to the end of the list.
    pub fn append(&mut self, text: impl Into<String>) -> TokenId {
        self.append_token(Token::new(text))
    }

    /// Append an already built token to the end of the list.
    pub fn append_token(&mut self, token: Token) -> TokenId {
        let node = Node {
            token,
            next: None,
            prev: self.tail,
        };
        let id = self.alloc(node);

        match self.tail {
            Some(tail) => {
                if let Some(t) = self.node_mut(tail) {
                    t.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);

        if self.cursor.is_none() {
            self.cursor = Some(id);
        }
        self.len += 1;
        id
    }

    /// Unlink `id` from the list in O(1) and return its token.
    ///
    /// Fails with [`TokenizeError::InvalidArgument`] when `id` is stale or
    /// was never part of this list.
    pub fn delete_token(&mut self, id: TokenId) -> Result<Token> {
        let node = self.free_slot(id).ok_or_else(|| {
            TokenizeError::InvalidArgument(format!("token {id} is not a member of this list"))
        })?;

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.node_mut(prev) {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.node_mut(next) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        if self.cursor == Some(id) {
            self.cursor = node.next;
        }

        self.len -= 1;
        Ok(node.token)
    }

    /// Remove and release every token. Slots are kept for reuse.
    pub fn delete_list(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.head = None;
        self.tail = None;
        self.cursor = None;
        self.len = 0;
    }

    /// Return the token at the cursor and advance the cursor.
    ///
    /// Returns `None` once every token has been read.
    pub fn get_next_in_list(&mut self) -> Option<TokenId> {
        let current = self.cursor?;
        self.cursor = self.next(current);
        Some(current)
    }

    /// Returns `true` if [`TokenList::get_next_in_list`] would return `None`.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Rewind the cursor to the first token.
    pub fn reset_cursor(&mut self) {
        self.cursor = self.head;
    }

    /// Forward traversal from the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
        }
    }

    /// Forward traversal over token texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(_, token)| token.text())
    }

    // ─────────────────────────────────────────────────────────────
    // Arena helpers
    // ─────────────────────────────────────────────────────────────

    fn node(&self, id: TokenId) -> Option<&Node> {
        let slot = self.slot(id)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: TokenId) -> Option<&mut Node> {
        let slot = self.slot_mut(id)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn slot(&self, id: TokenId) -> Option<&Slot> {
        if id.list != self.tag {
            return None;
        }
        self.slots.get(id.index as usize)
    }

    fn slot_mut(&mut self, id: TokenId) -> Option<&mut Slot> {
        if id.list != self.tag {
            return None;
        }
        self.slots.get_mut(id.index as usize)
    }

    fn alloc(&mut self, node: Node) -> TokenId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return TokenId {
                list: self.tag,
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        TokenId {
            list: self.tag,
            index,
            generation: 0,
        }
    }

    fn free_slot(&mut self, id: TokenId) -> Option<Node> {
        let slot = self.slot_mut(id)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }
}

/// Iterator returned by [`TokenList::iter`].
pub struct Iter<'a> {
    list: &'a TokenList,
    next: Option<TokenId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (TokenId, &'a Token);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.list.node(id)?;
        self.next = node.next;
        Some((id, &node.token))
    }
}

impl<S: Into<String>> FromIterator<S> for TokenList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = TokenList::new();
        list.extend(iter);
        list
    }
}

impl<S: Into<String>> Extend<S> for TokenList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for text in iter {
            self.append(text);
        }
    }
}

/// Serialized as the ordered array of token texts.
impl Serialize for TokenList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for text in self.texts() {
            seq.serialize_element(text)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_symmetric() {
        let list: TokenList = ["a", "b", "c", "d"].into_iter().collect();
        let ids: Vec<TokenId> = list.iter().map(|(id, _)| id).collect();

        assert_eq!(list.prev(ids[0]), None);
        assert_eq!(list.next(ids[3]), None);
        for pair in ids.windows(2) {
            assert_eq!(list.next(pair[0]), Some(pair[1]));
            assert_eq!(list.prev(pair[1]), Some(pair[0]));
        }
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut list = TokenList::new();
        let a = list.append("a");
        list.delete_token(a).unwrap();
        let b = list.append("b");

        assert_eq!(a.index, b.index);
        assert_ne!(a.generation, b.generation);
        assert!(!list.contains(a));
        assert_eq!(list.text(b), Some("b"));
    }
}
