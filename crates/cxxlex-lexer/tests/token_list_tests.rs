//! TokenList tests: linkage, O(1) removal, cursor reads, stale handles.

use cxxlex_lexer::{Token, TokenId, TokenList};
use cxxlex_types::TokenizeError;
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn list_of(texts: &[&str]) -> TokenList {
    texts.iter().copied().collect()
}

fn texts(list: &TokenList) -> Vec<String> {
    list.texts().map(str::to_string).collect()
}

fn ids(list: &TokenList) -> Vec<TokenId> {
    list.iter().map(|(id, _)| id).collect()
}

/// Walk the list backwards from the tail.
fn texts_reversed(list: &TokenList) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = list.get_last();
    while let Some(id) = cur {
        out.push(list.text(id).unwrap().to_string());
        cur = list.prev(id);
    }
    out
}

// ─────────────────────────────────────────────────────────────────────
// Tokens
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_token_default_is_empty() {
    let token = Token::default();
    assert_eq!(token.text(), "");
}

#[test]
fn test_token_set_text() {
    let mut token = Token::new("int");
    token.set_text("long");
    assert_eq!(token.text(), "long");
    assert_eq!(token.to_string(), "long");
    assert_eq!(token.into_text(), "long");
}

// ─────────────────────────────────────────────────────────────────────
// Append & traversal
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_list() {
    let mut list = TokenList::new();
    assert!(list.is_empty());
    assert_eq!(list.get_first(), None);
    assert_eq!(list.get_last(), None);
    assert_eq!(list.get_next_in_list(), None);
}

#[test]
fn test_append_links_in_order() {
    let mut list = TokenList::new();
    let a = list.append("a");
    let b = list.append("b");
    let c = list.append_token(Token::new("c"));

    assert_eq!(list.len(), 3);
    assert_eq!(list.get_first(), Some(a));
    assert_eq!(list.get_last(), Some(c));
    assert_eq!(list.next(a), Some(b));
    assert_eq!(list.next(c), None);
    assert_eq!(list.prev(a), None);
    assert_eq!(list.prev(c), Some(b));
    assert_eq!(texts_reversed(&list), vec!["c", "b", "a"]);
}

#[test]
fn test_append_empty_text() {
    let mut list = TokenList::new();
    let id = list.append("");
    assert_eq!(list.text(id), Some(""));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_equal_texts_are_distinct_tokens() {
    let list = list_of(&["x", "x"]);
    let ids = ids(&list);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_get_mut_changes_text_in_place() {
    let mut list = list_of(&["a", "b"]);
    let first = list.get_first().unwrap();
    list.get_mut(first).unwrap().set_text("z");
    assert_eq!(texts(&list), vec!["z", "b"]);
}

// ─────────────────────────────────────────────────────────────────────
// Deletion
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_delete_interior_keeps_connectivity() {
    let mut list = list_of(&["a", "b", "c", "d"]);
    let before = ids(&list);
    let head = list.get_first();
    let tail = list.get_last();

    let removed = list.delete_token(before[2]).unwrap();

    assert_eq!(removed.text(), "c");
    assert_eq!(list.get_first(), head);
    assert_eq!(list.get_last(), tail);
    assert_eq!(list.iter().count(), 3);
    assert_eq!(list.len(), 3);
    assert_eq!(texts(&list), vec!["a", "b", "d"]);
    assert_eq!(texts_reversed(&list), vec!["d", "b", "a"]);
    assert_eq!(list.next(before[1]), Some(before[3]));
    assert_eq!(list.prev(before[3]), Some(before[1]));
}

#[test]
fn test_delete_head_and_tail() {
    let mut list = list_of(&["a", "b", "c"]);
    let before = ids(&list);

    list.delete_token(before[0]).unwrap();
    assert_eq!(list.get_first(), Some(before[1]));
    assert_eq!(list.prev(before[1]), None);

    list.delete_token(before[2]).unwrap();
    assert_eq!(list.get_last(), Some(before[1]));
    assert_eq!(list.next(before[1]), None);
    assert_eq!(texts(&list), vec!["b"]);
}

#[test]
fn test_delete_only_element() {
    let mut list = TokenList::new();
    let id = list.append("only");
    list.delete_token(id).unwrap();
    assert!(list.is_empty());
    assert_eq!(list.get_first(), None);
    assert_eq!(list.get_last(), None);
}

#[test]
fn test_delete_twice_is_rejected() {
    let mut list = list_of(&["a", "b"]);
    let first = list.get_first().unwrap();
    list.delete_token(first).unwrap();

    let err = list.delete_token(first).unwrap_err();
    assert!(matches!(err, TokenizeError::InvalidArgument(_)));
    assert_eq!(texts(&list), vec!["b"]);
}

#[test]
fn test_stale_id_does_not_alias_reused_slot() {
    let mut list = TokenList::new();
    let old = list.append("old");
    list.delete_token(old).unwrap();
    let new = list.append("new");

    assert!(!list.contains(old));
    assert_eq!(list.text(old), None);
    assert!(list.delete_token(old).is_err());
    assert_eq!(list.text(new), Some("new"));
}

#[test]
fn test_foreign_id_is_rejected() {
    let mut a = list_of(&["a"]);
    let b = list_of(&["b"]);
    let foreign = b.get_first().unwrap();

    assert!(!a.contains(foreign));
    let err = a.delete_token(foreign).unwrap_err();
    assert!(matches!(err, TokenizeError::InvalidArgument(_)));
    assert_eq!(a.len(), 1);
}

#[test]
fn test_delete_list() {
    let mut list = list_of(&["a", "b", "c"]);
    let old = ids(&list);
    list.delete_list();

    assert!(list.is_empty());
    assert_eq!(list.get_first(), None);
    assert_eq!(list.get_last(), None);
    assert_eq!(list.get_next_in_list(), None);
    assert!(old.iter().all(|&id| !list.contains(id)));

    list.append("again");
    assert_eq!(texts(&list), vec!["again"]);
}

// ─────────────────────────────────────────────────────────────────────
// Cursor
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_cursor_reads_in_order_then_exhausts() {
    let mut list = list_of(&["a", "b"]);
    let first = list.get_next_in_list().unwrap();
    let second = list.get_next_in_list().unwrap();

    assert_eq!(list.text(first), Some("a"));
    assert_eq!(list.text(second), Some("b"));
    assert!(list.is_exhausted());
    assert_eq!(list.get_next_in_list(), None);
    assert_eq!(list.get_next_in_list(), None);
}

#[test]
fn test_append_after_exhaustion_is_readable() {
    let mut list = list_of(&["a"]);
    list.get_next_in_list().unwrap();
    assert!(list.is_exhausted());

    list.append("b");
    let next = list.get_next_in_list().unwrap();
    assert_eq!(list.text(next), Some("b"));
}

#[test]
fn test_deleting_cursor_token_advances_cursor() {
    let mut list = list_of(&["a", "b", "c"]);
    let before = ids(&list);
    list.get_next_in_list().unwrap();

    list.delete_token(before[1]).unwrap();
    let next = list.get_next_in_list().unwrap();
    assert_eq!(list.text(next), Some("c"));
}

#[test]
fn test_reset_cursor() {
    let mut list = list_of(&["a", "b"]);
    while list.get_next_in_list().is_some() {}
    list.reset_cursor();
    let first = list.get_next_in_list().unwrap();
    assert_eq!(list.text(first), Some("a"));
}

// ─────────────────────────────────────────────────────────────────────
// Serialization
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_serializes_as_text_array() {
    let list = list_of(&["int", "x", ";", "\n"]);
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, r#"["int","x",";","\n"]"#);
}
