/*
 * cursor.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Position-tracked scanning over template source text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in template source text (1-indexed).
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row number (1-indexed)
    pub row: usize,
    /// Column number (1-indexed, in characters)
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    fn step(&mut self, c: char) {
        if c == '\n' {
            self.row += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, col {}", self.row, self.col)
    }
}

/// A read-only view over the remaining input of a single parse.
///
/// The cursor only moves forward. Everything it hands out borrows from the
/// original input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            position: Position::default(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// The current character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character after the current one, without consuming either.
    pub fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Consume `n` characters.
    ///
    /// Callers check availability with `peek`/`peek_second` first; a request
    /// past the end of input stops at the end.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            let Some(c) = self.peek() else {
                debug_assert!(false, "advanced past end of input");
                return;
            };
            self.bump(c);
        }
    }

    /// Consume the longest prefix whose characters all satisfy `pred`.
    pub fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump(c);
        }
        &self.input[start..self.offset]
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the current character into the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    fn bump(&mut self, c: char) {
        self.offset += c.len_utf8();
        self.position.step(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_second(), Some('b'));
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.position(), Position::new(1, 1));
    }

    #[test]
    fn test_peek_at_end() {
        let mut cursor = Cursor::new("x");
        assert_eq!(cursor.peek_second(), None);
        cursor.advance(1);
        assert_eq!(cursor.peek(), None);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_advance_tracks_newlines() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance(2);
        assert_eq!(cursor.position(), Position::new(1, 3));
        cursor.advance(1);
        assert_eq!(cursor.position(), Position::new(2, 1));
        cursor.advance(1);
        assert_eq!(cursor.position(), Position::new(2, 2));
    }

    #[test]
    fn test_take_while_spanning_lines() {
        let mut cursor = Cursor::new("one\ntwo\nthree$rest");
        let taken = cursor.take_while(|c| c != '$');
        assert_eq!(taken, "one\ntwo\nthree");
        assert_eq!(cursor.position(), Position::new(3, 6));
        assert_eq!(cursor.peek(), Some('$'));
    }

    #[test]
    fn test_take_while_empty_match() {
        let mut cursor = Cursor::new("$x");
        assert_eq!(cursor.take_while(|c| c != '$'), "");
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let mut cursor = Cursor::new("héllo$");
        cursor.take_while(|c| c != '$');
        assert_eq!(cursor.position(), Position::new(1, 6));
        assert_eq!(cursor.offset(), "héllo".len());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "row 3, col 14");
    }
}
