/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template parser.
//!
//! The grammar is small enough to drive directly off two characters of
//! lookahead:
//!
//! - `$$` is an escaped dollar sign
//! - `${name}` is a braced placeholder
//! - `$name` is a bare placeholder; the name runs as far as it can
//! - any other `$` is an error
//! - everything else is literal text up to the next `$`
//!
//! The parser emits raw fragments. Adjacent literals (from `$$` escapes) are
//! merged afterwards by [`crate::optimize`].

use crate::ast::{Fragment, Placeholder, is_identifier_continue, is_identifier_start};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// How the parser reacts to a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Panic at the first error.
    Strict,
    /// Return the first error as a value.
    Recoverable,
}

/// A single-use parser over one template source.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    mode: Mode,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, mode: Mode) -> Self {
        Self {
            cursor: Cursor::new(source),
            mode,
        }
    }

    /// Parse the whole source into raw fragments.
    ///
    /// In [`Mode::Strict`] this only ever returns `Ok`.
    pub fn parse(mut self) -> ParseResult<Vec<Fragment>> {
        let mut fragments = Vec::new();
        while let Some(fragment) = self.next_fragment()? {
            tracing::trace!(?fragment, position = %self.cursor.position(), "parsed fragment");
            fragments.push(fragment);
        }
        Ok(fragments)
    }

    fn next_fragment(&mut self) -> ParseResult<Option<Fragment>> {
        if self.cursor.is_eof() {
            return Ok(None);
        }

        let fragment = match (self.cursor.peek(), self.cursor.peek_second()) {
            (Some('$'), Some('$')) => {
                self.cursor.advance(2);
                Fragment::literal("$")
            }

            (Some('$'), Some('{')) => {
                self.cursor.advance(2);
                let name = self.identifier()?;
                if self.cursor.peek() != Some('}') {
                    return self.fail(ParseErrorKind::UnterminatedBrace);
                }
                self.cursor.advance(1);
                Fragment::Placeholder(Placeholder { name, braced: true })
            }

            (Some('$'), Some(c)) if is_identifier_start(c) => {
                self.cursor.advance(1);
                let name = self.identifier()?;
                Fragment::Placeholder(Placeholder {
                    name,
                    braced: false,
                })
            }

            (Some('$'), next) => {
                self.cursor.advance(1);
                let kind = match next {
                    Some(c) if is_identifier_continue(c) => ParseErrorKind::InvalidIdentifierStart,
                    _ => ParseErrorKind::InvalidMarker,
                };
                return self.fail(kind);
            }

            _ => Fragment::literal(self.cursor.take_while(|c| c != '$')),
        };
        Ok(Some(fragment))
    }

    fn identifier(&mut self) -> ParseResult<String> {
        match self.cursor.peek() {
            Some(c) if is_identifier_start(c) => {
                self.cursor.advance(1);
                let rest = self.cursor.take_while(is_identifier_continue);
                let mut name = String::with_capacity(rest.len() + 1);
                name.push(c);
                name.push_str(rest);
                Ok(name)
            }
            _ => self.fail(ParseErrorKind::InvalidIdentifierStart),
        }
    }

    fn fail<T>(&self, kind: ParseErrorKind) -> ParseResult<T> {
        let err = ParseError::new(kind, self.cursor.position(), self.cursor.offset());
        match self.mode {
            Mode::Strict => panic!("{err}"),
            Mode::Recoverable => {
                tracing::debug!(?kind, position = %err.position(), "template parse failed");
                Err(err)
            }
        }
    }
}

/// Parse `source` into raw, unmerged fragments.
pub fn parse(source: &str, mode: Mode) -> ParseResult<Vec<Fragment>> {
    Parser::new(source, mode).parse()
}
