/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template compilation.
//!
//! Rendering never fails on its own account. Lookup failures belong to the
//! caller's context and surface through the effectful renderers.

use crate::cursor::Position;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong at a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseErrorKind {
    /// `${name` with no closing `}`.
    UnterminatedBrace,
    /// A placeholder name starting with something other than `a-z` or `_`.
    InvalidIdentifierStart,
    /// A hand-built placeholder name with a character other than ASCII
    /// letters, digits, `_` or `'` after the first.
    InvalidIdentifier,
    /// A `$` not followed by `$`, `{`, or a placeholder name.
    InvalidMarker,
}

impl ParseErrorKind {
    /// A short description, for diagnostics that want more than the message.
    pub fn describe(&self) -> &'static str {
        match self {
            ParseErrorKind::UnterminatedBrace => "expected `}` to close the placeholder",
            ParseErrorKind::InvalidIdentifierStart => {
                "placeholder names must start with a lowercase letter or `_`"
            }
            ParseErrorKind::InvalidIdentifier => {
                "placeholder names may only contain letters, digits, `_` and `'`"
            }
            ParseErrorKind::InvalidMarker => {
                "`$` must be followed by `$`, `{`, or a placeholder name"
            }
        }
    }
}

/// A template syntax error with its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid placeholder at {position}")]
pub struct ParseError {
    kind: ParseErrorKind,
    position: Position,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: Position, offset: usize) -> Self {
        Self {
            kind,
            position,
            offset,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the error into the template source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The message without the location.
    pub fn message(&self) -> &'static str {
        "Invalid placeholder"
    }
}

/// Result type for template compilation.
pub type ParseResult<T> = Result<T, ParseError>;
