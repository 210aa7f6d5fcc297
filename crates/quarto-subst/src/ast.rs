/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template fragment types.

use serde::{Deserialize, Serialize};

/// A piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fragment {
    /// Text to be output as-is.
    Literal(String),

    /// A substitution point: `$name` or `${name}`
    Placeholder(Placeholder),
}

/// A named substitution point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// The identifier passed to the lookup.
    pub name: String,
    /// Whether the source spelled it `${name}`. Only affects canonical text.
    pub braced: bool,
}

impl Fragment {
    pub fn literal(text: impl Into<String>) -> Self {
        Fragment::Literal(text.into())
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Fragment::Placeholder(Placeholder {
            name: name.into(),
            braced: false,
        })
    }

    pub fn braced(name: impl Into<String>) -> Self {
        Fragment::Placeholder(Placeholder {
            name: name.into(),
            braced: true,
        })
    }

    /// The placeholder name, if this is a placeholder.
    pub fn name(&self) -> Option<&str> {
        match self {
            Fragment::Literal(_) => None,
            Fragment::Placeholder(p) => Some(&p.name),
        }
    }
}

/// Characters allowed to start a placeholder name.
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_lowercase() || c == '_'
}

/// Characters allowed after the first in a placeholder name.
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}
