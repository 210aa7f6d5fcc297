/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The compiled template and its canonical text form.
//!
//! A [`Template`] is immutable once built. Its fragments always satisfy the
//! optimizer's invariant (no two adjacent literals, no empty literals), and
//! two templates are equal exactly when their canonical text is equal.

use crate::ast::{Fragment, Placeholder, is_identifier_continue, is_identifier_start};
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::optimize::optimize;
use crate::parser::{Mode, parse};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// A compiled template ready for rendering.
///
/// Cloning is cheap; clones share the fragment sequence.
#[derive(Debug, Clone)]
pub struct Template {
    fragments: Arc<[Fragment]>,
}

impl Template {
    /// Compile a template, panicking on invalid syntax.
    ///
    /// Use this for templates known ahead of time, where a syntax error is
    /// a bug. For templates from user input use [`Template::compile_safe`].
    ///
    /// # Panics
    /// With the message `Invalid placeholder at row R, col C` at the first
    /// syntax error.
    pub fn compile(source: &str) -> Self {
        let fragments = match parse(source, Mode::Strict) {
            Ok(fragments) => fragments,
            Err(err) => panic!("{err}"),
        };
        Self::finish(optimize(fragments))
    }

    /// Compile a template, returning the first syntax error instead of
    /// panicking.
    pub fn compile_safe(source: &str) -> ParseResult<Self> {
        let fragments = parse(source, Mode::Recoverable)?;
        Ok(Self::finish(optimize(fragments)))
    }

    /// Build a template from hand-made fragments.
    ///
    /// Literals are merged as in compilation. Placeholder names must be
    /// valid identifiers; the error position refers to the canonical text of
    /// the fragments up to the offending character. A bare placeholder
    /// followed by text that would extend its name is switched to the braced
    /// form, so the canonical text still reads back as the same template.
    pub fn from_fragments(fragments: impl IntoIterator<Item = Fragment>) -> ParseResult<Self> {
        let mut fragments = optimize(fragments);
        let mut text = String::new();
        for i in 0..fragments.len() {
            let extends_name = matches!(
                fragments.get(i + 1),
                Some(Fragment::Literal(next)) if next.starts_with(is_identifier_continue)
            );
            if let Fragment::Placeholder(p) = &mut fragments[i] {
                check_identifier(&text, p)?;
                if extends_name {
                    p.braced = true;
                }
            }
            write_fragment(&mut text, &fragments[i]);
        }
        Ok(Self::finish(fragments))
    }

    /// `fragments` must already be optimized.
    fn finish(fragments: Vec<Fragment>) -> Self {
        let template = Template {
            fragments: fragments.into(),
        };
        tracing::debug!(
            fragments = template.fragments.len(),
            placeholders = template.placeholders().count(),
            "compiled template"
        );
        template
    }

    /// The normalized fragment sequence.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Placeholder names in template order, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().filter_map(Fragment::name)
    }

    /// Whether rendering ignores the context entirely.
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }

    /// Serialize back to template syntax.
    ///
    /// `$` in literal text is written as `$$`; placeholders keep the form
    /// they were written in.
    pub fn to_canonical_text(&self) -> String {
        let mut out = String::new();
        for fragment in self.fragments.iter() {
            write_fragment(&mut out, fragment);
        }
        out
    }
}

fn write_fragment(out: &mut String, fragment: &Fragment) {
    match fragment {
        Fragment::Literal(text) => {
            for c in text.chars() {
                if c == '$' {
                    out.push_str("$$");
                } else {
                    out.push(c);
                }
            }
        }
        Fragment::Placeholder(p) if p.braced => {
            out.push_str("${");
            out.push_str(&p.name);
            out.push('}');
        }
        Fragment::Placeholder(p) => {
            out.push('$');
            out.push_str(&p.name);
        }
    }
}

/// Reject a placeholder name that the parser could not have produced.
///
/// `preceding` is the canonical text before the placeholder.
fn check_identifier(preceding: &str, p: &Placeholder) -> ParseResult<()> {
    let mut chars = p.name.char_indices();
    let (bad_at, kind) = match chars.next() {
        Some((_, c)) if is_identifier_start(c) => {
            match chars.find(|&(_, c)| !is_identifier_continue(c)) {
                Some((i, _)) => (i, ParseErrorKind::InvalidIdentifier),
                None => return Ok(()),
            }
        }
        _ => (0, ParseErrorKind::InvalidIdentifierStart),
    };

    let mut prefix = String::from(preceding);
    prefix.push_str(if p.braced { "${" } else { "$" });
    prefix.push_str(&p.name[..bad_at]);
    let mut cursor = Cursor::new(&prefix);
    cursor.take_while(|_| true);
    Err(ParseError::new(kind, cursor.position(), cursor.offset()))
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fragments, &other.fragments)
            || self.to_canonical_text() == other.to_canonical_text()
    }
}

impl Eq for Template {}

impl Hash for Template {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_canonical_text().hash(state);
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_text())
    }
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::compile_safe(s)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_text())
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Template::compile_safe(&source).map_err(serde::de::Error::custom)
    }
}
