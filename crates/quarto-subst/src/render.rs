/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Synchronous rendering.
//!
//! The lookup is total: whatever it returns is inserted verbatim, with no
//! escaping. A lookup that cannot answer is expected to panic on its own;
//! rendering does not catch anything.

use crate::ast::Fragment;
use crate::template::Template;
use std::convert::Infallible;

impl Template {
    /// Render with a total lookup.
    ///
    /// The lookup is called once per placeholder occurrence, left to right.
    pub fn render(&self, mut lookup: impl FnMut(&str) -> String) -> String {
        match self.fold_fragments(|name| Ok::<_, Infallible>(lookup(name))) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// The ordered fold every renderer goes through.
    pub(crate) fn fold_fragments<E>(
        &self,
        mut lookup: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<String, E> {
        let mut out = String::with_capacity(self.literal_len());
        for fragment in self.fragments() {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Placeholder(p) => out.push_str(&lookup(&p.name)?),
            }
        }
        Ok(out)
    }

    /// Total length of literal text, as a capacity hint.
    pub(crate) fn literal_len(&self) -> usize {
        self.fragments()
            .iter()
            .map(|f| match f {
                Fragment::Literal(text) => text.len(),
                Fragment::Placeholder(_) => 0,
            })
            .sum()
    }
}
