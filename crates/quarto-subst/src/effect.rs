/*
 * effect.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Effectful rendering.
//!
//! Here the lookup returns a wrapped value instead of plain text. Each
//! renderer performs lookups strictly in template order and combines the
//! results with the wrapper's usual rule:
//!
//! | method | lookup returns | result |
//! |---|---|---|
//! | [`Template::render_option`] | `Option<String>` | `None` at the first unresolved name |
//! | [`Template::render_result`] | `Result<String, E>` | the first `Err` |
//! | [`Template::render_async`] | `impl Future<Output = String>` | lookups awaited one at a time |
//! | [`Template::try_render_async`] | `impl Future<Output = Result<String, E>>` | the first `Err` |
//! | [`Template::render_traced`] | `(String, W)` | output plus every `W`, in order |
//!
//! The short-circuiting variants stop calling the lookup after the first
//! failure.

use crate::ast::Fragment;
use crate::template::Template;
use std::future::Future;

impl Template {
    /// Render with a partial lookup; any unresolved name makes the whole
    /// result `None`.
    pub fn render_option(&self, mut lookup: impl FnMut(&str) -> Option<String>) -> Option<String> {
        self.fold_fragments(|name| lookup(name).ok_or(())).ok()
    }

    /// Render with a fallible lookup, returning the first error.
    pub fn render_result<E>(
        &self,
        lookup: impl FnMut(&str) -> Result<String, E>,
    ) -> Result<String, E> {
        self.fold_fragments(lookup)
    }

    /// Render with a lookup that also produces a side value per placeholder.
    ///
    /// Side values come back in template order, one per placeholder
    /// occurrence.
    pub fn render_traced<W>(&self, mut lookup: impl FnMut(&str) -> (String, W)) -> (String, Vec<W>) {
        let mut trace = Vec::new();
        let out = self.render(|name| {
            let (text, w) = lookup(name);
            trace.push(w);
            text
        });
        (out, trace)
    }

    /// Render with an asynchronous lookup.
    ///
    /// Each lookup future is awaited before the next lookup is started, so
    /// lookups run in template order even on a multi-threaded executor. The
    /// future returned by `lookup` may not borrow the name; take an owned
    /// copy inside the closure if needed.
    pub async fn render_async<F, Fut>(&self, mut lookup: F) -> String
    where
        F: FnMut(&str) -> Fut,
        Fut: Future<Output = String>,
    {
        let mut out = String::with_capacity(self.literal_len());
        for fragment in self.fragments() {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Placeholder(p) => out.push_str(&lookup(&p.name).await),
            }
        }
        out
    }

    /// Render with a fallible asynchronous lookup, returning the first error.
    pub async fn try_render_async<F, Fut, E>(&self, mut lookup: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let mut out = String::with_capacity(self.literal_len());
        for fragment in self.fragments() {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Placeholder(p) => out.push_str(&lookup(&p.name).await?),
            }
        }
        Ok(out)
    }
}
