/*
 * optimize.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fragment normalization.

use crate::ast::Fragment;

/// Merge runs of literals into single literals and drop empty ones.
///
/// Placeholders keep their order and content. The result never has two
/// literals next to each other.
pub fn optimize(fragments: impl IntoIterator<Item = Fragment>) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::new();
    for fragment in fragments {
        match fragment {
            Fragment::Literal(text) if text.is_empty() => {}
            Fragment::Literal(text) => match out.last_mut() {
                Some(Fragment::Literal(prev)) => prev.push_str(&text),
                _ => out.push(Fragment::Literal(text)),
            },
            placeholder @ Fragment::Placeholder(_) => out.push(placeholder),
        }
    }
    out
}
