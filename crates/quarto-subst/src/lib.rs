/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Compile-once placeholder substitution.
//!
//! Templates are plain text with placeholders:
//!
//! - `$name` or `${name}` is replaced by the lookup result for `name`
//! - `$$` is a literal `$`
//!
//! Names start with a lowercase ASCII letter or `_` and continue with ASCII
//! letters, digits, `_` or `'`. There are no conditionals, loops, or
//! partials; see `quarto-doctemplate` for those.
//!
//! A template is parsed once into a [`Template`] and can then be rendered any
//! number of times, from any number of threads, against different lookups.
//!
//! # Example
//!
//! ```
//! use quarto_subst::Template;
//!
//! let template = Template::compile("Hello, $name! That costs $$${price}.");
//! let out = template.render(|name| match name {
//!     "name" => "World".to_string(),
//!     "price" => "5".to_string(),
//!     _ => unreachable!(),
//! });
//! assert_eq!(out, "Hello, World! That costs $5.");
//! ```
//!
//! Lookups that can fail go through the effectful renderers, which always
//! query placeholders in template order:
//!
//! ```
//! use quarto_subst::Template;
//! use std::collections::HashMap;
//!
//! let vars = HashMap::from([("name".to_string(), "World".to_string())]);
//! let template = Template::compile("$name and $other");
//! assert_eq!(template.render_option(|n| vars.get(n).cloned()), None);
//! ```

pub mod ast;
pub mod cursor;
pub mod effect;
pub mod error;
pub mod optimize;
pub mod parser;
pub mod render;
pub mod template;

// Re-export main types at crate root
pub use ast::{Fragment, Placeholder};
pub use cursor::Position;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use template::Template;

use std::future::Future;

/// Compile a template, panicking on invalid syntax.
pub fn compile(text: &str) -> Template {
    Template::compile(text)
}

/// Compile a template, returning the first syntax error.
pub fn compile_safe(text: &str) -> ParseResult<Template> {
    Template::compile_safe(text)
}

/// Render a compiled template with a total lookup.
pub fn render(template: &Template, lookup: impl FnMut(&str) -> String) -> String {
    template.render(lookup)
}

/// Serialize a template back to source form.
pub fn to_canonical_text(template: &Template) -> String {
    template.to_canonical_text()
}

/// Compile `text` and render it once. Panics on invalid syntax.
pub fn substitute(text: &str, lookup: impl FnMut(&str) -> String) -> String {
    Template::compile(text).render(lookup)
}

/// Compile `text` and render it once, returning syntax errors as values.
pub fn substitute_safe(text: &str, lookup: impl FnMut(&str) -> String) -> ParseResult<String> {
    Ok(Template::compile_safe(text)?.render(lookup))
}

/// Compile `text` and render it with a partial lookup. Panics on invalid
/// syntax.
pub fn substitute_option(
    text: &str,
    lookup: impl FnMut(&str) -> Option<String>,
) -> Option<String> {
    Template::compile(text).render_option(lookup)
}

/// Compile `text` and render it with a fallible lookup. Panics on invalid
/// syntax.
pub fn substitute_result<E>(
    text: &str,
    lookup: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    Template::compile(text).render_result(lookup)
}

/// Compile `text` and render it with an asynchronous lookup. Panics on
/// invalid syntax, before the returned future is first polled.
pub fn substitute_async<F, Fut>(text: &str, lookup: F) -> impl Future<Output = String>
where
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = String>,
{
    let template = Template::compile(text);
    async move { template.render_async(lookup).await }
}
