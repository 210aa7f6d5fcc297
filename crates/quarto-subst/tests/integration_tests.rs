/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests for quarto-subst through its public entry points.
 */

use pretty_assertions::assert_eq;
use quarto_subst::{
    ParseErrorKind, Position, Template, compile, compile_safe, render, substitute,
    substitute_async, substitute_option, substitute_result, substitute_safe, to_canonical_text,
};
use std::cell::RefCell;
use std::collections::HashMap;

fn echo(name: &str) -> String {
    format!("<{name}>")
}

#[test]
fn test_escaped_dollar() {
    assert_eq!(substitute("$$", echo), "$");
}

#[test]
fn test_bare_placeholder() {
    assert_eq!(substitute("$name", echo), "<name>");
}

#[test]
fn test_braced_placeholder_followed_by_text() {
    let out = substitute("${noun}ification", |n| {
        assert_eq!(n, "noun");
        "class".to_string()
    });
    assert_eq!(out, "classification");
}

#[test]
fn test_invalid_marker() {
    let err = compile_safe("$%").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::InvalidMarker);
    assert_eq!(err.position(), Position::new(1, 2));
    assert_eq!(err.to_string(), "Invalid placeholder at row 1, col 2");
}

#[test]
fn test_unterminated_brace() {
    let err = compile_safe("${name").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::UnterminatedBrace);
    assert_eq!(err.position(), Position::new(1, 7));
}

#[test]
#[should_panic(expected = "Invalid placeholder at row 1, col 2")]
fn test_strict_compile_rejects_uppercase_start() {
    compile("$Name");
}

#[test]
fn test_multiline_error_position() {
    let err = compile_safe("first line\n$%").unwrap_err();
    assert_eq!(err.position(), Position::new(2, 2));

    let err = compile_safe("a\nb\n\n  ${x y}").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::UnterminatedBrace);
    assert_eq!(err.position(), Position::new(4, 6));
}

#[test]
fn test_substitute_safe() {
    assert_eq!(substitute_safe("x=$x", echo), Ok("x=<x>".to_string()));
    assert_eq!(
        substitute_safe("x=$", echo).unwrap_err().position(),
        Position::new(1, 4)
    );
}

#[test]
fn test_compile_once_render_many() {
    let template = compile("Dear $title $last,");
    let people = [("Dr.", "Who"), ("Ms.", "Marple")];
    let letters: Vec<String> = people
        .iter()
        .map(|(title, last)| {
            render(&template, |n| match n {
                "title" => title.to_string(),
                _ => last.to_string(),
            })
        })
        .collect();
    assert_eq!(letters, vec!["Dear Dr. Who,", "Dear Ms. Marple,"]);
}

#[test]
fn test_canonical_text_round_trip() {
    let template = compile("$$1 ${a}b $c' $$");
    assert_eq!(to_canonical_text(&template), "$$1 ${a}b $c' $$");
    assert_eq!(compile(&to_canonical_text(&template)), template);
}

#[test]
fn test_effectful_lookup_order_is_template_order() {
    let queried = RefCell::new(Vec::new());
    let record = |n: &str| {
        queried.borrow_mut().push(n.to_string());
        n.to_string()
    };

    let _ = substitute_option("$a$b", |n| Some(record(n)));
    assert_eq!(queried.take(), vec!["a", "b"]);

    let _ = substitute_result::<()>("$a$b", |n| Ok(record(n)));
    assert_eq!(queried.take(), vec!["a", "b"]);

    let _ = pollster::block_on(substitute_async("$a$b", |n| {
        let v = record(n);
        async move { v }
    }));
    assert_eq!(queried.take(), vec!["a", "b"]);

    let (_, trace) = compile("$a$b").render_traced(|n| (record(n), ()));
    assert_eq!(trace.len(), 2);
    assert_eq!(queried.take(), vec!["a", "b"]);
}

#[test]
fn test_missing_binding_semantics_depend_on_effect() {
    let vars: HashMap<&str, &str> = HashMap::from([("user", "ada")]);
    let template = Template::compile("$user@$host");

    assert_eq!(template.render_option(|n| vars.get(n).map(|v| v.to_string())), None);

    let err = template
        .render_result(|n| vars.get(n).map(|v| v.to_string()).ok_or(n.to_string()))
        .unwrap_err();
    assert_eq!(err, "host");

    let out = template.render(|n| vars.get(n).copied().unwrap_or_default().to_string());
    assert_eq!(out, "ada@");
}

#[test]
fn test_template_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Template>();
}
