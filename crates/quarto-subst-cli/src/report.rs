/*
 * report.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parse error output for the terminal and for tools.

use quarto_subst::ParseError;

/// Render a parse error with a source snippet.
pub fn to_text(err: &ParseError, filename: &str, source: &str) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    // ariadne spans count characters, not bytes. At end of input, point at
    // the last character instead.
    let at = source[..err.offset()].chars().count();
    let (start, end) = if err.offset() < source.len() {
        (at, at + 1)
    } else {
        (at.saturating_sub(1), at)
    };

    let report = Report::build(ReportKind::Error, filename, start)
        .with_message(err.to_string())
        .with_label(
            Label::new((filename, start..end))
                .with_message(err.kind().describe())
                .with_color(Color::Red),
        )
        .finish();

    let mut output = Vec::new();
    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return format!("{}: {}", filename, err);
    }
    String::from_utf8(output).unwrap_or_else(|_| format!("{}: {}", filename, err))
}

/// A single-line JSON description of a parse error.
pub fn to_json(err: &ParseError, filename: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "error",
        "title": err.message(),
        "code": err.kind(),
        "problem": err.kind().describe(),
        "file": filename,
        "row": err.position().row,
        "col": err.position().col,
        "offset": err.offset(),
    })
}
