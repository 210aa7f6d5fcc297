/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `subst` - render a placeholder template from the command line.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use quarto_subst::Template;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bindings;
mod report;

use bindings::{Bindings, MissingPolicy};

#[derive(Parser, Debug)]
#[command(name = "subst")]
#[command(version)]
#[command(about = "Substitute $name and ${name} placeholders in a template", long_about = None)]
struct Args {
    /// Template file ('-' or omitted reads stdin)
    template: Option<PathBuf>,

    /// Bind a placeholder (KEY=VALUE); may be repeated
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    defines: Vec<String>,

    /// JSON object with placeholder bindings
    #[arg(long = "vars", value_name = "FILE")]
    vars: Option<PathBuf>,

    /// Fall back to environment variables for unbound placeholders
    #[arg(long = "env")]
    env: bool,

    /// What to do with unbound placeholders
    #[arg(long = "missing", value_enum, default_value_t = MissingPolicy::Error)]
    missing: MissingPolicy,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Only check the template; print its placeholder names
    #[arg(long = "check")]
    check: bool,

    /// Print the canonical form of the template instead of rendering it
    #[arg(long = "canonical", conflicts_with = "check")]
    canonical: bool,

    /// Report parse errors as JSON on stdout
    #[arg(long = "json-errors")]
    json_errors: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quarto_subst_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let (filename, source) = read_template(args.template.as_ref())?;

    let template = match Template::compile_safe(&source) {
        Ok(template) => template,
        Err(err) => {
            if args.json_errors {
                println!("{}", report::to_json(&err, &filename));
            } else {
                eprintln!("{}", report::to_text(&err, &filename, &source));
            }
            std::process::exit(1);
        }
    };
    debug!(file = %filename, "template compiled");

    let output = if args.check {
        let mut names: Vec<&str> = template.placeholders().collect();
        names.sort_unstable();
        names.dedup();
        names.iter().map(|n| format!("{n}\n")).collect()
    } else if args.canonical {
        template.to_canonical_text()
    } else {
        let bindings = collect_bindings(&args)?;
        render(&template, &bindings, args.missing)?
    };

    write_output(args.output.as_ref(), &output)
}

fn read_template(path: Option<&PathBuf>) -> Result<(String, String)> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template: {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read template from stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

/// Environment, then `--vars`, then `-D`, each overriding the last.
fn collect_bindings(args: &Args) -> Result<Bindings> {
    let mut bindings = Bindings::new().with_env(args.env);
    if let Some(path) = &args.vars {
        bindings.load_json(path)?;
    }
    for definition in &args.defines {
        bindings.define(definition)?;
    }
    Ok(bindings)
}

fn render(template: &Template, bindings: &Bindings, missing: MissingPolicy) -> Result<String> {
    match missing {
        MissingPolicy::Error => template
            .render_result(|name| {
                bindings
                    .get(name)
                    .ok_or_else(|| anyhow!("No value bound for placeholder '{}'", name))
            })
            .context("Failed to render template"),
        MissingPolicy::Empty => Ok(template.render(|name| bindings.get(name).unwrap_or_default())),
        MissingPolicy::Keep => Ok(template.render(|name| {
            bindings
                .get(name)
                .unwrap_or_else(|| format!("${{{}}}", name))
        })),
    }
}

fn write_output(path: Option<&PathBuf>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
