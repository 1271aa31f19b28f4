// SPDX-License-Identifier: MIT
//
// runed: a headless front end for the runed-core editing engine.
//
// Loads a document, applies settings, runs the requested edits and writes
// the result to stdout:
//
//   file or stdin → Editor::from_text → config → --set → --wrap
//                 → --sort (first block) → word wrap → stdout
//
// Usage:
//
//   runed [--config FILE] [--set "DIRECTIVES"] [--wrap N] [--sort] [FILE]
//
// With no FILE, or FILE = "-", the document is read from stdin. --set takes
// Vim-style directives ("ts=8 noet ww=72") and may be given more than once.
// Query directives ("ts?") print their answer to stderr.

mod config;
mod logging;

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use runed_core::{Editor, Error, Settings};
use tracing::{debug, warn};

use crate::config::Config;

const USAGE: &str = "usage: runed [--config FILE] [--set \"DIRECTIVES\"] [--wrap N] [--sort] [FILE]";

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    set: Vec<String>,
    wrap: Option<usize>,
    sort: bool,
    help: bool,
    file: Option<PathBuf>,
}

impl Args {
    fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Self::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-c" | "--config" => out.config = Some(PathBuf::from(value(&mut it, &arg)?)),
                "-s" | "--set" => out.set.push(value(&mut it, &arg)?),
                "-w" | "--wrap" => {
                    let width = value(&mut it, &arg)?;
                    let width = width
                        .parse()
                        .with_context(|| format!("invalid wrap width: {width}"))?;
                    out.wrap = Some(width);
                }
                "--sort" => out.sort = true,
                "-h" | "--help" => out.help = true,
                "-" => out.file = None,
                flag if flag.starts_with('-') => bail!("unknown option: {flag}\n{USAGE}"),
                _ => {
                    if out.file.is_some() {
                        bail!("only one input file is supported\n{USAGE}");
                    }
                    out.file = Some(PathBuf::from(arg));
                }
            }
        }
        Ok(out)
    }
}

/// The value following `flag`.
fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().with_context(|| format!("{flag} needs a value\n{USAGE}"))
}

// ─── Pipeline ───────────────────────────────────────────────────────────────

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Apply the command line to a loaded editor. Returns the answers to any
/// query directives.
fn process(editor: &mut Editor, args: &Args) -> Result<Vec<String>> {
    let mut answers = Vec::new();
    for directives in &args.set {
        let answer = editor
            .apply_set(directives)
            .with_context(|| format!("invalid --set \"{directives}\""))?;
        if !answer.is_empty() {
            answers.push(answer);
        }
    }
    if let Some(width) = args.wrap {
        let mut settings = *editor.settings();
        settings.wrap_width = width;
        editor.set_settings(settings);
    }
    if args.sort {
        match editor.sort_block(None) {
            Ok(()) => debug!("sorted first block"),
            Err(Error::NothingToOperateOn) => warn!("nothing to sort"),
            Err(err) => return Err(err.into()),
        }
    }
    if editor.settings().wrap_width > 0 {
        let before = editor.text();
        if editor.wrap_all_lines() && editor.text() != before {
            debug!(width = editor.settings().wrap_width, "wrapped document");
        }
    }
    Ok(answers)
}

fn run() -> Result<()> {
    let args = Args::parse(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let settings = match &args.config {
        Some(path) => Config::load(path)?.settings(),
        None => Settings::default(),
    };
    let text = read_input(args.file.as_deref())?;
    let mut editor = Editor::from_text(&text, settings);
    debug!(lines = editor.len(), "loaded document");

    for answer in process(&mut editor, &args)? {
        eprintln!("{answer}");
    }

    let mut stdout = io::stdout().lock();
    write!(stdout, "{editor}").context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("runed: {err:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
