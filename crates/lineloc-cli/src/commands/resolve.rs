//! Implementation of the `lineloc resolve` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use lineloc::interpreter::{MemorySource, SourceError, TracingLogger};
use lineloc::types::KEY_PARAMETER;
use lineloc::{LineKey, Localizer};
use miette::{miette, Result};
use tracing::debug;

use super::{arguments, parse_key_val, print_json, CultureArgs};
use crate::output::table::status_table;
use crate::output::KeyDiagnostic;

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Key to resolve: a full key such as `Type:Inventory:Key:items`, or a
    /// bare name for `Key:<name>`
    pub key: String,

    /// Catalog entry in key=text format (repeatable)
    #[arg(short, long = "entry", value_parser = parse_key_val)]
    pub entries: Vec<(String, String)>,

    /// Catalog file with one `key = text` entry per line
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Positional arguments for {0}, {1}, ... (repeatable)
    #[arg(short = 'a', long = "arg")]
    pub args: Vec<String>,

    #[command(flatten)]
    pub culture: CultureArgs,

    /// Print the status axes after the text
    #[arg(long)]
    pub status: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the resolve command.
///
/// Exits with `DATAERR` when the key does not resolve to text.
pub fn run_resolve(args: ResolveArgs) -> Result<i32> {
    let mut source = MemorySource::new();
    if let Some(path) = &args.catalog {
        load_catalog(&mut source, path)?;
    }
    for (key, text) in &args.entries {
        insert(&mut source, key, text)?;
    }
    debug!(entries = source.len(), "catalog loaded");

    let key = if args.key.contains(':') {
        LineKey::parse(&args.key)
            .map_err(|e| KeyDiagnostic::from_parse_error("<key>", &args.key, &e))?
    } else {
        bare_key(&args.key)
    };

    let localizer = Localizer::builder()
        .culture(args.culture.locale())
        .fallback(!args.culture.no_fallback)
        .sources(vec![Arc::new(source)])
        .loggers(vec![Arc::new(TracingLogger)])
        .build();
    let result = localizer.key_line(&key).resolve(&arguments(&args.args));

    if args.json {
        print_json(&result)?;
    } else {
        match &result.text {
            Some(text) => println!("{text}"),
            None => eprintln!("No text for '{key}': {}", result.status),
        }
        if args.status {
            println!("{}", status_table(result.status));
        }
    }

    if result.text.is_some() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

fn bare_key(name: &str) -> LineKey {
    LineKey::new().with_parameter(KEY_PARAMETER, name)
}

/// Load `key = text` lines. Blank lines and lines starting with `#` are skipped.
fn load_catalog(source: &mut MemorySource, path: &Path) -> Result<()> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read catalog file {}: {e}", path.display()))?;
    for (number, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (key, text) = trimmed
            .split_once('=')
            .ok_or_else(|| miette!("{}:{}: expected `key = text`", path.display(), number + 1))?;
        insert(source, key.trim(), text.trim())?;
    }
    Ok(())
}

/// Insert one entry. A key without `:` is a bare `Key` name.
fn insert(source: &mut MemorySource, key: &str, text: &str) -> Result<()> {
    let inserted = if key.contains(':') {
        source.insert_str(key, text)
    } else {
        source.insert(bare_key(key), text)
    };
    match inserted {
        Ok(_) => Ok(()),
        Err(SourceError::InvalidKey { key, source: error }) => {
            Err(KeyDiagnostic::from_parse_error("<entry>", &key, &error).into())
        }
        Err(e) => Err(miette!("{e}")),
    }
}
