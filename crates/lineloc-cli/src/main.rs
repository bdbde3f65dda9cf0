//! lineloc CLI entry point.
//!
//! Command-line tools for working with lineloc templates:
//! - `lineloc parse` - Show how a template string is parsed
//! - `lineloc eval` - Render a template string with arguments
//! - `lineloc resolve` - Resolve a key against catalog entries

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_eval, run_parse, run_resolve, EvalArgs, ParseArgs, ResolveArgs};
use miette::MietteHandlerOpts;
use tracing_subscriber::EnvFilter;

/// lineloc template tools.
#[derive(Debug, Parser)]
#[command(name = "lineloc")]
#[command(about = "Localization template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Log resolution steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a template string and list its parts
    Parse(ParseArgs),
    /// Render a template string
    Eval(EvalArgs),
    /// Resolve a key against catalog entries
    Resolve(ResolveArgs),
}

fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors checks TTY, NO_COLOR and FORCE_COLOR itself
        }
        ColorWhen::Always => owo_colors::set_override(true),
        ColorWhen::Never => owo_colors::set_override(false),
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn setup_tracing(verbose: bool) {
    let fallback = if verbose { "lineloc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Resolve(args) => run_resolve(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
