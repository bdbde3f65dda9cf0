//! Implementation of the `lineloc eval` command.

use std::sync::Arc;

use clap::Args;
use lineloc::interpreter::TracingLogger;
use lineloc::Localizer;
use miette::Result;

use super::{arguments, print_json, CultureArgs};
use crate::output::table::status_table;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Template string to render
    pub template: String,

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

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let localizer = Localizer::builder()
        .culture(args.culture.locale())
        .fallback(!args.culture.no_fallback)
        .loggers(vec![Arc::new(TracingLogger)])
        .build();
    let result = localizer.format_str(&args.template, &arguments(&args.args));

    if args.json {
        print_json(&result)?;
    } else {
        match &result.text {
            Some(text) => println!("{text}"),
            None => eprintln!("Evaluation failed: {}", result.status),
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
