//! Implementation of the `lineloc parse` command.

use clap::Args;
use lineloc::types::Part;
use lineloc::{Status, Template};
use miette::{Report, Result};
use serde::Serialize;

use super::print_json;
use crate::output::table::parts_table;
use crate::output::TemplateDiagnostic;

/// Arguments for the parse command.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Template text, e.g. "You have {0:N0} item{plural:0}"
    pub template: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PartJson {
    kind: &'static str,
    position: usize,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

#[derive(Serialize)]
struct MalformedJson {
    position: usize,
    length: usize,
    reason: String,
}

#[derive(Serialize)]
struct ParseJson {
    status: Status,
    parts: Vec<PartJson>,
    malformed: Vec<MalformedJson>,
}

fn part_json(part: &Part) -> PartJson {
    let (position, length) = part.span();
    match part {
        Part::Text(text) => PartJson {
            kind: "text",
            position,
            length,
            text: Some(text.text.clone()),
            expression: None,
            category: None,
        },
        Part::Placeholder(placeholder) => PartJson {
            kind: "placeholder",
            position,
            length,
            text: None,
            expression: Some(placeholder.expression.to_string()),
            category: placeholder.plural_category.clone(),
        },
    }
}

/// Run the parse command.
///
/// Exits with `DATAERR` when any placeholder is malformed.
pub fn run_parse(args: ParseArgs) -> Result<i32> {
    let template = Template::new(args.template.as_str());

    if args.json {
        print_json(&ParseJson {
            status: template.status(),
            parts: template.parts().iter().map(part_json).collect(),
            malformed: template
                .malformed()
                .iter()
                .map(|m| MalformedJson {
                    position: m.position,
                    length: m.length,
                    reason: m.reason.to_string(),
                })
                .collect(),
        })?;
    } else {
        println!("{}", parts_table(&template));
        println!("{}", template.status());
        for malformed in template.malformed() {
            let diagnostic = TemplateDiagnostic::from_malformed(&args.template, malformed);
            eprintln!("{:?}", Report::new(diagnostic));
        }
    }

    if template.is_malformed() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
