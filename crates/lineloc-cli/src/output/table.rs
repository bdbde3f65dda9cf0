//! Table formatting utilities for CLI output.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use lineloc::types::Part;
use lineloc::{Severity, Status, StatusAxis, Template};

/// The parts of a parsed template, one row each.
pub fn parts_table(template: &Template) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Kind", "Span", "Content", "Category"]);

    for part in template.parts() {
        let (position, length) = part.span();
        let (kind, content, category) = match part {
            Part::Text(text) => ("text", format!("{:?}", text.text), String::new()),
            Part::Placeholder(placeholder) => (
                "placeholder",
                placeholder.expression.to_string(),
                placeholder.plural_category.clone().unwrap_or_default(),
            ),
        };
        table.add_row(vec![
            part.part_index().to_string(),
            kind.to_string(),
            format!("{position}..{}", position + length),
            content,
            category,
        ]);
    }

    table
}

/// The four status axes with their severities.
pub fn status_table(status: Status) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["Axis", "Code", "Severity"]);

    let rows = [
        axis_row(status.resolve()),
        axis_row(status.locale()),
        axis_row(status.format()),
        axis_row(status.plurality()),
    ];
    for (axis, code, severity) in rows {
        table.add_row(vec![
            Cell::new(axis),
            Cell::new(code),
            Cell::new(format!("{severity:?}")).fg(severity_color(severity)),
        ]);
    }

    table
}

fn axis_row<A: StatusAxis>(value: A) -> (&'static str, &'static str, Severity) {
    (A::NAME, value.name(), value.severity())
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Ok => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Failed => Color::DarkRed,
    }
}
