//! Template string scanner.
//!
//! A single forward pass over the text drives one state machine:
//!
//! - `Text`: literal characters; `\` escapes the next character, `{` opens a
//!   placeholder, a stray `}` is kept as literal text.
//! - `ArgumentStart`: a digit starts the argument index, anything else starts
//!   a plural category name that ends at `:`.
//! - `Index`: digits, then `,` (alignment), `:` (format) or `}`.
//! - `Alignment`: a signed integer, then `:` or `}`.
//! - `Format`: everything up to the closing `}`.
//!
//! A malformed placeholder never aborts the scan. Its source text is emitted
//! as a literal, a [`Malformed`] diagnostic is recorded and the status is
//! raised to `Format.ErrorMalformed`.

use std::mem;
use std::str::CharIndices;

use crate::types::{
    Expression, FormatStatus, Malformed, MalformedReason, ParsedTemplate, Part, Placeholder,
    Status, Template, TextPart,
};

/// Function name the parser wraps around placeholders with a format spec.
pub const FORMAT_FUNCTION: &str = "Format";

/// Function name the parser wraps around placeholders with an alignment.
pub const ALIGNMENT_FUNCTION: &str = "Alignment";

/// Parse a template string eagerly.
///
/// `None` produces a null template with status `Format.FailedNull`.
///
/// # Example
///
/// ```
/// use lineloc::parser::parse_template;
/// use lineloc::FormatStatus;
///
/// let template = parse_template(Some("Hello, {0}!"));
/// assert_eq!(template.parts().len(), 3);
/// assert_eq!(template.status().format(), FormatStatus::Ok);
///
/// let broken = parse_template(Some("{abc"));
/// assert_eq!(broken.status().format(), FormatStatus::ErrorMalformed);
/// ```
pub fn parse_template(text: Option<&str>) -> Template {
    let template = text.map_or_else(Template::null, Template::new);
    // Force the one-time build.
    let _ = template.parts();
    template
}

/// Scan template text into parts. Pure function of `text`.
pub fn build_template(text: Option<&str>) -> ParsedTemplate {
    let Some(text) = text else {
        return ParsedTemplate {
            status: Status::new().with(FormatStatus::FailedNull),
            ..ParsedTemplate::default()
        };
    };
    TemplateScanner::new(text).scan()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    ArgumentStart,
    PluralCategory,
    Index,
    Alignment,
    Format,
}

/// What the scanner did with a character.
enum Step {
    Consumed,
    /// The placeholder was rejected; feed the same character to `Text`.
    Reprocess,
}

struct TemplateScanner<'t> {
    text: &'t str,
    state: State,
    parts: Vec<Part>,
    malformed: Vec<Malformed>,
    /// Unescaped literal waiting to be appended to the parts.
    literal: String,
    /// Byte offset of the current placeholder's `{`.
    open: usize,
    category: String,
    index: String,
    alignment: String,
    format: Option<String>,
    placeholder_count: usize,
}

impl<'t> TemplateScanner<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            state: State::Text,
            parts: Vec::new(),
            malformed: Vec::new(),
            literal: String::new(),
            open: 0,
            category: String::new(),
            index: String::new(),
            alignment: String::new(),
            format: None,
            placeholder_count: 0,
        }
    }

    fn scan(mut self) -> ParsedTemplate {
        let mut chars = self.text.char_indices();
        while let Some((pos, c)) = chars.next() {
            if let Step::Reprocess = self.step(pos, c, &mut chars) {
                self.step(pos, c, &mut chars);
            }
        }
        self.finish()
    }

    fn step(&mut self, pos: usize, c: char, chars: &mut CharIndices<'_>) -> Step {
        match self.state {
            State::Text => {
                match c {
                    '\\' => match chars.next() {
                        Some((next_pos, escaped)) => {
                            self.push_literal(pos, next_pos + escaped.len_utf8(), escaped);
                        }
                        None => self.push_literal(pos, pos + 1, '\\'),
                    },
                    '{' => self.open_placeholder(pos),
                    // A stray `}` is kept as text.
                    _ => self.push_literal(pos, pos + c.len_utf8(), c),
                }
                Step::Consumed
            }
            State::ArgumentStart => match c {
                '0'..='9' => {
                    self.index.push(c);
                    self.state = State::Index;
                    Step::Consumed
                }
                '}' | ':' => self.reject(pos, MalformedReason::EmptyPlaceholder),
                '{' | ',' | '\\' => self.reject(pos, MalformedReason::UnexpectedCharacter(c)),
                _ => {
                    self.category.push(c);
                    self.state = State::PluralCategory;
                    Step::Consumed
                }
            },
            State::PluralCategory => match c {
                ':' => {
                    self.state = State::Index;
                    Step::Consumed
                }
                '}' => self.reject(pos, MalformedReason::EmptyPlaceholder),
                '{' | ',' | '\\' => self.reject(pos, MalformedReason::UnexpectedCharacter(c)),
                _ => {
                    self.category.push(c);
                    Step::Consumed
                }
            },
            State::Index => match c {
                '0'..='9' => {
                    self.index.push(c);
                    Step::Consumed
                }
                ',' => {
                    self.state = State::Alignment;
                    Step::Consumed
                }
                ':' => {
                    self.format = Some(String::new());
                    self.state = State::Format;
                    Step::Consumed
                }
                '}' => self.close_placeholder(pos),
                _ => self.reject(pos, MalformedReason::UnexpectedCharacter(c)),
            },
            State::Alignment => match c {
                '-' | '+' if self.alignment.is_empty() => {
                    self.alignment.push(c);
                    Step::Consumed
                }
                '0'..='9' => {
                    self.alignment.push(c);
                    Step::Consumed
                }
                ':' => {
                    self.format = Some(String::new());
                    self.state = State::Format;
                    Step::Consumed
                }
                '}' => self.close_placeholder(pos),
                _ => self.reject(pos, MalformedReason::UnexpectedCharacter(c)),
            },
            State::Format => {
                match c {
                    '}' => return self.close_placeholder(pos),
                    '\\' => {
                        if let Some((_, escaped)) = chars.next() {
                            self.format.get_or_insert_with(String::new).push(escaped);
                        }
                    }
                    _ => self.format.get_or_insert_with(String::new).push(c),
                }
                Step::Consumed
            }
        }
    }

    fn push_literal(&mut self, start: usize, end: usize, c: char) {
        self.literal.push(c);
        self.extend_literal_to(start, end);
    }

    fn extend_literal_to(&mut self, start: usize, end: usize) {
        // Adjacent runs are merged into the previous text part.
        if let Some(Part::Text(previous)) = self.parts.last_mut()
            && previous.position + previous.length == start
        {
            previous.length = end - previous.position;
            previous.text.push_str(&self.literal);
            self.literal.clear();
            return;
        }
        self.parts.push(Part::Text(TextPart {
            part_index: 0,
            position: start,
            length: end - start,
            text: mem::take(&mut self.literal),
        }));
    }

    fn open_placeholder(&mut self, pos: usize) {
        self.open = pos;
        self.category.clear();
        self.index.clear();
        self.alignment.clear();
        self.format = None;
        self.state = State::ArgumentStart;
    }

    /// Emit the placeholder's source up to `pos` as literal text.
    fn reject(&mut self, pos: usize, reason: MalformedReason) -> Step {
        self.malformed.push(Malformed {
            position: self.open,
            length: pos - self.open,
            reason,
        });
        self.emit_raw(self.open, pos);
        self.state = State::Text;
        Step::Reprocess
    }

    fn emit_raw(&mut self, start: usize, end: usize) {
        if start == end {
            return;
        }
        self.literal.push_str(&self.text[start..end]);
        self.extend_literal_to(start, end);
    }

    fn close_placeholder(&mut self, pos: usize) -> Step {
        match self.build_placeholder(pos + 1) {
            Ok(placeholder) => {
                self.parts.push(Part::Placeholder(placeholder));
                self.state = State::Text;
                Step::Consumed
            }
            Err(reason) => self.reject(pos, reason),
        }
    }

    /// Build the placeholder spanning `self.open..end` from collected fields.
    fn build_placeholder(&mut self, end: usize) -> Result<Placeholder, MalformedReason> {
        if self.index.is_empty() {
            return Err(MalformedReason::EmptyPlaceholder);
        }
        let index: usize = self
            .index
            .parse()
            .map_err(|_| MalformedReason::InvalidIndex)?;
        let alignment: i64 = if self.alignment.is_empty() {
            0
        } else {
            self.alignment
                .parse()
                .map_err(|_| MalformedReason::InvalidAlignment)?
        };

        let mut expression = Expression::argument(index);
        if let Some(format) = self.format.take() {
            expression = Expression::call(
                FORMAT_FUNCTION,
                vec![expression, Expression::constant(format)],
            );
        }
        if alignment != 0 {
            expression = Expression::call(
                ALIGNMENT_FUNCTION,
                vec![expression, Expression::constant(alignment)],
            );
        }

        let placeholder_index = self.placeholder_count;
        self.placeholder_count += 1;
        Ok(Placeholder {
            part_index: 0,
            position: self.open,
            length: end - self.open,
            placeholder_index,
            plural_category: (!self.category.is_empty()).then(|| self.category.clone()),
            expression,
        })
    }

    /// Complete whatever is open at end of text.
    fn finish(mut self) -> ParsedTemplate {
        let end = self.text.len();
        if self.state != State::Text {
            let salvageable = matches!(
                self.state,
                State::Index | State::Alignment | State::Format
            );
            let salvaged = if salvageable {
                self.build_placeholder(end).ok()
            } else {
                None
            };
            self.malformed.push(Malformed {
                position: self.open,
                length: end - self.open,
                reason: MalformedReason::Unterminated,
            });
            match salvaged {
                Some(placeholder) => self.parts.push(Part::Placeholder(placeholder)),
                None => self.emit_raw(self.open, end),
            }
        }

        let mut placeholders = Vec::new();
        for (i, part) in self.parts.iter_mut().enumerate() {
            match part {
                Part::Text(t) => t.part_index = i,
                Part::Placeholder(p) => {
                    p.part_index = i;
                    placeholders.push(i);
                }
            }
        }

        let status = if self.malformed.is_empty() {
            Status::new().with(FormatStatus::Ok)
        } else {
            Status::new().with(FormatStatus::ErrorMalformed)
        };
        ParsedTemplate {
            parts: self.parts,
            placeholders,
            malformed: self.malformed,
            status,
        }
    }
}
