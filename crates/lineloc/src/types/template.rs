use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::OnceLock;

use super::{Expression, FormatStatus, Status};
use crate::parser::build_template;

/// A literal run of template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPart {
    /// Index of this part within [`Template::parts`].
    pub part_index: usize,
    /// Byte offset of the run in the source text.
    pub position: usize,
    /// Byte length of the run in the source text.
    pub length: usize,
    /// The literal text with escapes removed.
    pub text: String,
}

/// A `{...}` region of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Index of this part within [`Template::parts`].
    pub part_index: usize,
    /// Byte offset of the opening brace in the source text.
    pub position: usize,
    /// Byte length including both braces.
    pub length: usize,
    /// Evaluation order, counted in order of appearance.
    pub placeholder_index: usize,
    /// Plural category name (`plural` in `{plural:0}`).
    pub plural_category: Option<String>,
    pub expression: Expression,
}

/// One element of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(TextPart),
    Placeholder(Placeholder),
}

impl Part {
    pub fn part_index(&self) -> usize {
        match self {
            Part::Text(t) => t.part_index,
            Part::Placeholder(p) => p.part_index,
        }
    }

    /// Byte span of this part in the source text.
    pub fn span(&self) -> (usize, usize) {
        match self {
            Part::Text(t) => (t.position, t.length),
            Part::Placeholder(p) => (p.position, p.length),
        }
    }

    pub fn as_text(&self) -> Option<&TextPart> {
        match self {
            Part::Text(t) => Some(t),
            Part::Placeholder(_) => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Part::Placeholder(p) => Some(p),
            Part::Text(_) => None,
        }
    }
}

/// Why a placeholder was rejected and rendered as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// `{}` or `{category:}`.
    EmptyPlaceholder,
    /// A character that is not valid at its position.
    UnexpectedCharacter(char),
    /// The argument index does not fit an integer.
    InvalidIndex,
    /// The alignment is not a valid signed integer.
    InvalidAlignment,
    /// The text ended inside a placeholder.
    Unterminated,
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MalformedReason::EmptyPlaceholder => write!(f, "placeholder has no argument index"),
            MalformedReason::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
            MalformedReason::InvalidIndex => write!(f, "argument index is not a valid integer"),
            MalformedReason::InvalidAlignment => write!(f, "alignment is not a valid integer"),
            MalformedReason::Unterminated => write!(f, "placeholder is not closed"),
        }
    }
}

/// A malformed placeholder diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Malformed {
    /// Byte offset of the opening brace.
    pub position: usize,
    /// Byte length of the rejected region.
    pub length: usize,
    pub reason: MalformedReason,
}

/// The result of scanning a template's text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTemplate {
    pub parts: Vec<Part>,
    /// Indexes into `parts` of the placeholders, in order of appearance.
    pub placeholders: Vec<usize>,
    pub malformed: Vec<Malformed>,
    pub status: Status,
}

/// A localized template string and its lazily parsed parts.
///
/// Parsing happens on first access without holding a lock. Concurrent first
/// readers may each parse, and the first result is published once; the parsed
/// form is a pure function of the text, so every reader observes the same
/// parts.
///
/// # Example
///
/// ```
/// use lineloc::Template;
///
/// let template = Template::new("{1} and {0}");
/// let placeholders = template.placeholders();
/// assert_eq!(placeholders.len(), 2);
/// assert_eq!(placeholders[0].expression.argument_index(), Some(1));
/// assert_eq!(placeholders[0].placeholder_index, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    text: Option<String>,
    parsed: OnceLock<ParsedTemplate>,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            parsed: OnceLock::new(),
        }
    }

    /// A template without text. Its status is `Format.FailedNull`.
    pub fn null() -> Self {
        Self {
            text: None,
            parsed: OnceLock::new(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.text.is_none()
    }

    fn parsed(&self) -> &ParsedTemplate {
        if let Some(parsed) = self.parsed.get() {
            return parsed;
        }
        // Racing first readers each parse outside the cell. The first `set`
        // publishes and the others drop an identical copy.
        let _ = self.parsed.set(build_template(self.text.as_deref()));
        self.parsed.get_or_init(|| build_template(self.text.as_deref()))
    }

    pub fn parts(&self) -> &[Part] {
        &self.parsed().parts
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let parsed = self.parsed();
        parsed
            .placeholders
            .iter()
            .filter_map(|&i| parsed.parts.get(i).and_then(Part::as_placeholder))
            .collect()
    }

    /// True when any placeholder carries a plural category.
    pub fn has_plural_placeholders(&self) -> bool {
        self.placeholders()
            .iter()
            .any(|p| p.plural_category.is_some())
    }

    pub fn malformed(&self) -> &[Malformed] {
        &self.parsed().malformed
    }

    /// Parse outcome, carried on the Format axis.
    pub fn status(&self) -> Status {
        self.parsed().status
    }

    pub fn is_malformed(&self) -> bool {
        self.status().format() == FormatStatus::ErrorMalformed
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::new(text)
    }
}

impl From<String> for Template {
    fn from(text: String) -> Self {
        Template::new(text)
    }
}
