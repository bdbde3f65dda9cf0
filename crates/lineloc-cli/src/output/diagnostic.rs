//! Miette diagnostics for template and key errors.

use lineloc::types::{Malformed, MalformedReason};
use lineloc::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A malformed placeholder, labelled in its template text.
#[derive(Debug, Error, Diagnostic)]
#[error("malformed placeholder: {reason}")]
#[diagnostic(code(lineloc::template::malformed), severity(Warning))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("rendered as literal text")]
    span: SourceSpan,

    reason: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    pub fn from_malformed(template: &str, malformed: &Malformed) -> Self {
        let help = match malformed.reason {
            MalformedReason::Unterminated => Some("close the placeholder with `}`".to_string()),
            MalformedReason::EmptyPlaceholder => {
                Some("placeholders need an argument index, e.g. `{0}`".to_string())
            }
            MalformedReason::UnexpectedCharacter('{' | '}') => {
                Some(r"escape literal braces as `\{` and `\}`".to_string())
            }
            _ => None,
        };
        // Clamp the span so miette never reads past the source.
        let offset = malformed.position.min(template.len());
        let length = malformed.length.max(1).min(template.len() - offset);
        TemplateDiagnostic {
            src: NamedSource::new("<template>", template.to_string()),
            span: (offset, length).into(),
            reason: malformed.reason.to_string(),
            help,
        }
    }
}

/// A key string that failed to parse.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid key: {message}")]
#[diagnostic(code(lineloc::key::syntax))]
pub struct KeyDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl KeyDiagnostic {
    pub fn from_parse_error(name: &str, key: &str, err: &ParseError) -> Self {
        let (column, help) = match err {
            ParseError::Syntax { column, .. } | ParseError::EmptyName { column } => (*column, None),
            ParseError::DanglingParameter { .. } => (
                key.len() + 1,
                Some("keys are `name:value` pairs, e.g. `Key:hello`".to_string()),
            ),
        };
        let offset = column.saturating_sub(1).min(key.len());
        KeyDiagnostic {
            src: NamedSource::new(name, key.to_string()),
            span: (offset, usize::from(offset < key.len())).into(),
            message: err.to_string(),
            help,
        }
    }
}
