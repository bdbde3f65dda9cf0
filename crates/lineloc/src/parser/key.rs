//! Line key parser using winnow.
//!
//! Parses `name:value` pairs separated by `:`, with `\` escaping the next
//! character. A `Culture` parameter becomes the key's culture.

use winnow::combinator::{alt, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::token::{any, none_of};

use super::error::ParseError;
use crate::types::LineKey;

/// Parse the textual form of a key.
pub fn parse_key(input: &str) -> Result<LineKey, ParseError> {
    if input.is_empty() {
        return Ok(LineKey::new());
    }

    let mut remaining = input;
    let segments = match key_segments(&mut remaining) {
        Ok(segments) => segments,
        Err(e) => {
            return Err(ParseError::Syntax {
                column: column_of(input, remaining),
                message: format!("parse error: {e}"),
            });
        }
    };
    if !remaining.is_empty() {
        return Err(ParseError::Syntax {
            column: column_of(input, remaining),
            message: format!(
                "unexpected character: '{}'",
                remaining.chars().next().unwrap_or('?')
            ),
        });
    }

    let mut key = LineKey::new();
    let mut column = 1;
    let mut pairs = segments.into_iter();
    while let Some((name, raw_name)) = pairs.next() {
        if name.is_empty() {
            return Err(ParseError::EmptyName { column });
        }
        let Some((value, raw_value)) = pairs.next() else {
            return Err(ParseError::DanglingParameter { name });
        };
        column += raw_name.len() + raw_value.len() + 2;
        key.push_parameter(name, value);
    }
    Ok(key)
}

/// 1-based column of `remaining` within `original`.
fn column_of(original: &str, remaining: &str) -> usize {
    original.len() - remaining.len() + 1
}

fn key_segments<'i>(input: &mut &'i str) -> ModalResult<Vec<(String, &'i str)>> {
    separated(1.., segment.with_taken(), ':').parse_next(input)
}

/// Parse one name or value, unescaping as it goes.
fn segment(input: &mut &str) -> ModalResult<String> {
    repeat(0.., segment_char).parse_next(input)
}

fn segment_char(input: &mut &str) -> ModalResult<char> {
    alt((preceded('\\', any), none_of([':', '\\']))).parse_next(input)
}
