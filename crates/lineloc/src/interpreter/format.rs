//! Locale-aware string conversion and the standard numeric format specs.
//!
//! Supported specs are `N` (grouped number), `F` (fixed point), `D`
//! (zero-padded integer), `X`/`x` (hexadecimal), `P` (percent), `E`/`e`
//! (scientific) and `G` (general), each followed by an optional precision.
//! Unrecognized specs fall back to the default string form.

use unicode_segmentation::UnicodeSegmentation;
use winnow::ascii::dec_uint;
use winnow::combinator::opt;
use winnow::prelude::*;
use winnow::token::any;

use crate::interpreter::context::EvalContext;
use crate::types::{LocaleId, Value};

/// Custom per-value formatting, consulted before any built-in conversion.
pub trait FormatProvider: Send + Sync {
    /// Format `value`, or return `None` to defer to the built-in conversion.
    fn format(&self, value: &Value, format: Option<&str>, locale: &LocaleId) -> Option<String>;
}

/// Decimal and group separators for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: &'static str,
    pub group: &'static str,
}

const POINT_COMMA: NumberSymbols = NumberSymbols {
    decimal: ".",
    group: ",",
};
const COMMA_POINT: NumberSymbols = NumberSymbols {
    decimal: ",",
    group: ".",
};
const COMMA_SPACE: NumberSymbols = NumberSymbols {
    decimal: ",",
    group: "\u{a0}",
};

impl NumberSymbols {
    /// Separators for `locale`'s language. Unknown languages and the root
    /// locale use `.` and `,`.
    pub fn for_locale(locale: &LocaleId) -> Self {
        match locale.language().as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el" | "ro" => COMMA_POINT,
            "fr" | "ru" | "uk" | "pl" | "cs" | "sv" | "nb" | "fi" | "bg" | "sk" => COMMA_SPACE,
            _ => POINT_COMMA,
        }
    }
}

/// Default string form of a value in the context's locale.
pub fn display_string(value: &Value, ctx: &EvalContext<'_>) -> String {
    format_value(value, None, ctx)
}

/// Convert a value to a string, honoring an optional format spec.
///
/// Consults the context's [`FormatProvider`] first, then the value's own
/// locale-aware conversion, then the default string form.
pub fn format_value(value: &Value, format: Option<&str>, ctx: &EvalContext<'_>) -> String {
    let locale = ctx.locale();
    if let Some(provider) = ctx.format_provider()
        && let Some(text) = provider.format(value, format, locale)
    {
        return text;
    }

    let symbols = NumberSymbols::for_locale(locale);
    match value {
        Value::Object(object) => object
            .to_locale_string(format, locale)
            .unwrap_or_else(|| object.to_string()),
        Value::Integer(_) | Value::Float(_) => format
            .and_then(|spec| format_number(value, spec, symbols))
            .unwrap_or_else(|| default_number(value, symbols)),
        Value::List(items) => items
            .iter()
            .map(|item| format_value(item, format, ctx))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Bool(_) | Value::String(_) => value.to_string(),
    }
}

fn default_number(value: &Value, symbols: NumberSymbols) -> String {
    match value {
        Value::Float(f) if f.is_finite() => f.to_string().replacen('.', symbols.decimal, 1),
        _ => value.to_string(),
    }
}

/// Widest padding [`align`] produces.
pub const MAX_ALIGNMENT: usize = 4096;

/// Pad `text` to `width` grapheme clusters. Positive widths right-align,
/// negative widths left-align. Widths are capped at [`MAX_ALIGNMENT`].
pub fn align(text: &str, width: i64) -> String {
    let target = usize::try_from(width.unsigned_abs())
        .unwrap_or(MAX_ALIGNMENT)
        .min(MAX_ALIGNMENT);
    let length = text.graphemes(true).count();
    if length >= target {
        return text.to_string();
    }
    let padding = " ".repeat(target - length);
    if width < 0 {
        format!("{text}{padding}")
    } else {
        format!("{padding}{text}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericKind {
    Number,
    Fixed,
    Decimal,
    Hex { upper: bool },
    Percent,
    Exponential { upper: bool },
    General,
}

impl NumericKind {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'N' | 'n' => NumericKind::Number,
            'F' | 'f' => NumericKind::Fixed,
            'D' | 'd' => NumericKind::Decimal,
            'X' => NumericKind::Hex { upper: true },
            'x' => NumericKind::Hex { upper: false },
            'P' | 'p' => NumericKind::Percent,
            'E' => NumericKind::Exponential { upper: true },
            'e' => NumericKind::Exponential { upper: false },
            'G' | 'g' => NumericKind::General,
            _ => return None,
        })
    }
}

/// Precisions above this are clamped.
const MAX_PRECISION: usize = 99;

fn numeric_spec(input: &mut &str) -> ModalResult<(NumericKind, Option<u32>)> {
    (any.verify_map(NumericKind::from_char), opt(dec_uint)).parse_next(input)
}

/// Format a number with a standard spec, or `None` if the spec does not apply.
fn format_number(value: &Value, spec: &str, symbols: NumberSymbols) -> Option<String> {
    let (kind, precision) = numeric_spec.parse(spec).ok()?;
    let precision = precision.map(|p| usize::try_from(p).unwrap_or(MAX_PRECISION).min(MAX_PRECISION));

    match (kind, value) {
        (NumericKind::Number, Value::Integer(n)) => Some(integer_with_decimals(
            *n,
            precision.unwrap_or(2),
            true,
            symbols,
        )),
        (NumericKind::Fixed, Value::Integer(n)) => Some(integer_with_decimals(
            *n,
            precision.unwrap_or(2),
            false,
            symbols,
        )),
        (NumericKind::Number, Value::Float(f)) => {
            fixed_point(*f, precision.unwrap_or(2), true, symbols)
        }
        (NumericKind::Fixed, Value::Float(f)) => {
            fixed_point(*f, precision.unwrap_or(2), false, symbols)
        }
        (NumericKind::Decimal, Value::Integer(n)) => {
            let digits = format!("{:0width$}", n.unsigned_abs(), width = precision.unwrap_or(0));
            Some(if *n < 0 { format!("-{digits}") } else { digits })
        }
        (NumericKind::Hex { upper }, Value::Integer(n)) => {
            let width = precision.unwrap_or(0);
            Some(if upper {
                format!("{n:0width$X}")
            } else {
                format!("{n:0width$x}")
            })
        }
        (NumericKind::Percent, _) => {
            let f = value.as_float()? * 100.0;
            let mut text = fixed_point(f, precision.unwrap_or(2), true, symbols)?;
            text.push('%');
            Some(text)
        }
        (NumericKind::Exponential { upper }, _) => {
            exponential(value.as_float()?, precision.unwrap_or(6), upper, symbols)
        }
        (NumericKind::General, Value::Float(f)) => match precision {
            Some(p) if p > 0 => general(*f, p, symbols),
            _ => Some(default_number(value, symbols)),
        },
        (NumericKind::General, Value::Integer(_)) => Some(value.to_string()),
        _ => None,
    }
}

fn group_digits(digits: &str, group: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * group.len());
    let leading = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - leading) % 3 == 0 {
            grouped.push_str(group);
        }
        grouped.push(c);
    }
    grouped
}

fn integer_with_decimals(n: i64, precision: usize, grouped: bool, symbols: NumberSymbols) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut text = if grouped {
        group_digits(&digits, symbols.group)
    } else {
        digits
    };
    if precision > 0 {
        text.push_str(symbols.decimal);
        text.push_str(&"0".repeat(precision));
    }
    if n < 0 {
        text.insert(0, '-');
    }
    text
}

fn fixed_point(f: f64, precision: usize, grouped: bool, symbols: NumberSymbols) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    let rounded = format!("{:.*}", precision, f.abs());
    let (int_part, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
    let mut text = if grouped {
        group_digits(int_part, symbols.group)
    } else {
        int_part.to_string()
    };
    if !fraction.is_empty() {
        text.push_str(symbols.decimal);
        text.push_str(fraction);
    }
    // No sign on values that round to zero.
    if f < 0.0 && rounded.chars().any(|c| matches!(c, '1'..='9')) {
        text.insert(0, '-');
    }
    Some(text)
}

/// Scientific notation with a signed, at least three digit exponent:
/// `1.234560E+003`.
fn exponential(f: f64, precision: usize, upper: bool, symbols: NumberSymbols) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    let raw = format!("{:.*e}", precision, f);
    let (mantissa, exponent) = raw.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    let sign = if exponent < 0 { '-' } else { '+' };
    let marker = if upper { 'E' } else { 'e' };
    Some(format!(
        "{}{marker}{sign}{:03}",
        mantissa.replacen('.', symbols.decimal, 1),
        exponent.unsigned_abs()
    ))
}

/// Shortest of fixed and scientific notation at `digits` significant digits.
fn general(f: f64, digits: usize, symbols: NumberSymbols) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    if f == 0.0 {
        return Some("0".to_string());
    }
    let raw = format!("{:.*e}", digits - 1, f);
    let (_, exponent) = raw.split_once('e')?;
    let exponent: i64 = exponent.parse().ok()?;
    let significant = i64::try_from(digits).ok()?;
    if exponent < -5 || exponent >= significant {
        let text = exponential(f, digits - 1, true, symbols)?;
        return Some(trim_fraction(&text, symbols.decimal));
    }
    let decimals = usize::try_from(significant - 1 - exponent).unwrap_or(0);
    let text = fixed_point(f, decimals, false, symbols)?;
    Some(trim_fraction(&text, symbols.decimal))
}

/// Drop trailing fractional zeros (and a bare separator) before any exponent.
fn trim_fraction(text: &str, decimal: &str) -> String {
    let (number, exponent) = match text.find(['E', 'e']) {
        Some(pos) => text.split_at(pos),
        None => (text, ""),
    };
    if !number.contains(decimal) {
        return text.to_string();
    }
    let trimmed = number.trim_end_matches('0');
    let trimmed = trimmed.strip_suffix(decimal).unwrap_or(trimmed);
    format!("{trimmed}{exponent}")
}
