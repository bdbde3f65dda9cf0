//! CLI command implementations.

mod eval;
mod parse;
mod resolve;

pub use eval::{run_eval, EvalArgs};
pub use parse::{run_parse, ParseArgs};
pub use resolve::{run_resolve, ResolveArgs};

use lineloc::{Arguments, LocaleId, Value};
use serde::Serialize;

/// Culture selection shared by `eval` and `resolve`.
#[derive(Debug, clap::Args)]
pub struct CultureArgs {
    /// Culture to resolve in (e.g. en-US, fi, de-AT). Empty for the root locale
    #[arg(long, env = "LINELOC_CULTURE", default_value = "")]
    pub culture: String,

    /// Do not fall back through the culture's parent locales
    #[arg(long)]
    pub no_fallback: bool,
}

impl CultureArgs {
    pub fn locale(&self) -> LocaleId {
        LocaleId::new(self.culture.as_str())
    }
}

/// Read a command-line argument as an integer, float, boolean or string.
pub fn parse_value(s: &str) -> Value {
    if let Ok(n) = s.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::from(f);
    }
    match s {
        "true" => Value::from(true),
        "false" => Value::from(false),
        "null" => Value::Null,
        _ => Value::from(s),
    }
}

pub fn arguments(raw: &[String]) -> Arguments {
    Arguments::from(raw.iter().map(|s| parse_value(s)).collect::<Vec<_>>())
}

/// Parse a `name=value` pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid entry '{s}': expected key=text"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("-2.5"), Value::Float(-2.5));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("apples"), Value::from("apples"));
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("Key:hello = Hi {0}"),
            Ok(("Key:hello".to_string(), " Hi {0}".to_string()))
        );
        assert_eq!(
            parse_key_val("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_key_val("no separator").is_err());
    }
}
