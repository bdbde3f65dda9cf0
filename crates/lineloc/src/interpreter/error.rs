//! Error types for the lineloc interpreter.

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur while populating a value source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The textual key could not be parsed.
    #[error("invalid key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: ParseError,
    },

    /// Two different keys produce the same 64-bit id.
    #[error("key id collision: '{existing}' and '{key}' produce the same hash")]
    IdCollision { existing: String, key: String },

    /// An entry line without a value.
    #[error("entry '{key}' has no value")]
    MissingValue { key: String },
}

/// A hard failure during placeholder evaluation.
///
/// These are configuration errors rather than data errors; the resolution
/// pipeline folds them into the result status instead of returning them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// No function with this name and arity in the caller or default table.
    #[error("unknown function '{name}' with {arity} argument(s){}", did_you_mean(suggestions))]
    UnknownFunction {
        name: String,
        arity: usize,
        suggestions: Vec<String>,
    },

    /// A binary operator with operand types that have no coercion rule.
    #[error("operator '{op}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// A unary operator applied to an unsupported operand type.
    #[error("operator '{op}' cannot be applied to {operand}")]
    InvalidOperand {
        op: &'static str,
        operand: &'static str,
    },

    /// A value that cannot be read as a number.
    #[error("cannot convert {value:?} to a number")]
    NotNumeric { value: String },

    /// A value that cannot be read as a boolean.
    #[error("cannot convert {type_name} to a boolean")]
    NotBoolean { type_name: &'static str },

    /// The right operand of `in` is not a collection.
    #[error("{type_name} is not iterable")]
    NotIterable { type_name: &'static str },

    #[error("division by zero")]
    DivideByZero,

    #[error("arithmetic overflow in '{op}'")]
    Overflow { op: &'static str },

    /// A function rejected one of its arguments.
    #[error("function '{function}': {message}")]
    InvalidArgument { function: String, message: String },
}

impl EvalError {
    /// True when the error is an unresolvable function call.
    pub fn is_function_resolve_failure(&self) -> bool {
        matches!(self, EvalError::UnknownFunction { .. })
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions for a name among available names.
///
/// Returns up to three names within Levenshtein distance 1 (names of three
/// characters or fewer) or 2 (longer names), closest first.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort();
    suggestions.dedup();
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
