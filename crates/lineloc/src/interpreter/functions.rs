//! Function tables for placeholder `Call` expressions.
//!
//! Functions are registered by name with fixed-arity overloads (zero to three
//! arguments) and an optional variadic fallback. Calls resolve first against
//! the table configured on the line, then against [`default_functions`].

use std::collections::HashMap;
use std::sync::LazyLock;

use icu_casemap::CaseMapper;
use icu_locale_core::{LanguageIdentifier, langid};

use crate::interpreter::{EvalError, compute_suggestions};
use crate::interpreter::context::EvalContext;
use crate::interpreter::format::{align, display_string, format_value};
use crate::parser::{ALIGNMENT_FUNCTION, FORMAT_FUNCTION};
use crate::types::{LocaleId, Value};

pub type NullaryFn = fn(&EvalContext<'_>) -> Result<Value, EvalError>;
pub type UnaryFn = fn(&EvalContext<'_>, &Value) -> Result<Value, EvalError>;
pub type BinaryFn = fn(&EvalContext<'_>, &Value, &Value) -> Result<Value, EvalError>;
pub type TernaryFn = fn(&EvalContext<'_>, &Value, &Value, &Value) -> Result<Value, EvalError>;
pub type VariadicFn = fn(&EvalContext<'_>, &[Value]) -> Result<Value, EvalError>;

/// One overload of a named function.
#[derive(Clone, Copy)]
pub enum Function {
    Nullary(NullaryFn),
    Unary(UnaryFn),
    Binary(BinaryFn),
    Ternary(TernaryFn),
    /// Accepts any number of arguments.
    Variadic(VariadicFn),
}

impl Function {
    /// Fixed arity, or `None` for variadic functions.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Function::Nullary(_) => Some(0),
            Function::Unary(_) => Some(1),
            Function::Binary(_) => Some(2),
            Function::Ternary(_) => Some(3),
            Function::Variadic(_) => None,
        }
    }

    /// Invoke with already evaluated arguments.
    pub fn invoke(
        &self,
        name: &str,
        ctx: &EvalContext<'_>,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        match (self, args) {
            (Function::Nullary(f), []) => f(ctx),
            (Function::Unary(f), [a]) => f(ctx, a),
            (Function::Binary(f), [a, b]) => f(ctx, a, b),
            (Function::Ternary(f), [a, b, c]) => f(ctx, a, b, c),
            (Function::Variadic(f), args) => f(ctx, args),
            _ => Err(EvalError::InvalidArgument {
                function: name.to_string(),
                message: format!("expects {} argument(s), got {}", self.arity().unwrap_or(0), args.len()),
            }),
        }
    }
}

/// A table of named functions.
pub trait FunctionTable: Send + Sync {
    /// The overload of `name` that accepts `arity` arguments.
    fn function(&self, name: &str, arity: usize) -> Option<Function>;

    /// Names known to this table, used for typo suggestions.
    fn names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Registry of named function overloads.
///
/// # Example
///
/// ```
/// use lineloc::interpreter::{Function, FunctionRegistry, FunctionTable};
/// use lineloc::Value;
///
/// let mut functions = FunctionRegistry::new();
/// functions.register("Twice", Function::Unary(|_, v| {
///     Ok(Value::Integer(v.as_integer().unwrap_or(0) * 2))
/// }));
/// assert!(functions.function("Twice", 1).is_some());
/// assert!(functions.function("Twice", 2).is_none());
/// ```
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Vec<Function>>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overload, replacing an existing one with the same arity.
    pub fn register(&mut self, name: impl Into<String>, function: Function) -> &mut Self {
        let overloads = self.functions.entry(name.into()).or_default();
        overloads.retain(|f| f.arity() != function.arity());
        overloads.push(function);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl FunctionTable for FunctionRegistry {
    /// Exact arity first, then a variadic overload.
    fn function(&self, name: &str, arity: usize) -> Option<Function> {
        let overloads = self.functions.get(name)?;
        overloads
            .iter()
            .find(|f| f.arity() == Some(arity))
            .or_else(|| overloads.iter().find(|f| f.arity().is_none()))
            .copied()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}

static DEFAULT_FUNCTIONS: LazyLock<FunctionRegistry> = LazyLock::new(|| {
    let mut functions = FunctionRegistry::new();
    functions
        .register(FORMAT_FUNCTION, Function::Binary(format_function))
        .register(FORMAT_FUNCTION, Function::Unary(to_string_function))
        .register(ALIGNMENT_FUNCTION, Function::Binary(alignment_function))
        .register("ToString", Function::Unary(to_string_function))
        .register("ToUpper", Function::Unary(to_upper_function))
        .register("ToLower", Function::Unary(to_lower_function));
    functions
});

/// The built-in function table: `Format`, `Alignment`, `ToString`,
/// `ToUpper` and `ToLower`.
pub fn default_functions() -> &'static FunctionRegistry {
    &DEFAULT_FUNCTIONS
}

/// Resolve `name` for `args.len()` arguments and invoke it.
pub fn call_function(
    name: &str,
    args: &[Value],
    ctx: &EvalContext<'_>,
) -> Result<Value, EvalError> {
    let arity = args.len();
    let function = ctx
        .functions()
        .and_then(|table| table.function(name, arity))
        .or_else(|| default_functions().function(name, arity));
    match function {
        Some(function) => function.invoke(name, ctx, args),
        None => {
            let mut available = default_functions().names();
            if let Some(table) = ctx.functions() {
                available.extend(table.names());
            }
            Err(EvalError::UnknownFunction {
                name: name.to_string(),
                arity,
                suggestions: compute_suggestions(name, &available),
            })
        }
    }
}

fn format_function(ctx: &EvalContext<'_>, value: &Value, spec: &Value) -> Result<Value, EvalError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let spec = match spec {
        Value::Null => None,
        Value::String(s) => Some(s.as_str()),
        other => {
            return Err(EvalError::InvalidArgument {
                function: FORMAT_FUNCTION.to_string(),
                message: format!("format spec must be a string, got {}", other.type_name()),
            });
        }
    };
    Ok(Value::String(format_value(value, spec, ctx)))
}

fn to_string_function(ctx: &EvalContext<'_>, value: &Value) -> Result<Value, EvalError> {
    Ok(Value::String(display_string(value, ctx)))
}

fn alignment_function(
    ctx: &EvalContext<'_>,
    value: &Value,
    width: &Value,
) -> Result<Value, EvalError> {
    let width = width
        .as_integer()
        .ok_or_else(|| EvalError::InvalidArgument {
            function: ALIGNMENT_FUNCTION.to_string(),
            message: format!("width must be an integer, got {}", width.type_name()),
        })?;
    Ok(Value::String(align(&display_string(value, ctx), width)))
}

fn case_language(locale: &LocaleId) -> LanguageIdentifier {
    LanguageIdentifier::try_from_str(locale.as_str()).unwrap_or(langid!("und"))
}

fn to_upper_function(ctx: &EvalContext<'_>, value: &Value) -> Result<Value, EvalError> {
    let text = display_string(value, ctx);
    let langid = case_language(ctx.locale());
    Ok(Value::String(
        CaseMapper::new().uppercase_to_string(&text, &langid).to_string(),
    ))
}

fn to_lower_function(ctx: &EvalContext<'_>, value: &Value) -> Result<Value, EvalError> {
    let text = display_string(value, ctx);
    let langid = case_language(ctx.locale());
    Ok(Value::String(
        CaseMapper::new().lowercase_to_string(&text, &langid).to_string(),
    ))
}
