pub mod interpreter;
pub mod line;
pub mod localizer;
pub mod parser;
pub mod types;

#[cfg(feature = "global-culture")]
pub mod global;

pub use interpreter::{
    EvalContext, EvalError, FunctionRegistry, MemorySource, ResolveResult, SourceError,
    compute_suggestions, evaluate, resolve,
};
pub use line::{Line, LinePart};
pub use localizer::{Localizer, TEMPLATE_CACHE_LIMIT};
pub use parser::{ParseError, parse_key, parse_template};
pub use types::{
    Arguments, BinaryOp, Expression, FormatStatus, LineKey, LocaleId, LocaleStatus, ObjectValue,
    Part, PluralCase, PluralityStatus, ResolveStatus, Severity, Status, StatusAxis, Template,
    TrinaryOp, UnaryOp, Value,
};

/// Creates positional [`Arguments`] from a list of values.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings and
/// options can be mixed.
///
/// # Example
///
/// ```
/// use lineloc::{Value, args};
///
/// let a = args![5, "apples", 2.5];
/// assert_eq!(a.positional().len(), 3);
/// assert_eq!(a.positional()[0], Value::Integer(5));
/// ```
#[macro_export]
macro_rules! args {
    [] => {
        $crate::Arguments::new()
    };
    [ $($value:expr),+ $(,)? ] => {
        $crate::Arguments::from(::std::vec![
            $( ::std::convert::Into::<$crate::Value>::into($value) ),+
        ])
    };
}

/// Creates a `HashMap<String, Value>` of named arguments.
///
/// # Example
///
/// ```
/// use lineloc::{Arguments, params};
///
/// let named = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(named.len(), 2);
/// assert_eq!(named["count"].as_integer(), Some(3));
///
/// let arguments = Arguments::new().with_named(named);
/// assert_eq!(arguments.named()["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
