use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use super::LocaleId;

/// A host object passed as an argument value.
///
/// Objects take part in string coercion through [`ObjectValue::to_locale_string`]
/// and in the `In` operator through [`ObjectValue::elements`]. Anything else
/// falls back to the object's `Display` form.
pub trait ObjectValue: Debug + Display + Send + Sync {
    /// Locale-aware string conversion, optionally honoring a format spec.
    fn to_locale_string(&self, format: Option<&str>, locale: &LocaleId) -> Option<String> {
        let _ = (format, locale);
        None
    }

    /// The elements of this object when it is a collection.
    fn elements(&self) -> Option<Vec<Value>> {
        None
    }
}

/// A runtime value produced by placeholder evaluation or passed as an argument.
///
/// # Example
///
/// ```
/// use lineloc::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let missing: Value = Option::<i64>::None.into();
///
/// assert_eq!(count.as_integer(), Some(42));
/// assert_eq!(name.as_str(), Some("Alice"));
/// assert!(missing.is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value. Renders as the empty string.
    #[default]
    Null,

    Bool(bool),

    /// An integer number (used for plural selection).
    Integer(i64),

    /// A floating-point number.
    Float(f64),

    String(String),

    /// A list of values, usable as the right operand of `In`.
    List(Vec<Value>),

    /// An opaque host object.
    Object(Arc<dyn ObjectValue>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric value used for plural rule evaluation.
    ///
    /// Integers and floats are used as-is; strings are accepted when they parse
    /// as a number. Everything else has no plural value.
    pub fn as_plural_number(&self) -> Option<Value> {
        match self {
            Value::Integer(_) => Some(self.clone()),
            Value::Float(f) if f.is_finite() => Some(self.clone()),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(n) = s.parse::<i64>() {
                    Some(Value::Integer(n))
                } else {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(Value::Float)
                }
            }
            _ => None,
        }
    }

    /// Name of this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The default (culture-invariant) string form.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(o) => write!(f, "{o}"),
        }
    }
}

// From implementations for common types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Arc<dyn ObjectValue>> for Value {
    fn from(o: Arc<dyn ObjectValue>) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Positional and named argument values for one resolution.
///
/// Built with [`args!`](crate::args) for positional values and extended with
/// [`Arguments::with_named`] for `ArgumentByName` lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    named: HashMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named(&self) -> &HashMap<String, Value> {
        &self.named
    }

    /// Append a positional argument.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Attach named arguments.
    pub fn with_named(mut self, named: HashMap<String, Value>) -> Self {
        self.named = named;
        self
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            named: HashMap::new(),
        }
    }
}

impl From<HashMap<String, Value>> for Arguments {
    fn from(named: HashMap<String, Value>) -> Self {
        Self {
            positional: Vec::new(),
            named,
        }
    }
}
