//! The lineloc interpreter: expression evaluation and line resolution.
//!
//! Evaluation turns a placeholder [`Expression`](crate::Expression) into a
//! [`Value`](crate::Value). Resolution walks a [`Line`](crate::Line), finds
//! the template that applies across culture policy, value sources and inline
//! maps, renders it and selects plural variants.

mod context;
mod culture;
mod error;
mod evaluator;
mod format;
mod functions;
mod logger;
mod permutation;
mod plural;
mod registry;
mod resolver;

pub use context::{EvalContext, ResolutionContext};
pub use culture::{CulturePolicy, FallbackCulturePolicy, FixedCulturePolicy};
pub use error::{EvalError, SourceError, compute_suggestions};
pub use evaluator::{binary, evaluate, truthy, unary};
pub use format::{FormatProvider, MAX_ALIGNMENT, NumberSymbols, align, display_string, format_value};
pub use functions::{
    BinaryFn, Function, FunctionRegistry, FunctionTable, NullaryFn, TernaryFn, UnaryFn,
    VariadicFn, call_function, default_functions,
};
pub use logger::{ResolutionLogger, TracingLogger};
pub use permutation::{Permutation, plural_permutations};
pub use plural::{CARDINAL, CldrPluralRules, ORDINAL, PLURAL, PluralRules};
pub use registry::{Inlines, MemorySource, ValueSource};
pub use resolver::{ResolveResult, resolve};
