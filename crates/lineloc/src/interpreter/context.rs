//! Contexts for expression evaluation and line resolution.

use std::collections::HashMap;
use std::sync::Arc;

use crate::interpreter::culture::CulturePolicy;
use crate::interpreter::format::FormatProvider;
use crate::interpreter::functions::FunctionTable;
use crate::interpreter::logger::ResolutionLogger;
use crate::interpreter::plural::PluralRules;
use crate::interpreter::registry::{Inlines, ValueSource};
use crate::line::{Line, LinePart};
use crate::types::{LineKey, LocaleId, ROOT_LOCALE, Status, Template, Value};

/// Everything a placeholder expression can see while it is evaluated.
///
/// # Example
///
/// ```
/// use lineloc::interpreter::{EvalContext, evaluate};
/// use lineloc::{Expression, LocaleId, Value};
///
/// let args = [Value::from(2), Value::from(3)];
/// let locale = LocaleId::new("en");
/// let ctx = EvalContext::new(&args).with_locale(&locale);
/// let sum = Expression::binary(
///     lineloc::BinaryOp::Add,
///     Expression::argument(0),
///     Expression::argument(1),
/// );
/// assert_eq!(evaluate(&sum, &ctx).unwrap(), Value::Integer(5));
/// ```
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    args: &'a [Value],
    named_args: Option<&'a HashMap<String, Value>>,
    functions: Option<&'a dyn FunctionTable>,
    locale: &'a LocaleId,
    format_provider: Option<&'a dyn FormatProvider>,
}

impl<'a> EvalContext<'a> {
    /// Context over positional arguments in the root locale.
    pub fn new(args: &'a [Value]) -> Self {
        Self {
            args,
            named_args: None,
            functions: None,
            locale: &ROOT_LOCALE,
            format_provider: None,
        }
    }

    #[must_use]
    pub fn with_named_args(mut self, named_args: &'a HashMap<String, Value>) -> Self {
        self.named_args = Some(named_args);
        self
    }

    /// Caller-supplied functions, consulted before the default table.
    #[must_use]
    pub fn with_functions(mut self, functions: &'a dyn FunctionTable) -> Self {
        self.functions = Some(functions);
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: &'a LocaleId) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_format_provider(mut self, provider: &'a dyn FormatProvider) -> Self {
        self.format_provider = Some(provider);
        self
    }

    /// Positional argument `index`, if supplied.
    pub fn argument(&self, index: usize) -> Option<&'a Value> {
        self.args.get(index)
    }

    pub fn named_argument(&self, name: &str) -> Option<&'a Value> {
        self.named_args.and_then(|named| named.get(name))
    }

    pub fn args(&self) -> &'a [Value] {
        self.args
    }

    pub fn functions(&self) -> Option<&'a dyn FunctionTable> {
        self.functions
    }

    pub fn locale(&self) -> &'a LocaleId {
        self.locale
    }

    pub fn format_provider(&self) -> Option<&'a dyn FormatProvider> {
        self.format_provider
    }
}

/// Features collected from a line's ancestry for one resolution.
///
/// Scalar features follow first-seen-wins: the node nearest the leaf that
/// carries a feature provides it. Sources, inlines and loggers accumulate.
#[derive(Default)]
pub struct ResolutionContext {
    /// Locale named explicitly by a `Culture` node.
    pub culture: Option<LocaleId>,
    pub culture_policy: Option<Arc<dyn CulturePolicy>>,
    /// Value sources in declaration order.
    pub sources: Vec<Arc<dyn ValueSource>>,
    /// Inline maps in declaration order.
    pub inlines: Vec<Arc<Inlines>>,
    pub plural_rules: Option<Arc<dyn PluralRules>>,
    pub functions: Option<Arc<dyn FunctionTable>>,
    pub format_provider: Option<Arc<dyn FormatProvider>>,
    /// Literal value carried by the line itself.
    pub value: Option<Arc<Template>>,
    pub loggers: Vec<Arc<dyn ResolutionLogger>>,
    pub status: Status,
}

impl ResolutionContext {
    /// Scan a line's ancestry, nearest node first.
    pub fn scan(line: &Line) -> Self {
        let mut context = Self::default();
        context.collect(line);
        // Nearest-first order reversed into declaration order.
        context.sources.reverse();
        context.inlines.reverse();
        context
    }

    /// Fill unset scalar features from an entry line found in a source and
    /// append its loggers. Sources and inlines are not inherited from entries.
    pub fn rescan(&mut self, entry: &Line) {
        let mut entry_features = Self::default();
        entry_features.collect(entry);
        if self.culture_policy.is_none() {
            self.culture_policy = entry_features.culture_policy;
        }
        if self.plural_rules.is_none() {
            self.plural_rules = entry_features.plural_rules;
        }
        if self.functions.is_none() {
            self.functions = entry_features.functions;
        }
        if self.format_provider.is_none() {
            self.format_provider = entry_features.format_provider;
        }
        self.loggers.extend(entry_features.loggers);
    }

    fn collect(&mut self, line: &Line) {
        let mut behind_parameter = false;
        for node in line.ancestry() {
            match node.part() {
                LinePart::Root => {}
                LinePart::Parameter { .. } => behind_parameter = true,
                LinePart::Culture(locale) => {
                    if self.culture.is_none() {
                        self.culture = Some(locale.clone());
                    }
                }
                // A value only belongs to the line when no parameter follows it.
                LinePart::Value(template) => {
                    if self.value.is_none() && !behind_parameter {
                        self.value = Some(Arc::clone(template));
                    }
                }
                LinePart::Source(source) => self.sources.push(Arc::clone(source)),
                LinePart::Inlines(inlines) => self.inlines.push(Arc::clone(inlines)),
                LinePart::CulturePolicy(policy) => {
                    self.culture_policy.get_or_insert_with(|| Arc::clone(policy));
                }
                LinePart::PluralRules(rules) => {
                    self.plural_rules.get_or_insert_with(|| Arc::clone(rules));
                }
                LinePart::Functions(functions) => {
                    self.functions.get_or_insert_with(|| Arc::clone(functions));
                }
                LinePart::FormatProvider(provider) => {
                    self.format_provider.get_or_insert_with(|| Arc::clone(provider));
                }
                LinePart::Logger(logger) => self.loggers.push(Arc::clone(logger)),
            }
        }
    }

    /// Query sources then inlines for `key`, in declaration order.
    pub(crate) fn lookup(&self, key: &LineKey) -> Option<Lookup> {
        for source in &self.sources {
            tracing::trace!(%key, "querying value source");
            if let Some(entry) = source.lookup_line(key) {
                return Some(Lookup::Source(entry));
            }
        }
        for inlines in &self.inlines {
            tracing::trace!(%key, "querying inlines");
            if let Some(template) = inlines.get(key) {
                return Some(Lookup::Inline(template));
            }
        }
        None
    }
}

/// A template found by [`ResolutionContext::lookup`].
pub(crate) enum Lookup {
    /// An entry line from a value source, with its own features.
    Source(Line),
    Inline(Arc<Template>),
}
