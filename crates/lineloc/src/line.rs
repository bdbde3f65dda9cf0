//! Lines: immutable chains of key parts and resolution features.
//!
//! A [`Line`] is built by appending nodes to a parent. Parameter and culture
//! nodes form the line's [`LineKey`]; the other nodes carry the features a
//! resolution uses (value sources, inline maps, culture policy, plural rules,
//! functions, format provider, loggers). Appending never mutates the parent,
//! so lines can be shared freely as prefixes.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::iter;
use std::sync::Arc;

use crate::interpreter::{
    CulturePolicy, FormatProvider, FunctionTable, Inlines, PluralRules, ResolutionLogger,
    ResolveResult, ValueSource, resolve,
};
use crate::parser::{ParseError, parse_key};
use crate::types::{Arguments, CULTURE_PARAMETER, KEY_PARAMETER, LineKey, LocaleId, Template};

/// What one node of a line contributes.
#[derive(Clone)]
pub enum LinePart {
    Root,
    /// A key parameter such as `Key:hello` or `Type:Inventory`.
    Parameter { name: String, value: String },
    /// An explicit locale.
    Culture(LocaleId),
    /// A literal template carried by the line itself.
    Value(Arc<Template>),
    Source(Arc<dyn ValueSource>),
    Inlines(Arc<Inlines>),
    CulturePolicy(Arc<dyn CulturePolicy>),
    PluralRules(Arc<dyn PluralRules>),
    Functions(Arc<dyn FunctionTable>),
    FormatProvider(Arc<dyn FormatProvider>),
    Logger(Arc<dyn ResolutionLogger>),
}

impl LinePart {
    /// Short name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            LinePart::Root => "root",
            LinePart::Parameter { .. } => "parameter",
            LinePart::Culture(_) => "culture",
            LinePart::Value(_) => "value",
            LinePart::Source(_) => "source",
            LinePart::Inlines(_) => "inlines",
            LinePart::CulturePolicy(_) => "culture-policy",
            LinePart::PluralRules(_) => "plural-rules",
            LinePart::Functions(_) => "functions",
            LinePart::FormatProvider(_) => "format-provider",
            LinePart::Logger(_) => "logger",
        }
    }
}

struct Node {
    part: LinePart,
    parent: Option<Line>,
}

/// An immutable line chain.
///
/// # Example
///
/// ```
/// use lineloc::{Line, LocaleId};
///
/// let base = Line::root().parameter("Type", "Inventory");
/// let line = base.key("items").culture("en");
///
/// assert_eq!(line.line_key().to_string(), "Culture:en:Type:Inventory:Key:items");
/// assert_eq!(base.line_key().to_string(), "Type:Inventory");
/// assert_eq!(line.as_culture(), Some(&LocaleId::new("en")));
/// ```
#[derive(Clone)]
pub struct Line {
    node: Arc<Node>,
}

impl Default for Line {
    fn default() -> Self {
        Self::root()
    }
}

impl Line {
    pub fn root() -> Self {
        Self {
            node: Arc::new(Node {
                part: LinePart::Root,
                parent: None,
            }),
        }
    }

    /// A line made of `key`'s culture and parameters.
    pub fn from_key(key: &LineKey) -> Self {
        let mut line = Self::root();
        if let Some(culture) = key.culture() {
            line = line.culture(culture);
        }
        for (name, value) in key.parameters() {
            line = line.parameter(name, value);
        }
        line
    }

    /// Append a node.
    #[must_use]
    pub fn append(&self, part: LinePart) -> Self {
        Self {
            node: Arc::new(Node {
                part,
                parent: Some(self.clone()),
            }),
        }
    }

    /// Append a key parameter. A `Culture` parameter appends a culture node.
    #[must_use]
    pub fn parameter(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if name == CULTURE_PARAMETER {
            return self.culture(value);
        }
        self.append(LinePart::Parameter { name, value })
    }

    /// Append a `Key` parameter.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.parameter(KEY_PARAMETER, key)
    }

    #[must_use]
    pub fn culture(&self, locale: impl Into<LocaleId>) -> Self {
        self.append(LinePart::Culture(locale.into()))
    }

    /// Attach a literal template, used when no source has an entry.
    #[must_use]
    pub fn value(&self, text: impl Into<String>) -> Self {
        self.value_template(Arc::new(Template::new(text)))
    }

    #[must_use]
    pub fn value_template(&self, template: Arc<Template>) -> Self {
        self.append(LinePart::Value(template))
    }

    #[must_use]
    pub fn source(&self, source: Arc<dyn ValueSource>) -> Self {
        self.append(LinePart::Source(source))
    }

    #[must_use]
    pub fn inlines(&self, inlines: Inlines) -> Self {
        self.append(LinePart::Inlines(Arc::new(inlines)))
    }

    /// Add an inline override under this line's key joined with `qualifier`
    /// (for example `"Culture:fi"` or `"Culture:en:N:one"`).
    ///
    /// Consecutive calls extend the same inline map.
    ///
    /// # Errors
    ///
    /// Returns an error if `qualifier` is not a valid key.
    pub fn inline(&self, qualifier: &str, text: impl Into<String>) -> Result<Self, ParseError> {
        let key = self.line_key().join(&parse_key(qualifier)?);
        if let LinePart::Inlines(existing) = &self.node.part {
            let mut inlines = Inlines::clone(existing);
            inlines.insert(key, text);
            let parent = self.node.parent.clone().unwrap_or_default();
            return Ok(parent.inlines(inlines));
        }
        let mut inlines = Inlines::new();
        inlines.insert(key, text);
        Ok(self.inlines(inlines))
    }

    #[must_use]
    pub fn culture_policy(&self, policy: Arc<dyn CulturePolicy>) -> Self {
        self.append(LinePart::CulturePolicy(policy))
    }

    #[must_use]
    pub fn plural_rules(&self, rules: Arc<dyn PluralRules>) -> Self {
        self.append(LinePart::PluralRules(rules))
    }

    #[must_use]
    pub fn functions(&self, functions: Arc<dyn FunctionTable>) -> Self {
        self.append(LinePart::Functions(functions))
    }

    #[must_use]
    pub fn format_provider(&self, provider: Arc<dyn FormatProvider>) -> Self {
        self.append(LinePart::FormatProvider(provider))
    }

    #[must_use]
    pub fn logger(&self, logger: Arc<dyn ResolutionLogger>) -> Self {
        self.append(LinePart::Logger(logger))
    }

    pub fn part(&self) -> &LinePart {
        &self.node.part
    }

    pub fn parent(&self) -> Option<&Line> {
        self.node.parent.as_ref()
    }

    /// This node followed by its ancestors, ending with the root.
    pub fn ancestry(&self) -> impl Iterator<Item = &Line> {
        iter::successors(Some(self), |line| line.parent())
    }

    /// The key formed by this line's parameter and culture nodes.
    pub fn line_key(&self) -> LineKey {
        let nodes: Vec<&Line> = self.ancestry().collect();
        let mut key = LineKey::new();
        for line in nodes.into_iter().rev() {
            match line.part() {
                LinePart::Parameter { name, value } => {
                    key.push_parameter(name.clone(), value.clone());
                }
                LinePart::Culture(locale) => key.set_culture(Some(locale.clone())),
                _ => {}
            }
        }
        key
    }

    /// The literal template of this line: the nearest value node with no
    /// parameter after it.
    pub fn template(&self) -> Option<Arc<Template>> {
        for line in self.ancestry() {
            match line.part() {
                LinePart::Value(template) => return Some(Arc::clone(template)),
                LinePart::Parameter { .. } => return None,
                _ => {}
            }
        }
        None
    }

    /// Resolve this line. See [`resolve`].
    pub fn resolve(&self, arguments: &Arguments) -> ResolveResult {
        resolve(self, arguments)
    }

    /// Resolved text, or the empty string when nothing resolved.
    pub fn text(&self, arguments: &Arguments) -> String {
        self.resolve(arguments).text.unwrap_or_default()
    }

    // Capability views of this node.

    pub fn as_parameter(&self) -> Option<(&str, &str)> {
        match &self.node.part {
            LinePart::Parameter { name, value } => Some((name, value)),
            _ => None,
        }
    }

    pub fn as_culture(&self) -> Option<&LocaleId> {
        match &self.node.part {
            LinePart::Culture(locale) => Some(locale),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Arc<Template>> {
        match &self.node.part {
            LinePart::Value(template) => Some(template),
            _ => None,
        }
    }

    pub fn as_source(&self) -> Option<&Arc<dyn ValueSource>> {
        match &self.node.part {
            LinePart::Source(source) => Some(source),
            _ => None,
        }
    }

    pub fn as_inlines(&self) -> Option<&Arc<Inlines>> {
        match &self.node.part {
            LinePart::Inlines(inlines) => Some(inlines),
            _ => None,
        }
    }

    pub fn as_culture_policy(&self) -> Option<&Arc<dyn CulturePolicy>> {
        match &self.node.part {
            LinePart::CulturePolicy(policy) => Some(policy),
            _ => None,
        }
    }

    pub fn as_plural_rules(&self) -> Option<&Arc<dyn PluralRules>> {
        match &self.node.part {
            LinePart::PluralRules(rules) => Some(rules),
            _ => None,
        }
    }

    pub fn as_functions(&self) -> Option<&Arc<dyn FunctionTable>> {
        match &self.node.part {
            LinePart::Functions(functions) => Some(functions),
            _ => None,
        }
    }

    pub fn as_format_provider(&self) -> Option<&Arc<dyn FormatProvider>> {
        match &self.node.part {
            LinePart::FormatProvider(provider) => Some(provider),
            _ => None,
        }
    }

    pub fn as_logger(&self) -> Option<&Arc<dyn ResolutionLogger>> {
        match &self.node.part {
            LinePart::Logger(logger) => Some(logger),
            _ => None,
        }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.line_key())
    }
}

impl Debug for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Line")
            .field("key", &self.line_key().to_string())
            .field("part", &self.node.part.kind())
            .finish()
    }
}
