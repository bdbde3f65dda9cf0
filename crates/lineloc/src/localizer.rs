//! User-facing facade over line resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use bon::Builder;

use crate::interpreter::{
    CldrPluralRules, CulturePolicy, FallbackCulturePolicy, FixedCulturePolicy, FormatProvider,
    FunctionTable, PluralRules, ResolutionLogger, ResolveResult, ValueSource,
};
use crate::line::Line;
use crate::types::{Arguments, LineKey, LocaleId, Template};

/// Most templates [`Localizer::format_str`] keeps parsed at once.
pub const TEMPLATE_CACHE_LIMIT: usize = 256;

/// Resolves keys against a fixed set of sources in one culture.
///
/// Missing entries are not errors: [`Localizer::get`] reports them through
/// the result status and [`Localizer::text`] falls back to the key.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lineloc::interpreter::MemorySource;
/// use lineloc::{Localizer, args};
///
/// let mut source = MemorySource::new();
/// source.insert_str("Culture:en:Key:items", "You have {0} item{plural:0}").unwrap();
/// source.insert_str("Culture:en:Key:items:N:one", "You have one item").unwrap();
/// source.insert_str("Culture:en:Key:items:N:other", "You have {0} items").unwrap();
///
/// let localizer = Localizer::builder()
///     .culture("en-US")
///     .sources(vec![Arc::new(source)])
///     .build();
///
/// assert_eq!(localizer.text("items", &args![1]), "You have one item");
/// assert_eq!(localizer.text("items", &args![3]), "You have 3 items");
/// ```
#[derive(Builder)]
pub struct Localizer {
    /// Culture to resolve in.
    #[builder(into, default)]
    culture: LocaleId,

    /// Whether to fall back through the culture's parents to the root locale.
    #[builder(default = true)]
    fallback: bool,

    /// Value sources, queried in order.
    #[builder(default)]
    sources: Vec<Arc<dyn ValueSource>>,

    /// Plural rules. CLDR rules when unset.
    plural_rules: Option<Arc<dyn PluralRules>>,

    /// Functions consulted before the built-in table.
    functions: Option<Arc<dyn FunctionTable>>,

    format_provider: Option<Arc<dyn FormatProvider>>,

    #[builder(default)]
    loggers: Vec<Arc<dyn ResolutionLogger>>,

    /// Line carrying every configured feature, built on first use.
    #[builder(skip)]
    base: OnceLock<Line>,

    /// Parsed templates for [`Localizer::format_str`], keyed by source text.
    #[builder(skip)]
    template_cache: Mutex<HashMap<String, Arc<Template>>>,
}

impl Default for Localizer {
    fn default() -> Self {
        Localizer::builder().build()
    }
}

impl Localizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn culture(&self) -> &LocaleId {
        &self.culture
    }

    /// Change the culture for subsequent resolutions.
    pub fn set_culture(&mut self, culture: impl Into<LocaleId>) {
        self.culture = culture.into();
        self.base = OnceLock::new();
    }

    pub fn fallback(&self) -> bool {
        self.fallback
    }

    /// The line every resolution starts from.
    pub fn base_line(&self) -> &Line {
        self.base.get_or_init(|| self.build_base())
    }

    fn build_base(&self) -> Line {
        let mut line = Line::root();
        for source in &self.sources {
            line = line.source(Arc::clone(source));
        }
        let policy: Arc<dyn CulturePolicy> = if self.fallback {
            Arc::new(FallbackCulturePolicy::new(self.culture.clone()))
        } else {
            Arc::new(FixedCulturePolicy::new([self.culture.clone()]))
        };
        line = line.culture_policy(policy);
        line = line.plural_rules(
            self.plural_rules
                .clone()
                .unwrap_or_else(|| Arc::new(CldrPluralRules)),
        );
        if let Some(functions) = &self.functions {
            line = line.functions(Arc::clone(functions));
        }
        if let Some(provider) = &self.format_provider {
            line = line.format_provider(Arc::clone(provider));
        }
        for logger in &self.loggers {
            line = line.logger(Arc::clone(logger));
        }
        line
    }

    /// The line for a plain `Key` parameter.
    pub fn line(&self, key: &str) -> Line {
        self.base_line().key(key)
    }

    /// The line for a complete key.
    pub fn key_line(&self, key: &LineKey) -> Line {
        let mut line = self.base_line().clone();
        if let Some(culture) = key.culture() {
            line = line.culture(culture);
        }
        for (name, value) in key.parameters() {
            line = line.parameter(name, value);
        }
        line
    }

    /// Resolve a plain key.
    pub fn get(&self, key: &str, arguments: &Arguments) -> ResolveResult {
        self.line(key).resolve(arguments)
    }

    /// Resolved text of a plain key, or the key itself when nothing resolved.
    pub fn text(&self, key: &str, arguments: &Arguments) -> String {
        self.get(key, arguments)
            .text
            .unwrap_or_else(|| key.to_string())
    }

    /// Render a template string directly in this localizer's culture.
    ///
    /// Parsed templates are cached by their text, up to
    /// [`TEMPLATE_CACHE_LIMIT`] entries; a full cache is emptied before the
    /// next new text is added.
    pub fn format_str(&self, template: &str, arguments: &Arguments) -> ResolveResult {
        let template = {
            let mut cache = self
                .template_cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if cache.len() >= TEMPLATE_CACHE_LIMIT && !cache.contains_key(template) {
                tracing::trace!(entries = cache.len(), "clearing template cache");
                cache.clear();
            }
            Arc::clone(
                cache
                    .entry(template.to_string())
                    .or_insert_with(|| Arc::new(Template::new(template))),
            )
        };
        self.base_line()
            .value_template(template)
            .resolve(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn cached(localizer: &Localizer) -> usize {
        localizer
            .template_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[test]
    fn test_template_cache_is_bounded() {
        let localizer = Localizer::builder().culture("en").build();
        let arguments = Arguments::from(vec![Value::from("x")]);
        for i in 0..TEMPLATE_CACHE_LIMIT * 2 + 3 {
            let result = localizer.format_str(&format!("{i}:{{0}}"), &arguments);
            assert_eq!(result.text, Some(format!("{i}:x")));
            assert!(cached(&localizer) <= TEMPLATE_CACHE_LIMIT);
        }
    }

    #[test]
    fn test_cached_template_is_reused() {
        let localizer = Localizer::builder().culture("en").build();
        let arguments = Arguments::from(vec![Value::from(1)]);
        for _ in 0..3 {
            let result = localizer.format_str("n={0}", &arguments);
            assert_eq!(result.text.as_deref(), Some("n=1"));
        }
        assert_eq!(cached(&localizer), 1);
    }
}
