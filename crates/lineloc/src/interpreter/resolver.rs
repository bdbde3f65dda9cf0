//! The resolution pipeline.
//!
//! One call walks a line's ancestry, locates a template across the culture
//! policy's locales, sources and inline maps, renders its placeholders and,
//! when plural rules apply, re-queries for a plural-qualified variant.
//! Every outcome, including evaluation failures, is reported through the
//! returned [`Status`]; resolution itself never fails.

use std::sync::Arc;

use serde::Serialize;

use crate::interpreter::EvalError;
use crate::interpreter::context::{EvalContext, Lookup, ResolutionContext};
use crate::interpreter::evaluator::evaluate;
use crate::interpreter::format::display_string;
use crate::interpreter::permutation::plural_permutations;
use crate::line::Line;
use crate::types::{
    Arguments, FormatStatus, LineKey, LocaleId, LocaleStatus, Part, PluralityStatus,
    ResolveStatus, Status, Template, Value,
};

/// The outcome of resolving a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveResult {
    /// Rendered text, or `None` when nothing was found or evaluation failed.
    pub text: Option<String>,
    pub status: Status,
    /// Locale of the template that was used.
    pub locale: Option<LocaleId>,
    /// The key that was requested.
    pub key: LineKey,
}

/// A located template.
struct Found {
    template: Arc<Template>,
    /// Entry line from a value source, if the template came from one.
    entry: Option<Line>,
    /// The key the template was found under.
    key: LineKey,
    locale: Option<LocaleId>,
}

/// Resolve a line with the given arguments.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lineloc::interpreter::{FallbackCulturePolicy, MemorySource, resolve};
/// use lineloc::{Arguments, Line, ResolveStatus};
///
/// let mut source = MemorySource::new();
/// source.insert_str("Culture:en:Key:hello", "Hello, {0}!").unwrap();
///
/// let line = Line::root()
///     .source(Arc::new(source))
///     .culture_policy(Arc::new(FallbackCulturePolicy::new("en-US")))
///     .key("hello");
/// let result = resolve(&line, &Arguments::from(vec!["World".into()]));
///
/// assert_eq!(result.text.as_deref(), Some("Hello, World!"));
/// assert_eq!(result.status.resolve(), ResolveStatus::FoundInSource);
/// ```
pub fn resolve(line: &Line, arguments: &Arguments) -> ResolveResult {
    let mut context = ResolutionContext::scan(line);
    let key = line.line_key();
    let result = run(&mut context, &key, arguments);

    tracing::debug!(%key, status = %result.status, "resolved line");
    for logger in &context.loggers {
        logger.resolved(&result);
    }
    result
}

fn run(context: &mut ResolutionContext, key: &LineKey, arguments: &Arguments) -> ResolveResult {
    let (found, located_status) = locate(context, key);
    context.status = context.status.merge(located_status);
    let Some(found) = found else {
        return ResolveResult {
            text: None,
            status: context.status.with(ResolveStatus::NoResult),
            locale: None,
            key: key.clone(),
        };
    };
    if let Some(entry) = &found.entry {
        context.rescan(entry);
    }

    let locale = found
        .locale
        .clone()
        .or_else(|| context.culture.clone())
        .or_else(|| {
            context
                .culture_policy
                .as_ref()
                .and_then(|policy| policy.ordered_locales().into_iter().next())
        })
        .unwrap_or_default();

    let mut template = Arc::clone(&found.template);
    let mut rendered = render(&template, arguments, context, &locale);
    if let Ok(first) = &rendered {
        if template.has_plural_placeholders() {
            let (plurality, replacement) =
                plural_pass(&template, first, &found.key, &locale, context);
            context.status = context.status.with(plurality);
            if let Some((plural_template, entry)) = replacement {
                if let Some(entry) = entry {
                    context.rescan(&entry);
                }
                template = plural_template;
                rendered = render(&template, arguments, context, &locale);
            }
        } else {
            context.status = context.status.with(PluralityStatus::NotUsed);
        }
    }

    context.status = context.status.replace(template.status().format());
    let text = match rendered {
        Ok(rendered) if !template.is_null() => Some(rendered.text),
        Ok(_) => None,
        Err(error) => {
            tracing::debug!(%key, %error, "placeholder evaluation failed");
            for logger in &context.loggers {
                logger.failed(key, &error);
            }
            let detail = if error.is_function_resolve_failure() {
                FormatStatus::ErrorFunctionResolveFailed
            } else {
                FormatStatus::ErrorEvaluationFailed
            };
            context.status = context
                .status
                .with(ResolveStatus::FailedUnexpected)
                .with(detail);
            None
        }
    };

    ResolveResult {
        text,
        status: context.status,
        locale: found.locale,
        key: key.clone(),
    }
}

/// Find the template for `key`.
fn locate(context: &ResolutionContext, key: &LineKey) -> (Option<Found>, Status) {
    let explicit = key.culture().is_some();
    let mut root_tried = false;

    if !explicit && let Some(policy) = &context.culture_policy {
        for locale in policy.ordered_locales() {
            let qualified = key.with_culture(&locale);
            if let Some(hit) = context.lookup(&qualified) {
                let (found, resolve_status) = located(hit, qualified, Some(locale));
                let status = Status::new()
                    .with(resolve_status)
                    .with(LocaleStatus::MatchedPolicy);
                return (Some(found), status);
            }
            root_tried |= locale.is_root();
        }
    }

    if (explicit || !root_tried)
        && let Some(hit) = context.lookup(key)
    {
        // Only a line without any culture policy leaves the locale unused.
        let locale_status = if explicit || context.culture_policy.is_some() {
            LocaleStatus::MatchedExplicit
        } else {
            LocaleStatus::NotUsed
        };
        let (found, resolve_status) = located(hit, key.clone(), key.culture().cloned());
        return (
            Some(found),
            Status::new().with(resolve_status).with(locale_status),
        );
    }

    if let Some(value) = &context.value {
        let found = Found {
            template: Arc::clone(value),
            entry: None,
            key: key.clone(),
            locale: None,
        };
        let status = Status::new()
            .with(ResolveStatus::FoundAsKeyItself)
            .with(LocaleStatus::NotUsed);
        return (Some(found), status);
    }

    let locale_status = if explicit {
        LocaleStatus::NoMatch
    } else {
        LocaleStatus::NotUsed
    };
    (None, Status::new().with(locale_status))
}

fn located(hit: Lookup, key: LineKey, locale: Option<LocaleId>) -> (Found, ResolveStatus) {
    match hit {
        Lookup::Source(entry) => {
            let template = entry.template().unwrap_or_else(|| Arc::new(Template::null()));
            let found = Found {
                template,
                entry: Some(entry),
                key,
                locale,
            };
            (found, ResolveStatus::FoundInSource)
        }
        Lookup::Inline(template) => {
            let found = Found {
                template,
                entry: None,
                key,
                locale,
            };
            (found, ResolveStatus::FoundInline)
        }
    }
}

/// A rendered template and its placeholder values by placeholder index.
struct Rendered {
    text: String,
    values: Vec<Value>,
}

fn render(
    template: &Template,
    arguments: &Arguments,
    context: &ResolutionContext,
    locale: &LocaleId,
) -> Result<Rendered, EvalError> {
    let mut ctx = EvalContext::new(arguments.positional())
        .with_named_args(arguments.named())
        .with_locale(locale);
    if let Some(functions) = &context.functions {
        ctx = ctx.with_functions(functions.as_ref());
    }
    if let Some(provider) = &context.format_provider {
        ctx = ctx.with_format_provider(provider.as_ref());
    }

    let placeholders = template.placeholders();
    let mut values = vec![Value::Null; placeholders.len()];
    for placeholder in &placeholders {
        values[placeholder.placeholder_index] = evaluate(&placeholder.expression, &ctx)?;
    }

    let mut text = String::new();
    for part in template.parts() {
        match part {
            Part::Text(literal) => text.push_str(&literal.text),
            Part::Placeholder(placeholder) => {
                text.push_str(&display_string(&values[placeholder.placeholder_index], &ctx));
            }
        }
    }
    Ok(Rendered { text, values })
}

type Replacement = (Arc<Template>, Option<Line>);

/// Query plural-qualified variants of `key`, most specific first.
fn plural_pass(
    template: &Template,
    rendered: &Rendered,
    key: &LineKey,
    locale: &LocaleId,
    context: &ResolutionContext,
) -> (PluralityStatus, Option<Replacement>) {
    let Some(rules) = &context.plural_rules else {
        return (PluralityStatus::ErrorRulesResolveFailed, None);
    };

    // A placeholder without a usable number keeps its ordinal with no
    // candidates, so the others still qualify as `N`, `N1`, ...
    let mut candidates = Vec::new();
    let mut detail = None;
    for placeholder in template.placeholders() {
        let Some(category) = &placeholder.plural_category else {
            continue;
        };
        let cases = match rendered.values[placeholder.placeholder_index].as_plural_number() {
            None => {
                detail = detail.max(Some(PluralityStatus::ErrorNotNumeric));
                Vec::new()
            }
            Some(number) => rules.evaluate(category, &number, locale).unwrap_or_else(|| {
                detail = detail.max(Some(PluralityStatus::ErrorRulesResolveFailed));
                Vec::new()
            }),
        };
        candidates.push(cases);
    }

    for permutation in plural_permutations(&candidates) {
        let qualified = key.with_plural_cases(&permutation);
        let Some(hit) = context.lookup(&qualified) else {
            continue;
        };
        tracing::trace!(key = %qualified, "plural variant found");
        let replacement = match hit {
            Lookup::Source(entry) => match entry.template() {
                Some(template) => (template, Some(entry)),
                None => continue,
            },
            Lookup::Inline(template) => (template, None),
        };
        return (detail.unwrap_or(PluralityStatus::Ok), Some(replacement));
    }
    (detail.unwrap_or(PluralityStatus::ErrorNoMatch), None)
}
