//! Plural rules: mapping a number to the grammatical cases of a locale.
//!
//! [`CldrPluralRules`] uses CLDR data from `icu_plurals`. Rules are cached
//! per thread per locale and rule type, so repeated resolutions reuse the
//! previously constructed rules.

use std::cell::RefCell;

use fixed_decimal::Decimal;
use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules as IcuPluralRules};

use crate::types::{LocaleId, PluralCase, Value};

/// Category name for cardinal rules (`{plural:0}` or `{cardinal:0}`).
pub const CARDINAL: &str = "cardinal";

/// Alias of [`CARDINAL`].
pub const PLURAL: &str = "plural";

/// Category name for ordinal rules (`{ordinal:0}`).
pub const ORDINAL: &str = "ordinal";

/// A plural rules table.
pub trait PluralRules: Send + Sync {
    /// Candidate cases for `number` in `locale`, most specific first.
    ///
    /// Returns `None` when the category is unknown or no rules exist for
    /// the locale.
    fn evaluate(&self, category: &str, number: &Value, locale: &LocaleId) -> Option<Vec<PluralCase>>;
}

/// CLDR plural rules.
///
/// Candidates are `zero` for a zero value (when the CLDR case is not already
/// `zero`), then the CLDR case, then `other`.
///
/// # Example
///
/// ```
/// use lineloc::interpreter::{CldrPluralRules, PluralRules};
/// use lineloc::{LocaleId, PluralCase, Value};
///
/// let rules = CldrPluralRules;
/// let ru = LocaleId::new("ru");
/// let cases = rules.evaluate("plural", &Value::Integer(3), &ru).unwrap();
/// assert_eq!(cases, vec![PluralCase::from("few"), PluralCase::from("other")]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPluralRules;

type CachedRules = (String, bool, Option<IcuPluralRules>);

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<CachedRules>> = const { RefCell::new(Vec::new()) };
}

fn rule_type(category: &str) -> Option<PluralRuleType> {
    match category {
        CARDINAL | PLURAL => Some(PluralRuleType::Cardinal),
        ORDINAL => Some(PluralRuleType::Ordinal),
        _ => None,
    }
}

fn build_rules(locale: &LocaleId, rule_type: PluralRuleType) -> Option<IcuPluralRules> {
    let loc = if locale.is_root() {
        locale!("und")
    } else {
        Locale::try_from_str(locale.as_str()).ok()?
    };
    IcuPluralRules::try_new(loc.into(), rule_type.into()).ok()
}

fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

fn operands(number: &Value) -> Option<PluralOperands> {
    match number {
        Value::Integer(n) => Some(PluralOperands::from(*n)),
        // `f64` display never uses exponent notation, so it parses as a decimal.
        Value::Float(f) if f.is_finite() => Decimal::try_from_str(&f.to_string())
            .ok()
            .map(|decimal| PluralOperands::from(&decimal)),
        _ => None,
    }
}

fn is_zero(number: &Value) -> bool {
    match number {
        Value::Integer(n) => *n == 0,
        Value::Float(f) => *f == 0.0,
        _ => false,
    }
}

impl PluralRules for CldrPluralRules {
    fn evaluate(&self, category: &str, number: &Value, locale: &LocaleId) -> Option<Vec<PluralCase>> {
        let rule_type = rule_type(category)?;
        let ordinal = rule_type == PluralRuleType::Ordinal;
        let number = number.as_plural_number()?;
        let operands = operands(&number)?;

        let case = PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
            let position = cache
                .iter()
                .position(|(id, o, _)| id == locale.as_str() && *o == ordinal);
            let index = match position {
                Some(index) => index,
                None => {
                    cache.push((locale.to_string(), ordinal, build_rules(locale, rule_type)));
                    cache.len() - 1
                }
            };
            cache[index]
                .2
                .as_ref()
                .map(|rules| category_str(rules.category_for(operands)))
        })?;

        let mut candidates = Vec::with_capacity(3);
        if is_zero(&number) && case != "zero" {
            candidates.push(PluralCase::new("zero"));
        }
        candidates.push(PluralCase::new(case));
        if case != "other" {
            candidates.push(PluralCase::new("other"));
        }
        Some(candidates)
    }
}
