//! Culture policies: the ordered locales a line is resolved in.

use crate::types::LocaleId;

/// Supplies candidate locales, most specific first.
pub trait CulturePolicy: Send + Sync {
    fn ordered_locales(&self) -> Vec<LocaleId>;
}

/// An explicit list of locales, tried in the given order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedCulturePolicy {
    locales: Vec<LocaleId>,
}

impl FixedCulturePolicy {
    pub fn new<I, L>(locales: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LocaleId>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
        }
    }
}

impl CulturePolicy for FixedCulturePolicy {
    fn ordered_locales(&self) -> Vec<LocaleId> {
        self.locales.clone()
    }
}

/// One locale followed by its parent chain, ending with the root locale.
///
/// # Example
///
/// ```
/// use lineloc::interpreter::{CulturePolicy, FallbackCulturePolicy};
/// use lineloc::LocaleId;
///
/// let policy = FallbackCulturePolicy::new("en-US");
/// assert_eq!(
///     policy.ordered_locales(),
///     vec![LocaleId::new("en-US"), LocaleId::new("en"), LocaleId::root()],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackCulturePolicy {
    locale: LocaleId,
}

impl FallbackCulturePolicy {
    pub fn new(locale: impl Into<LocaleId>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &LocaleId {
        &self.locale
    }
}

impl CulturePolicy for FallbackCulturePolicy {
    fn ordered_locales(&self) -> Vec<LocaleId> {
        self.locale.chain().collect()
    }
}
