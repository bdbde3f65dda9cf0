//! Process-wide current culture for the `global-culture` feature.

use std::sync::{LazyLock, PoisonError, RwLock};

use crate::interpreter::CulturePolicy;
use crate::types::LocaleId;

static CURRENT_CULTURE: LazyLock<RwLock<LocaleId>> = LazyLock::new(|| RwLock::new(LocaleId::root()));

/// The current culture. The root locale until set.
pub fn current_culture() -> LocaleId {
    CURRENT_CULTURE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub fn set_current_culture(culture: impl Into<LocaleId>) {
    *CURRENT_CULTURE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = culture.into();
}

/// The current culture followed by its parent chain, read at each
/// resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentCulturePolicy;

impl CulturePolicy for CurrentCulturePolicy {
    fn ordered_locales(&self) -> Vec<LocaleId> {
        current_culture().chain().collect()
    }
}
