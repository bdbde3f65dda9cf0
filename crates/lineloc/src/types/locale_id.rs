use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter;

use serde::{Deserialize, Serialize};

/// An opaque locale identifier such as `"en-US"`, `"en"` or the root `""`.
///
/// Identifiers form a parent chain by dropping their last `-` separated
/// subtag: `"zh-Hant-TW"` → `"zh-Hant"` → `"zh"` → `""`. The root locale
/// has no parent.
///
/// # Example
///
/// ```
/// use lineloc::LocaleId;
///
/// let chain: Vec<LocaleId> = LocaleId::new("en-US").chain().collect();
/// assert_eq!(chain, vec!["en-US".into(), "en".into(), LocaleId::root()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleId(String);

/// The root locale as a `'static` reference target.
pub(crate) static ROOT_LOCALE: LocaleId = LocaleId(String::new());

impl LocaleId {
    /// Create a locale identifier. Underscores are normalized to `-`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.contains('_') {
            Self(id.replace('_', "-"))
        } else {
            Self(id)
        }
    }

    /// The root (invariant) locale.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, lowercased (`"en"` for `"en-US"`).
    pub fn language(&self) -> String {
        self.0
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// The parent locale, or `None` for the root locale.
    pub fn parent(&self) -> Option<LocaleId> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('-') {
            Some(pos) => Some(Self(self.0[..pos].to_string())),
            None => Some(Self::root()),
        }
    }

    /// This locale followed by all of its ancestors, ending with the root.
    pub fn chain(&self) -> impl Iterator<Item = LocaleId> {
        let mut next = Some(self.clone());
        iter::from_fn(move || {
            let current = next.take()?;
            next = current.parent();
            Some(current)
        })
    }
}

impl Display for LocaleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LocaleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LocaleId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&LocaleId> for LocaleId {
    fn from(id: &LocaleId) -> Self {
        id.clone()
    }
}
