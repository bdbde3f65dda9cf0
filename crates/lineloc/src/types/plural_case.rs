use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A grammatical case produced by plural rules (e.g. "one", "few", "other").
///
/// The vocabulary is defined by the rules table, not by this crate. CLDR based
/// rules use "zero", "one", "two", "few", "many" and "other".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluralCase(String);

impl PluralCase {
    /// Create a new plural case from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the plural case as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PluralCase {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for PluralCase {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PluralCase {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for PluralCase {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PluralCase {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for PluralCase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
