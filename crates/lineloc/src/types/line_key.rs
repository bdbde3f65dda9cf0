use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

use super::{LocaleId, PluralCase};
use crate::parser::{ParseError, parse_key};

/// Parameter name carrying a key's culture.
pub const CULTURE_PARAMETER: &str = "Culture";

/// Parameter name of the plain key part (`Key:hello`).
pub const KEY_PARAMETER: &str = "Key";

/// The canonical identity of a line: its culture plus its ordered parameters.
///
/// The textual form lists `name:value` pairs separated by `:`, culture first:
/// `Culture:en:Type:Inventory:Key:items:N:other`. A `\` escapes `:` and `\`
/// inside names and values.
///
/// # Example
///
/// ```
/// use lineloc::{LineKey, LocaleId};
///
/// let key: LineKey = "Key:items:Culture:en".parse().unwrap();
/// assert_eq!(key.culture(), Some(&LocaleId::new("en")));
/// assert_eq!(key.to_string(), "Culture:en:Key:items");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    culture: Option<LocaleId>,
    parameters: Vec<(String, String)>,
}

impl LineKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the textual form.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_key(text)
    }

    pub fn culture(&self) -> Option<&LocaleId> {
        self.culture.as_ref()
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    /// Value of the last parameter with this name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.culture.is_none() && self.parameters.is_empty()
    }

    /// Append a parameter. A `Culture` parameter sets the culture instead.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_parameter(name.into(), value.into());
        self
    }

    pub(crate) fn push_parameter(&mut self, name: String, value: String) {
        if name == CULTURE_PARAMETER {
            self.set_culture(Some(LocaleId::new(value)));
        } else {
            self.parameters.push((name, value));
        }
    }

    pub(crate) fn set_culture(&mut self, culture: Option<LocaleId>) {
        self.culture = culture.filter(|c| !c.is_root());
    }

    /// Qualify this key with a locale. The root locale removes the culture.
    #[must_use]
    pub fn with_culture(&self, locale: &LocaleId) -> Self {
        let mut key = self.clone();
        key.set_culture(Some(locale.clone()));
        key
    }

    /// This key followed by another key's parameters. A culture on `other`
    /// replaces this key's culture.
    #[must_use]
    pub fn join(&self, other: &LineKey) -> Self {
        let mut key = self.clone();
        if other.culture.is_some() {
            key.culture = other.culture.clone();
        }
        key.parameters.extend(other.parameters.iter().cloned());
        key
    }

    /// Qualify this key with plural cases: `N` for the first plural
    /// placeholder, then `N1`, `N2`, ...
    #[must_use]
    pub fn with_plural_cases(&self, cases: &[(usize, &PluralCase)]) -> Self {
        let mut key = self.clone();
        for (ordinal, case) in cases {
            key.parameters
                .push((plural_parameter_name(*ordinal), case.to_string()));
        }
        key
    }

    /// Stable 64-bit FNV-1a hash of the canonical textual form.
    pub fn id(&self) -> u64 {
        fnv1a_hash_str_64(&self.to_string())
    }
}

/// The qualifier parameter name for a plural placeholder ordinal.
pub fn plural_parameter_name(ordinal: usize) -> String {
    if ordinal == 0 {
        "N".to_string()
    } else {
        format!("N{ordinal}")
    }
}

fn write_escaped(f: &mut Formatter<'_>, s: &str) -> FmtResult {
    for c in s.chars() {
        if c == ':' || c == '\\' {
            write!(f, "\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

impl Display for LineKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut first = true;
        if let Some(culture) = &self.culture {
            write!(f, "{CULTURE_PARAMETER}:")?;
            write_escaped(f, culture.as_str())?;
            first = false;
        }
        for (name, value) in &self.parameters {
            if !first {
                write!(f, ":")?;
            }
            write_escaped(f, name)?;
            write!(f, ":")?;
            write_escaped(f, value)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for LineKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key(s)
    }
}
