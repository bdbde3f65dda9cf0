//! Value sources: where templates for a key come from.

use std::collections::HashMap;
use std::sync::Arc;

use crate::interpreter::SourceError;
use crate::line::Line;
use crate::types::{LineKey, Template};

/// Provides templates for keys.
///
/// Implementations are read-only during resolution and shared between
/// threads.
pub trait ValueSource: Send + Sync {
    /// The template stored for exactly this key.
    fn lookup(&self, key: &LineKey) -> Option<Arc<Template>>;

    /// The entry for this key as a line. Entry lines may carry their own
    /// features (plural rules, functions, loggers), which fill in whatever
    /// the requesting line left unset.
    fn lookup_line(&self, key: &LineKey) -> Option<Line> {
        self.lookup(key)
            .map(|template| Line::from_key(key).value_template(template))
    }
}

struct Entry {
    key: LineKey,
    line: Line,
    template: Arc<Template>,
}

/// An in-memory value source indexed by key id.
///
/// # Example
///
/// ```
/// use lineloc::interpreter::{MemorySource, ValueSource};
/// use lineloc::LineKey;
///
/// let mut source = MemorySource::new();
/// source.insert_str("Culture:en:Key:hello", "Hello").unwrap();
///
/// let key = LineKey::parse("Culture:en:Key:hello").unwrap();
/// assert_eq!(source.lookup(&key).unwrap().text(), Some("Hello"));
/// ```
#[derive(Default)]
pub struct MemorySource {
    entries: HashMap<u64, Entry>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` under `key`, replacing an existing entry for the same key.
    ///
    /// Returns an error if a different key already has the same id.
    pub fn insert(
        &mut self,
        key: LineKey,
        text: impl Into<String>,
    ) -> Result<&mut Self, SourceError> {
        let template = Arc::new(Template::new(text));
        let line = Line::from_key(&key).value_template(Arc::clone(&template));
        self.insert_entry(Entry {
            key,
            line,
            template,
        })
    }

    /// Store `text` under a key given in textual form.
    pub fn insert_str(&mut self, key: &str, text: impl Into<String>) -> Result<&mut Self, SourceError> {
        let parsed = LineKey::parse(key).map_err(|source| SourceError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        self.insert(parsed, text)
    }

    /// Store an entry line under its own key. The line must carry a value.
    pub fn insert_line(&mut self, line: Line) -> Result<&mut Self, SourceError> {
        let key = line.line_key();
        let template = line.template().ok_or_else(|| SourceError::MissingValue {
            key: key.to_string(),
        })?;
        self.insert_entry(Entry {
            key,
            line,
            template,
        })
    }

    fn insert_entry(&mut self, entry: Entry) -> Result<&mut Self, SourceError> {
        let id = entry.key.id();
        if let Some(existing) = self.entries.get(&id)
            && existing.key != entry.key
        {
            return Err(SourceError::IdCollision {
                existing: existing.key.to_string(),
                key: entry.key.to_string(),
            });
        }
        self.entries.insert(id, entry);
        Ok(self)
    }

    fn entry(&self, key: &LineKey) -> Option<&Entry> {
        self.entries.get(&key.id()).filter(|entry| entry.key == *key)
    }

    pub fn contains(&self, key: &LineKey) -> bool {
        self.entry(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ValueSource for MemorySource {
    fn lookup(&self, key: &LineKey) -> Option<Arc<Template>> {
        self.entry(key).map(|entry| Arc::clone(&entry.template))
    }

    fn lookup_line(&self, key: &LineKey) -> Option<Line> {
        self.entry(key).map(|entry| entry.line.clone())
    }
}

/// Inline overrides attached to a line.
///
/// Keys are complete line keys: the owning line's key joined with a
/// relative qualifier such as `Culture:fi` or `N:one`.
#[derive(Debug, Default, Clone)]
pub struct Inlines {
    entries: HashMap<LineKey, Arc<Template>>,
}

impl Inlines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: LineKey, text: impl Into<String>) {
        self.entries.insert(key, Arc::new(Template::new(text)));
    }

    pub fn get(&self, key: &LineKey) -> Option<Arc<Template>> {
        self.entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
