/// Sidecar key naming the CSS class applied around each snapshot.
pub const CSS_CLASS_KEY: &str = "cssClassName";
/// Sidecar key holding a wrapper template for each snapshot.
pub const DECORATOR_KEY: &str = "decorator";
/// Placeholder inside a decorator template that receives the snapshot.
pub const DECORATOR_PLACEHOLDER: &str = "$snapshot";

/// Stored snapshots keyed by name, in insertion order.
///
/// The two sidecar keys never show up as entries: inserting them sets
/// [`Self::css_class_name`] or [`Self::decorator`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotRecord {
    entries: Vec<(String, String)>,
    pub css_class_name: Option<String>,
    pub decorator: Option<String>,
}

impl SnapshotRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry; a replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            CSS_CLASS_KEY => self.css_class_name = Some(value),
            DECORATOR_KEY => self.decorator = Some(value),
            _ => match self.entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => self.entries.push((key, value)),
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SnapshotRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// What the formatter accepts: a single bare snapshot or a full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotContent {
    Text(String),
    Record(SnapshotRecord),
}

impl From<String> for SnapshotContent {
    fn from(text: String) -> Self {
        SnapshotContent::Text(text)
    }
}

impl From<&str> for SnapshotContent {
    fn from(text: &str) -> Self {
        SnapshotContent::Text(text.to_string())
    }
}

impl From<SnapshotRecord> for SnapshotContent {
    fn from(record: SnapshotRecord) -> Self {
        SnapshotContent::Record(record)
    }
}
