//! Locale-keyed display text

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapping from locale code to display text
///
/// Locale order is preserved as received from the store; it decides the
/// fallback when the requested locale is missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(IndexMap<String, String>);

impl LocalizedText {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text with a single locale
    #[must_use]
    pub fn single(locale: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = IndexMap::new();
        map.insert(locale.into(), text.into());
        Self(map)
    }

    /// Add or overwrite a locale, returning the updated text
    #[must_use]
    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(locale.into(), text.into());
        self
    }

    /// Exact lookup, blank entries count as missing
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    /// Text in `locale`, else the first non-blank locale, else `""`
    #[must_use]
    pub fn resolve(&self, locale: &str) -> &str {
        self.get(locale)
            .or_else(|| {
                self.0
                    .values()
                    .map(String::as_str)
                    .find(|text| !text.trim().is_empty())
            })
            .unwrap_or("")
    }

    /// No locale carries non-blank text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|text| text.trim().is_empty())
    }

    /// Iterate `(locale, text)` pairs in stored order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<IndexMap<String, String>> for LocalizedText {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
