//! Engine configuration

use serde::{Deserialize, Serialize};

/// Settings shared by id synthesis and projections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Locale used for fingerprints, breadcrumbs and public titles
    pub primary_locale: String,
    /// Leading tag of synthesized ids
    pub draft_prefix: String,
    /// Separator used when deriving slugs from titles
    pub slug_separator: char,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With primary locale
    #[inline]
    #[must_use]
    pub fn with_primary_locale(mut self, locale: impl Into<String>) -> Self {
        self.primary_locale = locale.into();
        self
    }

    /// With synthesized-id prefix
    #[inline]
    #[must_use]
    pub fn with_draft_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.draft_prefix = prefix.into();
        self
    }

    /// With slug separator
    #[inline]
    #[must_use]
    pub fn with_slug_separator(mut self, separator: char) -> Self {
        self.slug_separator = separator;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primary_locale: "en".to_string(),
            draft_prefix: "draft".to_string(),
            slug_separator: '-',
        }
    }
}
