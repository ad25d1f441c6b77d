use std::collections::BTreeMap;

use chrono::NaiveDate;

pub const UNSPECIFIED_VERSION: &str = "unspecified";

/// Reference material held in the external knowledge store, e.g. one
/// edition of the pricebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub category: String,
    pub content: String,
    pub version: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

impl KnowledgeEntry {
    pub fn new(
        category: impl Into<String>,
        content: impl Into<String>,
        version: Option<String>,
        effective_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            category: category.into(),
            content: content.into(),
            version,
            effective_date,
        }
    }

    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or(UNSPECIFIED_VERSION)
    }

    /// Recency key: the effective date when present, otherwise the version
    /// label. Entries are ranked by this key, descending.
    pub fn recency_key(&self) -> String {
        match self.effective_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.version.clone().unwrap_or_default(),
        }
    }

    pub fn matches_version_marker(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.version
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(&marker))
    }
}

/// Knowledge actually used for one request, keyed by category.
pub type KnowledgeSnapshot = BTreeMap<String, KnowledgeEntry>;
