//! Feed item domain entity
//!
//! News items shown on the home feed and the filter applied to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category value meaning "show every category"
pub const ALL_CATEGORIES: &str = "INICIO";

/// A news item in the feed. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: i64,
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub image_url: String,
    #[serde(default)]
    pub urgent: bool,
}

/// Active filter state for the feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedFilters {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
}

impl FeedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn subcategory(mut self, subcategory: &str) -> Self {
        self.subcategory = Some(subcategory.to_string());
        self
    }

    pub fn search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Does the item pass every active filter?
    pub fn matches(&self, item: &FeedItem) -> bool {
        if let Some(category) = self.active_category() {
            if item.category != category {
                return false;
            }
        }

        if let Some(subcategory) = self.subcategory.as_deref().filter(|s| !s.is_empty()) {
            if item.subcategory != subcategory {
                return false;
            }
        }

        if let Some(needle) = self.normalized_search() {
            let in_title = item.title.to_lowercase().contains(&needle);
            let in_excerpt = item.excerpt.to_lowercase().contains(&needle);
            if !in_title && !in_excerpt {
                return false;
            }
        }

        true
    }

    fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    fn normalized_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(category: &str, subcategory: &str, title: &str, excerpt: &str) -> FeedItem {
        FeedItem {
            id: 1,
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            author: "Desk".to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 1, 4, 12, 0, 0).unwrap(),
            image_url: String::new(),
            urgent: false,
        }
    }

    #[test]
    fn empty_filters_match_everything() {
        let filters = FeedFilters::new();
        assert!(filters.matches(&item("ECON", "trade", "t", "e")));
    }

    #[test]
    fn show_all_sentinel_ignores_category() {
        let filters = FeedFilters::new().category(ALL_CATEGORIES);
        assert!(filters.matches(&item("ECON", "trade", "t", "e")));
        assert!(filters.matches(&item("GEO", "diplomacy", "t", "e")));
    }

    #[test]
    fn category_is_exact() {
        let filters = FeedFilters::new().category("ECON");
        assert!(filters.matches(&item("ECON", "trade", "t", "e")));
        assert!(!filters.matches(&item("econ", "trade", "t", "e")));
        assert!(!filters.matches(&item("GEO", "trade", "t", "e")));
    }

    #[test]
    fn subcategory_is_exact_when_set() {
        let filters = FeedFilters::new().category("ECON").subcategory("trade");
        assert!(filters.matches(&item("ECON", "trade", "t", "e")));
        assert!(!filters.matches(&item("ECON", "war-impacts", "t", "e")));
    }

    #[test]
    fn search_is_case_insensitive_over_title_or_excerpt() {
        let filters = FeedFilters::new().search("  OIL ");
        assert!(filters.matches(&item("ECON", "s", "Oil prices climb", "e")));
        assert!(filters.matches(&item("ECON", "s", "Markets", "Brent oil rallies")));
        assert!(!filters.matches(&item("ECON", "s", "Gold", "Safe haven demand")));
    }

    #[test]
    fn blank_search_is_ignored() {
        let filters = FeedFilters::new().search("   ");
        assert!(filters.matches(&item("ECON", "s", "t", "e")));
    }

    #[test]
    fn feed_item_parses_offset_timestamps() {
        let json = r#"{
            "id": 2,
            "category": "ECON",
            "subcategory": "trade",
            "title": "t",
            "excerpt": "e",
            "author": "a",
            "publishedAt": "2026-01-04T12:22:00-03:00",
            "imageUrl": "https://img"
        }"#;
        let parsed: FeedItem = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.published_at,
            Utc.with_ymd_and_hms(2026, 1, 4, 15, 22, 0).unwrap()
        );
        assert!(!parsed.urgent);
    }
}
