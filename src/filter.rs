//! Фильтрация списка событий: поиск по подстроке + категория.

use serde::Deserialize;

use crate::models::Event;

pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventFilter {
    #[serde(default, rename = "q")]
    pub search: String,
    #[serde(default)]
    pub category: String,
}

impl EventFilter {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self { search: search.into(), category: category.into() }
    }

    fn category_is_all(&self) -> bool {
        self.category.is_empty() || self.category == ALL_CATEGORIES
    }

    pub fn matches(&self, event: &Event) -> bool {
        let needle = self.search.to_lowercase();
        let contains = |field: &Option<String>| {
            field.as_deref().is_some_and(|v| v.to_lowercase().contains(&needle))
        };

        let matches_search = event.title.to_lowercase().contains(&needle)
            || contains(&event.location)
            || contains(&event.category);
        let matches_category =
            self.category_is_all() || event.category.as_deref() == Some(self.category.as_str());

        matches_search && matches_category
    }

    /// Видимые события в исходном порядке.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

/// "All" + уникальные непустые категории в порядке появления.
pub fn categories(events: &[Event]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for category in events.iter().filter_map(|e| e.category.as_deref()) {
        if !category.is_empty() && !out.iter().any(|c| c == category) {
            out.push(category.to_string());
        }
    }
    out
}
