use std::collections::BTreeMap;

use crate::table::descriptor::EntityDescriptor;

/// Search term plus the active categorical filters of one page.
///
/// An empty search term or an empty filter value means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_term: String,
    active: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Store a filter value; an empty value removes the filter.
    pub fn set(&mut self, dimension: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.active.remove(dimension);
        } else {
            self.active.insert(dimension.to_string(), value);
        }
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.active.get(dimension).map(String::as_str)
    }

    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.active.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.search_term.clear();
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && self.active.is_empty()
    }

    fn needle(&self) -> Option<String> {
        let trimmed = self.search_term.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Indices of the records that match the search term (in any search
    /// field) and every active filter. Source order is preserved.
    pub fn apply<R>(&self, descriptor: &EntityDescriptor<R>, records: &[R]) -> Vec<usize> {
        let needle = self.needle();
        let filters: Vec<_> = self
            .active
            .iter()
            .filter_map(|(key, value)| descriptor.dimension(key).map(|dim| (dim, value.as_str())))
            .collect();

        records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                let search_ok = match &needle {
                    Some(needle) => descriptor
                        .search_fields
                        .iter()
                        .any(|field| field.contains(record, needle)),
                    None => true,
                };
                search_ok && filters.iter().all(|(dim, value)| dim.matches(record, value))
            })
            .map(|(index, _)| index)
            .collect()
    }
}
