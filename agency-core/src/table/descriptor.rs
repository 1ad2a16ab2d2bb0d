use std::borrow::Cow;
use std::sync::Arc;

use crate::api::AdminApiClient;
use crate::catalog::PageId;
use crate::error::FixtureError;
use crate::lookup::{Definitions, LookupKind};
use crate::models::PLACEHOLDER;
use crate::table::source::RecordSource;

/// Raw cell accessor. `None` renders as the placeholder.
pub type CellAccessor<R> = fn(&R) -> Option<Cow<'_, str>>;
pub type TextAccessor<R> = fn(&R) -> Option<&str>;

/// How a cell should be drawn. This is the "custom renderer" hook: the
/// table itself only produces strings, renderers decide what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    /// Enumerated status-like value drawn as a coloured badge.
    Badge,
    /// Integer id resolved through a definition table.
    Lookup(LookupKind),
    Currency,
    Number,
}

pub struct Column<R> {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: CellKind,
    accessor: CellAccessor<R>,
}

impl<R> Column<R> {
    pub fn new(key: &'static str, header: &'static str, kind: CellKind, accessor: CellAccessor<R>) -> Self {
        Self { key, header, kind, accessor }
    }

    pub fn raw<'r>(&self, record: &'r R) -> Option<Cow<'r, str>> {
        (self.accessor)(record)
    }

    /// Display string for a cell, with lookup ids resolved and missing
    /// values replaced by the placeholder.
    pub fn display(&self, record: &R, definitions: &Definitions) -> String {
        let raw = self.raw(record);
        match self.kind {
            CellKind::Lookup(kind) => {
                let id = raw.and_then(|value| value.parse::<i64>().ok());
                definitions.label(kind, id).to_string()
            }
            CellKind::Currency => match raw.and_then(|value| value.parse::<f64>().ok()) {
                Some(amount) => format!("${:.2}", amount),
                None => PLACEHOLDER.to_string(),
            },
            _ => match raw {
                Some(value) if !value.trim().is_empty() => value.into_owned(),
                _ => PLACEHOLDER.to_string(),
            },
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self { key: self.key, header: self.header, kind: self.kind, accessor: self.accessor }
    }
}

pub struct SearchField<R> {
    pub key: &'static str,
    accessor: TextAccessor<R>,
}

impl<R> SearchField<R> {
    /// Case-insensitive containment. `needle` must already be lowercase.
    pub fn contains(&self, record: &R, needle: &str) -> bool {
        (self.accessor)(record)
            .map(|value| value.to_lowercase().contains(needle))
            .unwrap_or(false)
    }
}

impl<R> Clone for SearchField<R> {
    fn clone(&self) -> Self {
        Self { key: self.key, accessor: self.accessor }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOptions {
    Fixed(&'static [&'static str]),
    Lookup(LookupKind),
}

/// One categorical filter (status, type, stage, priority, ...).
pub struct FilterDimension<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub options: FilterOptions,
    accessor: CellAccessor<R>,
}

impl<R> FilterDimension<R> {
    /// Exact match against the selected option value.
    pub fn matches(&self, record: &R, value: &str) -> bool {
        (self.accessor)(record).map(|v| v == value).unwrap_or(false)
    }

    pub fn options(&self, definitions: &Definitions) -> Vec<FilterOption> {
        match self.options {
            FilterOptions::Fixed(values) => {
                values.iter().map(|v| FilterOption::new(*v, *v)).collect()
            }
            FilterOptions::Lookup(kind) => definitions.options(kind),
        }
    }
}

impl<R> Clone for FilterDimension<R> {
    fn clone(&self) -> Self {
        Self { key: self.key, label: self.label, options: self.options, accessor: self.accessor }
    }
}

/// Everything a page needs to know about its record type: columns, the
/// fields free-text search looks at, and the filter dropdowns it offers.
pub struct EntityDescriptor<R> {
    pub name: &'static str,
    pub columns: Vec<Column<R>>,
    pub search_fields: Vec<SearchField<R>>,
    pub filters: Vec<FilterDimension<R>>,
}

impl<R> EntityDescriptor<R> {
    pub fn new(name: &'static str) -> Self {
        Self { name, columns: Vec::new(), search_fields: Vec::new(), filters: Vec::new() }
    }

    pub fn column(mut self, key: &'static str, header: &'static str, kind: CellKind, accessor: CellAccessor<R>) -> Self {
        self.columns.push(Column::new(key, header, kind, accessor));
        self
    }

    pub fn text(self, key: &'static str, header: &'static str, accessor: CellAccessor<R>) -> Self {
        self.column(key, header, CellKind::Text, accessor)
    }

    pub fn badge(self, key: &'static str, header: &'static str, accessor: CellAccessor<R>) -> Self {
        self.column(key, header, CellKind::Badge, accessor)
    }

    pub fn search(mut self, key: &'static str, accessor: TextAccessor<R>) -> Self {
        self.search_fields.push(SearchField { key, accessor });
        self
    }

    pub fn filter(mut self, key: &'static str, label: &'static str, options: FilterOptions, accessor: CellAccessor<R>) -> Self {
        self.filters.push(FilterDimension { key, label, options, accessor });
        self
    }

    pub fn dimension(&self, key: &str) -> Option<&FilterDimension<R>> {
        self.filters.iter().find(|f| f.key == key)
    }

    pub fn column_by_key(&self, key: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.key == key)
    }
}

impl<R> Clone for EntityDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            columns: self.columns.clone(),
            search_fields: self.search_fields.clone(),
            filters: self.filters.clone(),
        }
    }
}

/// A record type shown on one dashboard page.
pub trait Entity: Clone + Send + Sync + 'static {
    const PAGE: PageId;

    fn id(&self) -> &str;

    fn descriptor() -> EntityDescriptor<Self>;

    /// Where the page's records come from. Static pages parse an embedded
    /// fixture, remote pages wrap the API client.
    fn source(api: &AdminApiClient) -> Result<Arc<dyn RecordSource<Self>>, FixtureError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{Definition, LookupTable};

    struct Row {
        name: String,
        fee: Option<f64>,
        kind: Option<i64>,
    }

    fn descriptor() -> EntityDescriptor<Row> {
        EntityDescriptor::<Row>::new("rows")
            .text("name", "Name", |r| Some(r.name.as_str().into()))
            .column("fee", "Fee", CellKind::Currency, |r| r.fee.map(|f| f.to_string().into()))
            .column("kind", "Kind", CellKind::Lookup(LookupKind::ClientTypes), |r| {
                r.kind.map(|k| k.to_string().into())
            })
    }

    #[test]
    fn display_formats_by_kind() {
        let defs = Definitions::new().with_table(
            LookupKind::ClientTypes,
            LookupTable::from_definitions(vec![Definition { id: 4, term: "Student".to_string() }]),
        );
        let desc = descriptor();
        let row = Row { name: "  ".to_string(), fee: Some(1250.5), kind: Some(4) };

        assert_eq!(desc.columns[0].display(&row, &defs), PLACEHOLDER);
        assert_eq!(desc.columns[1].display(&row, &defs), "$1250.50");
        assert_eq!(desc.columns[2].display(&row, &defs), "Student");

        let bare = Row { name: "Ada".to_string(), fee: None, kind: Some(9) };
        assert_eq!(desc.columns[0].display(&bare, &defs), "Ada");
        assert_eq!(desc.columns[1].display(&bare, &defs), PLACEHOLDER);
        assert_eq!(desc.columns[2].display(&bare, &defs), PLACEHOLDER);
    }
}
