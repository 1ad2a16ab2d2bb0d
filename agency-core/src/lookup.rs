//! Backend "definition" tables: id → term mappings used to label
//! foreign-key-like integer fields and to populate filter dropdowns.
//!
//! All four tables are fetched once into a [`Definitions`] registry which is
//! then shared by reference (`Arc`) across pages.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::{AdminApiClient, ApiError};
use crate::models::PLACEHOLDER;
use crate::table::FilterOption;

/// One `{id, term}` pair as served by the definition endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub id: i64,
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupKind {
    UserTypes,
    ClientTypes,
    ServiceCategories,
    DocumentTypes,
}

impl LookupKind {
    pub const ALL: [LookupKind; 4] = [
        LookupKind::UserTypes,
        LookupKind::ClientTypes,
        LookupKind::ServiceCategories,
        LookupKind::DocumentTypes,
    ];

    pub fn endpoint(&self) -> &'static str {
        match self {
            LookupKind::UserTypes => "/api/definitions/user-types/",
            LookupKind::ClientTypes => "/api/definitions/client-types/",
            LookupKind::ServiceCategories => "/api/definitions/service-of-interest/",
            LookupKind::DocumentTypes => "/api/definitions/document-types/",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::UserTypes => "user-types",
            LookupKind::ClientTypes => "client-types",
            LookupKind::ServiceCategories => "service-categories",
            LookupKind::DocumentTypes => "document-types",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LookupKind::UserTypes => "User types",
            LookupKind::ClientTypes => "Client types",
            LookupKind::ServiceCategories => "Services of interest",
            LookupKind::DocumentTypes => "Document types",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown lookup table '{}'", s))
    }
}

/// A single id → term table. Iteration order is by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: BTreeMap<i64, String>,
}

impl LookupTable {
    /// Later duplicates of an id overwrite earlier ones.
    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Self {
        Self {
            entries: definitions.into_iter().map(|d| (d.id, d.term)).collect(),
        }
    }

    pub fn label(&self, id: i64) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Label for display: the term, or the placeholder when the id is
    /// missing or unknown.
    pub fn label_or_placeholder(&self, id: Option<i64>) -> &str {
        id.and_then(|id| self.label(id)).unwrap_or(PLACEHOLDER)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(id, term)| (*id, term.as_str()))
    }

    /// Dropdown options; the option value is the id rendered as a string so
    /// it compares equal to what id-valued filter accessors produce.
    pub fn options(&self) -> Vec<FilterOption> {
        self.iter()
            .map(|(id, term)| FilterOption::new(id.to_string(), term))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The shared registry of every definition table.
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    tables: HashMap<LookupKind, LookupTable>,
}

pub type SharedDefinitions = Arc<Definitions>;

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, kind: LookupKind, table: LookupTable) -> Self {
        self.insert(kind, table);
        self
    }

    pub fn insert(&mut self, kind: LookupKind, table: LookupTable) {
        self.tables.insert(kind, table);
    }

    pub fn get(&self, kind: LookupKind) -> Option<&LookupTable> {
        self.tables.get(&kind)
    }

    pub fn label(&self, kind: LookupKind, id: Option<i64>) -> &str {
        match self.get(kind) {
            Some(table) => table.label_or_placeholder(id),
            None => PLACEHOLDER,
        }
    }

    pub fn options(&self, kind: LookupKind) -> Vec<FilterOption> {
        self.get(kind).map(LookupTable::options).unwrap_or_default()
    }

    pub fn is_loaded(&self, kind: LookupKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// Fetch every definition table, one request per table. The first
    /// failure aborts the load.
    pub async fn load(api: &AdminApiClient) -> Result<Self, ApiError> {
        let mut definitions = Definitions::new();
        for kind in LookupKind::ALL {
            let entries = api.definitions(kind).await?;
            log::info!("[LOOKUP] loaded {} entries for {}", entries.len(), kind);
            definitions.insert(kind, LookupTable::from_definitions(entries));
        }
        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_types() -> LookupTable {
        LookupTable::from_definitions(vec![
            Definition { id: 2, term: "Corporate".to_string() },
            Definition { id: 1, term: "Individual".to_string() },
        ])
    }

    #[test]
    fn labels_resolve_by_id() {
        let table = client_types();
        assert_eq!(table.label(1), Some("Individual"));
        assert_eq!(table.label(3), None);
        assert_eq!(table.label_or_placeholder(Some(3)), PLACEHOLDER);
        assert_eq!(table.label_or_placeholder(None), PLACEHOLDER);
    }

    #[test]
    fn options_are_ordered_by_id() {
        let options = client_types().options();
        assert_eq!(options[0].value, "1");
        assert_eq!(options[0].label, "Individual");
        assert_eq!(options[1].value, "2");
    }

    #[test]
    fn registry_without_table_falls_back() {
        let defs = Definitions::new().with_table(LookupKind::ClientTypes, client_types());
        assert_eq!(defs.label(LookupKind::ClientTypes, Some(2)), "Corporate");
        assert_eq!(defs.label(LookupKind::DocumentTypes, Some(2)), PLACEHOLDER);
        assert!(defs.options(LookupKind::UserTypes).is_empty());
    }

    #[test]
    fn kind_round_trips_through_cli_name() {
        for kind in LookupKind::ALL {
            assert_eq!(kind.as_str().parse::<LookupKind>(), Ok(kind));
        }
        assert!("visa-stages".parse::<LookupKind>().is_err());
    }
}
