use std::collections::BTreeSet;

use crate::error::TableError;
use crate::lookup::Definitions;
use crate::table::action::{ActionOutcome, TableAction};
use crate::table::descriptor::{Column, Entity, EntityDescriptor, FilterOption};
use crate::table::pagination::{page_count, PaginationModel};
use crate::table::query::FilterState;
use crate::table::view::TableView;

/// Shown when a remote load fails. The underlying error is logged, not
/// surfaced verbatim.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load data. Please try again later.";

/// State of one dashboard page: the loaded records, the search/filter inputs,
/// the pagination window and column visibility.
///
/// The filtered index list is derived eagerly and only when the source or a
/// filter input changes; page changes slice the cached list.
pub struct EntityTable<R: Entity> {
    descriptor: EntityDescriptor<R>,
    source: Vec<R>,
    filters: FilterState,
    filtered: Vec<usize>,
    pagination: PaginationModel,
    hidden_columns: BTreeSet<&'static str>,
    loading: bool,
    error: Option<String>,
    derivations: u64,
}

impl<R: Entity> EntityTable<R> {
    pub fn new(page_size: usize) -> Result<Self, TableError> {
        Ok(Self {
            descriptor: R::descriptor(),
            source: Vec::new(),
            filters: FilterState::new(),
            filtered: Vec::new(),
            pagination: PaginationModel::first(page_size)?,
            hidden_columns: BTreeSet::new(),
            loading: false,
            error: None,
            derivations: 0,
        })
    }

    pub fn with_records(records: Vec<R>, page_size: usize) -> Result<Self, TableError> {
        let mut table = Self::new(page_size)?;
        table.set_source(records);
        Ok(table)
    }

    pub fn descriptor(&self) -> &EntityDescriptor<R> {
        &self.descriptor
    }

    // ---- Load lifecycle ----

    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn set_source(&mut self, records: Vec<R>) {
        self.source = records;
        self.loading = false;
        self.error = None;
        self.refilter();
    }

    /// Record a failed load. Existing rows are dropped so the error state is
    /// the only thing rendered.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.source.clear();
        self.loading = false;
        self.error = Some(message.into());
        self.refilter();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ---- Filter inputs ----

    pub fn search_term(&self) -> &str {
        self.filters.search_term()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.filters.search_term() {
            return;
        }
        self.filters.set_search_term(term);
        self.pagination = self.pagination.with_page(0);
        self.refilter();
    }

    /// Set one categorical filter; an empty value clears it.
    pub fn set_filter(&mut self, dimension: &str, value: impl Into<String>) -> Result<(), TableError> {
        if self.descriptor.dimension(dimension).is_none() {
            return Err(TableError::UnknownDimension {
                entity: self.descriptor.name.to_string(),
                dimension: dimension.to_string(),
            });
        }
        let value = value.into();
        if self.filters.get(dimension).unwrap_or("") == value {
            return Ok(());
        }
        self.filters.set(dimension, value);
        self.pagination = self.pagination.with_page(0);
        self.refilter();
        Ok(())
    }

    pub fn filter_value(&self, dimension: &str) -> &str {
        self.filters.get(dimension).unwrap_or("")
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn clear_filters(&mut self) {
        if self.filters.is_empty() && self.filters.search_term().is_empty() {
            return;
        }
        self.filters.clear();
        self.pagination = self.pagination.with_page(0);
        self.refilter();
    }

    pub fn filter_options(&self, dimension: &str, definitions: &Definitions) -> Vec<FilterOption> {
        self.descriptor
            .dimension(dimension)
            .map(|dim| dim.options(definitions))
            .unwrap_or_default()
    }

    // ---- Pagination ----

    pub fn pagination(&self) -> PaginationModel {
        self.pagination
    }

    pub fn on_pagination_model_change(&mut self, model: PaginationModel) -> Result<(), TableError> {
        if model.page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }
        self.pagination = model;
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        page_count(self.row_count(), self.pagination.page_size)
    }

    // ---- Derived views ----

    pub fn source(&self) -> &[R] {
        &self.source
    }

    /// Total rows after filtering, before pagination.
    pub fn row_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &R> + '_ {
        self.filtered.iter().map(move |&index| &self.source[index])
    }

    pub fn page_rows(&self) -> Vec<&R> {
        let window = self.pagination.window(self.filtered.len());
        self.filtered[window].iter().map(|&index| &self.source[index]).collect()
    }

    pub fn view(&self) -> TableView {
        TableView::resolve(self.loading, self.error.as_deref(), self.row_count())
    }

    /// How many times the filtered list has been recomputed.
    pub fn derivations(&self) -> u64 {
        self.derivations
    }

    fn refilter(&mut self) {
        self.filtered = self.filters.apply(&self.descriptor, &self.source);
        self.derivations += 1;
        log::debug!(
            "[TABLE] {}: {} of {} records match",
            self.descriptor.name,
            self.filtered.len(),
            self.source.len()
        );
    }

    // ---- Column visibility ----

    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.descriptor
            .columns
            .iter()
            .filter(|column| !self.hidden_columns.contains(column.key))
            .collect()
    }

    pub fn is_column_visible(&self, key: &str) -> bool {
        !self.hidden_columns.contains(key)
    }

    /// Show or hide a column. The last visible column cannot be hidden.
    pub fn toggle_column(&mut self, key: &str) -> Result<(), TableError> {
        let column = self
            .descriptor
            .column_by_key(key)
            .ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
        let key = column.key;

        if self.hidden_columns.remove(key) {
            return Ok(());
        }
        if self.visible_columns().len() > 1 {
            self.hidden_columns.insert(key);
        }
        Ok(())
    }

    /// Apply an action. Network actions only flip the table into its
    /// loading state; the fetch itself is the caller's job.
    pub fn apply(&mut self, action: TableAction) -> Result<ActionOutcome, TableError> {
        if action.requires_network() {
            self.begin_loading();
            return Ok(ActionOutcome::FetchRequired);
        }
        match action {
            TableAction::SetSearch(term) => self.set_search_term(term),
            TableAction::SetFilter { dimension, value } => self.set_filter(&dimension, value)?,
            TableAction::ClearFilters => self.clear_filters(),
            TableAction::ChangePage(model) => self.on_pagination_model_change(model)?,
            TableAction::ToggleColumn(key) => self.toggle_column(&key)?,
            TableAction::Reload => self.begin_loading(),
        }
        Ok(ActionOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ticket;

    fn table() -> EntityTable<Ticket> {
        let records = crate::fixtures::tickets().unwrap();
        EntityTable::with_records(records, 2).unwrap()
    }

    #[test]
    fn reload_asks_caller_to_fetch() {
        let mut table = table();
        assert_eq!(table.apply(TableAction::SetSearch("refund".into())), Ok(ActionOutcome::Applied));
        assert!(!table.is_loading());

        assert_eq!(table.apply(TableAction::Reload), Ok(ActionOutcome::FetchRequired));
        assert!(table.is_loading());
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut table = table();
        table.on_pagination_model_change(PaginationModel::new(2, 2).unwrap()).unwrap();
        table.set_search_term("refund");
        assert_eq!(table.pagination().page, 0);
    }

    #[test]
    fn unchanged_inputs_do_not_rederive() {
        let mut table = table();
        let before = table.derivations();
        table.set_search_term("");
        table.set_filter("status", "").unwrap();
        table.on_pagination_model_change(PaginationModel::new(1, 2).unwrap()).unwrap();
        assert_eq!(table.derivations(), before);

        table.set_filter("status", "Open").unwrap();
        assert_eq!(table.derivations(), before + 1);
    }

    #[test]
    fn unknown_dimension_is_rejected() {
        let mut table = table();
        let err = table.set_filter("colour", "red").unwrap_err();
        assert!(matches!(err, TableError::UnknownDimension { .. }));
    }

    #[test]
    fn last_visible_column_stays_visible() {
        let mut table = table();
        let keys: Vec<&'static str> = table.descriptor().columns.iter().map(|c| c.key).collect();
        for key in &keys {
            table.toggle_column(key).unwrap();
        }
        assert_eq!(table.visible_columns().len(), 1);
        assert!(table.is_column_visible(keys[keys.len() - 1]));

        table.toggle_column(keys[0]).unwrap();
        assert!(table.is_column_visible(keys[0]));
        assert!(matches!(table.toggle_column("nope"), Err(TableError::UnknownColumn(_))));
    }

    #[test]
    fn error_state_wins_over_empty() {
        let mut table = table();
        table.begin_loading();
        assert_eq!(table.view(), TableView::Loading);
        table.set_error(LOAD_ERROR_MESSAGE);
        assert_eq!(table.view(), TableView::Error(LOAD_ERROR_MESSAGE.to_string()));
        assert_eq!(table.row_count(), 0);
    }
}
