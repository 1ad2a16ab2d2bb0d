use crate::table::pagination::PaginationModel;

/// What the caller still has to do after the table took an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// The table is in its loading state and waits for a fetch.
    FetchRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    // Filter inputs
    SetSearch(String),
    SetFilter { dimension: String, value: String },
    ClearFilters,

    // Window
    ChangePage(PaginationModel),
    ToggleColumn(String),

    // Manual refresh
    Reload,
}

impl TableAction {
    pub fn description(&self) -> &'static str {
        match self {
            TableAction::SetSearch(_) => "Updating search term",
            TableAction::SetFilter { .. } => "Updating filter",
            TableAction::ClearFilters => "Clearing filters",
            TableAction::ChangePage(_) => "Changing page",
            TableAction::ToggleColumn(_) => "Toggling column visibility",
            TableAction::Reload => "Reloading records",
        }
    }

    pub fn requires_network(&self) -> bool {
        matches!(self, TableAction::Reload)
    }
}
