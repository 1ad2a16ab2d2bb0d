/// The four mutually exclusive things a table can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Loading,
    Error(String),
    Empty,
    Populated,
}

impl TableView {
    /// Precedence: loading > error > empty > data. Recomputed every render,
    /// no history is kept.
    pub fn resolve(loading: bool, error: Option<&str>, row_count: usize) -> Self {
        if loading {
            TableView::Loading
        } else if let Some(message) = error {
            TableView::Error(message.to_string())
        } else if row_count == 0 {
            TableView::Empty
        } else {
            TableView::Populated
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            TableView::Loading => Some("Loading..."),
            TableView::Error(message) => Some(message),
            TableView::Empty => Some("No records found."),
            TableView::Populated => None,
        }
    }
}
