use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::TableError;
use crate::table::action::{ActionOutcome, TableAction};
use crate::table::descriptor::Entity;
use crate::table::entity_table::EntityTable;
use crate::table::source::{RecordSource, SourceKind};

/// Drives one page: owns its table and record source, queues actions from
/// the UI and processes them one at a time.
///
/// The initial load happens once, on the first `update`. After a failed load
/// nothing is fetched again until a `Reload` action is dispatched.
pub struct PageController<R: Entity> {
    // Single source of truth for the page
    table: EntityTable<R>,
    source: Arc<dyn RecordSource<R>>,

    // Action queue for sequential processing
    pending_actions: VecDeque<TableAction>,

    mounted: bool,
    is_processing: bool,
    last_error: Option<TableError>,
}

impl<R: Entity> PageController<R> {
    pub fn new(source: Arc<dyn RecordSource<R>>, page_size: usize) -> Result<Self, TableError> {
        Ok(Self {
            table: EntityTable::new(page_size)?,
            source,
            pending_actions: VecDeque::new(),
            mounted: false,
            is_processing: false,
            last_error: None,
        })
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: TableAction) {
        log::debug!("[PAGE] dispatching: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Mount on first call, then process at most one queued action.
    pub async fn update(&mut self) {
        if self.is_processing {
            return;
        }
        self.is_processing = true;

        if !self.mounted {
            self.mounted = true;
            self.load().await;
        } else if let Some(action) = self.pending_actions.pop_front() {
            log::debug!("[PAGE] processing: {}", action.description());
            self.handle_action(action).await;
        }

        self.is_processing = false;
    }

    /// Mount and drain the queue.
    pub async fn run_pending(&mut self) {
        if !self.mounted {
            self.update().await;
        }
        while !self.pending_actions.is_empty() {
            self.update().await;
        }
    }

    pub fn table(&self) -> &EntityTable<R> {
        &self.table
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty() || self.is_processing
    }

    /// The last action the table rejected, if any.
    pub fn last_error(&self) -> Option<&TableError> {
        self.last_error.as_ref()
    }

    async fn handle_action(&mut self, action: TableAction) {
        self.last_error = None;
        match self.table.apply(action) {
            Ok(ActionOutcome::FetchRequired) => self.load().await,
            Ok(ActionOutcome::Applied) => {}
            Err(e) => {
                log::warn!("[PAGE] rejected action: {}", e);
                self.last_error = Some(e);
            }
        }
    }

    async fn load(&mut self) {
        self.table.begin_loading();
        match self.source.fetch().await {
            Ok(records) => {
                log::info!("[PAGE] {} loaded {} records", self.table.descriptor().name, records.len());
                self.table.set_source(records);
            }
            Err(e) => {
                log::error!("[PAGE] {} failed to load: {}", self.table.descriptor().name, e);
                self.table.set_error(e.user_message());
            }
        }
    }
}
