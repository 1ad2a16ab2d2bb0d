//! Bridges between background fetches and the frame loop.
//!
//! A fetch runs on the async runtime and drops its result into an
//! `Arc<Mutex<Option<..>>>` slot; the UI polls the slot once per frame.
//! Every start bumps a generation counter shared with the sending side.
//! A result tagged with an older generation is dropped when it arrives, so
//! it can never overwrite the result of the current request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use agency_core::api::{UploadDocumentForm, UploadResponse};
use agency_core::lookup::SharedDefinitions;
use agency_core::models::Client;
use agency_core::{AdminApiClient, Definitions, Entity, EntityTable, RecordSource};

use crate::wasm_utils;

struct Delivery<T> {
    generation: u64,
    result: Result<T, String>,
}

/// Receiving side of one kind of background result.
pub struct AsyncSlot<T> {
    current: Arc<AtomicU64>,
    in_flight: bool,
    inbox: Arc<Mutex<Option<Delivery<T>>>>,
}

/// Sending side handed to the spawned task.
pub struct SlotHandle<T> {
    generation: u64,
    current: Arc<AtomicU64>,
    inbox: Arc<Mutex<Option<Delivery<T>>>>,
}

impl<T> SlotHandle<T> {
    pub fn deliver(self, result: Result<T, String>) {
        let mut guard = match self.inbox.lock() {
            Ok(guard) => guard,
            Err(_) => {
                log::error!("❌ [STATE] Failed to acquire result lock");
                return;
            }
        };

        // Checked under the lock so a concurrent start() cannot slip in between.
        let current = self.current.load(Ordering::SeqCst);
        if self.generation != current {
            log::debug!(
                "[STATE] Dropping stale result (generation {} != {})",
                self.generation,
                current
            );
            return;
        }
        *guard = Some(Delivery { generation: self.generation, result });
    }
}

impl<T> Default for AsyncSlot<T> {
    fn default() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(0)),
            in_flight: false,
            inbox: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T> AsyncSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new request. Anything still in flight becomes stale.
    pub fn start(&mut self) -> SlotHandle<T> {
        let generation = self.advance();
        self.in_flight = true;
        SlotHandle { generation, current: self.current.clone(), inbox: self.inbox.clone() }
    }

    /// Forget the current request; its result will be dropped on arrival.
    pub fn cancel(&mut self) {
        self.advance();
        self.in_flight = false;
    }

    fn generation(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    // Bumps the generation and clears any result left by an older request.
    fn advance(&mut self) -> u64 {
        let guard = self.inbox.lock();
        match guard {
            Ok(mut inbox) => {
                inbox.take();
                self.current.fetch_add(1, Ordering::SeqCst) + 1
            }
            Err(_) => {
                log::warn!("⚠️ [STATE] Failed to lock result slot");
                self.current.fetch_add(1, Ordering::SeqCst) + 1
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Take a delivered result belonging to the current generation.
    pub fn take(&mut self) -> Option<Result<T, String>> {
        let delivery = match self.inbox.lock() {
            Ok(mut guard) => guard.take()?,
            Err(_) => {
                log::warn!("⚠️ [STATE] Failed to lock result slot");
                return None;
            }
        };

        let current = self.generation();
        if delivery.generation != current {
            log::debug!(
                "[STATE] Discarding stale result (generation {} != {})",
                delivery.generation,
                current
            );
            return None;
        }

        self.in_flight = false;
        Some(delivery.result)
    }
}

/// Loads one page's records. One fetch per `load`; failures are not retried.
pub struct PageLoader<R: Entity> {
    source: Arc<dyn RecordSource<R>>,
    slot: AsyncSlot<Vec<R>>,
}

impl<R: Entity> PageLoader<R> {
    pub fn new(source: Arc<dyn RecordSource<R>>) -> Self {
        Self { source, slot: AsyncSlot::new() }
    }

    pub fn source(&self) -> &Arc<dyn RecordSource<R>> {
        &self.source
    }

    pub fn load(&mut self, table: &mut EntityTable<R>) {
        log::info!("🔄 [STATE] Loading {}", R::PAGE.title());
        table.begin_loading();

        let handle = self.slot.start();
        let source = self.source.clone();
        wasm_utils::spawn_async(async move {
            let result = source.fetch().await.map_err(|e| {
                log::error!("❌ [STATE] Failed to load {}: {}", R::PAGE.title(), e);
                e.user_message()
            });
            handle.deliver(result);
        });
    }

    /// Move a finished load into the table. Returns true when the table changed.
    pub fn poll(&mut self, table: &mut EntityTable<R>) -> bool {
        match self.slot.take() {
            Some(Ok(records)) => {
                log::info!("✅ [STATE] {} loaded {} records", R::PAGE.title(), records.len());
                table.set_source(records);
                true
            }
            Some(Err(message)) => {
                table.set_error(message);
                true
            }
            None => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_in_flight()
    }
}

/// Fetches every lookup table once at startup.
#[derive(Default)]
pub struct DefinitionsLoader {
    slot: AsyncSlot<Definitions>,
    pub error: Option<String>,
}

impl DefinitionsLoader {
    pub fn load(&mut self, api: &AdminApiClient) {
        log::info!("🔄 [STATE] Loading lookup tables");
        self.error = None;

        let handle = self.slot.start();
        let api = api.clone();
        wasm_utils::spawn_async(async move {
            let result = Definitions::load(&api).await.map_err(|e| {
                log::error!("❌ [STATE] Failed to load lookup tables: {}", e);
                e.user_message()
            });
            handle.deliver(result);
        });
    }

    pub fn poll(&mut self) -> Option<SharedDefinitions> {
        match self.slot.take()? {
            Ok(definitions) => Some(Arc::new(definitions)),
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_in_flight()
    }
}

/// Client choices for the upload dialog.
#[derive(Default)]
pub struct ClientsLoader {
    slot: AsyncSlot<Vec<Client>>,
    pub clients: Vec<Client>,
    pub error: Option<String>,
    requested: bool,
}

impl ClientsLoader {
    pub fn ensure_loaded(&mut self, api: &AdminApiClient) {
        if self.requested {
            return;
        }
        self.requested = true;
        self.error = None;

        let handle = self.slot.start();
        let api = api.clone();
        wasm_utils::spawn_async(async move {
            let result = api.list_clients().await.map_err(|e| e.user_message());
            handle.deliver(result);
        });
    }

    pub fn poll(&mut self) {
        match self.slot.take() {
            Some(Ok(clients)) => self.clients = clients,
            Some(Err(message)) => self.error = Some(message),
            None => {}
        }
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_in_flight()
    }

    /// Allow another attempt after a failure.
    pub fn retry(&mut self) {
        self.requested = false;
    }
}

pub struct UploadTask {
    slot: AsyncSlot<UploadResponse>,
}

impl Default for UploadTask {
    fn default() -> Self {
        Self { slot: AsyncSlot::new() }
    }
}

impl UploadTask {
    pub fn submit(&mut self, api: &AdminApiClient, form: UploadDocumentForm) {
        log::info!("📤 [STATE] Uploading {}", form.file_name().unwrap_or("document"));
        let handle = self.slot.start();
        let api = api.clone();
        wasm_utils::spawn_async(async move {
            let result = api.upload_document(&form).await.map_err(|e| {
                log::error!("❌ [STATE] Upload failed: {}", e);
                e.user_message()
            });
            handle.deliver(result);
        });
    }

    pub fn poll(&mut self) -> Option<Result<UploadResponse, String>> {
        self.slot.take()
    }

    pub fn is_uploading(&self) -> bool {
        self.slot.is_in_flight()
    }

    pub fn cancel(&mut self) {
        self.slot.cancel();
    }
}

/// Browser file chooser. The page cannot block on a dialog, so the pick
/// arrives through the same bridge as a fetch.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct FilePicker {
    slot: AsyncSlot<Option<(String, Vec<u8>)>>,
}

#[cfg(target_arch = "wasm32")]
impl FilePicker {
    pub fn browse(&mut self, extensions: &'static [&'static str]) {
        let handle = self.slot.start();
        wasm_utils::spawn_async(async move {
            let picked = rfd::AsyncFileDialog::new()
                .add_filter("Documents", extensions)
                .pick_file()
                .await;
            let file = match picked {
                Some(file) => Some((file.file_name(), file.read().await)),
                None => None,
            };
            handle.deliver(Ok(file));
        });
    }

    pub fn poll(&mut self) -> Option<(String, Vec<u8>)> {
        self.slot.take()?.ok().flatten()
    }

    pub fn is_open(&self) -> bool {
        self.slot.is_in_flight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_result_is_discarded() {
        let mut slot: AsyncSlot<u32> = AsyncSlot::new();
        let first = slot.start();
        let second = slot.start();

        first.deliver(Ok(1));
        assert!(slot.take().is_none());
        assert!(slot.is_in_flight());

        second.deliver(Ok(2));
        assert_eq!(slot.take(), Some(Ok(2)));
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn cancelled_request_never_lands() {
        let mut slot: AsyncSlot<u32> = AsyncSlot::new();
        let handle = slot.start();
        slot.cancel();
        handle.deliver(Err("late".to_string()));
        assert!(slot.take().is_none());
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn cancel_then_restart_keeps_current_result() {
        let mut slot: AsyncSlot<u32> = AsyncSlot::new();
        let abandoned = slot.start();
        slot.cancel();
        let current = slot.start();

        current.deliver(Ok(2));
        abandoned.deliver(Ok(1));

        assert_eq!(slot.take(), Some(Ok(2)));
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn late_result_after_take_does_not_resurface() {
        let mut slot: AsyncSlot<u32> = AsyncSlot::new();
        let first = slot.start();
        let second = slot.start();

        second.deliver(Ok(2));
        assert_eq!(slot.take(), Some(Ok(2)));

        first.deliver(Ok(1));
        assert!(slot.take().is_none());
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn restart_clears_undelivered_result() {
        let mut slot: AsyncSlot<u32> = AsyncSlot::new();
        slot.start().deliver(Ok(1));
        let next = slot.start();

        assert!(slot.take().is_none());
        assert!(slot.is_in_flight());

        next.deliver(Err("failed".to_string()));
        assert_eq!(slot.take(), Some(Err("failed".to_string())));
    }

    #[tokio::test]
    async fn static_page_loads_through_the_bridge() {
        use agency_core::models::Application;

        let api = AdminApiClient::with_base_url("http://localhost:9");
        let mut loader = PageLoader::new(Application::source(&api).unwrap());
        let mut table = EntityTable::<Application>::new(10).unwrap();

        loader.load(&mut table);
        assert!(table.is_loading());

        for _ in 0..50 {
            if loader.poll(&mut table) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(!table.is_loading());
        assert_eq!(table.row_count(), 3);
    }

    #[tokio::test]
    async fn reload_while_loading_settles_once() {
        use agency_core::models::Application;

        let api = AdminApiClient::with_base_url("http://localhost:9");
        let mut loader = PageLoader::new(Application::source(&api).unwrap());
        let mut table = EntityTable::<Application>::new(10).unwrap();

        loader.load(&mut table);
        loader.load(&mut table);

        let mut changes = 0;
        for _ in 0..20 {
            if loader.poll(&mut table) {
                changes += 1;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(changes, 1);
        assert!(!loader.is_loading());
        assert_eq!(table.row_count(), 3);
    }

    #[tokio::test]
    async fn upload_resubmitted_after_cancel_completes() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/documents/upload/"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"message": "Uploaded"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let api = AdminApiClient::with_base_url(&server.uri());
        let mut form = UploadDocumentForm::new();
        form.set_client("7");
        form.set_document_type(Some(2));
        form.set_file("passport.pdf", b"%PDF-1.7".to_vec());

        let mut task = UploadTask::default();
        task.submit(&api, form.clone());
        task.cancel();
        assert!(!task.is_uploading());
        task.submit(&api, form);
        assert!(task.is_uploading());

        // Let both requests finish in whatever order they land.
        for _ in 0..100 {
            let received = server.received_requests().await.map(|r| r.len()).unwrap_or(0);
            if received == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        let result = task.poll().expect("current upload should have landed");
        assert_eq!(result.unwrap().message.as_deref(), Some("Uploaded"));
        assert!(!task.is_uploading());
        assert!(task.poll().is_none());
    }
}
