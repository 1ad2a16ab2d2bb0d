use std::collections::HashMap;
use std::sync::Arc;

use agency_core::lookup::SharedDefinitions;
use agency_core::{AdminApiClient, Config, Definitions, PageId, Section};
use eframe::egui;

use crate::pages::{build_page, DashboardPage};
use crate::state_manager::DefinitionsLoader;
use crate::upload_dialog::UploadDialog;
use crate::wasm_utils;

/// Agency admin dashboard: sidebar navigation over every page, one lazily
/// built page instance per entry, plus the upload dialog.
pub struct AdminApp {
    config: Config,
    api: AdminApiClient,

    // Lookup tables, fetched once and shared with every page
    definitions: SharedDefinitions,
    definitions_loader: DefinitionsLoader,

    current: PageId,
    pages: HashMap<PageId, Box<dyn DashboardPage>>,
    page_errors: HashMap<PageId, String>,

    upload: UploadDialog,
    config_error: Option<String>,
}

impl AdminApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        wasm_utils::set_panic_hook();
        wasm_utils::console_log("🚀 Starting Agency Admin dashboard");

        let (config, config_error) = match Config::load() {
            Ok(config) => (config, None),
            Err(e) => {
                log::error!("❌ [APP] {}", e);
                (Config::default(), Some(e.to_string()))
            }
        };
        log::info!("[APP] API base URL: {}", config.api.base_url);

        let api = AdminApiClient::new(&config.api);
        let mut definitions_loader = DefinitionsLoader::default();
        definitions_loader.load(&api);

        Self {
            config,
            api,
            definitions: Arc::new(Definitions::new()),
            definitions_loader,
            current: PageId::Applications,
            pages: HashMap::new(),
            page_errors: HashMap::new(),
            upload: UploadDialog::default(),
            config_error,
        }
    }

    fn select(&mut self, page: PageId) {
        if self.current != page {
            log::info!("[APP] Navigating to {}", page.slug());
            self.current = page;
        }
    }

    fn current_page(&mut self) -> Option<&mut Box<dyn DashboardPage>> {
        let page = self.current;
        if !self.pages.contains_key(&page) && !self.page_errors.contains_key(&page) {
            match build_page(page, &self.api, self.config.table.default_page_size) {
                Ok(built) => {
                    self.pages.insert(page, built);
                }
                Err(e) => {
                    log::error!("❌ [APP] Cannot open {}: {:#}", page.slug(), e);
                    self.page_errors.insert(page, format!("{:#}", e));
                }
            }
        }
        self.pages.get_mut(&page)
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            for section in Section::ALL {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(section.title()).strong());
                for page in section.pages() {
                    if ui.selectable_label(self.current == page, page.title()).clicked() {
                        self.select(page);
                    }
                }
            }
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        if self.definitions_loader.is_loading() {
            ui.spinner();
            ui.label("Loading lookup tables...");
        } else if let Some(error) = self.definitions_loader.error.clone() {
            ui.colored_label(egui::Color32::RED, format!("❌ Lookup tables: {}", error));
            if ui.button("🔄 Retry").clicked() {
                self.definitions_loader.load(&self.api);
            }
        }
        if let Some(error) = &self.config_error {
            ui.colored_label(egui::Color32::YELLOW, format!("⚠ Config: {}", error));
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pull in results from background work
        if let Some(definitions) = self.definitions_loader.poll() {
            self.definitions = definitions;
        }
        for page in self.pages.values_mut() {
            page.poll();
        }
        self.upload.poll();

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.upload.accept_dropped(&dropped);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("🏢 {}", self.config.application.name));
                ui.separator();
                if ui.button("📤 Upload document").clicked() {
                    self.upload.open();
                }
                ui.separator();
                self.render_status(ui);
            });
        });

        egui::SidePanel::left("navigation")
            .resizable(true)
            .default_width(190.0)
            .show(ctx, |ui| self.render_sidebar(ui));

        let definitions = self.definitions.clone();
        let page_sizes = self.config.table.page_size_options.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            let current = self.current;
            match self.current_page() {
                Some(page) => {
                    page.mount();
                    page.show(ui, &definitions, &page_sizes);
                }
                None => {
                    let message = self.page_errors.get(&current).cloned().unwrap_or_default();
                    ui.heading(current.title());
                    ui.colored_label(egui::Color32::RED, format!("❌ {}", message));
                }
            }
        });

        self.upload.show(ctx, &self.api, &definitions);

        let busy = self.definitions_loader.is_loading()
            || self.upload.is_busy()
            || self.pages.values().any(|page| page.is_busy());
        if busy {
            ctx.request_repaint();
        }
    }
}
