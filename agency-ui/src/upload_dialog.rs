use agency_core::api::UploadDocumentForm;
use agency_core::{AdminApiClient, Definitions, LookupKind};
use eframe::egui::{self, Color32};

#[cfg(target_arch = "wasm32")]
use crate::state_manager::FilePicker;
use crate::state_manager::{ClientsLoader, UploadTask};

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "doc", "docx"];

/// Document upload window. Submitting is only possible once a client, a
/// document type and a file are chosen.
#[derive(Default)]
pub struct UploadDialog {
    pub open: bool,
    form: UploadDocumentForm,
    clients: ClientsLoader,
    task: UploadTask,
    #[cfg(target_arch = "wasm32")]
    picker: FilePicker,
    status: Option<Result<String, String>>,
}

impl UploadDialog {
    pub fn open(&mut self) {
        self.open = true;
        self.status = None;
    }

    pub fn poll(&mut self) {
        self.clients.poll();
        #[cfg(target_arch = "wasm32")]
        if let Some((name, bytes)) = self.picker.poll() {
            self.form.set_file(name, bytes);
        }
        match self.task.poll() {
            Some(Ok(response)) => {
                let message = response.message.unwrap_or_else(|| "Document uploaded".to_string());
                log::info!("✅ [UPLOAD] {}", message);
                self.status = Some(Ok(message));
                self.form.reset();
            }
            Some(Err(message)) => self.status = Some(Err(message)),
            None => {}
        }
    }

    pub fn is_busy(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        if self.picker.is_open() {
            return true;
        }
        self.task.is_uploading() || self.clients.is_loading()
    }

    /// Native builds block on the system dialog like any other modal.
    #[cfg(not(target_arch = "wasm32"))]
    fn browse(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Documents", DOCUMENT_EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            if let Err(e) = self.form.load_file(&path) {
                self.status = Some(Err(e.to_string()));
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn browse(&mut self) {
        self.picker.browse(DOCUMENT_EXTENSIONS);
    }

    /// Files dropped onto the window while the dialog is open.
    pub fn accept_dropped(&mut self, files: &[egui::DroppedFile]) {
        if !self.open {
            return;
        }
        let Some(file) = files.first() else {
            return;
        };

        if let Some(bytes) = &file.bytes {
            self.form.set_file(file.name.clone(), bytes.to_vec());
            return;
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &file.path {
            if let Err(e) = self.form.load_file(path) {
                self.status = Some(Err(e.to_string()));
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, api: &AdminApiClient, definitions: &Definitions) {
        if !self.open {
            return;
        }
        self.clients.ensure_loaded(api);

        let mut open = self.open;
        egui::Window::new("📤 Upload document")
            .open(&mut open)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                egui::Grid::new("upload_grid")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Client:");
                        self.client_picker(ui);
                        ui.end_row();

                        ui.label("Document type:");
                        self.document_type_picker(ui, definitions);
                        ui.end_row();

                        ui.label("File:");
                        ui.horizontal(|ui| {
                            ui.label(match self.form.file_name() {
                                Some(name) => format!("{} ({} bytes)", name, self.form.file_len()),
                                None => "Browse or drop a file here".to_string(),
                            });
                            if ui.button("Browse…").clicked() {
                                self.browse();
                            }
                        });
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let uploading = self.task.is_uploading();
                    let enabled = self.form.can_upload() && !uploading;
                    if ui.add_enabled(enabled, egui::Button::new("Upload")).clicked() {
                        self.status = None;
                        self.task.submit(api, self.form.clone());
                    }
                    if uploading {
                        ui.spinner();
                        ui.label("Uploading...");
                    } else if let Some(reason) = self.form.missing() {
                        ui.weak(reason);
                    }
                });

                match &self.status {
                    Some(Ok(message)) => {
                        ui.colored_label(Color32::GREEN, format!("✅ {}", message));
                    }
                    Some(Err(message)) => {
                        ui.colored_label(Color32::RED, format!("❌ {}", message));
                    }
                    None => {}
                }
            });

        if !open {
            self.task.cancel();
        }
        self.open = open;
    }

    fn client_picker(&mut self, ui: &mut egui::Ui) {
        if self.clients.is_loading() {
            ui.spinner();
            return;
        }
        if let Some(error) = self.clients.error.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(Color32::RED, error);
                if ui.small_button("Retry").clicked() {
                    self.clients.retry();
                }
            });
            return;
        }

        let mut selected = self.form.client_id.clone().unwrap_or_default();
        let selected_text = self
            .clients
            .clients
            .iter()
            .find(|c| c.id == selected)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Select a client".to_string());

        egui::ComboBox::from_id_salt("upload_client")
            .selected_text(selected_text)
            .width(220.0)
            .show_ui(ui, |ui| {
                for client in &self.clients.clients {
                    ui.selectable_value(&mut selected, client.id.clone(), client.name.as_str());
                }
            });
        self.form.set_client(selected);
    }

    fn document_type_picker(&mut self, ui: &mut egui::Ui, definitions: &Definitions) {
        let Some(types) = definitions.get(LookupKind::DocumentTypes) else {
            ui.weak("Document types not loaded");
            return;
        };

        let mut selected = self.form.document_type;
        egui::ComboBox::from_id_salt("upload_document_type")
            .selected_text(types.label_or_placeholder(selected).to_string())
            .width(220.0)
            .show_ui(ui, |ui| {
                for (id, term) in types.iter() {
                    ui.selectable_value(&mut selected, Some(id), term);
                }
            });
        self.form.set_document_type(selected);
    }
}
