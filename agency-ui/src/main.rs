// Desktop entry point for the agency admin dashboard
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use agency_ui::AdminApp;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Agency Admin")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Agency Admin",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(AdminApp::new(cc)))
        }),
    )
}

// The web build starts through `agency_ui::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
