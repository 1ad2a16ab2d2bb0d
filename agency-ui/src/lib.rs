#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod data_table;
pub mod pages;
pub mod state_manager;
pub mod upload_dialog;
pub mod wasm_utils;

pub use app::AdminApp;

/// WASM entry point for the dashboard
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), wasm_bindgen::JsValue> {
    let web_options = eframe::WebOptions::default();
    let canvas_id = canvas_id.to_string();

    wasm_utils::spawn_async(async move {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&canvas_id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            wasm_utils::console_log(&format!("❌ Canvas '{}' not found", canvas_id));
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    cc.egui_ctx.set_visuals(egui::Visuals::dark());
                    Ok(Box::new(AdminApp::new(cc)))
                }),
            )
            .await;

        if let Some(loading_text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading_text"))
        {
            match start_result {
                Ok(_) => loading_text.remove(),
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The dashboard failed to start. See the developer console for details.</p>",
                    );
                    wasm_utils::console_log(&format!("❌ Failed to start eframe: {:?}", e));
                }
            }
        }
    });

    Ok(())
}
