//! Tabular Data Display: renders exactly one of loading, error, empty or the
//! grid, and hands pagination, reload and column events back to the page.
//! It never filters or sorts on its own.

use agency_core::models::{badge_tone, Tone};
use agency_core::table::{CellKind, PaginationModel};
use agency_core::{Definitions, Entity, EntityTable, TableAction, TableView};
use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

/// What the user did with the table this frame.
#[derive(Default)]
pub struct DisplayResponse {
    pub actions: Vec<TableAction>,
    /// Position (within the current page) of the row whose details were requested.
    pub opened_row: Option<usize>,
}

pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Success => Color32::from_rgb(76, 175, 80),
        Tone::Warning => Color32::from_rgb(255, 193, 7),
        Tone::Danger => Color32::from_rgb(244, 67, 54),
        Tone::Info => Color32::from_rgb(33, 150, 243),
        Tone::Neutral => Color32::GRAY,
    }
}

pub fn show<R: Entity>(
    ui: &mut egui::Ui,
    table: &EntityTable<R>,
    definitions: &Definitions,
    page_sizes: &[usize],
) -> DisplayResponse {
    let mut response = DisplayResponse::default();

    match table.view() {
        TableView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading records...");
            });
        }
        TableView::Error(message) => {
            ui.colored_label(Color32::RED, format!("❌ {}", message));
            if ui.button("🔄 Reload").clicked() {
                response.actions.push(TableAction::Reload);
            }
        }
        TableView::Empty => {
            let text = if table.filters().is_empty() {
                "No records found."
            } else {
                "No records match the current search and filters."
            };
            ui.label(RichText::new(text).italics());
        }
        TableView::Populated => {
            render_grid(ui, table, definitions, &mut response);
            ui.separator();
            render_footer(ui, table, page_sizes, &mut response);
        }
    }

    response
}

fn render_grid<R: Entity>(
    ui: &mut egui::Ui,
    table: &EntityTable<R>,
    definitions: &Definitions,
    response: &mut DisplayResponse,
) {
    let columns = table.visible_columns();
    let rows = table.page_rows();
    let available_height = ui.available_height() - 40.0;

    ui.push_id(R::PAGE.slug(), |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(80.0), columns.len())
            .column(Column::remainder().at_least(50.0))
            .min_scrolled_height(0.0)
            .max_scroll_height(available_height.max(120.0))
            .header(22.0, |mut header| {
                for column in &columns {
                    header.col(|ui| {
                        ui.strong(column.header);
                    });
                }
                header.col(|_| {});
            })
            .body(|mut body| {
                for (position, record) in rows.iter().enumerate() {
                    body.row(24.0, |mut row| {
                        for column in &columns {
                            row.col(|ui| {
                                let text = column.display(record, definitions);
                                match column.kind {
                                    CellKind::Badge => {
                                        let color = tone_color(badge_tone(&text));
                                        ui.label(RichText::new(text).color(color).strong());
                                    }
                                    CellKind::Currency | CellKind::Number => {
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| ui.monospace(text),
                                        );
                                    }
                                    CellKind::Text | CellKind::Lookup(_) => {
                                        ui.label(text);
                                    }
                                }
                            });
                        }
                        row.col(|ui| {
                            if ui.small_button("View").clicked() {
                                response.opened_row = Some(position);
                            }
                        });
                    });
                }
            });
    });
}

fn render_footer<R: Entity>(
    ui: &mut egui::Ui,
    table: &EntityTable<R>,
    page_sizes: &[usize],
    response: &mut DisplayResponse,
) {
    let model = table.pagination();
    let total = table.row_count();
    let pages = table.page_count();
    let window = model.window(total);

    ui.horizontal(|ui| {
        ui.label("Rows per page:");
        let mut size = model.page_size;
        egui::ComboBox::from_id_salt((R::PAGE.slug(), "page_size"))
            .selected_text(size.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for option in page_sizes {
                    ui.selectable_value(&mut size, *option, option.to_string());
                }
            });
        if size != model.page_size {
            if let Ok(next) = PaginationModel::new(0, size) {
                response.actions.push(TableAction::ChangePage(next));
            }
        }

        ui.separator();
        if window.is_empty() {
            ui.label(format!("0 of {}", total));
        } else {
            ui.label(format!("{}–{} of {}", window.start + 1, window.end, total));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let has_next = model.page + 1 < pages;
            if ui.add_enabled(has_next, egui::Button::new("▶")).clicked() {
                response.actions.push(TableAction::ChangePage(model.with_page(model.page + 1)));
            }
            ui.label(format!("Page {} of {}", model.page + 1, pages.max(1)));
            if ui.add_enabled(model.page > 0, egui::Button::new("◀")).clicked() {
                response
                    .actions
                    .push(TableAction::ChangePage(model.with_page(model.page.saturating_sub(1))));
            }
        });
    });
}
