use agency_core::table::{ActionOutcome, FilterOption};
use agency_core::{AdminApiClient, Definitions, Entity, EntityTable, PageId, SourceKind, TableAction};
use agency_core::models::{
    Application, Client, Faq, Hotel, Lead, LoanPlan, MarketplaceProduct, StockItem, Ticket, VisaCase,
};
use eframe::egui::{self, Color32, RichText};

use crate::data_table;
use crate::state_manager::PageLoader;
use crate::wasm_utils;

/// One screen of the dashboard, erased over its record type.
pub trait DashboardPage {
    /// Start the initial load the first time the page is shown.
    fn mount(&mut self);

    /// Pull in finished background work. Returns true when something changed.
    fn poll(&mut self) -> bool;

    fn is_busy(&self) -> bool;

    fn show(&mut self, ui: &mut egui::Ui, definitions: &Definitions, page_sizes: &[usize]);
}

pub fn build_page(
    page: PageId,
    api: &AdminApiClient,
    page_size: usize,
) -> anyhow::Result<Box<dyn DashboardPage>> {
    Ok(match page {
        PageId::Applications => Box::new(EntityPage::<Application>::new(api, page_size)?),
        PageId::VisaCases => Box::new(EntityPage::<VisaCase>::new(api, page_size)?),
        PageId::LoanPlans => Box::new(EntityPage::<LoanPlan>::new(api, page_size)?),
        PageId::Hotels => Box::new(EntityPage::<Hotel>::new(api, page_size)?),
        PageId::StockItems => Box::new(EntityPage::<StockItem>::new(api, page_size)?),
        PageId::Tickets => Box::new(EntityPage::<Ticket>::new(api, page_size)?),
        PageId::Faqs => Box::new(EntityPage::<Faq>::new(api, page_size)?),
        PageId::Clients => Box::new(EntityPage::<Client>::new(api, page_size)?),
        PageId::Leads => Box::new(EntityPage::<Lead>::new(api, page_size)?),
        PageId::MarketplaceProducts => Box::new(EntityPage::<MarketplaceProduct>::new(api, page_size)?),
    })
}

struct FilterControl {
    key: &'static str,
    label: &'static str,
    options: Vec<FilterOption>,
    selected: String,
}

pub struct EntityPage<R: Entity> {
    table: EntityTable<R>,
    loader: PageLoader<R>,
    mounted: bool,
    search_input: String,
    detail: Option<R>,
    loaded_at: Option<String>,
}

impl<R: Entity> EntityPage<R> {
    pub fn new(api: &AdminApiClient, page_size: usize) -> anyhow::Result<Self> {
        let source = R::source(api)?;
        Ok(Self {
            table: EntityTable::new(page_size)?,
            loader: PageLoader::new(source),
            mounted: false,
            search_input: String::new(),
            detail: None,
            loaded_at: None,
        })
    }

    fn apply(&mut self, action: TableAction) {
        log::debug!("[PAGE] {}: {}", R::PAGE.slug(), action.description());
        if matches!(action, TableAction::ClearFilters) {
            self.search_input.clear();
        }
        match self.table.apply(action) {
            Ok(ActionOutcome::FetchRequired) => self.loader.load(&mut self.table),
            Ok(ActionOutcome::Applied) => {}
            Err(e) => log::warn!("⚠️ [PAGE] {}: {}", R::PAGE.slug(), e),
        }
    }

    fn source_badge(&self) -> RichText {
        match self.loader.source().kind() {
            SourceKind::Static => RichText::new("sample data").color(Color32::GRAY),
            SourceKind::Remote => RichText::new("live").color(Color32::from_rgb(76, 175, 80)),
        }
    }

    fn render_filter_bar(&mut self, ui: &mut egui::Ui, definitions: &Definitions, actions: &mut Vec<TableAction>) {
        let mut controls: Vec<FilterControl> = self
            .table
            .descriptor()
            .filters
            .iter()
            .map(|dim| FilterControl {
                key: dim.key,
                label: dim.label,
                options: dim.options(definitions),
                selected: self.table.filter_value(dim.key).to_string(),
            })
            .collect();

        ui.horizontal_wrapped(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("🔍 Search...")
                    .desired_width(220.0),
            );
            if search.changed() {
                actions.push(TableAction::SetSearch(self.search_input.clone()));
            }

            for control in &mut controls {
                let current = control.selected.clone();
                let selected_text = control
                    .options
                    .iter()
                    .find(|o| o.value == current)
                    .map(|o| o.label.clone())
                    .unwrap_or_else(|| if current.is_empty() { "All".to_string() } else { current.clone() });

                ui.label(format!("{}:", control.label));
                egui::ComboBox::from_id_salt((R::PAGE.slug(), control.key))
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut control.selected, String::new(), "All");
                        for option in &control.options {
                            ui.selectable_value(&mut control.selected, option.value.clone(), option.label.as_str());
                        }
                    });

                if control.selected != current {
                    actions.push(TableAction::SetFilter {
                        dimension: control.key.to_string(),
                        value: control.selected.clone(),
                    });
                }
            }

            if ui.button("Clear filters").clicked() {
                actions.push(TableAction::ClearFilters);
            }

            ui.menu_button("Columns", |ui| {
                for column in &self.table.descriptor().columns {
                    let mut visible = self.table.is_column_visible(column.key);
                    if ui.checkbox(&mut visible, column.header).changed() {
                        actions.push(TableAction::ToggleColumn(column.key.to_string()));
                    }
                }
            });
        });
    }

    fn render_detail(&mut self, ctx: &egui::Context, definitions: &Definitions) {
        let Some(record) = &self.detail else {
            return;
        };

        let mut open = true;
        egui::Window::new(format!("{} {}", R::PAGE.title(), record.id()))
            .id(egui::Id::new((R::PAGE.slug(), "detail")))
            .open(&mut open)
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                egui::Grid::new((R::PAGE.slug(), "detail_grid"))
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for column in &self.table.descriptor().columns {
                            ui.label(RichText::new(column.header).strong());
                            ui.label(column.display(record, definitions));
                            ui.end_row();
                        }
                    });
            });

        if !open {
            self.detail = None;
        }
    }
}

impl<R: Entity> DashboardPage for EntityPage<R> {
    fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.loader.load(&mut self.table);
    }

    fn poll(&mut self) -> bool {
        let changed = self.loader.poll(&mut self.table);
        if changed && self.table.error().is_none() {
            self.loaded_at = Some(wasm_utils::clock_label());
        }
        changed
    }

    fn is_busy(&self) -> bool {
        self.loader.is_loading()
    }

    fn show(&mut self, ui: &mut egui::Ui, definitions: &Definitions, page_sizes: &[usize]) {
        ui.horizontal(|ui| {
            ui.heading(R::PAGE.title());
            ui.label(self.source_badge());
            if let Some(at) = &self.loaded_at {
                ui.label(RichText::new(format!("loaded {}", at)).small().weak());
            }
        });
        ui.add_space(6.0);

        let mut actions = Vec::new();
        self.render_filter_bar(ui, definitions, &mut actions);
        ui.add_space(6.0);

        let response = data_table::show(ui, &self.table, definitions, page_sizes);
        if let Some(position) = response.opened_row {
            self.detail = self.table.page_rows().get(position).map(|record| (*record).clone());
        }
        actions.extend(response.actions);

        for action in actions {
            self.apply(action);
        }

        self.render_detail(ui.ctx(), definitions);
    }
}
