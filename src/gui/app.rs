//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::config::DashboardConfig;
use crate::data::{Dataset, DatasetCache};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{Color32, RichText, SidePanel};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Outcome of the last load. A failed load hides the whole dashboard.
enum LoadState {
    Ready(Arc<Dataset>),
    Failed(String),
}

/// Main application window.
pub struct DashboardApp {
    cache: DatasetCache,
    state: LoadState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut cache = DatasetCache::new();
        let state = Self::load(&mut cache, &config.data_path);

        Self {
            cache,
            state,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(config.view_options()),
        }
    }

    fn load(cache: &mut DatasetCache, path: &Path) -> LoadState {
        match cache.load(path) {
            Ok(dataset) => LoadState::Ready(dataset),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }

    /// Pick another CSV and replace the table.
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        info!(path = %path.display(), "opening listings file");
        self.state = Self::load(&mut self.cache, &path);
        self.chart_viewer.clear();
        self.control_panel.reset();
    }

    /// Blocking error screen shown instead of the dashboard.
    fn show_error(&mut self, ctx: &egui::Context, message: &str) {
        let mut browse = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.label(
                    RichText::new("⚠ Unable to load the listings")
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                ui.add_space(8.0);
                ui.label(RichText::new(message).size(13.0));
                ui.add_space(15.0);
                if ui.button("📂 Open another CSV…").clicked() {
                    browse = true;
                }
            });
        });

        if browse {
            self.handle_browse_csv();
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dataset = match &self.state {
            LoadState::Ready(dataset) => Arc::clone(dataset),
            LoadState::Failed(message) => {
                let message = message.clone();
                self.show_error(ctx, &message);
                return;
            }
        };

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &dataset) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // The browse action may have replaced the table; draw it from the next frame.
        let LoadState::Ready(current) = &self.state else {
            ctx.request_repaint();
            return;
        };
        if !Arc::ptr_eq(current, &dataset) {
            ctx.request_repaint();
            return;
        }

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, &dataset, &mut self.control_panel.widgets);
        });
    }
}
