//! Control Panel Widget
//! Left side panel with the data source, cleaning summary and view toggles.

use crate::charts::View;
use crate::data::Dataset;
use egui::{Color32, RichText};

/// Tabs of the "Advanced Market Analysis" section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisTab {
    #[default]
    VehicleSpecs,
    FuelAndTransmission,
    MarketSpeed,
}

impl AnalysisTab {
    pub const ALL: [AnalysisTab; 3] = [
        AnalysisTab::VehicleSpecs,
        AnalysisTab::FuelAndTransmission,
        AnalysisTab::MarketSpeed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisTab::VehicleSpecs => "Vehicle Specs",
            AnalysisTab::FuelAndTransmission => "Fuel & Transmission",
            AnalysisTab::MarketSpeed => "Market Speed",
        }
    }

    /// Views laid out side by side in this tab.
    pub fn views(self) -> &'static [View] {
        match self {
            AnalysisTab::VehicleSpecs => &[View::ModelYearHistogram, View::ConditionShare],
            AnalysisTab::FuelAndTransmission => &[View::FuelShare, View::TransmissionByType],
            AnalysisTab::MarketSpeed => &[View::FastestSold],
        }
    }
}

/// Widget state read each frame.
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub show_raw_data: bool,
    pub show_histogram: bool,
    pub show_scatter: bool,
    pub active_tab: AnalysisTab,
}

impl WidgetState {
    /// Views switched on by the checkbox and the two plot buttons.
    pub fn interactive_views(&self) -> Vec<View> {
        [
            (self.show_raw_data, View::RawData),
            (self.show_histogram, View::OdometerHistogram),
            (self.show_scatter, View::PriceVsOdometer),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, view)| view)
        .collect()
    }
}

/// Left side control panel.
#[derive(Default)]
pub struct ControlPanel {
    pub widgets: WidgetState,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the toggles when a new file replaces the table.
    pub fn reset(&mut self) {
        self.widgets = WidgetState::default();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: &Dataset) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚗 US Vehicles")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Exploratory Data Analysis").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let file_name = dataset
                        .source()
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| dataset.source().display().to_string());
                    ui.label(RichText::new(file_name).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
                ui.label(
                    RichText::new(format!("{} listings", dataset.len()))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Cleaning Section =====
        ui.label(RichText::new("🧹 Cleaning").size(14.0).strong());
        ui.add_space(5.0);

        let summary = dataset.summary();
        egui::Grid::new("cleaning_summary")
            .striped(true)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Column").strong().size(11.0));
                ui.label(RichText::new("Median").strong().size(11.0));
                ui.label(RichText::new("Filled").strong().size(11.0));
                ui.end_row();

                for (name, imputation) in [
                    ("model_year", summary.model_year),
                    ("odometer", summary.odometer),
                ] {
                    ui.label(RichText::new(name).size(11.0));
                    ui.label(
                        RichText::new(
                            imputation
                                .median
                                .map(|m| format!("{:.1}", m))
                                .unwrap_or_else(|| "-".to_string()),
                        )
                        .size(11.0),
                    );
                    ui.label(RichText::new(imputation.filled.to_string()).size(11.0));
                    ui.end_row();
                }
            });
        ui.label(
            RichText::new(format!("4WD listings: {}", summary.four_wheel_drive))
                .size(11.0)
                .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Views Section =====
        ui.label(RichText::new("📊 Interactive Plots").size(14.0).strong());
        ui.add_space(5.0);

        ui.checkbox(&mut self.widgets.show_raw_data, "Show raw data");
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            let histogram = egui::Button::new(RichText::new("▶ Build histogram").size(14.0))
                .min_size(egui::vec2(200.0, 30.0))
                .selected(self.widgets.show_histogram);
            if ui.add(histogram).clicked() {
                self.widgets.show_histogram = !self.widgets.show_histogram;
            }

            ui.add_space(5.0);

            let scatter = egui::Button::new(RichText::new("▶ Build scatter plot").size(14.0))
                .min_size(egui::vec2(200.0, 30.0))
                .selected(self.widgets.show_scatter);
            if ui.add(scatter).clicked() {
                self.widgets.show_scatter = !self.widgets.show_scatter;
            }
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
}
