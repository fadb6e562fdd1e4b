//! Chart Viewer Widget
//! Central scrollable panel: raw data, the interactive plots and the analysis tabs.

use crate::charts::{ChartPlotter, ChartSeries, View, ViewOptions};
use crate::data::Dataset;
use crate::gui::control_panel::{AnalysisTab, WidgetState};
use egui::{RichText, ScrollArea};
use std::collections::HashMap;

const SECTION_SPACING: f32 = 15.0;

/// Renders the views selected by the widgets.
///
/// Series are computed the first time a view is shown and reused until the table
/// is replaced.
pub struct ChartViewer {
    options: ViewOptions,
    series: HashMap<View, ChartSeries>,
}

impl ChartViewer {
    pub fn new(options: ViewOptions) -> Self {
        Self {
            options,
            series: HashMap::new(),
        }
    }

    /// Drop every computed series
    pub fn clear(&mut self) {
        self.series.clear();
    }

    fn series_for(&mut self, dataset: &Dataset, view: View) -> &ChartSeries {
        let options = self.options;
        self.series
            .entry(view)
            .or_insert_with(|| ChartSeries::for_view(dataset, view, &options))
    }

    /// Draw the central panel
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: &Dataset, widgets: &mut WidgetState) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Exploratory Data Analysis (EDA) with US vehicles");
                ui.label(
                    RichText::new(
                        "Cleaned listings: missing model years and odometer readings are filled \
                         with the column median, missing 4WD flags read as false.",
                    )
                    .size(12.0),
                );
                ui.add_space(SECTION_SPACING);

                if dataset.is_empty() {
                    ui.label(
                        RichText::new("The file has a header but no listings.")
                            .color(egui::Color32::GRAY),
                    );
                    return;
                }

                if widgets.show_raw_data {
                    self.draw_view(ui, dataset, View::RawData);
                    ui.add_space(SECTION_SPACING);
                }

                ui.separator();
                ui.label(RichText::new("Interactive Plots").size(18.0).strong());

                let plots: Vec<View> = widgets
                    .interactive_views()
                    .into_iter()
                    .filter(|v| *v != View::RawData)
                    .collect();
                if plots.is_empty() {
                    ui.label(
                        RichText::new("Use the buttons on the left to build a plot.")
                            .color(egui::Color32::GRAY),
                    );
                } else {
                    self.draw_row(ui, dataset, &plots);
                }
                ui.add_space(SECTION_SPACING);

                ui.separator();
                ui.label(RichText::new("Advanced Market Analysis").size(18.0).strong());
                ui.horizontal(|ui| {
                    for tab in AnalysisTab::ALL {
                        ui.selectable_value(&mut widgets.active_tab, tab, tab.label());
                    }
                });
                ui.add_space(8.0);
                self.draw_row(ui, dataset, widgets.active_tab.views());
            });
    }

    /// Views side by side in equal columns.
    fn draw_row(&mut self, ui: &mut egui::Ui, dataset: &Dataset, views: &[View]) {
        if let [view] = views {
            self.draw_view(ui, dataset, *view);
            return;
        }

        ui.columns(views.len(), |columns| {
            for (column, view) in columns.iter_mut().zip(views) {
                self.draw_view(column, dataset, *view);
            }
        });
    }

    fn draw_view(&mut self, ui: &mut egui::Ui, dataset: &Dataset, view: View) {
        ui.label(RichText::new(view.title()).size(15.0).strong());
        ui.add_space(4.0);
        let series = self.series_for(dataset, view);
        ChartPlotter::draw(ui, view, series);
    }
}
