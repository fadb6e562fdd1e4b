//! Chart Plotter Module
//! Draws chart series with egui_plot and the egui painter.

use crate::charts::series::{ChartSeries, HistogramBins, View};
use crate::data::Listing;
use crate::stats::{CategoryShare, FastSale, GroupedCount, NumericSummary};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};
use std::f32::consts::TAU;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Histogram color for the model year view
pub const INDIAN_RED: Color32 = Color32::from_rgb(205, 92, 92);

const PLOT_HEIGHT: f32 = 320.0;
const PIE_HOLE: f32 = 0.3;
/// Largest angle drawn as a single triangle when filling a pie slice.
const PIE_STEP: f32 = 0.05;

/// Draws dashboard views with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a view's series with the chart type the view calls for.
    pub fn draw(ui: &mut egui::Ui, view: View, series: &ChartSeries) {
        match series {
            ChartSeries::Rows(rows) => Self::draw_listing_table(ui, rows),
            ChartSeries::Histogram { bins, summary } => {
                let color = if view == View::ModelYearHistogram {
                    INDIAN_RED
                } else {
                    Self::color(0)
                };
                Self::draw_histogram(ui, view, bins, color);
                Self::draw_summary(ui, summary);
            }
            ChartSeries::Scatter(pairs) => Self::draw_scatter(ui, view, pairs),
            ChartSeries::Shares(shares) if view == View::ConditionShare => {
                Self::draw_pie(ui, shares)
            }
            ChartSeries::Shares(shares) => Self::draw_share_bars(ui, view, shares),
            ChartSeries::Grouped(counts) => Self::draw_grouped_bars(ui, view, counts),
            ChartSeries::FastSales(rows) => Self::draw_fast_sales_table(ui, rows),
        }
    }

    fn axis_labels(view: View) -> (&'static str, &'static str) {
        view.axis_labels().unwrap_or(("", ""))
    }

    /// Bars of equal-width bins.
    pub fn draw_histogram(ui: &mut egui::Ui, view: View, bins: &HistogramBins, color: Color32) {
        let bars: Vec<Bar> = bins
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count as f64)
                    .width(bin.width())
                    .name(format!("{:.0} to {:.0}", bin.start, bin.end))
            })
            .collect();

        let (x_label, y_label) = Self::axis_labels(view);
        Plot::new(format!("plot_{:?}", view))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(view.title()));
            });
    }

    /// One marker per listing.
    pub fn draw_scatter(ui: &mut egui::Ui, view: View, pairs: &[(f64, f64)]) {
        let points: PlotPoints = pairs.iter().map(|&(x, y)| [x, y]).collect();

        let (x_label, y_label) = Self::axis_labels(view);
        Plot::new(format!("plot_{:?}", view))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points)
                        .radius(2.0)
                        .color(Self::color(0).gamma_multiply(0.6))
                        .name(view.title()),
                );
            });
    }

    /// Donut chart with a legend row.
    pub fn draw_pie(ui: &mut egui::Ui, shares: &[CategoryShare]) {
        Self::draw_legend(ui, shares.iter().map(|s| s.label.as_str()));

        let size = ui.available_width().min(PLOT_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = size / 2.0 - 4.0;

        let mut angle = -TAU / 4.0;
        for (i, share) in shares.iter().enumerate() {
            let sweep = share.proportion as f32 * TAU;
            let color = Self::color(i);

            let steps = ((sweep / PIE_STEP).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = angle + sweep * s as f32 / steps as f32;
                let a1 = angle + sweep * (s + 1) as f32 / steps as f32;
                painter.add(egui::Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * egui::vec2(a0.cos(), a0.sin()),
                        center + radius * egui::vec2(a1.cos(), a1.sin()),
                    ],
                    color,
                    egui::Stroke::NONE,
                ));
            }

            if share.proportion >= 0.03 {
                let mid = angle + sweep / 2.0;
                let label_at = center + radius * 0.7 * egui::vec2(mid.cos(), mid.sin());
                painter.text(
                    label_at,
                    egui::Align2::CENTER_CENTER,
                    format!("{:.1}%", share.proportion * 100.0),
                    egui::FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }

            angle += sweep;
        }

        painter.circle_filled(center, radius * PIE_HOLE, ui.visuals().panel_fill);
    }

    /// One colored bar per category.
    pub fn draw_share_bars(ui: &mut egui::Ui, view: View, shares: &[CategoryShare]) {
        let labels: Vec<String> = shares.iter().map(|s| s.label.clone()).collect();

        let (x_label, y_label) = Self::axis_labels(view);
        Plot::new(format!("plot_{:?}", view))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (i, share) in shares.iter().enumerate() {
                    let bar = Bar::new(i as f64, share.proportion)
                        .width(0.8)
                        .name(&share.label);
                    plot_ui.bar_chart(
                        BarChart::new(vec![bar])
                            .color(Self::color(i))
                            .name(&share.label),
                    );
                }
            });
    }

    /// Bars per category, side by side for each group.
    pub fn draw_grouped_bars(ui: &mut egui::Ui, view: View, counts: &[GroupedCount]) {
        let categories = Self::distinct(counts.iter().map(|c| c.category.as_str()));
        let groups = Self::distinct(counts.iter().map(|c| c.group.as_str()));
        let bar_width = 0.8 / groups.len().max(1) as f64;
        let labels = categories.clone();

        let (x_label, y_label) = Self::axis_labels(view);
        Plot::new(format!("plot_{:?}", view))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                for (g, group) in groups.iter().enumerate() {
                    let offset = (g as f64 - (groups.len() as f64 - 1.0) / 2.0) * bar_width;
                    let bars: Vec<Bar> = counts
                        .iter()
                        .filter(|c| &c.group == group)
                        .filter_map(|c| {
                            let x = categories.iter().position(|cat| *cat == c.category)?;
                            Some(
                                Bar::new(x as f64 + offset, c.count as f64)
                                    .width(bar_width)
                                    .name(format!("{} / {}", c.category, c.group)),
                            )
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(Self::color(g)).name(group));
                }
            });
    }

    /// First rows of the cleaned table, every column.
    pub fn draw_listing_table(ui: &mut egui::Ui, rows: &[Listing]) {
        let headers = [
            "model",
            "model_year",
            "price",
            "odometer",
            "condition",
            "fuel",
            "type",
            "transmission",
            "is_4wd",
            "date_posted",
            "days_listed",
        ];

        egui::ScrollArea::horizontal()
            .id_salt("raw_data_scroll")
            .show(ui, |ui| {
                Self::table(ui, "raw_data_table", &headers, rows, |ui, row| {
                    ui.label(&row.model);
                    ui.label(format!("{:.0}", row.model_year));
                    ui.label(format!("{:.0}", row.price));
                    ui.label(format!("{:.0}", row.odometer));
                    ui.label(&row.condition);
                    ui.label(&row.fuel);
                    ui.label(&row.vehicle_type);
                    ui.label(&row.transmission);
                    ui.label(row.is_4wd.to_string());
                    ui.label(row.date_posted.to_string());
                    ui.label(row.days_listed.to_string());
                });
            });
    }

    pub fn draw_fast_sales_table(ui: &mut egui::Ui, rows: &[FastSale]) {
        let headers = ["model", "model_year", "price", "days_listed", "condition"];

        Self::table(ui, "fast_sales_table", &headers, rows, |ui, row| {
            ui.label(&row.model);
            ui.label(format!("{:.0}", row.model_year));
            ui.label(format!("{:.0}", row.price));
            ui.label(row.days_listed.to_string());
            ui.label(&row.condition);
        });
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &NumericSummary) {
        ui.label(
            RichText::new(format!(
                "n = {}   mean = {:.1}   median = {:.1}   std = {:.1}   min = {:.0}   max = {:.0}",
                summary.count, summary.mean, summary.median, summary.std, summary.min, summary.max
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
    }

    fn draw_legend<'a>(ui: &mut egui::Ui, labels: impl Iterator<Item = &'a str>) {
        ui.horizontal_wrapped(|ui| {
            for (i, label) in labels.enumerate() {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 3.0, Self::color(i));
                ui.label(RichText::new(label).size(13.0));
                ui.add_space(10.0);
            }
        });
    }

    fn table<T>(
        ui: &mut egui::Ui,
        id: &str,
        headers: &[&str],
        rows: &[T],
        mut draw_row: impl FnMut(&mut egui::Ui, &T),
    ) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(id)
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in headers {
                            ui.label(RichText::new(*header).strong());
                        }
                        ui.end_row();

                        for row in rows {
                            draw_row(ui, row);
                            ui.end_row();
                        }
                    });
            });
    }

    fn category_label(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if idx < 0.0 || (value - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    /// Distinct values in first-seen order.
    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for v in values {
            if !seen.iter().any(|s| s == v) {
                seen.push(v.to_string());
            }
        }
        seen
    }
}
