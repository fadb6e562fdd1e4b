//! Chart Series Module
//! Maps each dashboard view to the render-ready data it needs.

use crate::data::{CategoryColumn, Dataset, Listing, NumericColumn};
use crate::stats::{CategoryShare, FastSale, GroupedCount, NumericSummary, StatsCalculator};

/// Every view the dashboard can show, one per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// "Show raw data" checkbox
    RawData,
    /// "Build histogram" button
    OdometerHistogram,
    /// "Build scatter plot" button
    PriceVsOdometer,
    /// "Vehicle Specs" tab
    ModelYearHistogram,
    ConditionShare,
    /// "Fuel & Transmission" tab
    FuelShare,
    TransmissionByType,
    /// "Market Speed" tab
    FastestSold,
}

impl View {
    #[cfg(test)]
    pub const ALL: [View; 8] = [
        View::RawData,
        View::OdometerHistogram,
        View::PriceVsOdometer,
        View::ModelYearHistogram,
        View::ConditionShare,
        View::FuelShare,
        View::TransmissionByType,
        View::FastestSold,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::RawData => "Raw data",
            View::OdometerHistogram => "Odometer distribution",
            View::PriceVsOdometer => "Price vs. Odometer",
            View::ModelYearHistogram => "Model Year Distribution",
            View::ConditionShare => "Condition Percentage",
            View::FuelShare => "Fuel Type Usage",
            View::TransmissionByType => "Transmission by Vehicle Type",
            View::FastestSold => "Fastest Sold Vehicles (Shortest time listed)",
        }
    }

    /// Axis labels as `(x, y)`. Tables and pies have none.
    pub fn axis_labels(self) -> Option<(&'static str, &'static str)> {
        match self {
            View::OdometerHistogram => Some(("Odometer", "Count")),
            View::PriceVsOdometer => Some(("Odometer", "Price ($)")),
            View::ModelYearHistogram => Some(("Model year", "Count")),
            View::FuelShare => Some(("Fuel", "Proportion")),
            View::TransmissionByType => Some(("Type", "Count")),
            View::RawData | View::ConditionShare | View::FastestSold => None,
        }
    }
}

/// Row limits for the table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub preview_rows: usize,
    pub top_n: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            preview_rows: 20,
            top_n: 10,
        }
    }
}

/// One histogram bar, `[start, end)` except for the last bin which includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width binning of a numeric series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistogramBins {
    pub bins: Vec<HistogramBin>,
}

impl HistogramBins {
    /// Bin with Sturges' rule: `ceil(log2 n) + 1` bins over `[min, max]`.
    pub fn auto(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max <= min {
            return Self {
                bins: vec![HistogramBin {
                    start: min - 0.5,
                    end: min + 0.5,
                    count: n,
                }],
            };
        }

        let bin_count = ((n as f64).log2().ceil() as usize + 1).max(1);
        let width = (max - min) / bin_count as f64;

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                start: min + i as f64 * width,
                end: if i + 1 == bin_count {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count: 0,
            })
            .collect();

        for &v in values {
            let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    #[cfg(test)]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Render-ready data for one view.
#[derive(Debug, Clone)]
pub enum ChartSeries {
    Rows(Vec<Listing>),
    Histogram {
        bins: HistogramBins,
        summary: NumericSummary,
    },
    Scatter(Vec<(f64, f64)>),
    Shares(Vec<CategoryShare>),
    Grouped(Vec<GroupedCount>),
    FastSales(Vec<FastSale>),
}

impl ChartSeries {
    /// Compute the series a view renders from the cleaned table.
    pub fn for_view(dataset: &Dataset, view: View, options: &ViewOptions) -> Self {
        let listings = dataset.listings();

        match view {
            View::RawData => {
                ChartSeries::Rows(StatsCalculator::head(listings, options.preview_rows).to_vec())
            }
            View::OdometerHistogram => Self::histogram(listings, NumericColumn::Odometer),
            View::ModelYearHistogram => Self::histogram(listings, NumericColumn::ModelYear),
            View::PriceVsOdometer => ChartSeries::Scatter(StatsCalculator::scatter_pairs(
                listings,
                NumericColumn::Odometer,
                NumericColumn::Price,
            )),
            View::ConditionShare => ChartSeries::Shares(StatsCalculator::category_proportions(
                listings,
                CategoryColumn::Condition,
            )),
            View::FuelShare => ChartSeries::Shares(StatsCalculator::category_proportions(
                listings,
                CategoryColumn::Fuel,
            )),
            View::TransmissionByType => ChartSeries::Grouped(StatsCalculator::grouped_counts(
                listings,
                CategoryColumn::VehicleType,
                CategoryColumn::Transmission,
            )),
            View::FastestSold => ChartSeries::FastSales(StatsCalculator::top_n_ascending(
                listings,
                NumericColumn::DaysListed,
                options.top_n,
            )),
        }
    }

    fn histogram(listings: &[Listing], column: NumericColumn) -> Self {
        let values = StatsCalculator::numeric_series(listings, column);
        ChartSeries::Histogram {
            bins: HistogramBins::auto(&values),
            summary: StatsCalculator::describe(&values),
        }
    }
}
