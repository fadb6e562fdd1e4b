//! Charts module - view dispatch and chart rendering

mod plotter;
mod series;

pub use plotter::ChartPlotter;
pub use series::{ChartSeries, View, ViewOptions};
