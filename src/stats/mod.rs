//! Stats module - aggregations over the cleaned listings

mod calculator;

pub use calculator::{CategoryShare, FastSale, GroupedCount, NumericSummary, StatsCalculator};
