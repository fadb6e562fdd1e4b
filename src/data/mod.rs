//! Data module - CSV loading, cleaning and the listing model

mod listing;
mod loader;
mod processor;

pub use listing::{
    columns, CategoryColumn, ColumnImputation, Dataset, ImputationSummary, Listing, NumericColumn,
};
pub use loader::{DatasetCache, LoadError};
pub use processor::DataProcessor;
