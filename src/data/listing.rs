//! Listing Model
//! Cleaned row type, column names and column selectors used by the aggregations.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// CSV header names of the required columns.
pub mod columns {
    pub const MODEL: &str = "model";
    pub const MODEL_YEAR: &str = "model_year";
    pub const PRICE: &str = "price";
    pub const ODOMETER: &str = "odometer";
    pub const CONDITION: &str = "condition";
    pub const FUEL: &str = "fuel";
    pub const TYPE: &str = "type";
    pub const TRANSMISSION: &str = "transmission";
    pub const IS_4WD: &str = "is_4wd";
    pub const DATE_POSTED: &str = "date_posted";
    pub const DAYS_LISTED: &str = "days_listed";

    pub const REQUIRED: [&str; 11] = [
        MODEL,
        MODEL_YEAR,
        PRICE,
        ODOMETER,
        CONDITION,
        FUEL,
        TYPE,
        TRANSMISSION,
        IS_4WD,
        DATE_POSTED,
        DAYS_LISTED,
    ];
}

/// One row of the cleaned table.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub model: String,
    pub model_year: f64,
    pub price: f64,
    pub odometer: f64,
    pub condition: String,
    pub fuel: String,
    pub vehicle_type: String,
    pub transmission: String,
    pub is_4wd: bool,
    pub date_posted: NaiveDate,
    pub days_listed: i64,
}

/// Numeric columns that can feed a histogram or scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    ModelYear,
    Price,
    Odometer,
    DaysListed,
}

impl NumericColumn {
    pub fn value(self, listing: &Listing) -> f64 {
        match self {
            NumericColumn::ModelYear => listing.model_year,
            NumericColumn::Price => listing.price,
            NumericColumn::Odometer => listing.odometer,
            NumericColumn::DaysListed => listing.days_listed as f64,
        }
    }
}

/// Categorical columns that can be counted or grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Condition,
    Fuel,
    VehicleType,
    Transmission,
}

impl CategoryColumn {
    pub fn value(self, listing: &Listing) -> &str {
        match self {
            CategoryColumn::Condition => &listing.condition,
            CategoryColumn::Fuel => &listing.fuel,
            CategoryColumn::VehicleType => &listing.vehicle_type,
            CategoryColumn::Transmission => &listing.transmission,
        }
    }
}

/// What the cleaning step filled in for one imputed column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnImputation {
    /// Median of the values present before imputation. `None` when nothing was missing
    /// and the column had no rows at all.
    pub median: Option<f64>,
    pub filled: usize,
}

/// Summary of the cleaning pass, logged after load and shown in the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImputationSummary {
    pub model_year: ColumnImputation,
    pub odometer: ColumnImputation,
    pub four_wheel_drive: usize,
}

/// The cleaned, immutable table.
#[derive(Debug)]
pub struct Dataset {
    source: PathBuf,
    listings: Vec<Listing>,
    summary: ImputationSummary,
}

impl Dataset {
    pub fn new(source: PathBuf, listings: Vec<Listing>, summary: ImputationSummary) -> Self {
        Self {
            source,
            listings,
            summary,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn summary(&self) -> &ImputationSummary {
        &self.summary
    }
}
