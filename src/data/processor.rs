//! Data Processor Module
//! Handles data cleaning: median imputation, 4WD flag coercion and date parsing.

use crate::data::{columns, ColumnImputation, ImputationSummary, Listing, LoadError};
use crate::stats::StatsCalculator;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Date layouts accepted for `date_posted`, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Turns a raw listings DataFrame into cleaned rows.
pub struct DataProcessor;

impl DataProcessor {
    /// Clean a raw table whose required columns are all present.
    pub fn clean(df: &DataFrame) -> Result<(Vec<Listing>, ImputationSummary), LoadError> {
        let mut models = Self::required_text(df, columns::MODEL)?;
        let mut conditions = Self::required_text(df, columns::CONDITION)?;
        let mut fuels = Self::required_text(df, columns::FUEL)?;
        let mut types = Self::required_text(df, columns::TYPE)?;
        let mut transmissions = Self::required_text(df, columns::TRANSMISSION)?;
        let prices = Self::required_float(df, columns::PRICE)?;
        let days_listed = Self::required_int(df, columns::DAYS_LISTED)?;

        // Both medians come from the raw columns, before anything is filled.
        let (model_years, model_year) =
            Self::impute_median(columns::MODEL_YEAR, Self::float_column(df, columns::MODEL_YEAR)?)?;
        let (odometers, odometer) =
            Self::impute_median(columns::ODOMETER, Self::float_column(df, columns::ODOMETER)?)?;

        let four_wd: Vec<bool> = Self::text_column(df, columns::IS_4WD)?
            .iter()
            .map(|raw| Self::coerce_flag(raw.as_deref()))
            .collect();

        let dates = Self::text_column(df, columns::DATE_POSTED)?
            .into_iter()
            .enumerate()
            .map(|(row, raw)| {
                let raw = raw.unwrap_or_default();
                Self::parse_date(&raw).ok_or(LoadError::InvalidDate { row, value: raw })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let listings = (0..df.height())
            .map(|i| Listing {
                model: std::mem::take(&mut models[i]),
                model_year: model_years[i],
                price: prices[i],
                odometer: odometers[i],
                condition: std::mem::take(&mut conditions[i]),
                fuel: std::mem::take(&mut fuels[i]),
                vehicle_type: std::mem::take(&mut types[i]),
                transmission: std::mem::take(&mut transmissions[i]),
                is_4wd: four_wd[i],
                date_posted: dates[i],
                days_listed: days_listed[i],
            })
            .collect();

        let summary = ImputationSummary {
            model_year,
            odometer,
            four_wheel_drive: four_wd.iter().filter(|&&flag| flag).count(),
        };

        Ok((listings, summary))
    }

    /// Replace every missing value with the median of the present ones.
    pub fn impute_median(
        column: &str,
        values: Vec<Option<f64>>,
    ) -> Result<(Vec<f64>, ColumnImputation), LoadError> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let filled = values.len() - present.len();
        let median = StatsCalculator::median(&present);

        if filled > 0 && median.is_none() {
            return Err(LoadError::NoValuesToImpute(column.to_string()));
        }

        let fill = median.unwrap_or_default();
        let cleaned = values.into_iter().map(|v| v.unwrap_or(fill)).collect();

        Ok((cleaned, ColumnImputation { median, filled }))
    }

    /// Missing and falsy raw values map to `false`, everything else to `true`.
    pub fn coerce_flag(raw: Option<&str>) -> bool {
        let Some(raw) = raw.map(str::trim) else {
            return false;
        };

        if let Ok(number) = raw.parse::<f64>() {
            return number != 0.0 && !number.is_nan();
        }

        !matches!(
            raw.to_ascii_lowercase().as_str(),
            "" | "false" | "f" | "no" | "n" | "nan" | "none" | "null"
        )
    }

    /// Parse a `date_posted` cell. Datetime values keep only their date part.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.date())
            })
    }

    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoadError> {
        df.column(name)
            .map_err(|_| LoadError::MissingColumn(name.to_string()))
    }

    /// Numeric column as nullable f64. Blank and `NaN` cells become `None`; a present
    /// cell that is not a number is an error.
    fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoadError> {
        let raw = Self::text_column(df, name)?;
        let casted = Self::column(df, name)?.cast(&DataType::Float64)?;
        casted
            .f64()?
            .into_iter()
            .zip(raw)
            .enumerate()
            .map(|(row, (value, text))| match (value.filter(|x| !x.is_nan()), text) {
                (Some(value), _) => Ok(Some(value)),
                (None, None) => Ok(None),
                (None, Some(text)) if text.eq_ignore_ascii_case("nan") => Ok(None),
                (None, Some(text)) => Err(Self::invalid(name, row, text)),
            })
            .collect()
    }

    /// Any column as nullable text. Blank cells become `None`.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoadError> {
        let casted = Self::column(df, name)?.cast(&DataType::String)?;
        let values = casted
            .str()?
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect();
        Ok(values)
    }

    fn required_float(df: &DataFrame, name: &str) -> Result<Vec<f64>, LoadError> {
        Self::float_column(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or_else(|| Self::missing(name, row)))
            .collect()
    }

    /// Whole-number column. A fractional cell is rejected, never truncated.
    fn required_int(df: &DataFrame, name: &str) -> Result<Vec<i64>, LoadError> {
        Self::required_float(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                if v.fract() == 0.0 {
                    Ok(v as i64)
                } else {
                    Err(Self::invalid(name, row, v.to_string()))
                }
            })
            .collect()
    }

    fn required_text(df: &DataFrame, name: &str) -> Result<Vec<String>, LoadError> {
        Self::text_column(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, v)| v.ok_or_else(|| Self::missing(name, row)))
            .collect()
    }

    fn missing(column: &str, row: usize) -> LoadError {
        LoadError::MissingValue {
            column: column.to_string(),
            row,
        }
    }

    fn invalid(column: &str, row: usize, value: String) -> LoadError {
        LoadError::InvalidValue {
            column: column.to_string(),
            row,
            value,
        }
    }
}
