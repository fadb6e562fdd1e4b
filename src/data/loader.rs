//! CSV Data Loader Module
//! Reads the listings CSV with Polars, cleans it once and caches the result.

use crate::data::{columns, DataProcessor, Dataset};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Column '{0}' has missing values and no values to take a median from")]
    NoValuesToImpute(String),
    #[error("Invalid date_posted '{value}' at row {row}")]
    InvalidDate { row: usize, value: String },
}

/// Read and clean a listings CSV. Rows are numbered from 0 in errors.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .finish()?
        .collect()?;

    for name in columns::REQUIRED {
        if df.column(name).is_err() {
            return Err(LoadError::MissingColumn(name.to_string()));
        }
    }

    let (listings, summary) = DataProcessor::clean(&df)?;
    Ok(Dataset::new(path.to_path_buf(), listings, summary))
}

/// Holds the one cleaned table of the session.
///
/// Loading the path already cached hands back the same `Arc` without touching the
/// file again; loading another path replaces it.
#[derive(Default)]
pub struct DatasetCache {
    current: Option<(PathBuf, Arc<Dataset>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a CSV, or return the cached table when `path` was loaded before.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<Dataset>, LoadError> {
        let path = path.as_ref();
        let key = Self::cache_key(path);

        if let Some((cached_path, dataset)) = &self.current {
            if *cached_path == key {
                debug!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(dataset));
            }
        }

        match load_dataset(path) {
            Ok(dataset) => {
                let summary = dataset.summary();
                info!(
                    path = %path.display(),
                    rows = dataset.len(),
                    model_year_median = ?summary.model_year.median,
                    model_year_filled = summary.model_year.filled,
                    odometer_median = ?summary.odometer.median,
                    odometer_filled = summary.odometer.filled,
                    four_wheel_drive = summary.four_wheel_drive,
                    "loaded listings"
                );
                let dataset = Arc::new(dataset);
                self.current = Some((key, Arc::clone(&dataset)));
                Ok(dataset)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load listings");
                Err(e)
            }
        }
    }

    /// Get the cached table, if any.
    #[cfg(test)]
    pub fn get_dataset(&self) -> Option<&Arc<Dataset>> {
        self.current.as_ref().map(|(_, dataset)| dataset)
    }

    fn cache_key(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    const HEADER: &str = "price,model_year,model,condition,cylinders,fuel,odometer,transmission,type,paint_color,is_4wd,date_posted,days_listed";

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn write_csv(rows: &[&str]) -> Result<NamedTempFile> {
        write_csv_with_header(HEADER, rows)
    }

    fn write_csv_with_header(header: &str, rows: &[&str]) -> Result<NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        writeln!(file, "{}", header)?;
        for row in rows {
            writeln!(file, "{}", row)?;
        }
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_imputes_and_coerces() -> Result<()> {
        init_test_logging();
        let file = write_csv(&[
            "10000,2011.0,bmw x5,good,6.0,gas,50000.0,automatic,SUV,,1.0,2018-06-23,19",
            "8000,,ford f-150,good,6.0,gas,,automatic,pickup,white,,2018-10-19,50",
            "12000,2013.0,hyundai sonata,fair,4.0,gas,70000.0,automatic,sedan,red,,2019-02-07,79",
        ])?;

        let dataset = load_dataset(file.path())?;
        let listings = dataset.listings();

        assert_eq!(dataset.len(), 3);
        let odometers: Vec<f64> = listings.iter().map(|l| l.odometer).collect();
        assert_eq!(odometers, vec![50000.0, 60000.0, 70000.0]);
        assert_eq!(listings[1].model_year, 2012.0);
        assert_eq!(
            listings.iter().map(|l| l.is_4wd).collect::<Vec<_>>(),
            vec![true, false, false]
        );
        assert_eq!(
            listings[2].date_posted,
            NaiveDate::from_ymd_opt(2019, 2, 7).unwrap()
        );
        assert_eq!(listings[0].vehicle_type, "SUV");
        assert_eq!(listings[2].days_listed, 79);
        assert_eq!(dataset.summary().odometer.median, Some(60000.0));
        Ok(())
    }

    #[test]
    fn test_cache_returns_same_instance() -> Result<()> {
        init_test_logging();
        let file = write_csv(&[
            "10000,2011.0,bmw x5,good,6.0,gas,50000.0,automatic,SUV,,1.0,2018-06-23,19",
        ])?;

        let mut cache = DatasetCache::new();
        let first = cache.load(file.path())?;
        let second = cache.load(file.path())?;

        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.get_dataset().is_some_and(|d| Arc::ptr_eq(d, &first)));
        Ok(())
    }

    #[test]
    fn test_cache_hit_does_not_reread_file() -> Result<()> {
        init_test_logging();
        let file = write_csv(&[
            "10000,2011.0,bmw x5,good,6.0,gas,50000.0,automatic,SUV,,1.0,2018-06-23,19",
        ])?;
        let path = file.path().to_path_buf();

        let mut cache = DatasetCache::new();
        let first = cache.load(&path)?;
        std::fs::write(&path, "not,a,listings,file\n")?;
        let second = cache.load(&path)?;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        init_test_logging();
        let err = load_dataset(Path::new("/definitely/not/here/vehicles_us.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn test_missing_column() -> Result<()> {
        init_test_logging();
        let file = write_csv_with_header(
            "price,model_year,model,condition,fuel,odometer,transmission,type,is_4wd,date_posted",
            &["10000,2011.0,bmw x5,good,gas,50000.0,automatic,SUV,1.0,2018-06-23"],
        )?;

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref name) if name == "days_listed"));
        Ok(())
    }

    #[test]
    fn test_invalid_date_is_fatal() -> Result<()> {
        init_test_logging();
        let file = write_csv(&[
            "10000,2011.0,bmw x5,good,6.0,gas,50000.0,automatic,SUV,,1.0,2018-06-23,19",
            "8000,2012.0,ford f-150,good,6.0,gas,1000.0,automatic,pickup,white,,yesterday,50",
        ])?;

        let err = load_dataset(file.path()).unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidDate { row: 1, ref value } if value == "yesterday")
        );
        Ok(())
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() -> Result<()> {
        init_test_logging();
        let mut cache = DatasetCache::new();
        assert!(cache.load("/definitely/not/here.csv").is_err());
        assert!(cache.get_dataset().is_none());
        Ok(())
    }

    #[test]
    fn test_non_numeric_odometer_is_not_imputed() -> Result<()> {
        init_test_logging();
        let file = write_csv(&[
            "10000,2011.0,bmw x5,good,6.0,gas,50000.0,automatic,SUV,,1.0,2018-06-23,19",
            "8000,2012.0,ford f-150,good,6.0,gas,abc,automatic,pickup,white,,2018-10-19,50",
            "12000,2013.0,hyundai sonata,fair,4.0,gas,70000.0,automatic,sedan,red,,2019-02-07,79",
        ])?;

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { ref column, row: 1, ref value }
                if column == "odometer" && value == "abc"
        ));
        Ok(())
    }

    #[test]
    fn test_fractional_days_listed_is_rejected() -> Result<()> {
        init_test_logging();
        let file = write_csv(&[
            "10000,2011.0,bmw x5,good,6.0,gas,50000.0,automatic,SUV,,1.0,2018-06-23,19.7",
        ])?;

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { ref column, row: 0, .. } if column == "days_listed"
        ));
        Ok(())
    }
}
