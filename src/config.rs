//! Dashboard Configuration
//! Optional `dashboard.json` in the working directory; every key has a default.

use crate::charts::ViewOptions;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub preview_rows: usize,
    pub top_n: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("vehicles_us.csv"),
            preview_rows: 20,
            top_n: 10,
            window_width: 1400.0,
            window_height: 900.0,
        }
    }
}

impl DashboardConfig {
    /// Read the config file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            preview_rows: self.preview_rows,
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() -> Result<()> {
        let config = DashboardConfig::load_or_default(Path::new("/definitely/not/here.json"))?;
        assert_eq!(config, DashboardConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{ "data_path": "data/listings.csv", "top_n": 5 }}"#)?;

        let config = DashboardConfig::load_or_default(file.path())?;
        assert_eq!(config.data_path, PathBuf::from("data/listings.csv"));
        assert_eq!(config.top_n, 5);
        assert_eq!(config.preview_rows, 20);
        assert_eq!(
            config.view_options(),
            ViewOptions {
                preview_rows: 20,
                top_n: 5
            }
        );
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "{{ not json")?;

        assert!(DashboardConfig::load_or_default(file.path()).is_err());
        Ok(())
    }
}
