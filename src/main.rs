//! US Vehicles Dashboard - Exploratory Data Analysis of a vehicle listings CSV
//!
//! Loads and cleans the listings once, then renders histograms, a scatter plot,
//! category shares and the fastest sold vehicles in an egui window.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::{anyhow, Result};
use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<()> {
    init_logging();

    let config = DashboardConfig::load_or_default(Path::new(config::CONFIG_FILE))?;
    info!(data_path = %config.data_path.display(), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("US Vehicles Analysis"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "US Vehicles Analysis",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("Dashboard window failed: {}", e))
}
