//! Line Graph - Two-Equation Line Graph Generator
//!
//! A Rust application that plots two linear equations given in standard or
//! slope-intercept form and exports the chart as PDF.

mod charts;
mod config;
mod equations;
mod export;
mod gui;
mod logging;
mod pipeline;

use anyhow::{anyhow, Context};
use config::{AppConfig, CONFIG_FILE_NAME};
use eframe::egui;
use gui::LineGraphApp;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    logging::init_logger();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE_NAME))
        .with_context(|| format!("Failed to load {}", CONFIG_FILE_NAME))?;
    info!(auto_export = config.auto_export, "starting Line Graph");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Line Graph Generator"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Line Graph Generator",
        options,
        Box::new(move |cc| Ok(Box::new(LineGraphApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("Window failed: {}", e))
}
