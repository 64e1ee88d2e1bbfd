//! Line Graph Main Application
//! Main window with control panel and chart viewer.

use crate::config::AppConfig;
use crate::export::{ExportFormat, FileExportSurface, PDF_FILE_NAME, PNG_FILE_NAME};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StatusKind};
use crate::pipeline::{PipelineError, PlotPipeline};
use egui::SidePanel;
use tracing::{info, warn};

/// Main application window.
pub struct LineGraphApp {
    config: AppConfig,
    pipeline: PlotPipeline,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl LineGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let control_panel = ControlPanel::new(
            config.defaults.first.clone(),
            config.defaults.second.clone(),
            config.auto_export,
        );

        Self {
            pipeline: PlotPipeline::from_config(&config),
            control_panel,
            chart_viewer: ChartViewer::new(),
            config,
        }
    }

    fn auto_export_surface(&self) -> FileExportSurface {
        FileExportSurface::directory(&self.config.export_dir)
            .with_open_after_export(self.config.open_after_export)
    }

    /// Normalize, render and show both equations
    fn handle_plot(&mut self) {
        let (first, second) =
            match PlotPipeline::parse_inputs(&self.control_panel.first, &self.control_panel.second)
            {
                Ok(inputs) => inputs,
                Err(e) => {
                    self.report_plot_error(e);
                    return;
                }
            };

        let mut export = self.auto_export_surface();
        match self
            .pipeline
            .run(&first, &second, &mut self.chart_viewer, &mut export)
        {
            Ok(outcome) => {
                self.control_panel
                    .set_status(StatusKind::Success, &outcome.summary());
            }
            Err(e) => self.report_plot_error(e),
        }
    }

    fn report_plot_error(&mut self, error: PipelineError) {
        // A failed export still leaves a valid chart on screen
        if !matches!(error, PipelineError::Export(_)) {
            self.chart_viewer.clear();
        }
        warn!(error = %error, "plot failed");
        self.control_panel
            .set_status(StatusKind::Error, &format!("Error: {}", error));
    }

    /// Handle manual export of the shown chart
    fn handle_export(&mut self, format: ExportFormat) {
        let Some(chart) = self.chart_viewer.chart().cloned() else {
            self.control_panel
                .set_status(StatusKind::Error, "No chart to export");
            return;
        };

        let surface = if self.config.ask_export_path {
            let file_name = match format {
                ExportFormat::Pdf => PDF_FILE_NAME,
                ExportFormat::Png => PNG_FILE_NAME,
            };
            // Ask user for output location
            match rfd::FileDialog::new()
                .add_filter(format.filter_name(), &[format.extension()])
                .set_directory(&self.config.export_dir)
                .set_file_name(file_name)
                .save_file()
            {
                Some(path) => FileExportSurface::file(path),
                None => return, // User cancelled
            }
        } else {
            FileExportSurface::directory(&self.config.export_dir)
        };
        let mut surface = surface.with_open_after_export(self.config.open_after_export);

        let result = match format {
            ExportFormat::Pdf => PlotPipeline::export_pdf(&chart, &mut surface),
            ExportFormat::Png => PlotPipeline::export_png(&chart, &mut surface),
        };

        match result {
            Ok(path) => self.control_panel.set_status(
                StatusKind::Success,
                &format!("Exported {}", path.display()),
            ),
            Err(e) => self
                .control_panel
                .set_status(StatusKind::Error, &format!("Export error: {}", e)),
        }
    }
}

impl eframe::App for LineGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.control_panel.export_enabled = self.chart_viewer.has_chart();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Plot => self.handle_plot(),
                        ControlPanelAction::ExportPdf => self.handle_export(ExportFormat::Pdf),
                        ControlPanelAction::ExportPng => self.handle_export(ExportFormat::Png),
                        ControlPanelAction::AutoExportChanged => {
                            self.pipeline
                                .set_auto_export(self.control_panel.auto_export);
                            info!(auto_export = self.pipeline.auto_export(), "auto export toggled");
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
