//! Plot Pipeline
//! Normalize two equations, render them, show the chart and optionally export
//! it as PDF. Every call is independent; nothing is kept between plots.

use crate::charts::{LineRenderer, RenderedChart};
use crate::config::AppConfig;
use crate::equations::{normalize, EquationError, EquationFields, EquationInput, Intersection, LineSpec};
use crate::export::{ExportError, ExportSurface, PdfExporter, PngExporter};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
#[error("Display failed: {0}")]
#[allow(dead_code)]
pub struct SurfaceError(pub String);

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Equation {index}: {source}")]
    Equation {
        index: usize,
        #[source]
        source: EquationError,
    },
    #[error(transparent)]
    Display(#[from] SurfaceError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Something that can show a rendered chart to the user.
pub trait DisplaySurface {
    fn show_chart(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError>;
}

/// Result of one successful plot.
#[derive(Debug, Clone)]
pub struct PlotOutcome {
    pub lines: [LineSpec; 2],
    pub chart: RenderedChart,
    pub intersection: Intersection,
    /// Where the PDF went when auto export is on
    pub exported: Option<PathBuf>,
}

impl PlotOutcome {
    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Plotted {} and {}; {}",
            self.lines[0].label(),
            self.lines[1].label(),
            self.intersection
        );
        if let Some(path) = &self.exported {
            text.push_str(&format!(". Saved {}", path.display()));
        }
        text
    }
}

/// Runs normalizer -> renderer -> surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotPipeline {
    auto_export: bool,
}

impl PlotPipeline {
    pub fn new(auto_export: bool) -> Self {
        Self { auto_export }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.auto_export)
    }

    pub fn auto_export(&self) -> bool {
        self.auto_export
    }

    pub fn set_auto_export(&mut self, auto_export: bool) {
        self.auto_export = auto_export;
    }

    /// Parse both equation editors, naming the equation that failed.
    pub fn parse_inputs(
        first: &EquationFields,
        second: &EquationFields,
    ) -> Result<(EquationInput, EquationInput), PipelineError> {
        let first = first
            .to_input()
            .map_err(|source| PipelineError::Equation { index: 1, source })?;
        let second = second
            .to_input()
            .map_err(|source| PipelineError::Equation { index: 2, source })?;
        Ok((first, second))
    }

    /// Normalize both equations.
    pub fn normalize_pair(
        first: &EquationInput,
        second: &EquationInput,
    ) -> Result<(LineSpec, LineSpec), PipelineError> {
        let first = normalize(first).map_err(|source| PipelineError::Equation { index: 1, source })?;
        let second =
            normalize(second).map_err(|source| PipelineError::Equation { index: 2, source })?;
        Ok((first, second))
    }

    /// Plot two equations; with auto export on, also hand the PDF to `export`.
    pub fn run(
        &self,
        first: &EquationInput,
        second: &EquationInput,
        display: &mut dyn DisplaySurface,
        export: &mut dyn ExportSurface,
    ) -> Result<PlotOutcome, PipelineError> {
        let (first, second) = Self::normalize_pair(first, second).map_err(|e| {
            warn!(error = %e, "rejected equations");
            e
        })?;

        let chart = LineRenderer::render(&first, &second);
        display.show_chart(&chart)?;

        let exported = if self.auto_export {
            Some(Self::export_pdf(&chart, export)?)
        } else {
            None
        };

        let intersection = first.intersection(&second);
        info!(first = first.label(), second = second.label(), %intersection, "plotted lines");

        Ok(PlotOutcome {
            lines: [first, second],
            chart,
            intersection,
            exported,
        })
    }

    /// Encode the chart as PDF and hand it to `export`.
    pub fn export_pdf(
        chart: &RenderedChart,
        export: &mut dyn ExportSurface,
    ) -> Result<PathBuf, PipelineError> {
        let document = PdfExporter::document(chart)?;
        export.export(&document).map_err(|e| {
            warn!(error = %e, "PDF export failed");
            PipelineError::Export(e)
        })
    }

    /// Encode the chart as PNG and hand it to `export`.
    pub fn export_png(
        chart: &RenderedChart,
        export: &mut dyn ExportSurface,
    ) -> Result<PathBuf, PipelineError> {
        let document = PngExporter::document(chart)?;
        export.export(&document).map_err(|e| {
            warn!(error = %e, "PNG export failed");
            PipelineError::Export(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ExportedDocument, FileExportSurface};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingDisplay {
        charts: Vec<RenderedChart>,
        fail: bool,
    }

    impl DisplaySurface for RecordingDisplay {
        fn show_chart(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError> {
            if self.fail {
                return Err(SurfaceError("window closed".to_string()));
            }
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingExport {
        documents: Vec<ExportedDocument>,
    }

    impl ExportSurface for RecordingExport {
        fn export(&mut self, document: &ExportedDocument) -> Result<PathBuf, ExportError> {
            self.documents.push(document.clone());
            Ok(PathBuf::from(&document.file_name))
        }
    }

    struct FailingExport;

    impl ExportSurface for FailingExport {
        fn export(&mut self, document: &ExportedDocument) -> Result<PathBuf, ExportError> {
            Err(ExportError::Io {
                path: PathBuf::from(&document.file_name),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_run_without_auto_export() {
        let pipeline = PlotPipeline::new(false);
        let mut display = RecordingDisplay::default();
        let mut export = RecordingExport::default();

        let outcome = pipeline
            .run(
                &EquationInput::standard(1.0, 1.0, 0.0),
                &EquationInput::standard(2.0, 1.0, 0.0),
                &mut display,
                &mut export,
            )
            .unwrap();

        assert_eq!(display.charts.len(), 1);
        assert!(export.documents.is_empty());
        assert!(outcome.exported.is_none());
        assert_eq!(outcome.lines[0].slope(), -1.0);
        assert_eq!(outcome.lines[1].slope(), -2.0);
        assert_eq!(outcome.intersection, Intersection::Point { x: 0.0, y: 0.0 });
        assert_eq!(display.charts[0], outcome.chart);
    }

    #[test]
    fn test_run_with_auto_export_sends_one_pdf() {
        let pipeline = PlotPipeline::new(true);
        let mut display = RecordingDisplay::default();
        let mut export = RecordingExport::default();

        let outcome = pipeline
            .run(
                &EquationInput::slope_intercept(1.0, 0.0),
                &EquationInput::slope_intercept(-1.0, 0.0),
                &mut display,
                &mut export,
            )
            .unwrap();

        assert_eq!(export.documents.len(), 1);
        let document = &export.documents[0];
        assert_eq!(document.file_name, "line_graph_results.pdf");
        assert_eq!(document.mime_type, "application/pdf");
        assert!(document.bytes.starts_with(b"%PDF"));
        assert_eq!(outcome.exported, Some(PathBuf::from("line_graph_results.pdf")));
        assert!(outcome.summary().contains("Saved line_graph_results.pdf"));
    }

    #[test]
    fn test_degenerate_second_equation_stops_pipeline() {
        let pipeline = PlotPipeline::new(true);
        let mut display = RecordingDisplay::default();
        let mut export = RecordingExport::default();

        let err = pipeline
            .run(
                &EquationInput::standard(1.0, 1.0, 0.0),
                &EquationInput::standard(3.0, 0.0, 6.0),
                &mut display,
                &mut export,
            )
            .unwrap_err();

        match err {
            PipelineError::Equation { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(source, EquationError::DegenerateLine { .. }));
            }
            other => panic!("expected an equation error, got {:?}", other),
        }
        assert!(display.charts.is_empty());
        assert!(export.documents.is_empty());
    }

    #[test]
    fn test_display_failure_is_reported() {
        let pipeline = PlotPipeline::new(true);
        let mut display = RecordingDisplay {
            fail: true,
            ..Default::default()
        };
        let mut export = RecordingExport::default();

        let err = pipeline
            .run(
                &EquationInput::slope_intercept(1.0, 0.0),
                &EquationInput::slope_intercept(2.0, 0.0),
                &mut display,
                &mut export,
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::Display(_)));
        assert!(export.documents.is_empty());
    }

    #[test]
    fn test_export_failure_is_reported_once() {
        let pipeline = PlotPipeline::new(true);
        let mut display = RecordingDisplay::default();

        let err = pipeline
            .run(
                &EquationInput::slope_intercept(1.0, 0.0),
                &EquationInput::slope_intercept(2.0, 0.0),
                &mut display,
                &mut FailingExport,
            )
            .unwrap_err();
        assert!(matches!(err, PipelineError::Export(ExportError::Io { .. })));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_parse_inputs_names_failing_equation() {
        let good = EquationFields::default();
        let bad = EquationFields::standard("1", "x", "0");

        match PlotPipeline::parse_inputs(&good, &bad) {
            Err(PipelineError::Equation { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected equation 2 to fail, got {:?}", other),
        }
        match PlotPipeline::parse_inputs(&bad, &good) {
            Err(e) => assert!(e.to_string().starts_with("Equation 1:")),
            Ok(_) => panic!("expected equation 1 to fail"),
        }
    }

    #[test]
    fn test_auto_export_writes_pdf_file() {
        let dir = TempDir::new().unwrap();
        let pipeline = PlotPipeline::new(true);
        let mut display = RecordingDisplay::default();
        let mut export = FileExportSurface::directory(dir.path());

        let outcome = pipeline
            .run(
                &EquationInput::standard(1.0, 1.0, 0.0),
                &EquationInput::slope_intercept(-1.0, 0.0),
                &mut display,
                &mut export,
            )
            .unwrap();

        let path = outcome.exported.unwrap();
        assert_eq!(path, dir.path().join("line_graph_results.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(outcome.intersection, Intersection::Coincident);
    }

    #[test]
    fn test_from_config_takes_auto_export_flag() {
        let config = AppConfig::from_json_str(r#"{ "auto_export": true }"#).unwrap();
        assert!(PlotPipeline::from_config(&config).auto_export());
        assert!(!PlotPipeline::from_config(&AppConfig::default()).auto_export());
    }
}
