//! Chart Viewer Widget
//! Central panel showing the most recent line chart.

use crate::charts::{ChartPlotter, RenderedChart};
use crate::pipeline::{DisplaySurface, SurfaceError};
use egui::{Color32, RichText};

/// Display surface backed by the central panel.
#[derive(Default)]
pub struct ChartViewer {
    chart: Option<RenderedChart>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the shown chart
    pub fn clear(&mut self) {
        self.chart = None;
    }

    pub fn chart(&self) -> Option<&RenderedChart> {
        self.chart.as_ref()
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Draw the chart card, or a placeholder before the first plot
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(chart) = &self.chart else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Chart").size(20.0));
            });
            return;
        };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&chart.title).size(18.0).strong());
                });
                ui.add_space(8.0);
                ChartPlotter::draw_line_chart(ui, chart);
            });
    }
}

impl DisplaySurface for ChartViewer {
    fn show_chart(&mut self, chart: &RenderedChart) -> Result<(), SurfaceError> {
        self.chart = Some(chart.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::LineRenderer;
    use crate::equations::LineSpec;

    #[test]
    fn test_show_chart_replaces_previous_chart() {
        let mut viewer = ChartViewer::new();
        assert!(!viewer.has_chart());

        let first = LineRenderer::render(
            &LineSpec::new(1.0, 0.0).unwrap(),
            &LineSpec::new(-1.0, 0.0).unwrap(),
        );
        let second = LineRenderer::render(
            &LineSpec::new(2.0, 1.0).unwrap(),
            &LineSpec::new(0.0, 3.0).unwrap(),
        );

        viewer.show_chart(&first).unwrap();
        viewer.show_chart(&second).unwrap();
        assert_eq!(viewer.chart(), Some(&second));

        viewer.clear();
        assert!(viewer.chart().is_none());
    }
}
