//! PNG Exporter
//! Renders a line chart to a static bitmap with plotters and encodes it as PNG.

use super::{ExportError, ExportedDocument};
use crate::charts::{RenderedChart, AXIS_COLOR, GRID_COLOR};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use tracing::debug;

/// Default bitmap size in pixels (width, height)
pub const DEFAULT_PNG_SIZE: (u32, u32) = (900, 960);

/// Dash and gap length of the zero axes, in chart units
const DASH_LENGTH: f64 = 0.6;
const DASH_GAP: f64 = 0.4;

pub struct PngExporter;

impl PngExporter {
    /// Render the chart to PNG bytes.
    pub fn render(chart: &RenderedChart, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::Png(format!(
                "image size must be non-zero, got {}x{}",
                width, height
            )));
        }

        let mut buffer = vec![255u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, chart).map_err(|e| ExportError::Png(e.to_string()))?;
            root.present().map_err(|e| ExportError::Png(e.to_string()))?;
        }

        let image = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ExportError::Png("pixel buffer does not match image size".to_string()))?;
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .map_err(|e| ExportError::Png(e.to_string()))?;

        let bytes = bytes.into_inner();
        debug!(width, height, size = bytes.len(), "rendered PNG chart");
        Ok(bytes)
    }

    /// Render the chart into an exportable PNG document.
    pub fn document(chart: &RenderedChart) -> Result<ExportedDocument, ExportError> {
        let (width, height) = DEFAULT_PNG_SIZE;
        Ok(ExportedDocument::png(Self::render(chart, width, height)?))
    }

    fn rgb(color: [u8; 3]) -> RGBColor {
        RGBColor(color[0], color[1], color[2])
    }

    fn draw(
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        chart: &RenderedChart,
    ) -> Result<(), Box<dyn std::error::Error>> {
        root.fill(&WHITE)?;
        let area = root.titled(&chart.title, ("sans-serif", 26))?;

        // Keep the plot square
        let area = if chart.equal_aspect {
            let (w, h) = area.dim_in_pixel();
            let side = w.min(h);
            area.shrink(((w - side) / 2, 0), (side, side))
        } else {
            area
        };

        let grid = chart.grid;
        let mut ctx = ChartBuilder::on(&area)
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(grid.min..grid.max, grid.min..grid.max)?;

        ctx.configure_mesh()
            .disable_mesh()
            .x_labels(11)
            .y_labels(11)
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()?;

        let grid_style = Self::rgb(GRID_COLOR).stroke_width(1);
        ctx.draw_series(grid.ticks().into_iter().flat_map(|t| {
            [
                PathElement::new(vec![(t, grid.min), (t, grid.max)], grid_style),
                PathElement::new(vec![(grid.min, t), (grid.max, t)], grid_style),
            ]
        }))?;

        if chart.dashed_zero_axes {
            let axis_style = Self::rgb(AXIS_COLOR).stroke_width(1);
            ctx.draw_series(
                dash_segments(grid.min, grid.max, DASH_LENGTH, DASH_GAP)
                    .into_iter()
                    .flat_map(|(from, to)| {
                        [
                            PathElement::new(vec![(from, 0.0), (to, 0.0)], axis_style),
                            PathElement::new(vec![(0.0, from), (0.0, to)], axis_style),
                        ]
                    }),
            )?;
        }

        for series in &chart.series {
            let style = Self::rgb(series.color).stroke_width(2);
            ctx.draw_series(series.visible_runs(&grid).into_iter().map(move |run| {
                PathElement::new(
                    run.into_iter().map(|p| (p[0], p[1])).collect::<Vec<_>>(),
                    style,
                )
            }))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .draw()?;

        Ok(())
    }
}

/// Split `[start, end]` into dashes of `dash` length separated by `gap`.
fn dash_segments(start: f64, end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut segments = Vec::new();
    let mut position = start;
    while position < end {
        segments.push((position, (position + dash).min(end)));
        position += dash + gap;
    }
    segments
}
