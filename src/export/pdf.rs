//! PDF Exporter
//! Writes a rendered line chart to a single vector PDF page.
//!
//! The page is drawn straight from the sampled points of the `RenderedChart`,
//! so nothing is recomputed from the legend labels.

use super::{ExportError, ExportedDocument};
use crate::charts::{GridSpec, RenderedChart, AXIS_COLOR, GRID_COLOR};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};
use tracing::debug;

/// Page size (mm)
const PAGE_WIDTH: f32 = 200.0;
const PAGE_HEIGHT: f32 = 215.0;
/// Square plot area (mm)
const PLOT_LEFT: f32 = 30.0;
const PLOT_BOTTOM: f32 = 25.0;
const PLOT_SIDE: f32 = 155.0;

const TITLE_SIZE: f32 = 16.0;
const LABEL_SIZE: f32 = 9.0;
const LEGEND_SIZE: f32 = 10.0;

/// Maps chart coordinates onto the page.
struct PageMapper {
    grid: GridSpec,
}

impl PageMapper {
    fn x(&self, value: f64) -> f32 {
        PLOT_LEFT + ((value - self.grid.min) / self.grid.span()) as f32 * PLOT_SIDE
    }

    fn y(&self, value: f64) -> f32 {
        PLOT_BOTTOM + ((value - self.grid.min) / self.grid.span()) as f32 * PLOT_SIDE
    }

    fn point(&self, p: [f64; 2]) -> Point {
        Point::new(Mm(self.x(p[0])), Mm(self.y(p[1])))
    }
}

pub struct PdfExporter;

impl PdfExporter {
    /// Render the chart to PDF bytes.
    pub fn render(chart: &RenderedChart) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(chart.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Chart");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        let mapper = PageMapper { grid: chart.grid };

        Self::draw_title(&layer, &font, &chart.title);
        Self::draw_grid(&layer, &font, &mapper);
        if chart.dashed_zero_axes {
            Self::draw_zero_axes(&layer, &mapper);
        }
        Self::draw_series(&layer, chart, &mapper);
        Self::draw_axis_labels(&layer, &font, chart);
        Self::draw_legend(&layer, &font, chart);

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        debug!(size = bytes.len(), "rendered PDF page");
        Ok(bytes)
    }

    /// Render the chart into an exportable PDF document.
    pub fn document(chart: &RenderedChart) -> Result<ExportedDocument, ExportError> {
        Ok(ExportedDocument::pdf(Self::render(chart)?))
    }

    fn rgb(color: [u8; 3]) -> Color {
        Color::Rgb(Rgb::new(
            color[0] as f32 / 255.0,
            color[1] as f32 / 255.0,
            color[2] as f32 / 255.0,
            None,
        ))
    }

    fn segment(layer: &PdfLayerReference, from: Point, to: Point) {
        layer.add_line(Line {
            points: vec![(from, false), (to, false)],
            is_closed: false,
        });
    }

    fn draw_title(layer: &PdfLayerReference, font: &IndirectFontRef, title: &str) {
        // Helvetica averages about half an em per glyph
        let approx_width = title.len() as f32 * TITLE_SIZE * 0.5 * 0.3528;
        let x = (PAGE_WIDTH - approx_width) / 2.0;
        layer.use_text(title, TITLE_SIZE, Mm(x), Mm(PAGE_HEIGHT - 18.0), font);
    }

    fn draw_grid(layer: &PdfLayerReference, font: &IndirectFontRef, mapper: &PageMapper) {
        let grid = mapper.grid;
        let (left, right) = (mapper.x(grid.min), mapper.x(grid.max));
        let (bottom, top) = (mapper.y(grid.min), mapper.y(grid.max));

        layer.set_outline_color(Self::rgb(GRID_COLOR));
        layer.set_outline_thickness(0.3);
        for tick in grid.ticks() {
            let x = mapper.x(tick);
            let y = mapper.y(tick);
            Self::segment(layer, Point::new(Mm(x), Mm(bottom)), Point::new(Mm(x), Mm(top)));
            Self::segment(layer, Point::new(Mm(left), Mm(y)), Point::new(Mm(right), Mm(y)));
        }

        // Frame
        layer.set_outline_color(Self::rgb(AXIS_COLOR));
        layer.set_outline_thickness(0.6);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(left), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(top)), false),
                (Point::new(Mm(left), Mm(top)), false),
            ],
            is_closed: true,
        });

        // Label every other gridline to keep the numbers readable
        for tick in grid.ticks().into_iter().step_by(2) {
            let label = format!("{}", tick);
            let half_width = label.len() as f32 * LABEL_SIZE * 0.25 * 0.3528;
            layer.use_text(
                label.as_str(),
                LABEL_SIZE,
                Mm(mapper.x(tick) - half_width),
                Mm(bottom - 5.0),
                font,
            );
            layer.use_text(
                label.as_str(),
                LABEL_SIZE,
                Mm(left - 3.0 - half_width * 2.0),
                Mm(mapper.y(tick) - 1.0),
                font,
            );
        }
    }

    fn draw_zero_axes(layer: &PdfLayerReference, mapper: &PageMapper) {
        let grid = mapper.grid;
        layer.set_outline_color(Self::rgb(AXIS_COLOR));
        layer.set_outline_thickness(0.5);
        layer.set_line_dash_pattern(LineDashPattern {
            dash_1: Some(3),
            gap_1: Some(2),
            ..Default::default()
        });

        Self::segment(layer, mapper.point([grid.min, 0.0]), mapper.point([grid.max, 0.0]));
        Self::segment(layer, mapper.point([0.0, grid.min]), mapper.point([0.0, grid.max]));

        layer.set_line_dash_pattern(LineDashPattern::default());
    }

    fn draw_series(layer: &PdfLayerReference, chart: &RenderedChart, mapper: &PageMapper) {
        layer.set_outline_thickness(1.2);
        for series in &chart.series {
            layer.set_outline_color(Self::rgb(series.color));
            for run in series.visible_runs(&chart.grid) {
                layer.add_line(Line {
                    points: run.iter().map(|&p| (mapper.point(p), false)).collect(),
                    is_closed: false,
                });
            }
        }
    }

    fn draw_axis_labels(layer: &PdfLayerReference, font: &IndirectFontRef, chart: &RenderedChart) {
        let x_center = PLOT_LEFT + PLOT_SIDE / 2.0;
        let y_center = PLOT_BOTTOM + PLOT_SIDE / 2.0;
        layer.use_text(chart.x_label.as_str(), LEGEND_SIZE, Mm(x_center), Mm(PLOT_BOTTOM - 13.0), font);
        layer.use_text(chart.y_label.as_str(), LEGEND_SIZE, Mm(PLOT_LEFT - 18.0), Mm(y_center), font);
    }

    fn draw_legend(layer: &PdfLayerReference, font: &IndirectFontRef, chart: &RenderedChart) {
        let x = PLOT_LEFT + 4.0;
        let mut y = PLOT_BOTTOM + PLOT_SIDE - 7.0;

        layer.set_outline_thickness(1.2);
        for series in &chart.series {
            layer.set_outline_color(Self::rgb(series.color));
            Self::segment(
                layer,
                Point::new(Mm(x), Mm(y + 1.2)),
                Point::new(Mm(x + 8.0), Mm(y + 1.2)),
            );
            layer.use_text(series.label.as_str(), LEGEND_SIZE, Mm(x + 10.0), Mm(y), font);
            y -= 6.0;
        }
    }
}
