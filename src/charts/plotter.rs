//! Chart Plotter Module
//! Draws a rendered line chart interactively using egui_plot.

use crate::charts::{GridSpec, RenderedChart};
use egui::Color32;
use egui_plot::{Corner, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoints, VLine};

/// Height of the interactive plot
const PLOT_HEIGHT: f32 = 560.0;

/// Draws `RenderedChart`s with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn to_color32(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Grid marks at every grid step across the whole window.
    pub fn grid_marks(grid: GridSpec) -> Vec<GridMark> {
        grid.ticks()
            .into_iter()
            .map(|value| GridMark {
                value,
                step_size: grid.step,
            })
            .collect()
    }

    /// Draw both lines with dashed zero axes and a legend.
    pub fn draw_line_chart(ui: &mut egui::Ui, chart: &RenderedChart) {
        let grid = chart.grid;
        let height = PLOT_HEIGHT.min(ui.available_height().max(200.0));

        let mut plot = Plot::new("line_graph")
            .height(height)
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .include_x(grid.min)
            .include_x(grid.max)
            .include_y(grid.min)
            .include_y(grid.max)
            .x_grid_spacer(move |_input| Self::grid_marks(grid))
            .y_grid_spacer(move |_input| Self::grid_marks(grid))
            .allow_scroll(false);

        if chart.equal_aspect {
            plot = plot.data_aspect(1.0);
        }

        plot.show(ui, |plot_ui| {
            if chart.dashed_zero_axes {
                plot_ui.hline(
                    HLine::new(0.0)
                        .color(Color32::BLACK)
                        .width(0.5)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.vline(
                    VLine::new(0.0)
                        .color(Color32::BLACK)
                        .width(0.5)
                        .style(LineStyle::dashed_loose()),
                );
            }

            for series in &chart.series {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.finite_points()))
                        .color(Self::to_color32(series.color))
                        .width(2.0)
                        .name(&series.label),
                );
            }
        });
    }
}
