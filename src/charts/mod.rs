//! Charts module - Line sampling and chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{GridSpec, LineRenderer, RenderedChart, AXIS_COLOR, GRID_COLOR};
