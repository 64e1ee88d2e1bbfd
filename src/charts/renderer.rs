//! Line Renderer
//! Samples two canonical lines over a fixed x-domain and describes the chart
//! (title, grid, axes, legend) independently of any drawing surface.
//!
//! Layout:
//! 1. Title: "Line Graph of Two Equations"
//! 2. Square plot window [-20, 20] x [-20, 20], gridlines every 2 units
//! 3. Dashed zero axes
//! 4. Two lines sampled at 100 points over [-10, 10], legend from line labels

use crate::equations::LineSpec;
use tracing::debug;

pub const CHART_TITLE: &str = "Line Graph of Two Equations";

// Colors (RGB)
pub const FIRST_LINE_COLOR: [u8; 3] = [0, 0, 255]; // Blue
pub const SECOND_LINE_COLOR: [u8; 3] = [255, 0, 0]; // Red
pub const AXIS_COLOR: [u8; 3] = [0, 0, 0];
pub const GRID_COLOR: [u8; 3] = [210, 210, 210];

/// X-domain the lines are sampled over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            start: -10.0,
            end: 10.0,
            samples: 100,
        }
    }
}

impl Domain {
    pub fn sample_xs(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.samples)
    }
}

/// `n` evenly spaced values from `start` to `end`, both endpoints exact.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Square plot window with evenly spaced gridlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: -20.0,
            max: 20.0,
            step: 2.0,
        }
    }
}

impl GridSpec {
    /// Gridline positions from `min` to `max` inclusive.
    pub fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as usize;
        (0..=count)
            .map(|i| self.min + self.step * i as f64)
            .collect()
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Two lines to draw over one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub first: LineSpec,
    pub second: LineSpec,
    pub domain: Domain,
}

impl PlotRequest {
    pub fn new(first: LineSpec, second: LineSpec) -> Self {
        Self {
            first,
            second,
            domain: Domain::default(),
        }
    }
}

/// Sampled points of one line plus how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub color: [u8; 3],
    pub points: Vec<[f64; 2]>,
}

impl LineSeries {
    /// Parts of the sampled polyline that fall inside the grid window.
    pub fn visible_runs(&self, grid: &GridSpec) -> Vec<Vec<[f64; 2]>> {
        clip_polyline(&self.points, grid.min, grid.max)
    }

    /// Sampled points whose coordinates did not overflow.
    pub fn finite_points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.points
            .iter()
            .copied()
            .filter(|p| p[0].is_finite() && p[1].is_finite())
    }
}

/// Everything a display or export surface needs to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub domain: Domain,
    pub grid: GridSpec,
    pub series: Vec<LineSeries>,
    pub equal_aspect: bool,
    pub dashed_zero_axes: bool,
}

/// Turns canonical lines into a renderable chart description.
pub struct LineRenderer;

impl LineRenderer {
    /// Render two lines over the default domain.
    pub fn render(first: &LineSpec, second: &LineSpec) -> RenderedChart {
        Self::render_request(&PlotRequest::new(first.clone(), second.clone()))
    }

    pub fn render_request(request: &PlotRequest) -> RenderedChart {
        let xs = request.domain.sample_xs();

        let series = vec![
            LineSeries {
                label: request.first.label().to_string(),
                color: FIRST_LINE_COLOR,
                points: Self::sample_line(&request.first, &xs),
            },
            LineSeries {
                label: request.second.label().to_string(),
                color: SECOND_LINE_COLOR,
                points: Self::sample_line(&request.second, &xs),
            },
        ];

        debug!(
            samples = xs.len(),
            first = request.first.label(),
            second = request.second.label(),
            "rendered chart"
        );

        RenderedChart {
            title: CHART_TITLE.to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            domain: request.domain,
            grid: GridSpec::default(),
            series,
            equal_aspect: true,
            dashed_zero_axes: true,
        }
    }

    pub fn sample_line(line: &LineSpec, xs: &[f64]) -> Vec<[f64; 2]> {
        xs.iter().map(|&x| [x, line.y_at(x)]).collect()
    }
}

/// Clip a segment to the square window `[min, max]²` (Liang-Barsky).
///
/// Segments with a non-finite endpoint are dropped. Clipped endpoints are
/// snapped onto the window edge they cross.
pub fn clip_segment(p0: [f64; 2], p1: [f64; 2], min: f64, max: f64) -> Option<([f64; 2], [f64; 2])> {
    // A sample whose y overflowed has no usable position
    if !p0.iter().chain(p1.iter()).all(|v| v.is_finite()) {
        return None;
    }
    let dx = p1[0] - p0[0];
    let dy = p1[1] - p0[1];
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    // (t, edge crossed as (axis, value))
    let mut enter: (f64, Option<(usize, f64)>) = (0.0, None);
    let mut exit: (f64, Option<(usize, f64)>) = (1.0, None);

    let edges = [
        (-dx, p0[0] - min, (0, min)),
        (dx, max - p0[0], (0, max)),
        (-dy, p0[1] - min, (1, min)),
        (dy, max - p0[1], (1, max)),
    ];

    for (p, q, edge) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if r.is_nan() {
            return None;
        }
        if p < 0.0 {
            if r > exit.0 {
                return None;
            }
            if r > enter.0 {
                enter = (r, Some(edge));
            }
        } else {
            if r < enter.0 {
                return None;
            }
            if r < exit.0 {
                exit = (r, Some(edge));
            }
        }
    }

    let point_at = |(t, edge): (f64, Option<(usize, f64)>), endpoint: [f64; 2]| match edge {
        None => endpoint,
        Some((axis, value)) => {
            let mut point = [p0[0] + t * dx, p0[1] + t * dy];
            point[axis] = value;
            let other = 1 - axis;
            point[other] = point[other].max(min).min(max);
            point
        }
    };
    Some((point_at(enter, p0), point_at(exit, p1)))
}

/// Clip a polyline to the square window, joining consecutive visible segments.
pub fn clip_polyline(points: &[[f64; 2]], min: f64, max: f64) -> Vec<Vec<[f64; 2]>> {
    let mut runs: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    for pair in points.windows(2) {
        match clip_segment(pair[0], pair[1], min, max) {
            Some((start, end)) => {
                if current.last() != Some(&start) {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(start);
                }
                current.push(end);
            }
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }

    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
