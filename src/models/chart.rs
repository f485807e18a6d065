//! Chart request and plotting models

use std::collections::BTreeMap;

/// A validated `POST /charts/line` payload
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub x_start: f64,
    pub x_end: f64,
    pub series: Vec<Series>,
}

/// One labeled line as submitted by the client.
/// `x_points` is `None` when the series omitted `X_Points`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub caption: String,
    pub x_points: Option<Vec<f64>>,
    pub y_points: Vec<f64>,
}

/// X and Y values of one series after X values have been resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoints {
    pub x_points: Vec<f64>,
    pub y_points: Vec<f64>,
}

/// The X domain given by `X_Start`/`X_End`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalXRange {
    pub x_start: f64,
    pub x_end: f64,
}

impl GlobalXRange {
    pub fn new(x_start: f64, x_end: f64) -> Self {
        GlobalXRange { x_start, x_end }
    }

    /// Number of ticks: `floor(|x_start| + |x_end|)`
    pub fn len(&self) -> usize {
        (self.x_start.abs() + self.x_end.abs()).floor() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ascending ticks `x_start, x_start + 1, ...`
    pub fn ticks(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.x_start + i as f64).collect()
    }

    pub fn axis(&self) -> AxisRange {
        AxisRange::new(self.x_start, self.x_end)
    }
}

/// `(min, max)` domain of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        AxisRange { min, max }
    }

    /// `floor(max) + 1`, where max is the larger bound; saturates at the `i64` limits
    pub fn tick_count(&self) -> i64 {
        (self.min.max(self.max).floor() as i64).saturating_add(1)
    }
}

/// One plotted point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotCoordinate {
    pub x: f64,
    pub y: f64,
}

impl PlotCoordinate {
    pub fn new(x: f64, y: f64) -> Self {
        PlotCoordinate { x, y }
    }
}

/// Everything the renderer needs, keyed by caption
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub x_range: GlobalXRange,
    pub y_range: AxisRange,
    pub series: BTreeMap<String, SeriesPoints>,
}
