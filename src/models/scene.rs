//! Render scene models
//!
//! A `Scene` exclusively owns its axes and series; dropping it releases the
//! whole chart at once.

use super::chart::{AxisRange, PlotCoordinate};

pub const CANVAS_WIDTH: u32 = 1024;
pub const CANVAS_HEIGHT: u32 = 768;

/// RGB color of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One line of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub caption: String,
    pub color: SeriesColor,
    pub coordinates: Vec<PlotCoordinate>,
}

/// A fully composed chart, ready to be rasterized
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub antialias: bool,
    pub x_axis: AxisRange,
    pub y_axis: AxisRange,
    pub series: Vec<PlotSeries>,
}
