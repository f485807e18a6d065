//! Data models for the chart service
//!
//! Request/plot data, stored artifacts, render scenes and the JSON bodies
//! returned to clients.

pub mod artifact;
pub mod chart;
pub mod response;
pub mod scene;

pub use artifact::Artifact;
pub use chart::{AxisRange, ChartData, ChartRequest, GlobalXRange, PlotCoordinate, Series, SeriesPoints};
pub use response::{
    DataResponse, LinkResponse, MessageResponse, MESSAGE_DATA, MESSAGE_LINK_CREATED,
    MESSAGE_NOT_IMPLEMENTED, MESSAGE_PONG,
};
pub use scene::{PlotSeries, Scene, SeriesColor, CANVAS_HEIGHT, CANVAS_WIDTH};
