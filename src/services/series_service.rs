use std::collections::BTreeMap;
use tracing::{debug, warn};
use crate::models::{AxisRange, ChartData, ChartRequest, GlobalXRange, SeriesPoints};

/// Flatten a validated request into caption-keyed series and derive both axis ranges.
///
/// Captions are unique keys: when a caption repeats, the later series replaces
/// the earlier one. Series without `X_Points` take the ticks of the global X range.
pub fn build_chart_data(request: &ChartRequest) -> ChartData {
    let x_range = GlobalXRange::new(request.x_start, request.x_end);

    let mut series: BTreeMap<String, SeriesPoints> = BTreeMap::new();
    for entry in &request.series {
        let x_points = match &entry.x_points {
            Some(points) => points.clone(),
            None => x_range.ticks(),
        };

        let replaced = series.insert(
            entry.caption.clone(),
            SeriesPoints {
                x_points,
                y_points: entry.y_points.clone(),
            },
        );

        if replaced.is_some() {
            warn!("Duplicate caption '{}' - the later series replaces the earlier one", entry.caption);
        }
    }

    let y_range = compute_y_range(&series);
    debug!(
        "Built {} series, x range [{}, {}], y range [{}, {}]",
        series.len(),
        x_range.x_start,
        x_range.x_end,
        y_range.min,
        y_range.max
    );

    ChartData {
        x_range,
        y_range,
        series,
    }
}

/// `(min, max)` over every Y value; `(0, 0)` when there is at most one value
pub fn compute_y_range(series: &BTreeMap<String, SeriesPoints>) -> AxisRange {
    let all_y: Vec<f64> = series
        .values()
        .flat_map(|points| points.y_points.iter().copied())
        .collect();

    if all_y.len() <= 1 {
        return AxisRange::new(0.0, 0.0);
    }

    let min = all_y.iter().copied().fold(f64::INFINITY, f64::min);
    let max = all_y.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    AxisRange::new(min, max)
}
