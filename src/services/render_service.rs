use std::io::Cursor;
use image::imageops::FilterType;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use rand::Rng;
use tracing::debug;
use crate::models::{
    AxisRange, ChartData, PlotSeries, Scene, SeriesColor, CANVAS_HEIGHT, CANVAS_WIDTH,
};
use crate::services::merge_service::merge_coordinates;
use crate::utils::ChartError;

/// Labels used when an axis' tick count is too small to be meaningful
const FALLBACK_LABELS: usize = 5;
/// Upper bound for axis labels
const MAX_LABELS: usize = 50;
/// Side length factor of the supersampled canvas used for anti-aliasing
const SUPERSAMPLE: u32 = 2;

/// Rasterizes a composed scene into encoded image bytes
pub trait ChartRenderer: Send + Sync {
    fn render(&self, scene: &Scene) -> Result<Vec<u8>, ChartError>;
}

/// Compose a scene with randomly colored series
pub fn compose_scene(data: &ChartData) -> Scene {
    compose_scene_with_rng(data, &mut rand::thread_rng())
}

/// Compose a scene: one axis per dimension, one line per caption
pub fn compose_scene_with_rng<R: Rng + ?Sized>(data: &ChartData, rng: &mut R) -> Scene {
    let series = data
        .series
        .iter()
        .map(|(caption, points)| PlotSeries {
            caption: caption.clone(),
            color: random_color(rng),
            coordinates: merge_coordinates(&points.x_points, &points.y_points),
        })
        .collect();

    Scene {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        antialias: true,
        x_axis: data.x_range.axis(),
        y_axis: data.y_range,
        series,
    }
}

/// Each channel is drawn uniformly from `[0, 254]`
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> SeriesColor {
    SeriesColor {
        r: rng.gen_range(0..=254),
        g: rng.gen_range(0..=254),
        b: rng.gen_range(0..=254),
    }
}

/// Number of labels to draw for a computed tick count
pub fn label_count(tick_count: i64) -> usize {
    if tick_count < 2 {
        FALLBACK_LABELS
    } else {
        (tick_count as usize).min(MAX_LABELS)
    }
}

/// Ordered, non-degenerate span used for drawing an axis.
///
/// Fails when the bounds or their distance are not finite; plotters cannot
/// lay out such an axis.
pub fn drawable_span(axis: &AxisRange) -> Result<(f64, f64), ChartError> {
    let (low, mut high) = if axis.min <= axis.max {
        (axis.min, axis.max)
    } else {
        (axis.max, axis.min)
    };

    if high - low <= 0.0 {
        // A unit step vanishes next to very large bounds
        high = low + 1f64.max(low.abs() * 1e-9);
    }

    if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
        return Err(ChartError::Render(format!(
            "Axis range [{}, {}] cannot be drawn",
            axis.min, axis.max
        )));
    }

    Ok((low, high))
}

fn render_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// PNG renderer backed by plotters' bitmap backend
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        PlottersRenderer
    }

    fn draw(scene: &Scene, buffer: &mut [u8], size: (u32, u32), scale: u32) -> Result<(), ChartError> {
        let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let (x_low, x_high) = drawable_span(&scene.x_axis)?;
        let (y_low, y_high) = drawable_span(&scene.y_axis)?;
        let px = |value: u32| value * scale;
        let font_size = px(14);

        let mut chart = ChartBuilder::on(&root)
            .margin(px(15))
            .x_label_area_size(px(40))
            .y_label_area_size(px(60))
            .build_cartesian_2d(x_low..x_high, y_low..y_high)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_labels(label_count(scene.x_axis.tick_count()))
            .y_labels(label_count(scene.y_axis.tick_count()))
            .label_style(("sans-serif", font_size))
            .draw()
            .map_err(render_error)?;

        for series in &scene.series {
            let color = RGBColor(series.color.r, series.color.g, series.color.b);
            let style = color.stroke_width(2 * scale);
            let legend_width = 20 * scale as i32;

            chart
                .draw_series(LineSeries::new(
                    series.coordinates.iter().map(|c| (c.x, c.y)),
                    style,
                ))
                .map_err(render_error)?
                .label(series.caption.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_width, y)], style));
        }

        if !scene.series.is_empty() {
            chart
                .configure_series_labels()
                .label_font(("sans-serif", font_size))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_error)?;
        }

        root.present().map_err(render_error)?;
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, scene: &Scene) -> Result<Vec<u8>, ChartError> {
        drawable_span(&scene.x_axis)?;
        drawable_span(&scene.y_axis)?;

        let scale = if scene.antialias { SUPERSAMPLE } else { 1 };
        let size = (scene.width * scale, scene.height * scale);

        let mut buffer = vec![0u8; (size.0 * size.1 * 3) as usize];
        Self::draw(scene, &mut buffer, size, scale)?;

        let canvas = RgbImage::from_raw(size.0, size.1, buffer)
            .ok_or_else(|| ChartError::Render("Canvas buffer has the wrong size".to_string()))?;

        let output = if scale > 1 {
            image::imageops::resize(&canvas, scene.width, scene.height, FilterType::Triangle)
        } else {
            canvas
        };

        let mut encoded: Vec<u8> = Vec::new();
        output
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(render_error)?;

        debug!(
            "Rendered {} series into {} PNG bytes ({}x{})",
            scene.series.len(),
            encoded.len(),
            scene.width,
            scene.height
        );

        Ok(encoded)
    }
}
