use serde_json::{Map, Value};
use tracing::debug;
use crate::models::{ChartRequest, GlobalXRange, Series};
use crate::utils::ChartError;

pub const KEY_X_START: &str = "X_Start";
pub const KEY_X_END: &str = "X_End";
pub const KEY_POINTS: &str = "Points";
pub const KEY_CAPTION: &str = "Caption";
pub const KEY_X_POINTS: &str = "X_Points";
pub const KEY_Y_POINTS: &str = "Y_Points";

const SUFFIX: &str = "Please send a valid JSON-Object.";

fn violation(detail: impl AsRef<str>) -> ChartError {
    ChartError::SchemaViolation(format!("Invalid data sent. {} {}", detail.as_ref(), SUFFIX))
}

fn invalid_object() -> ChartError {
    ChartError::SchemaViolation(format!("Invalid data sent. {}", SUFFIX))
}

/// Validate a raw request body and turn it into a `ChartRequest`.
///
/// Checks run in a fixed order and the first failing check wins, so the same
/// invalid payload always yields the same message. Nothing is written anywhere.
pub fn validate_chart_request(body: &[u8], max_points: usize) -> Result<ChartRequest, ChartError> {
    let document: Value = serde_json::from_slice(body)
        .map_err(|e| ChartError::MalformedJson(e.to_string()))?;

    if document.is_null() {
        return Err(ChartError::MalformedJson("document is null".to_string()));
    }

    let root = match document.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return Err(invalid_object()),
    };

    for key in [KEY_X_START, KEY_X_END, KEY_POINTS] {
        if !root.contains_key(key) {
            return Err(violation(format!("Missing JSON-Key '{}'.", key)));
        }
    }

    let x_start = root[KEY_X_START]
        .as_f64()
        .ok_or_else(|| violation(format!("JSON-Key '{}' is not a double value.", KEY_X_START)))?;

    let x_end = root[KEY_X_END]
        .as_f64()
        .ok_or_else(|| violation(format!("JSON-Key '{}' is not a double value.", KEY_X_END)))?;

    let points = root[KEY_POINTS]
        .as_array()
        .ok_or_else(|| violation(format!("JSON-Key '{}' is not an array.", KEY_POINTS)))?;

    if points.is_empty() {
        return Err(violation(format!("JSON-Key '{}' is empty.", KEY_POINTS)));
    }

    if points.len() > 1 {
        return Err(violation(format!("JSON-Key '{}' contains more than one array.", KEY_POINTS)));
    }

    let entries = match &points[0] {
        Value::Null => {
            return Err(violation(format!(
                "Array in JSON-Key '{}' contains no JSON subobjects.",
                KEY_POINTS
            )))
        }
        Value::Array(entries) => entries,
        _ => {
            return Err(violation(format!(
                "The entry in JSON-Key '{}' is not an array.",
                KEY_POINTS
            )))
        }
    };

    let mut series = Vec::with_capacity(entries.len());
    for entry in entries {
        let object = entry.as_object().ok_or_else(|| {
            violation(format!(
                "A sub-object in array '{}' is not a proper JSON-object.",
                KEY_POINTS
            ))
        })?;

        series.push(validate_series(object, max_points)?);
    }

    if series.iter().any(|s| s.x_points.is_none()) && GlobalXRange::new(x_start, x_end).len() > max_points {
        return Err(violation(format!(
            "The range from '{}' to '{}' spans more than {} points.",
            KEY_X_START, KEY_X_END, max_points
        )));
    }

    debug!("Validated chart request with {} series", series.len());

    Ok(ChartRequest {
        x_start,
        x_end,
        series,
    })
}

/// Validate one sub-object of the nested `Points` array
fn validate_series(object: &Map<String, Value>, max_points: usize) -> Result<Series, ChartError> {
    let caption = object
        .get(KEY_CAPTION)
        .and_then(Value::as_str)
        .unwrap_or_default();

    if caption.is_empty() {
        return Err(violation(format!(
            "A caption of one sub-object in array '{}' is empty.",
            KEY_POINTS
        )));
    }

    let x_values = match object.get(KEY_X_POINTS) {
        None => None,
        Some(Value::Array(values)) => Some(values),
        Some(_) => return Err(not_an_array(KEY_X_POINTS)),
    };

    let y_values = match object.get(KEY_Y_POINTS) {
        Some(Value::Array(values)) => values,
        _ => return Err(not_an_array(KEY_Y_POINTS)),
    };

    let mut y_points = Vec::with_capacity(y_values.len());
    for value in y_values {
        let y = value.as_f64().ok_or_else(|| {
            violation(format!(
                "A point in JSON-Key '{}' in one sub-object of '{}' is not a double value.",
                KEY_Y_POINTS, KEY_POINTS
            ))
        })?;
        y_points.push(y);
    }

    if x_values.map_or(false, |values| values.len() > max_points) {
        return Err(too_many_points(KEY_X_POINTS, max_points));
    }

    if y_points.len() > max_points {
        return Err(too_many_points(KEY_Y_POINTS, max_points));
    }

    // X values are not type-checked; anything non-numeric plots at 0
    let x_points = x_values.map(|values| values.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect());

    Ok(Series {
        caption: caption.to_string(),
        x_points,
        y_points,
    })
}

fn not_an_array(key: &str) -> ChartError {
    violation(format!(
        "JSON-Key '{}' of one sub-object in array '{}' is not an array.",
        key, KEY_POINTS
    ))
}

fn too_many_points(key: &str, max_points: usize) -> ChartError {
    violation(format!(
        "JSON-Key '{}' of one sub-object in array '{}' contains more than {} points.",
        key, KEY_POINTS, max_points
    ))
}
