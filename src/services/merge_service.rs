use crate::models::PlotCoordinate;

/// Pair X and Y values of one series into plot coordinates.
///
/// The result always has one coordinate per X value. Y values are assigned in
/// order; missing Y values plot at 0 and surplus Y values are dropped.
pub fn merge_coordinates(x_points: &[f64], y_points: &[f64]) -> Vec<PlotCoordinate> {
    let mut coordinates: Vec<PlotCoordinate> = x_points
        .iter()
        .map(|&x| PlotCoordinate::new(x, 0.0))
        .collect();

    for (coordinate, &y) in coordinates.iter_mut().zip(y_points) {
        coordinate.y = y;
    }

    coordinates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(coordinates: &[PlotCoordinate]) -> Vec<(f64, f64)> {
        coordinates.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_short_y_is_padded_with_zero() {
        let merged = merge_coordinates(&[0.0, 1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0]);
        assert_eq!(
            pairs(&merged),
            vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 0.0), (4.0, 0.0)]
        );
    }

    #[test]
    fn test_long_y_is_truncated() {
        let merged = merge_coordinates(&[10.0, 20.0], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(pairs(&merged), vec![(10.0, 1.0), (20.0, 2.0)]);
    }

    #[test]
    fn test_x_order_is_kept() {
        let merged = merge_coordinates(&[3.0, 1.0, 2.0], &[30.0, 10.0, 20.0]);
        assert_eq!(pairs(&merged), vec![(3.0, 30.0), (1.0, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn test_length_always_matches_x() {
        for m in 0..6 {
            for n in 0..6 {
                let x: Vec<f64> = (0..m).map(|i| i as f64).collect();
                let y: Vec<f64> = (0..n).map(|i| (i + 1) as f64).collect();
                let merged = merge_coordinates(&x, &y);

                assert_eq!(merged.len(), m);
                for (i, c) in merged.iter().enumerate() {
                    let expected = if i < n { y[i] } else { 0.0 };
                    assert_eq!(c.y, expected);
                }
            }
        }
    }
}
