//! Geometry for placing a result on the style matrix.

use crate::marker::StyleResult;

pub const DEFAULT_PLOT_SIZE: f64 = 280.0;

// A score of 10 lands at 10/12 of the half width so the marker never
// touches the edge of the plot.
const PLOT_INSET: f64 = 10.0 / 12.0;
const SCORE_EXTENT: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Map the two axis scores onto a square plot of side `size`. Score 0
/// is the center, positive dim1 goes right and positive dim2 goes up.
pub fn plot_point(result: &StyleResult, size: f64) -> Point {
    let center = size / 2.0;
    let range = center * PLOT_INSET;

    Point {
        x: center + (result.dim1_score as f64 / SCORE_EXTENT) * range,
        y: center - (result.dim2_score as f64 / SCORE_EXTENT) * range,
    }
}

/// Position of a score between its two poles as a percentage, 0 at
/// the left pole and 100 at the right.
pub fn axis_position(score: i32) -> f64 {
    ((score as f64 + SCORE_EXTENT) / (2.0 * SCORE_EXTENT)) * 100.0
}

/// A one line text rendering of an axis score, e.g.
/// `Reason [-----o----|---------] Play`.
pub fn axis_bar(left: &str, right: &str, score: i32, width: usize) -> String {
    let width = width.max(3);
    let last = (width - 1) as f64;
    let center = width / 2;
    let pos = ((axis_position(score) / 100.0) * last).round().clamp(0.0, last) as usize;

    let track: String = (0..width)
        .map(|i| {
            if i == pos {
                'o'
            } else if i == center {
                '|'
            } else {
                '-'
            }
        })
        .collect();

    format!("{} [{}] {}", left, track, right)
}
