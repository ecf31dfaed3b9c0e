//! Visualization of assessed style results.
mod matrix;
mod plot;

pub use matrix::{StyleChip, StyleMatrix, assessed_summary};
pub use plot::{DEFAULT_PLOT_SIZE, Point, axis_bar, axis_position, plot_point};
