//! Axis-aligned grid partitioning
//!
//! Splits the bounding box into `rows x cols` cells sized to the label count,
//! insets each cell to leave visual gaps, and prefers cells whose centre lies
//! inside the boundary.

use glam::DVec2;

use crate::geometry::{bounding_box, point_in_boundary, Boundary, Ring};
use crate::zone::Zone;

/// Default inset, as a fraction of cell width/height on each side
pub const DEFAULT_GRID_PADDING: f64 = 0.08;

/// Largest allowed inset; anything above would collapse the cell
pub const MAX_GRID_PADDING: f64 = 0.45;

/// Partition the boundary into an evenly spaced grid of zones
///
/// Cells are visited top row first (highest latitude), left to right. Cells
/// with an interior centre come first; outside cells are appended in visiting
/// order only when there are not enough interior ones, so the result always
/// has one zone per label as long as the boundary has a bounding box.
///
/// # Arguments
///
/// * `boundary` - Area to partition
/// * `labels` - One zone is produced per label, in order
/// * `padding` - Inset per side, clamped to `[0, 0.45]`; non-finite means 0
pub fn build_grid<S: AsRef<str>>(boundary: &Boundary, labels: &[S], padding: f64) -> Vec<Zone> {
    if labels.is_empty() {
        return Vec::new();
    }
    let Some(bbox) = bounding_box(boundary) else {
        return Vec::new();
    };

    let count = labels.len();
    let rows = (count as f64).sqrt().ceil() as usize;
    let cols = count.div_ceil(rows);
    let padding = if padding.is_finite() {
        padding.clamp(0.0, MAX_GRID_PADDING)
    } else {
        0.0
    };

    let cell_width = bbox.width() / cols as f64;
    let cell_height = bbox.height() / rows as f64;
    let inset = DVec2::new(cell_width * padding, cell_height * padding);

    let mut inside: Vec<Ring> = Vec::with_capacity(count);
    let mut outside: Vec<Ring> = Vec::new();

    for row in 0..rows {
        let top = bbox.max_lat - row as f64 * cell_height;
        for col in 0..cols {
            let left = bbox.min_lng + col as f64 * cell_width;
            let min = DVec2::new(left, top - cell_height) + inset;
            let max = DVec2::new(left + cell_width, top) - inset;

            let ring = vec![
                min,
                DVec2::new(max.x, min.y),
                max,
                DVec2::new(min.x, max.y),
                min,
            ];
            let center = (min + max) * 0.5;

            if point_in_boundary(center, boundary) {
                inside.push(ring);
            } else {
                outside.push(ring);
            }
        }
    }

    inside
        .into_iter()
        .chain(outside)
        .zip(labels)
        .map(|(ring, label)| Zone::new(label.as_ref(), ring))
        .collect()
}
