//! Interior point sampling
//!
//! Rejection sampling: draw uniform candidates inside the bounding box and
//! keep the ones that land inside the boundary.

use glam::DVec2;
use log::trace;

use crate::geometry::{bounding_box_of, point_in_any, Boundary, Coordinate, Geometry};
use crate::rng::SeededRng;

/// Maximum draws per requested point.
///
/// Bounds runtime on boundaries that fill a tiny fraction of their bounding
/// box (slivers, thin coastal strips).
pub const SAMPLE_ATTEMPT_FACTOR: usize = 30;

/// Sample up to `count` points uniformly distributed inside the boundary
///
/// # Arguments
///
/// * `boundary` - Area to sample
/// * `count` - Number of points wanted
/// * `seed` - Seed for the point stream
///
/// # Returns
///
/// Accepted points in draw order. Fewer than `count` when the attempt cap
/// (`count * SAMPLE_ATTEMPT_FACTOR`) is hit, empty when the boundary has no
/// bounding box.
pub fn sample_interior(boundary: &Boundary, count: usize, seed: i64) -> Vec<Coordinate> {
    sample_within(boundary.geometries(), count, seed)
}

pub(crate) fn sample_within(geometries: &[Geometry], count: usize, seed: i64) -> Vec<Coordinate> {
    let Some(bbox) = bounding_box_of(geometries) else {
        return Vec::new();
    };

    let mut rng = SeededRng::new(seed);
    let max_attempts = count.saturating_mul(SAMPLE_ATTEMPT_FACTOR);
    let mut points = Vec::with_capacity(count);
    let mut attempts = 0;

    while points.len() < count && attempts < max_attempts {
        attempts += 1;
        let lng = bbox.min_lng + rng.next_f64() * bbox.width();
        let lat = bbox.min_lat + rng.next_f64() * bbox.height();
        let candidate = DVec2::new(lng, lat);
        if point_in_any(candidate, geometries) {
            points.push(candidate);
        }
    }

    if points.len() < count {
        trace!(
            "sampler accepted {} of {} points after {} draws",
            points.len(),
            count,
            attempts
        );
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::unit_square;
    use crate::geometry::point_in_boundary;

    #[test]
    fn test_sample_unit_square() {
        let boundary = Boundary::polygon(unit_square());
        let points = sample_interior(&boundary, 100, 42);

        assert_eq!(points.len(), 100);
        for p in &points {
            assert!(point_in_boundary(*p, &boundary));
        }
    }

    #[test]
    fn test_sample_determinism() {
        let boundary = Boundary::polygon(unit_square());
        let a = sample_interior(&boundary, 50, 12345);
        let b = sample_interior(&boundary, 50, 12345);
        assert_eq!(a, b);

        let c = sample_interior(&boundary, 50, 54321);
        assert_ne!(a, c);
    }

    #[test]
    fn test_sample_concave_boundary() {
        // L shape: the upper-right quadrant of the bbox is outside
        let boundary = Boundary::polygon(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(0.0, 0.0),
        ]);
        let points = sample_interior(&boundary, 200, 7);

        assert_eq!(points.len(), 200);
        assert!(points.iter().all(|p| !(p.x > 1.0 && p.y > 1.0)));
    }

    #[test]
    fn test_sample_empty_boundary() {
        assert!(sample_interior(&Boundary::Collection(vec![]), 10, 1).is_empty());
        assert!(sample_interior(&Boundary::polygon(unit_square()), 0, 1).is_empty());
    }

    #[test]
    fn test_sample_attempt_cap() {
        // zero-area sliver: nothing is ever accepted, loop must still end
        let sliver = Boundary::polygon(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 0.0),
        ]);
        let points = sample_interior(&sliver, 25, 3);
        assert!(points.is_empty());
    }
}
