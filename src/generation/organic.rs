//! Organic blob zones
//!
//! Hand-drawn looking zones: sample the boundary, cluster the samples into one
//! centroid per label, then trace a jittered closed loop around each centroid.
//! Loop vertices that stray outside the boundary are pulled back towards
//! their centroid.

use glam::DVec2;
use std::f64::consts::TAU;

use crate::generation::kmeans::{k_means, DEFAULT_KMEANS_ITERATIONS};
use crate::generation::sampling::sample_interior;
use crate::geometry::{point_in_boundary, Boundary, Coordinate, Ring};
use crate::rng::SeededRng;
use crate::zone::Zone;

/// Samples drawn per label before clustering
pub const SAMPLES_PER_LABEL: usize = 50;

/// Lower bound on the sample count, so small label sets still cluster well
pub const MIN_SAMPLES: usize = 200;

/// Blob radius as a fraction of the distance to the nearest other centroid
pub const RADIUS_FACTOR: f64 = 0.48;

/// Radius used when a centroid has no distinct neighbour
pub const DEFAULT_BLOB_RADIUS: f64 = 0.003;

/// Default number of vertices per blob (before closing)
pub const DEFAULT_BLOB_STEPS: usize = 22;

/// Radius jitter range applied per vertex
pub const JITTER_RANGE: (f64, f64) = (0.8, 1.1);

/// Factor applied to the radius each time a vertex lands outside
pub const SHRINK_FACTOR: f64 = 0.85;

/// Maximum shrink retries per vertex.
///
/// Bounds runtime on thin boundaries; after the last retry the vertex is
/// accepted wherever it lands.
pub const BLOB_SHRINK_ATTEMPTS: usize = 14;

/// Options for organic blob construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrganicOptions {
    /// Vertices per blob, closing vertex excluded
    pub steps: usize,
    /// K-means iterations used to place the centroids
    pub kmeans_iterations: usize,
}

impl Default for OrganicOptions {
    fn default() -> Self {
        Self {
            steps: DEFAULT_BLOB_STEPS,
            kmeans_iterations: DEFAULT_KMEANS_ITERATIONS,
        }
    }
}

/// Build one organic blob zone per label
///
/// Uses default options; see [`build_organic_zones_with_options`].
pub fn build_organic_zones<S: AsRef<str>>(
    boundary: &Boundary,
    labels: &[S],
    seed: i64,
) -> Vec<Zone> {
    build_organic_zones_with_options(boundary, labels, seed, OrganicOptions::default())
}

/// Build one organic blob zone per label with custom options
///
/// # Algorithm
///
/// 1. Sample `max(labels * 50, 200)` interior points (stream `seed`)
/// 2. Cluster into one centroid per label (stream `seed + 1`)
/// 3. Sort centroids by latitude, then longitude, and pair with labels in order
/// 4. Trace each blob with jittered radii (stream `seed + 2`)
///
/// # Returns
///
/// One zone per label, or an empty vector when there are no labels or no
/// interior point could be sampled.
pub fn build_organic_zones_with_options<S: AsRef<str>>(
    boundary: &Boundary,
    labels: &[S],
    seed: i64,
    options: OrganicOptions,
) -> Vec<Zone> {
    if labels.is_empty() {
        return Vec::new();
    }

    let sample_count = (labels.len() * SAMPLES_PER_LABEL).max(MIN_SAMPLES);
    let samples = sample_interior(boundary, sample_count, seed);
    if samples.is_empty() {
        return Vec::new();
    }

    let mut centroids = k_means(
        &samples,
        labels.len(),
        seed.wrapping_add(1),
        options.kmeans_iterations,
    );
    centroids.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut rng = SeededRng::new(seed.wrapping_add(2));
    let steps = options.steps.max(3);

    centroids
        .iter()
        .enumerate()
        .zip(labels)
        .map(|((index, &center), label)| {
            let radius = blob_radius(index, &centroids);
            let ring = trace_blob(boundary, center, radius, steps, &mut rng);
            Zone::new(label.as_ref(), ring)
        })
        .collect()
}

/// `RADIUS_FACTOR` times the distance to the nearest other centroid
fn blob_radius(index: usize, centroids: &[Coordinate]) -> f64 {
    let center = centroids[index];
    let nearest = centroids
        .iter()
        .enumerate()
        .filter(|&(other, _)| other != index)
        .map(|(_, c)| center.distance(*c))
        .fold(f64::INFINITY, f64::min);

    if nearest.is_finite() && nearest > 0.0 {
        nearest * RADIUS_FACTOR
    } else {
        DEFAULT_BLOB_RADIUS
    }
}

fn trace_blob(
    boundary: &Boundary,
    center: Coordinate,
    radius: f64,
    steps: usize,
    rng: &mut SeededRng,
) -> Ring {
    let mut ring = Vec::with_capacity(steps + 1);

    for step in 0..steps {
        let angle = TAU * step as f64 / steps as f64;
        let direction = DVec2::new(angle.cos(), angle.sin());
        let mut r = radius * rng.next_range(JITTER_RANGE.0, JITTER_RANGE.1);
        let mut vertex = center + direction * r;

        let mut attempts = 0;
        while attempts < BLOB_SHRINK_ATTEMPTS && !point_in_boundary(vertex, boundary) {
            r *= SHRINK_FACTOR;
            vertex = center + direction * r;
            attempts += 1;
        }

        ring.push(vertex);
    }

    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::unit_square;

    #[test]
    fn test_one_zone_per_label() {
        let boundary = Boundary::polygon(unit_square());
        let labels = ["north", "south", "east", "west", "centre"];
        let zones = build_organic_zones(&boundary, &labels, 42);

        assert_eq!(zones.len(), labels.len());
        for (zone, label) in zones.iter().zip(labels) {
            assert_eq!(zone.label, label);
            assert_eq!(zone.vertex_count(), DEFAULT_BLOB_STEPS + 1);
            assert_eq!(zone.exterior.first(), zone.exterior.last());
            assert!(zone.is_simple());
        }
    }

    #[test]
    fn test_centroids_mostly_inside() {
        let boundary = Boundary::polygon(unit_square());
        let labels = ["a", "b", "c", "d", "e", "f"];
        let zones = build_organic_zones(&boundary, &labels, 176);

        let inside = zones
            .iter()
            .filter(|z| point_in_boundary(z.centroid().unwrap(), &boundary))
            .count();
        assert!(inside >= labels.len().div_ceil(2));
    }

    #[test]
    fn test_vertices_pulled_inside() {
        let boundary = Boundary::polygon(unit_square());
        let zones = build_organic_zones(&boundary, &["a", "b", "c"], 9);
        for zone in &zones {
            for v in &zone.exterior {
                assert!(v.x > -0.05 && v.x < 1.05 && v.y > -0.05 && v.y < 1.05);
            }
        }
    }

    #[test]
    fn test_determinism() {
        let boundary = Boundary::polygon(unit_square());
        let a = build_organic_zones(&boundary, &["a", "b", "c"], 1234);
        let b = build_organic_zones(&boundary, &["a", "b", "c"], 1234);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_label_uses_default_radius() {
        let boundary = Boundary::polygon(unit_square());
        let zones = build_organic_zones(&boundary, &["solo"], 5);

        assert_eq!(zones.len(), 1);
        let center = zones[0].centroid().unwrap();
        for v in &zones[0].exterior {
            assert!(center.distance(*v) < DEFAULT_BLOB_RADIUS * 1.5);
        }
    }

    #[test]
    fn test_custom_steps() {
        let boundary = Boundary::polygon(unit_square());
        let options = OrganicOptions {
            steps: 8,
            ..Default::default()
        };
        let zones = build_organic_zones_with_options(&boundary, &["a", "b"], 3, options);
        assert!(zones.iter().all(|z| z.vertex_count() == 9));
    }

    #[test]
    fn test_degenerate_boundary_is_empty() {
        let sliver = Boundary::polygon(vec![DVec2::new(1.0, 1.0); 4]);
        assert!(build_organic_zones(&sliver, &["a", "b"], 1).is_empty());
        assert!(build_organic_zones(&Boundary::Collection(vec![]), &["a"], 1).is_empty());

        let no_labels: [&str; 0] = [];
        assert!(build_organic_zones(&Boundary::polygon(unit_square()), &no_labels, 1).is_empty());
    }

    #[test]
    fn test_blob_radius() {
        let centroids = vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(3.0, 0.0)];
        assert!((blob_radius(0, &centroids) - 0.48).abs() < 1e-12);
        assert!((blob_radius(2, &centroids) - 0.96).abs() < 1e-12);
        assert_eq!(blob_radius(0, &centroids[..1]), DEFAULT_BLOB_RADIUS);
        assert_eq!(blob_radius(0, &[DVec2::ONE, DVec2::ONE]), DEFAULT_BLOB_RADIUS);
    }
}
