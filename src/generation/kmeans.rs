//! K-means clustering of sampled points
//!
//! Plain Lloyd iterations with a fixed iteration count. Empty clusters keep
//! their previous centroid; there is no reseeding mid-run.

use glam::DVec2;

use crate::geometry::Coordinate;
use crate::rng::SeededRng;

/// Iterations used when the caller has no preference
pub const DEFAULT_KMEANS_ITERATIONS: usize = 12;

/// Cluster `points` into `k` centroids
///
/// Initial centroids are the first `k` entries of a seeded Fisher-Yates
/// shuffle of the points, wrapping around when there are fewer than `k`.
/// Each iteration assigns every point to its nearest centroid (ties go to the
/// lowest centroid index) and moves non-empty clusters to their mean.
///
/// # Arguments
///
/// * `points` - Points to cluster
/// * `k` - Number of centroids
/// * `seed` - Seed for the initial shuffle
/// * `iterations` - Number of assign/update rounds
///
/// # Returns
///
/// `k` centroids, or an empty vector when `points` is empty or `k == 0`
pub fn k_means(points: &[Coordinate], k: usize, seed: i64, iterations: usize) -> Vec<Coordinate> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids = initial_centroids(points, k, seed);
    let mut assignments = vec![0usize; points.len()];

    for _ in 0..iterations {
        for (slot, point) in assignments.iter_mut().zip(points) {
            *slot = nearest_centroid(*point, &centroids);
        }

        let mut sums = vec![DVec2::ZERO; k];
        let mut counts = vec![0usize; k];
        for (&cluster, point) in assignments.iter().zip(points) {
            sums[cluster] += *point;
            counts[cluster] += 1;
        }

        for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
            if count > 0 {
                *centroid = sum / count as f64;
            }
        }
    }

    centroids
}

fn initial_centroids(points: &[Coordinate], k: usize, seed: i64) -> Vec<Coordinate> {
    let mut rng = SeededRng::new(seed);
    let mut shuffled = points.to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = ((rng.next_f64() * (i + 1) as f64) as usize).min(i);
        shuffled.swap(i, j);
    }

    (0..k).map(|i| shuffled[i % shuffled.len()]).collect()
}

/// Index of the closest centroid, lowest index on ties
pub(crate) fn nearest_centroid(point: Coordinate, centroids: &[Coordinate]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = point.distance_squared(*centroid);
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    best
}
