//! Partitioning strategies
//!
//! Interior sampling and k-means feed three strategies: an axis-aligned grid,
//! organic blobs around cluster centroids, and Voronoi cells clipped to the
//! boundary. All are deterministic for a given seed.

mod sampling;
mod kmeans;
mod grid;
mod organic;
mod voronoi;

pub use sampling::{sample_interior, SAMPLE_ATTEMPT_FACTOR};
pub use kmeans::{k_means, DEFAULT_KMEANS_ITERATIONS};
pub use grid::{build_grid, DEFAULT_GRID_PADDING, MAX_GRID_PADDING};
pub use organic::{
    build_organic_zones, build_organic_zones_with_options, OrganicOptions, BLOB_SHRINK_ATTEMPTS,
    DEFAULT_BLOB_RADIUS, DEFAULT_BLOB_STEPS,
};
pub use voronoi::{build_voronoi_zones, voronoi_cells};
