//! Partition Configuration and Builder
//!
//! This module provides configuration types for deterministic zone partitioning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};
use crate::generation::{
    OrganicOptions, DEFAULT_BLOB_STEPS, DEFAULT_GRID_PADDING, DEFAULT_KMEANS_ITERATIONS,
};

/// Upper bound on k-means iterations accepted by the builder
pub const MAX_KMEANS_ITERATIONS: usize = 100;

/// Accepted range of blob vertex counts
pub const BLOB_STEPS_RANGE: std::ops::RangeInclusive<usize> = 3..=360;

/// Which partitioning strategy produces the zones
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Voronoi first, organic blobs when Voronoi fails validation
    #[default]
    Auto,
    /// Voronoi cells clipped to the boundary, or nothing
    Voronoi,
    /// Jittered blobs around k-means centroids
    Organic,
    /// Evenly spaced inset grid cells
    Grid,
}

impl Strategy {
    /// Get a human-readable name for this strategy
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Auto => "Auto",
            Strategy::Voronoi => "Voronoi",
            Strategy::Organic => "Organic",
            Strategy::Grid => "Grid",
        }
    }
}

/// Configuration for deterministic zone partitioning
///
/// The same configuration, boundary and labels always produce identical zones,
/// so callers may cache results keyed on those three.
///
/// # Example
///
/// ```rust
/// use zone_partition::*;
///
/// let config = PartitionConfigBuilder::new()
///     .seed(176)
///     .strategy(Strategy::Organic)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: PartitionConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionConfig {
    /// Seed driving every random stream of the run
    pub seed: i64,

    /// Strategy to run
    pub strategy: Strategy,

    /// Grid cell inset per side, as a fraction of the cell size
    ///
    /// Clamped to `[0, 0.45]` when the grid is built.
    pub grid_padding: f64,

    /// K-means iterations for organic centroid placement
    pub kmeans_iterations: usize,

    /// Vertices per organic blob
    pub blob_steps: usize,
}

impl PartitionConfig {
    /// Organic options derived from this configuration
    #[inline]
    pub fn organic_options(&self) -> OrganicOptions {
        OrganicOptions {
            steps: self.blob_steps,
            kmeans_iterations: self.kmeans_iterations,
        }
    }
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            strategy: Strategy::default(),
            grid_padding: DEFAULT_GRID_PADDING,
            kmeans_iterations: DEFAULT_KMEANS_ITERATIONS,
            blob_steps: DEFAULT_BLOB_STEPS,
        }
    }
}

/// Builder for creating PartitionConfig with validation
///
/// # Example
///
/// ```rust
/// use zone_partition::*;
///
/// let config = PartitionConfigBuilder::new()
///     .seed(42)
///     .strategy(Strategy::Grid)
///     .grid_padding(0.1)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.grid_padding, 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct PartitionConfigBuilder {
    seed: Option<i64>,
    strategy: Strategy,
    grid_padding: f64,
    kmeans_iterations: usize,
    blob_steps: usize,
}

impl PartitionConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - strategy: Auto
    /// - grid_padding: 0.08
    /// - kmeans_iterations: 12
    /// - blob_steps: 22
    pub fn new() -> Self {
        Self {
            seed: None,
            strategy: Strategy::default(),
            grid_padding: DEFAULT_GRID_PADDING,
            kmeans_iterations: DEFAULT_KMEANS_ITERATIONS,
            blob_steps: DEFAULT_BLOB_STEPS,
        }
    }

    /// Set the seed
    ///
    /// Use a fixed seed for stable output across repeated requests.
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the partitioning strategy
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the grid inset fraction
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if padding is NaN or infinite
    pub fn grid_padding(mut self, padding: f64) -> Result<Self> {
        if !padding.is_finite() {
            return Err(PartitionError::InvalidConfig(format!(
                "grid padding must be finite (got {})",
                padding
            )));
        }
        self.grid_padding = padding;
        Ok(self)
    }

    /// Set the number of k-means iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 100
    pub fn kmeans_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_KMEANS_ITERATIONS {
            return Err(PartitionError::InvalidConfig(format!(
                "k-means iterations must be <= {} (got {})",
                MAX_KMEANS_ITERATIONS, iterations
            )));
        }
        self.kmeans_iterations = iterations;
        Ok(self)
    }

    /// Set the number of vertices per organic blob
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if steps is outside 3..=360
    pub fn blob_steps(mut self, steps: usize) -> Result<Self> {
        if !BLOB_STEPS_RANGE.contains(&steps) {
            return Err(PartitionError::InvalidConfig(format!(
                "blob steps must be within {}..={} (got {})",
                BLOB_STEPS_RANGE.start(),
                BLOB_STEPS_RANGE.end(),
                steps
            )));
        }
        self.blob_steps = steps;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<PartitionConfig> {
        let seed = self
            .seed
            .unwrap_or_else(|| i64::from(rand::random::<u32>()));

        Ok(PartitionConfig {
            seed,
            strategy: self.strategy,
            grid_padding: self.grid_padding,
            kmeans_iterations: self.kmeans_iterations,
            blob_steps: self.blob_steps,
        })
    }
}

impl Default for PartitionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
