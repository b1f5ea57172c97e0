//! Spatial indexing for fast position-to-zone lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::geometry::Coordinate;

/// Wrapper around KD-tree for nearest-centroid queries
///
/// Turns a cursor position into the index of the zone whose centroid is
/// closest, which is the first candidate checked for hover tooltips.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct ZoneIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl ZoneIndex {
    /// Build spatial index from zone centroids
    ///
    /// # Example
    ///
    /// ```
    /// use zone_partition::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let centroids = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
    ///
    /// let index = ZoneIndex::new(&centroids);
    /// assert_eq!(index.find_nearest(DVec2::new(8.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(centroids: &[Coordinate]) -> Self {
        let points: Vec<[f64; 2]> = centroids.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the centroid nearest to `position`
    pub fn find_nearest(&self, position: Coordinate) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
