//! Zone Structure
//!
//! One labelled output polygon produced by a partitioning strategy.

use crate::geometry::{
    point_in_ring, ring_area, ring_centroid, ring_is_simple, BoundingBox, Coordinate, Ring,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A labelled region of the boundary
///
/// Grid and organic zones never carry holes; Voronoi zones may after being
/// clipped against a boundary that has holes.
///
/// # Design Notes
///
/// Zones are recomputed from (boundary, labels, seed) on every request and are
/// never persisted by the engine. Callers that cache should key on those three.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Caller-supplied label; duplicates are kept as separate zones
    pub label: String,

    /// Closed outer ring (first == last)
    pub exterior: Ring,

    /// Closed hole rings, usually empty
    pub holes: Vec<Ring>,
}

impl Zone {
    /// Create a zone without holes
    pub fn new(label: impl Into<String>, exterior: Ring) -> Self {
        Self {
            label: label.into(),
            exterior,
            holes: Vec::new(),
        }
    }

    /// Create a zone with holes
    pub fn with_holes(label: impl Into<String>, exterior: Ring, holes: Vec<Ring>) -> Self {
        Self {
            label: label.into(),
            exterior,
            holes,
        }
    }

    /// Number of coordinates in the exterior ring (closing vertex included)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.exterior.len()
    }

    /// Planar area in square degrees, holes subtracted
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| ring_area(h)).sum();
        (ring_area(&self.exterior) - holes).max(0.0)
    }

    /// Centroid of the exterior ring
    pub fn centroid(&self) -> Option<Coordinate> {
        ring_centroid(&self.exterior)
    }

    /// Whether a point falls inside this zone (holes excluded)
    pub fn contains(&self, point: Coordinate) -> bool {
        point_in_ring(point, &self.exterior) && !self.holes.iter().any(|h| point_in_ring(point, h))
    }

    /// Whether the exterior ring is free of self-intersections
    pub fn is_simple(&self) -> bool {
        ring_is_simple(&self.exterior)
    }

    /// Bounds of the exterior ring
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates(self.exterior.iter())
    }
}
