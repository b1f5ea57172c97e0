//! Geographic zone partitioning
//!
//! Splits an administrative boundary (Polygon / MultiPolygon, or a collection
//! of them) into one labelled, non-overlapping zone per label, ready to be
//! drawn as map overlays. Works directly on longitude/latitude as a plane.
//!
//! # Quick Start
//!
//! ```rust
//! use zone_partition::*;
//! use glam::DVec2;
//!
//! let boundary = Boundary::polygon(vec![
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(1.0, 0.0),
//!     DVec2::new(1.0, 1.0),
//!     DVec2::new(0.0, 1.0),
//!     DVec2::new(0.0, 0.0),
//! ]);
//!
//! // Voronoi with organic fallback
//! let zones = partition(&boundary, &["A", "B", "C", "D"], 176);
//! assert_eq!(zones.len(), 4);
//!
//! // Or pick a strategy explicitly
//! let config = PartitionConfigBuilder::new()
//!     .seed(176)
//!     .strategy(Strategy::Grid)
//!     .build()
//!     .unwrap();
//! let map = ZoneMap::generate(&boundary, &["A", "B", "C", "D"], config);
//! println!("Generated {} zones", map.zone_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables position-to-zone lookups using KD-tree
//! - `serde` (default): GeoJSON-style wire format and serializable types

// Modules
pub mod error;
pub mod geometry;
pub mod rng;
pub mod config;
pub mod zone;
pub mod generation;
pub mod partition;

#[cfg(feature = "spatial-index")]
pub mod spatial;

#[cfg(feature = "serde")]
pub mod wire;

// Re-export core types for convenience
pub use error::{PartitionError, Result};
pub use geometry::{
    bounding_box, point_in_boundary, point_in_polygon, point_in_ring, Boundary, BoundingBox,
    Coordinate, Geometry, Polygon, Ring,
};
pub use rng::SeededRng;
pub use config::{PartitionConfig, PartitionConfigBuilder, Strategy};
pub use zone::Zone;
pub use generation::{
    build_grid, build_organic_zones, build_voronoi_zones, k_means, sample_interior,
    OrganicOptions,
};
pub use partition::{partition, ZoneMap};

#[cfg(feature = "spatial-index")]
pub use spatial::ZoneIndex;

#[cfg(feature = "serde")]
pub use wire::{parse_boundary, zones_to_geojson, BoundaryDocument, Feature, FeatureCollection};

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
