//! Strategy selection and the ZoneMap result type

use log::debug;

use crate::config::{PartitionConfig, Strategy};
use crate::generation::{
    build_grid, build_organic_zones_with_options, build_voronoi_zones, OrganicOptions,
};
use crate::geometry::Boundary;
use crate::zone::Zone;

#[cfg(feature = "spatial-index")]
use crate::geometry::Coordinate;
#[cfg(feature = "spatial-index")]
use crate::spatial::ZoneIndex;

/// Partition a boundary into one zone per label
///
/// Tries Voronoi first and keeps it when it yields exactly one simple zone per
/// label; otherwise returns organic blobs, which may themselves be empty for a
/// degenerate boundary. An empty result means there is no overlay to draw.
///
/// # Example
///
/// ```
/// use zone_partition::*;
/// use glam::DVec2;
///
/// let boundary = Boundary::polygon(vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
///     DVec2::new(0.0, 0.0),
/// ]);
///
/// let zones = partition(&boundary, &["A", "B", "C", "D"], 176);
/// assert_eq!(zones.len(), 4);
/// ```
pub fn partition<S: AsRef<str>>(boundary: &Boundary, labels: &[S], seed: i64) -> Vec<Zone> {
    partition_auto(boundary, labels, seed, OrganicOptions::default()).0
}

/// Voronoi with organic fallback; also reports which strategy succeeded
fn partition_auto<S: AsRef<str>>(
    boundary: &Boundary,
    labels: &[S],
    seed: i64,
    options: OrganicOptions,
) -> (Vec<Zone>, Strategy) {
    let voronoi = build_voronoi_zones(boundary, labels, seed);
    if voronoi.len() == labels.len() && voronoi.iter().all(Zone::is_simple) {
        return (voronoi, Strategy::Voronoi);
    }

    debug!(
        "partition: voronoi produced {} usable zones for {} labels, falling back to organic",
        voronoi.len(),
        labels.len()
    );
    (
        build_organic_zones_with_options(boundary, labels, seed, options),
        Strategy::Organic,
    )
}

/// Zones produced for one boundary and label set
///
/// # Examples
///
/// ```
/// use zone_partition::*;
/// use glam::DVec2;
///
/// let boundary = Boundary::polygon(vec![
///     DVec2::new(0.0, 0.0),
///     DVec2::new(2.0, 0.0),
///     DVec2::new(2.0, 2.0),
///     DVec2::new(0.0, 2.0),
///     DVec2::new(0.0, 0.0),
/// ]);
/// let config = PartitionConfigBuilder::new().seed(7).build().unwrap();
///
/// let map = ZoneMap::generate(&boundary, &["north", "south"], config);
/// println!("{} zones via {:?}", map.zone_count(), map.strategy_used());
/// ```
#[derive(Clone)]
pub struct ZoneMap {
    /// Configuration used to generate the zones
    config: PartitionConfig,

    /// Zones in label order
    zones: Vec<Zone>,

    /// Strategy that actually produced the zones, `None` when empty
    strategy_used: Option<Strategy>,

    /// Centroid index for hover lookups, `None` when there are no zones
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<ZoneIndex>,
}

impl ZoneMap {
    /// Run the configured strategy over `boundary`
    ///
    /// Never fails; an empty map means the boundary could not be partitioned.
    pub fn generate<S: AsRef<str>>(
        boundary: &Boundary,
        labels: &[S],
        config: PartitionConfig,
    ) -> Self {
        let seed = config.seed;
        let options = config.organic_options();

        let (zones, strategy) = match config.strategy {
            Strategy::Auto => partition_auto(boundary, labels, seed, options),
            Strategy::Voronoi => (build_voronoi_zones(boundary, labels, seed), Strategy::Voronoi),
            Strategy::Organic => (
                build_organic_zones_with_options(boundary, labels, seed, options),
                Strategy::Organic,
            ),
            Strategy::Grid => (
                build_grid(boundary, labels, config.grid_padding),
                Strategy::Grid,
            ),
        };

        let strategy_used = (!zones.is_empty()).then_some(strategy);

        #[cfg(feature = "spatial-index")]
        let spatial_index = if zones.is_empty() {
            None
        } else {
            let centroids: Vec<Coordinate> = zones
                .iter()
                .map(|z| z.centroid().unwrap_or_default())
                .collect();
            Some(ZoneIndex::new(&centroids))
        };

        Self {
            config,
            zones,
            strategy_used,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        }
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Strategy that produced the zones
    ///
    /// For `Strategy::Auto` this is `Voronoi` or `Organic`. `None` when no
    /// zones were produced.
    #[inline]
    pub fn strategy_used(&self) -> Option<Strategy> {
        self.strategy_used
    }

    #[inline]
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// All zones, in label order
    #[inline]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Get a zone by position in the label list
    #[inline]
    pub fn get_zone(&self, index: usize) -> Option<&Zone> {
        self.zones.get(index)
    }

    /// First zone carrying `label`
    pub fn find_by_label(&self, label: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.label == label)
    }

    /// Consume the map, keeping only the zones
    pub fn into_zones(self) -> Vec<Zone> {
        self.zones
    }

    /// Zone containing a position, for hover tooltips (requires spatial-index feature)
    ///
    /// Checks the zone with the nearest centroid first, then the rest.
    #[cfg(feature = "spatial-index")]
    pub fn find_zone_at(&self, position: Coordinate) -> Option<&Zone> {
        let index = self.spatial_index.as_ref()?;
        let nearest = index.find_nearest(position);

        match self.zones.get(nearest) {
            Some(zone) if zone.contains(position) => Some(zone),
            _ => self.zones.iter().find(|z| z.contains(position)),
        }
    }
}
