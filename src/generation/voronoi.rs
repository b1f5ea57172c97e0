//! Voronoi zones clipped to the boundary
//!
//! One seed per label is sampled inside the boundary's representative
//! geometry. Each seed's cell is built by clipping the bounding box against
//! the perpendicular bisectors to every other seed, then intersected with the
//! representative geometry.
//!
//! The result is all-or-nothing: if any cell vanishes or the seed count
//! falls short, the whole call returns empty so the caller can fall back.

use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon, Polygon as GeoPolygon};
use log::debug;

use crate::generation::sampling::sample_within;
use crate::geometry::{
    close_ring, geometry_bounding_box, Boundary, BoundingBox, Coordinate, Geometry, Ring,
    AREA_EPSILON,
};
use crate::zone::Zone;

/// Build one Voronoi zone per label
///
/// # Arguments
///
/// * `boundary` - Area to partition; only its representative geometry (the
///   single geometry or the first collection member) is used
/// * `labels` - One zone per label, in seed order
/// * `seed` - Seed for the site positions
///
/// # Returns
///
/// Exactly `labels.len()` zones, or an empty vector. Never a partial result.
pub fn build_voronoi_zones<S: AsRef<str>>(
    boundary: &Boundary,
    labels: &[S],
    seed: i64,
) -> Vec<Zone> {
    if labels.is_empty() {
        return Vec::new();
    }

    let Some(representative) = boundary.representative() else {
        debug!("voronoi: boundary has no representative geometry");
        return Vec::new();
    };

    let sites = sample_within(std::slice::from_ref(representative), labels.len(), seed);
    if sites.len() < labels.len() {
        debug!(
            "voronoi: sampled {} of {} sites, giving up",
            sites.len(),
            labels.len()
        );
        return Vec::new();
    }

    let Some(bbox) = geometry_bounding_box(representative) else {
        return Vec::new();
    };

    let region = to_geo(representative);
    let zones: Vec<Zone> = voronoi_cells(&sites, &bbox)
        .iter()
        .zip(labels)
        .filter_map(|(cell, label)| {
            clip_cell(cell, &region)
                .map(|(exterior, holes)| Zone::with_holes(label.as_ref(), exterior, holes))
        })
        .collect();

    if zones.len() != labels.len() {
        debug!(
            "voronoi: {} of {} cells survived clipping, discarding result",
            zones.len(),
            labels.len()
        );
        return Vec::new();
    }

    zones
}

/// Voronoi cells of `sites` restricted to `bbox`
///
/// Returns one closed ring per site, in site order. A cell is empty when its
/// site coincides with an earlier one.
pub fn voronoi_cells(sites: &[Coordinate], bbox: &BoundingBox) -> Vec<Ring> {
    let mut frame = bbox.to_ring();
    frame.pop();

    sites
        .iter()
        .enumerate()
        .map(|(index, &site)| {
            let mut cell = frame.clone();
            for (other_index, &other) in sites.iter().enumerate() {
                if other_index == index {
                    continue;
                }
                if other == site {
                    if other_index < index {
                        cell.clear();
                    }
                    continue;
                }
                cell = clip_to_bisector(&cell, site, other);
                if cell.is_empty() {
                    break;
                }
            }
            close_ring(cell)
        })
        .collect()
}

/// Keep the part of `polygon` closer to `site` than to `other`
///
/// Sutherland-Hodgman against a single half-plane; `polygon` is an open ring.
fn clip_to_bisector(
    polygon: &[Coordinate],
    site: Coordinate,
    other: Coordinate,
) -> Vec<Coordinate> {
    let midpoint = (site + other) * 0.5;
    let direction = other - site;
    let side = |p: Coordinate| (p - midpoint).dot(direction);

    let mut result = Vec::with_capacity(polygon.len() + 1);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let current_side = side(current);
        let next_side = side(next);

        if current_side <= 0.0 {
            result.push(current);
        }
        if (current_side < 0.0 && next_side > 0.0) || (current_side > 0.0 && next_side < 0.0) {
            let t = current_side / (current_side - next_side);
            result.push(current + (next - current) * t);
        }
    }

    if result.len() < 3 {
        result.clear();
    }
    result
}

/// Intersect a cell with the clip region, keeping the largest piece
fn clip_cell(cell: &[Coordinate], region: &MultiPolygon<f64>) -> Option<(Ring, Vec<Ring>)> {
    if cell.len() < 4 {
        return None;
    }

    let polygon = GeoPolygon::new(to_line_string(cell), Vec::new());
    polygon
        .intersection(region)
        .into_iter()
        .map(|piece| (piece.unsigned_area(), piece))
        .filter(|(area, _)| *area > AREA_EPSILON)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, piece)| {
            let exterior = from_line_string(piece.exterior());
            let holes = piece.interiors().iter().map(from_line_string).collect();
            (exterior, holes)
        })
}

fn to_line_string(ring: &[Coordinate]) -> LineString<f64> {
    ring.iter().map(|c| Coord { x: c.x, y: c.y }).collect()
}

fn from_line_string(line: &LineString<f64>) -> Ring {
    line.coords().map(|c| Coordinate::new(c.x, c.y)).collect()
}

fn to_geo(geometry: &Geometry) -> MultiPolygon<f64> {
    geometry
        .polygons()
        .iter()
        .filter(|p| p.exterior.len() >= 4)
        .map(|p| {
            GeoPolygon::new(
                to_line_string(&p.exterior),
                p.holes.iter().map(|h| to_line_string(h)).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::unit_square;
    use crate::geometry::{point_in_ring, ring_area, Polygon};
    use glam::DVec2;

    fn square(min: f64, max: f64) -> Ring {
        vec![
            DVec2::new(min, min),
            DVec2::new(max, min),
            DVec2::new(max, max),
            DVec2::new(min, max),
            DVec2::new(min, min),
        ]
    }

    fn u_shape() -> Ring {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(3.0, 3.0),
            DVec2::new(2.0, 3.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 3.0),
            DVec2::new(0.0, 3.0),
            DVec2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_unit_square_four_labels() {
        let boundary = Boundary::polygon(unit_square());
        let labels = ["A", "B", "C", "D"];
        let zones = build_voronoi_zones(&boundary, &labels, 176);

        assert_eq!(zones.len(), 4);
        let total: f64 = zones.iter().map(|z| z.area()).sum();
        assert!((total - 1.0).abs() < 1e-9);

        for (zone, label) in zones.iter().zip(labels) {
            assert_eq!(zone.label, label);
            assert!(zone.is_simple());
            for v in &zone.exterior {
                assert!(v.x >= -1e-9 && v.x <= 1.0 + 1e-9);
                assert!(v.y >= -1e-9 && v.y <= 1.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_cells_tile_bounding_box() {
        let sites = vec![
            DVec2::new(1.0, 1.0),
            DVec2::new(3.0, 1.0),
            DVec2::new(2.0, 3.0),
            DVec2::new(0.5, 3.5),
        ];
        let bbox = BoundingBox {
            min_lng: 0.0,
            min_lat: 0.0,
            max_lng: 4.0,
            max_lat: 4.0,
        };
        let cells = voronoi_cells(&sites, &bbox);

        assert_eq!(cells.len(), sites.len());
        let total: f64 = cells.iter().map(|c| ring_area(c)).sum();
        assert!((total - 16.0).abs() < 1e-9);
        for (cell, site) in cells.iter().zip(&sites) {
            assert!(point_in_ring(*site, cell));
        }
    }

    #[test]
    fn test_two_site_bisector() {
        let sites = vec![DVec2::new(1.0, 1.0), DVec2::new(3.0, 1.0)];
        let bbox = BoundingBox {
            min_lng: 0.0,
            min_lat: 0.0,
            max_lng: 4.0,
            max_lat: 2.0,
        };
        let cells = voronoi_cells(&sites, &bbox);
        assert!((ring_area(&cells[0]) - 4.0).abs() < 1e-12);
        assert!(cells[0].iter().all(|v| v.x <= 2.0 + 1e-12));
        assert!(cells[1].iter().all(|v| v.x >= 2.0 - 1e-12));
    }

    #[test]
    fn test_coincident_sites() {
        let sites = vec![DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0)];
        let bbox = BoundingBox {
            min_lng: 0.0,
            min_lat: 0.0,
            max_lng: 2.0,
            max_lat: 2.0,
        };
        let cells = voronoi_cells(&sites, &bbox);
        assert_eq!(cells[0].len(), 5);
        assert!(cells[1].is_empty());
    }

    #[test]
    fn test_strict_cardinality() {
        let boundary = Boundary::polygon(u_shape());
        let labels = ["a", "b", "c", "d", "e"];
        for seed in 1..40 {
            let zones = build_voronoi_zones(&boundary, &labels, seed);
            assert!(zones.is_empty() || zones.len() == labels.len());
        }
    }

    #[test]
    fn test_clipped_to_concave_boundary() {
        let boundary = Boundary::polygon(u_shape());
        let zones = build_voronoi_zones(&boundary, &["left", "right"], 11);
        if zones.is_empty() {
            return;
        }
        for zone in &zones {
            // nothing inside the notch of the U
            assert!(!zone.contains(DVec2::new(1.5, 2.0)));
            assert!(zone.area() <= 7.0 + 1e-9);
        }
    }

    #[test]
    fn test_boundary_with_hole() {
        let boundary = Boundary::Single(Geometry::Polygon(Polygon::with_holes(
            square(0.0, 10.0),
            vec![square(4.0, 6.0)],
        )));
        let zones = build_voronoi_zones(&boundary, &["a", "b"], 3);

        assert_eq!(zones.len(), 2);
        let total: f64 = zones.iter().map(|z| z.area()).sum();
        assert!((total - 96.0).abs() < 1e-6);
        assert!(zones.iter().all(|z| !z.contains(DVec2::new(5.0, 5.0))));
    }

    #[test]
    fn test_missing_representative() {
        assert!(build_voronoi_zones(&Boundary::Collection(vec![]), &["a"], 1).is_empty());

        // first member is degenerate; later members are never consulted
        let boundary = Boundary::Collection(vec![
            Geometry::Polygon(Polygon::new(vec![DVec2::ONE; 4])),
            Geometry::Polygon(Polygon::new(unit_square())),
        ]);
        assert!(build_voronoi_zones(&boundary, &["a", "b"], 1).is_empty());
    }

    #[test]
    fn test_determinism() {
        let boundary = Boundary::polygon(u_shape());
        let a = build_voronoi_zones(&boundary, &["a", "b", "c"], 99);
        let b = build_voronoi_zones(&boundary, &["a", "b", "c"], 99);
        assert_eq!(a, b);
    }
}
