//! Boundary geometry primitives
//!
//! Planar geometry over raw longitude/latitude pairs: bounding boxes and
//! point-in-boundary tests for Polygon / MultiPolygon shapes with holes.
//!
//! Every function here is total. Malformed input (empty rings, NaN
//! coordinates, degenerate shapes) yields `false` or `None` instead of an error.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `(longitude, latitude)` pair in degrees; `x` is longitude, `y` latitude
pub type Coordinate = DVec2;

/// An ordered, closed loop of coordinates (first == last)
pub type Ring = Vec<Coordinate>;

/// Smallest latitude span used as a denominator in the ray-casting test.
///
/// Horizontal edges never straddle the ray, so this only guards against
/// division by zero on near-degenerate input.
pub const EDGE_EPSILON: f64 = 1e-12;

/// Areas below this are treated as zero
pub(crate) const AREA_EPSILON: f64 = 1e-18;

/// One exterior ring plus zero or more holes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    /// Outer loop
    pub exterior: Ring,
    /// Excluded regions inside the exterior
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Create a polygon without holes
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Create a polygon with holes
    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// A single polygonal geometry
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// All polygons making up this geometry
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Geometry::Polygon(polygon) => std::slice::from_ref(polygon),
            Geometry::MultiPolygon(polygons) => polygons,
        }
    }
}

/// The area to partition: one geometry or a collection of them
///
/// A point is inside a collection when it is inside any member.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Single(Geometry),
    Collection(Vec<Geometry>),
}

impl Boundary {
    /// Shorthand for a single polygon boundary without holes
    pub fn polygon(exterior: Ring) -> Self {
        Boundary::Single(Geometry::Polygon(Polygon::new(exterior)))
    }

    /// All member geometries
    pub fn geometries(&self) -> &[Geometry] {
        match self {
            Boundary::Single(geometry) => std::slice::from_ref(geometry),
            Boundary::Collection(geometries) => geometries,
        }
    }

    /// The geometry that stands for the whole boundary where only one shape
    /// can be used: the single geometry, or the first member of a collection
    pub fn representative(&self) -> Option<&Geometry> {
        self.geometries().first()
    }
}

/// Axis-aligned bounds in longitude/latitude
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    #[inline]
    pub fn center(&self) -> Coordinate {
        DVec2::new(
            (self.min_lng + self.max_lng) * 0.5,
            (self.min_lat + self.max_lat) * 0.5,
        )
    }

    /// Closed counter-clockwise ring tracing the box
    pub fn to_ring(&self) -> Ring {
        vec![
            DVec2::new(self.min_lng, self.min_lat),
            DVec2::new(self.max_lng, self.min_lat),
            DVec2::new(self.max_lng, self.max_lat),
            DVec2::new(self.min_lng, self.max_lat),
            DVec2::new(self.min_lng, self.min_lat),
        ]
    }

    pub(crate) fn from_coordinates<'a>(
        coordinates: impl Iterator<Item = &'a Coordinate>,
    ) -> Option<Self> {
        let mut bounds: Option<BoundingBox> = None;

        for c in coordinates.filter(|c| c.is_finite()) {
            let b = bounds.get_or_insert(BoundingBox {
                min_lng: c.x,
                min_lat: c.y,
                max_lng: c.x,
                max_lat: c.y,
            });
            b.min_lng = b.min_lng.min(c.x);
            b.min_lat = b.min_lat.min(c.y);
            b.max_lng = b.max_lng.max(c.x);
            b.max_lat = b.max_lat.max(c.y);
        }

        bounds
    }
}

/// Bounding box over every finite coordinate of the boundary
///
/// Returns `None` for an empty boundary or one without finite coordinates.
pub fn bounding_box(boundary: &Boundary) -> Option<BoundingBox> {
    bounding_box_of(boundary.geometries())
}

/// Bounding box of a single geometry
pub fn geometry_bounding_box(geometry: &Geometry) -> Option<BoundingBox> {
    bounding_box_of(std::slice::from_ref(geometry))
}

pub(crate) fn bounding_box_of(geometries: &[Geometry]) -> Option<BoundingBox> {
    BoundingBox::from_coordinates(
        geometries
            .iter()
            .flat_map(|g| g.polygons())
            .flat_map(|p| p.rings())
            .flatten(),
    )
}

/// Even-odd ray casting test against a single ring
///
/// A horizontal ray is cast towards +inf longitude. An edge is crossed when
/// exactly one of its endpoints lies strictly above the point (half-open rule,
/// so shared vertices are counted once) and the crossing lies strictly to the
/// right of the point.
///
/// Edge convention: points on left/bottom edges are inside, points on
/// right/top edges are outside.
pub fn point_in_ring(point: Coordinate, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 || !point.is_finite() {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];

        if (a.y > point.y) != (b.y > point.y) {
            let mut span = b.y - a.y;
            if span.abs() < EDGE_EPSILON {
                span = EDGE_EPSILON;
            }
            let crossing = (b.x - a.x) * (point.y - a.y) / span + a.x;
            if point.x < crossing {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Inside the exterior ring and outside every hole
pub fn point_in_polygon(point: Coordinate, polygon: &Polygon) -> bool {
    point_in_ring(point, &polygon.exterior)
        && !polygon.holes.iter().any(|hole| point_in_ring(point, hole))
}

/// Inside any polygon of the geometry
pub fn point_in_geometry(point: Coordinate, geometry: &Geometry) -> bool {
    geometry
        .polygons()
        .iter()
        .any(|polygon| point_in_polygon(point, polygon))
}

/// Inside any member geometry of the boundary
pub fn point_in_boundary(point: Coordinate, boundary: &Boundary) -> bool {
    point_in_any(point, boundary.geometries())
}

pub(crate) fn point_in_any(point: Coordinate, geometries: &[Geometry]) -> bool {
    geometries.iter().any(|g| point_in_geometry(point, g))
}

/// Signed shoelace area (positive for counter-clockwise rings)
fn signed_ring_area(ring: &[Coordinate]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        twice_area += a.perp_dot(b);
    }
    twice_area * 0.5
}

/// Unsigned area of a ring
pub fn ring_area(ring: &[Coordinate]) -> f64 {
    signed_ring_area(ring).abs()
}

/// Drop the closing duplicate of a closed ring
fn open_vertices(ring: &[Coordinate]) -> &[Coordinate] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// Area-weighted centroid of a ring
///
/// Falls back to the mean of the vertices for degenerate (zero-area) rings.
/// Returns `None` for an empty ring.
pub fn ring_centroid(ring: &[Coordinate]) -> Option<Coordinate> {
    let vertices = open_vertices(ring);
    if vertices.is_empty() {
        return None;
    }

    let area = signed_ring_area(vertices);
    if area.abs() < AREA_EPSILON {
        let sum: DVec2 = vertices.iter().copied().sum();
        return Some(sum / vertices.len() as f64);
    }

    let mut acc = DVec2::ZERO;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        acc += (a + b) * a.perp_dot(b);
    }
    Some(acc / (6.0 * area))
}

/// Append the first coordinate if the ring is not already closed
pub fn close_ring(mut ring: Ring) -> Ring {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }
    ring
}

fn orientation(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: Coordinate, b: Coordinate, p: Coordinate) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// True when no two non-adjacent edges of the ring touch or cross
///
/// Rings with fewer than three distinct vertices are not simple.
/// Quadratic in the vertex count; zone rings are small.
pub fn ring_is_simple(ring: &[Coordinate]) -> bool {
    let vertices = open_vertices(ring);
    let n = vertices.len();
    if n < 3 || vertices.iter().any(|v| !v.is_finite()) {
        return false;
    }

    for i in 0..n {
        let (a1, a2) = (vertices[i], vertices[(i + 1) % n]);
        for j in (i + 2)..n {
            // first and last edges share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b1, b2) = (vertices[j], vertices[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn unit_square() -> Ring {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, 0.0),
        ]
    }

    fn square(min: f64, max: f64) -> Ring {
        vec![
            DVec2::new(min, min),
            DVec2::new(max, min),
            DVec2::new(max, max),
            DVec2::new(min, max),
            DVec2::new(min, min),
        ]
    }

    #[test]
    fn test_point_in_unit_square() {
        let ring = unit_square();
        assert!(point_in_ring(DVec2::new(0.5, 0.5), &ring));
        assert!(!point_in_ring(DVec2::new(1.5, 0.5), &ring));
        assert!(!point_in_ring(DVec2::new(-0.5, 0.5), &ring));
        assert!(!point_in_ring(DVec2::new(0.5, 1.5), &ring));
    }

    #[test]
    fn test_edge_convention() {
        let ring = unit_square();
        // right and top edges are outside
        assert!(!point_in_ring(DVec2::new(1.0, 0.5), &ring));
        assert!(!point_in_ring(DVec2::new(0.5, 1.0), &ring));
        // left and bottom edges are inside
        assert!(point_in_ring(DVec2::new(0.0, 0.5), &ring));
        assert!(point_in_ring(DVec2::new(0.5, 0.0), &ring));
    }

    #[test]
    fn test_malformed_rings() {
        assert!(!point_in_ring(DVec2::new(0.5, 0.5), &[]));
        assert!(!point_in_ring(
            DVec2::new(0.5, 0.5),
            &[DVec2::ZERO, DVec2::ONE]
        ));
        assert!(!point_in_ring(DVec2::new(f64::NAN, 0.5), &unit_square()));

        let nan_ring = vec![DVec2::splat(f64::NAN); 4];
        assert!(!point_in_ring(DVec2::new(0.5, 0.5), &nan_ring));
    }

    #[test]
    fn test_point_in_polygon_with_hole() {
        let polygon = Polygon::with_holes(square(0.0, 10.0), vec![square(4.0, 6.0)]);
        assert!(point_in_polygon(DVec2::new(1.0, 1.0), &polygon));
        assert!(!point_in_polygon(DVec2::new(5.0, 5.0), &polygon));
        assert!(!point_in_polygon(DVec2::new(11.0, 5.0), &polygon));
    }

    #[test]
    fn test_point_in_boundary_variants() {
        let multi = Geometry::MultiPolygon(vec![
            Polygon::new(square(0.0, 1.0)),
            Polygon::new(square(5.0, 6.0)),
        ]);
        let single = Boundary::Single(multi.clone());
        assert!(point_in_boundary(DVec2::new(5.5, 5.5), &single));
        assert!(!point_in_boundary(DVec2::new(3.0, 3.0), &single));

        let collection = Boundary::Collection(vec![
            Geometry::Polygon(Polygon::new(square(10.0, 11.0))),
            multi,
        ]);
        assert!(point_in_boundary(DVec2::new(10.5, 10.5), &collection));
        assert!(point_in_boundary(DVec2::new(0.5, 0.5), &collection));
        assert!(!point_in_boundary(DVec2::new(8.0, 8.0), &collection));

        assert!(!point_in_boundary(DVec2::new(0.5, 0.5), &Boundary::Collection(vec![])));
    }

    #[test]
    fn test_bounding_box() {
        let boundary = Boundary::Collection(vec![
            Geometry::Polygon(Polygon::new(square(0.0, 1.0))),
            Geometry::Polygon(Polygon::new(vec![
                DVec2::new(-2.0, 3.0),
                DVec2::new(f64::NAN, 100.0),
                DVec2::new(0.0, 4.0),
                DVec2::new(-2.0, 3.0),
            ])),
        ]);
        let bbox = bounding_box(&boundary).unwrap();
        assert_eq!(bbox.min_lng, -2.0);
        assert_eq!(bbox.min_lat, 0.0);
        assert_eq!(bbox.max_lng, 1.0);
        assert_eq!(bbox.max_lat, 4.0);
        assert_eq!(bbox.width(), 3.0);
        assert_eq!(bbox.height(), 4.0);
        assert_eq!(bbox.center(), DVec2::new(-0.5, 2.0));
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&Boundary::Collection(vec![])).is_none());
        assert!(bounding_box(&Boundary::polygon(vec![])).is_none());
        assert!(bounding_box(&Boundary::polygon(vec![DVec2::splat(f64::INFINITY)])).is_none());
    }

    #[test]
    fn test_ring_area_and_centroid() {
        let ring = square(0.0, 2.0);
        assert!((ring_area(&ring) - 4.0).abs() < 1e-12);
        let c = ring_centroid(&ring).unwrap();
        assert!((c - DVec2::new(1.0, 1.0)).length() < 1e-12);

        let mut clockwise = ring.clone();
        clockwise.reverse();
        assert!((ring_area(&clockwise) - 4.0).abs() < 1e-12);
        let c = ring_centroid(&clockwise).unwrap();
        assert!((c - DVec2::new(1.0, 1.0)).length() < 1e-12);

        let degenerate = vec![DVec2::new(3.0, 3.0); 4];
        assert_eq!(ring_centroid(&degenerate), Some(DVec2::new(3.0, 3.0)));
        assert_eq!(ring_centroid(&[]), None);
    }

    #[test]
    fn test_ring_is_simple() {
        assert!(ring_is_simple(&unit_square()));

        let bowtie = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(0.0, 0.0),
        ];
        assert!(!ring_is_simple(&bowtie));

        assert!(!ring_is_simple(&[DVec2::ZERO, DVec2::ONE, DVec2::ZERO]));
        assert!(!ring_is_simple(&vec![DVec2::ONE; 5]));
    }

    #[test]
    fn test_close_ring() {
        let closed = close_ring(vec![DVec2::ZERO, DVec2::X, DVec2::ONE]);
        assert_eq!(closed.len(), 4);
        assert_eq!(closed[0], closed[3]);

        let already = close_ring(unit_square());
        assert_eq!(already.len(), 5);
        assert!(close_ring(vec![]).is_empty());
    }
}
