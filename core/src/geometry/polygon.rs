//! Polygons with holes: the geometry of event regions and partition cells.

use super::utils_2d::{
    cross_2d, dot_2d, norm_2d, point_in_polygon, points_equal, polygon_area, polygon_centroid,
    polygon_signed_area, segment_contacts, sub,
};
use super::{GeometryError, GeometryResult, Point2};
use serde::Serialize;

/// Axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY, f64::INFINITY],
            max: [f64::NEG_INFINITY, f64::NEG_INFINITY],
        }
    }

    pub fn from_points(points: &[Point2]) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.extend(*p);
        }
        bounds
    }

    pub fn extend(&mut self, p: Point2) {
        self.min[0] = self.min[0].min(p[0]);
        self.min[1] = self.min[1].min(p[1]);
        self.max[0] = self.max[0].max(p[0]);
        self.max[1] = self.max[1].max(p[1]);
    }

    pub fn center(&self) -> Point2 {
        [(self.min[0] + self.max[0]) / 2.0, (self.min[1] + self.max[1]) / 2.0]
    }

    /// Overlap test, closed and widened by `tol`.
    pub fn intersects(&self, other: &Aabb2, tol: f64) -> bool {
        self.min[0] <= other.max[0] + tol
            && other.min[0] <= self.max[0] + tol
            && self.min[1] <= other.max[1] + tol
            && other.min[1] <= self.max[1] + tol
    }

    /// True when `other` lies inside this box, allowing `tol` of overhang.
    pub fn contains_box(&self, other: &Aabb2, tol: f64) -> bool {
        other.min[0] >= self.min[0] - tol
            && other.min[1] >= self.min[1] - tol
            && other.max[0] <= self.max[0] + tol
            && other.max[1] <= self.max[1] + tol
    }

    pub fn approx_eq(&self, other: &Aabb2, tol: f64) -> bool {
        points_equal(self.min, other.min, tol) && points_equal(self.max, other.max, tol)
    }
}

/// A planar polygon: one exterior ring and zero or more holes.
///
/// Rings are stored open (no repeated closing vertex). Construction
/// normalizes orientation: the exterior runs counter-clockwise and holes run
/// clockwise. Construction does not validate; call [`Polygon::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    exterior: Vec<Point2>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    holes: Vec<Vec<Point2>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Point2>) -> Self {
        Self::with_holes(exterior, Vec::new())
    }

    pub fn with_holes(exterior: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Self {
        let exterior = oriented(open_ring(exterior), true);
        let holes = holes
            .into_iter()
            .map(|hole| oriented(open_ring(hole), false))
            .collect();
        Self { exterior, holes }
    }

    pub fn exterior(&self) -> &[Point2] {
        &self.exterior
    }

    pub fn holes(&self) -> &[Vec<Point2>] {
        &self.holes
    }

    /// Exterior first, then holes in stored order.
    pub fn rings(&self) -> impl Iterator<Item = &[Point2]> {
        std::iter::once(self.exterior.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    pub fn vertex_count(&self) -> usize {
        self.rings().map(<[Point2]>::len).sum()
    }

    /// Enclosed area: exterior minus holes.
    pub fn area(&self) -> f64 {
        polygon_area(&self.exterior) - self.holes.iter().map(|h| polygon_area(h)).sum::<f64>()
    }

    /// Area centroid, holes subtracted.
    pub fn centroid(&self) -> Point2 {
        let outer_area = polygon_area(&self.exterior);
        let outer = polygon_centroid(&self.exterior);
        if self.holes.is_empty() {
            return outer;
        }

        let mut area = outer_area;
        let mut moment = [outer[0] * outer_area, outer[1] * outer_area];
        for hole in &self.holes {
            let hole_area = polygon_area(hole);
            let c = polygon_centroid(hole);
            area -= hole_area;
            moment[0] -= c[0] * hole_area;
            moment[1] -= c[1] * hole_area;
        }
        if area > 0.0 {
            [moment[0] / area, moment[1] / area]
        } else {
            outer
        }
    }

    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&self.exterior)
    }

    /// Strict containment: inside the exterior and outside every hole.
    /// Points on a boundary are classified arbitrarily.
    pub fn contains_point(&self, point: Point2) -> bool {
        point_in_polygon(point, &self.exterior)
            && !self.holes.iter().any(|hole| point_in_polygon(point, hole))
    }

    /// Apply a point transform to every vertex, re-normalizing orientation.
    pub fn map_points(&self, f: impl Fn(Point2) -> Point2) -> Polygon {
        Polygon::with_holes(
            self.exterior.iter().map(|p| f(*p)).collect(),
            self.holes
                .iter()
                .map(|hole| hole.iter().map(|p| f(*p)).collect())
                .collect(),
        )
    }

    /// Check that every ring is a proper simple ring and no two rings touch.
    pub fn validate(&self, tol: f64) -> GeometryResult<()> {
        for ring in self.rings() {
            if ring.len() < 3 {
                return Err(GeometryError::TooFewVertices { count: ring.len() });
            }
            if ring.iter().any(|p| !p[0].is_finite() || !p[1].is_finite()) {
                return Err(GeometryError::NonFinite);
            }
        }
        if polygon_area(&self.exterior) <= tol * tol {
            return Err(GeometryError::ZeroArea);
        }

        let segments: Vec<(usize, usize, Point2, Point2)> = self
            .rings()
            .enumerate()
            .flat_map(|(r, ring)| {
                (0..ring.len()).map(move |i| (r, i, ring[i], ring[(i + 1) % ring.len()]))
            })
            .collect();

        for (i, &(ring_a, idx_a, a0, a1)) in segments.iter().enumerate() {
            if points_equal(a0, a1, tol) {
                return Err(GeometryError::SelfIntersecting { at: a0 });
            }
            for &(ring_b, idx_b, b0, b1) in &segments[i + 1..] {
                if ring_a == ring_b {
                    let len = self.ring_len(ring_a);
                    if idx_b == idx_a + 1 {
                        // b0 == a1 is shared; the two must not fold back onto each other.
                        if folds_back(a0, a1, b1, tol) {
                            return Err(GeometryError::SelfIntersecting { at: a1 });
                        }
                        continue;
                    }
                    if idx_a == 0 && idx_b == len - 1 {
                        if folds_back(a1, a0, b0, tol) {
                            return Err(GeometryError::SelfIntersecting { at: a0 });
                        }
                        continue;
                    }
                }
                if let Some(&at) = segment_contacts(a0, a1, b0, b1, tol).first() {
                    return Err(GeometryError::SelfIntersecting { at });
                }
            }
        }
        Ok(())
    }

    fn ring_len(&self, ring: usize) -> usize {
        if ring == 0 {
            self.exterior.len()
        } else {
            self.holes[ring - 1].len()
        }
    }

    /// A point strictly inside the polygon (outside every hole).
    ///
    /// The polygon is triangulated and the centroid of the largest triangle
    /// is returned, which also works for concave shapes and shapes with holes.
    pub fn interior_point(&self) -> GeometryResult<Point2> {
        let mut data: Vec<f64> = Vec::with_capacity(2 * self.vertex_count());
        let mut hole_indices = Vec::with_capacity(self.holes.len());
        for p in &self.exterior {
            data.extend_from_slice(p);
        }
        for hole in &self.holes {
            hole_indices.push(data.len() / 2);
            for p in hole {
                data.extend_from_slice(p);
            }
        }

        let triangles = earcutr::earcut(&data[..], &hole_indices[..], 2)
            .map_err(|e| GeometryError::Triangulation(format!("{:?}", e)))?;

        let vertex = |i: usize| [data[2 * i], data[2 * i + 1]];
        triangles
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (vertex(t[0]), vertex(t[1]), vertex(t[2]));
                let area = cross_2d(sub(b, a), sub(c, a)).abs();
                (area, [(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0])
            })
            .max_by(|x, y| x.0.total_cmp(&y.0))
            .map(|(_, centroid)| centroid)
            .ok_or_else(|| GeometryError::Triangulation("no triangles produced".to_string()))
    }

    /// Tolerance-based shape equality.
    ///
    /// Rings are compared as cyclic vertex sequences after dropping repeated
    /// and collinear vertices, so the starting vertex and redundant points on
    /// straight edges do not matter. Holes are matched as an unordered set.
    pub fn same_shape(&self, other: &Polygon, tol: f64) -> bool {
        if self.holes.len() != other.holes.len() {
            return false;
        }
        if !self.bounds().approx_eq(&other.bounds(), tol) {
            return false;
        }
        if !rings_match(&canonical_ring(&self.exterior, tol), &canonical_ring(&other.exterior, tol), tol) {
            return false;
        }

        let theirs: Vec<Vec<Point2>> = other.holes.iter().map(|h| canonical_ring(h, tol)).collect();
        let mut matched = vec![false; theirs.len()];
        for hole in &self.holes {
            let mine = canonical_ring(hole, tol);
            let found = theirs
                .iter()
                .enumerate()
                .find(|(j, candidate)| !matched[*j] && rings_match(&mine, candidate, tol))
                .map(|(j, _)| j);
            match found {
                Some(j) => matched[j] = true,
                None => return false,
            }
        }
        true
    }
}

/// Drop repeated closing vertices.
fn open_ring(mut ring: Vec<Point2>) -> Vec<Point2> {
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn oriented(mut ring: Vec<Point2>, ccw: bool) -> Vec<Point2> {
    let area = polygon_signed_area(&ring);
    if (ccw && area < 0.0) || (!ccw && area > 0.0) {
        ring.reverse();
    }
    ring
}

/// True when the path `prev -> corner -> next` doubles back on itself.
fn folds_back(prev: Point2, corner: Point2, next: Point2, tol: f64) -> bool {
    let a = sub(prev, corner);
    let b = sub(next, corner);
    cross_2d(a, b).abs() <= tol * norm_2d(a) * norm_2d(b) && dot_2d(a, b) > 0.0
}

/// Ring with repeated and straight-through vertices removed.
fn canonical_ring(ring: &[Point2], tol: f64) -> Vec<Point2> {
    let mut pts: Vec<Point2> = Vec::with_capacity(ring.len());
    for &p in ring {
        if pts.last().map_or(true, |&q| !points_equal(p, q, tol)) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && points_equal(pts[0], pts[pts.len() - 1], tol) {
        pts.pop();
    }

    let mut changed = true;
    while changed && pts.len() > 3 {
        changed = false;
        let n = pts.len();
        for i in 0..n {
            let a = sub(pts[(i + n - 1) % n], pts[i]);
            let b = sub(pts[(i + 1) % n], pts[i]);
            if cross_2d(a, b).abs() <= tol * norm_2d(a) * norm_2d(b) && dot_2d(a, b) < 0.0 {
                pts.remove(i);
                changed = true;
                break;
            }
        }
    }
    pts
}

/// Cyclic comparison of two canonical rings with the same orientation.
fn rings_match(a: &[Point2], b: &[Point2], tol: f64) -> bool {
    if a.len() != b.len() || a.is_empty() {
        return false;
    }
    let n = a.len();
    let Some(offset) = b.iter().position(|p| points_equal(*p, a[0], tol)) else {
        return false;
    };
    (0..n).all(|i| points_equal(a[i], b[(i + offset) % n], tol))
}
