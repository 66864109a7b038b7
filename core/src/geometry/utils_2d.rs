//! 2D geometry utilities shared by polygons, the split kernel and the
//! shape builders.
//!
//! Everything here works on `[f64; 2]` points and plain slices so the
//! helpers stay usable from any ring representation.

use super::Point2;

// =============================================================================
// Point and Vector Operations
// =============================================================================

/// Check if two 2D points agree within `tol` on both coordinates.
#[inline]
pub fn points_equal(p1: Point2, p2: Point2, tol: f64) -> bool {
    (p1[0] - p2[0]).abs() <= tol && (p1[1] - p2[1]).abs() <= tol
}

#[inline]
pub fn sub(p1: Point2, p2: Point2) -> Point2 {
    [p1[0] - p2[0], p1[1] - p2[1]]
}

/// 2D cross product (z-component of 3D cross product).
/// Positive if v2 is counter-clockwise from v1.
#[inline]
pub fn cross_2d(v1: Point2, v2: Point2) -> f64 {
    v1[0] * v2[1] - v1[1] * v2[0]
}

#[inline]
pub fn dot_2d(v1: Point2, v2: Point2) -> f64 {
    v1[0] * v2[0] + v1[1] * v2[1]
}

#[inline]
pub fn norm_2d(v: Point2) -> f64 {
    dot_2d(v, v).sqrt()
}

#[inline]
pub fn distance(p1: Point2, p2: Point2) -> f64 {
    norm_2d(sub(p2, p1))
}

/// Linear interpolation between two 2D points.
#[inline]
pub fn lerp(p1: Point2, p2: Point2, t: f64) -> Point2 {
    [p1[0] + t * (p2[0] - p1[0]), p1[1] + t * (p2[1] - p1[1])]
}

// =============================================================================
// Segment Operations
// =============================================================================

/// Find parameter t where point projects onto the line through a segment.
/// Returns t such that point ≈ start + t * (end - start).
pub fn project_point_on_line(start: Point2, end: Point2, point: Point2) -> f64 {
    let d = sub(end, start);
    let len_sq = dot_2d(d, d);
    if len_sq == 0.0 {
        return 0.0;
    }
    dot_2d(sub(point, start), d) / len_sq
}

/// Perpendicular distance from point to the infinite line through a segment.
pub fn distance_point_to_line(line_start: Point2, line_end: Point2, point: Point2) -> f64 {
    let d = sub(line_end, line_start);
    let len = norm_2d(d);
    if len == 0.0 {
        return distance(line_start, point);
    }
    (cross_2d(d, sub(point, line_start)) / len).abs()
}

/// True when `point` lies within `tol` of the closed segment.
pub fn point_on_segment(start: Point2, end: Point2, point: Point2, tol: f64) -> bool {
    let t = project_point_on_line(start, end, point).clamp(0.0, 1.0);
    distance(lerp(start, end, t), point) <= tol
}

/// Contact points between two closed segments.
///
/// A transversal crossing yields one point. Collinear overlapping segments
/// yield every endpoint of either segment that lies on the other one. When a
/// contact sits within `tol` of an endpoint the endpoint itself is returned, so
/// T-junctions land exactly on existing vertices.
pub fn segment_contacts(a0: Point2, a1: Point2, b0: Point2, b1: Point2, tol: f64) -> Vec<Point2> {
    if a0[0].min(a1[0]) > b0[0].max(b1[0]) + tol
        || b0[0].min(b1[0]) > a0[0].max(a1[0]) + tol
        || a0[1].min(a1[1]) > b0[1].max(b1[1]) + tol
        || b0[1].min(b1[1]) > a0[1].max(a1[1]) + tol
    {
        return Vec::new();
    }

    let da = sub(a1, a0);
    let db = sub(b1, b0);
    let len_a = norm_2d(da);
    let len_b = norm_2d(db);
    if len_a == 0.0 || len_b == 0.0 {
        return Vec::new();
    }

    let denom = cross_2d(da, db);
    if denom.abs() > tol * len_a * len_b {
        let w = sub(b0, a0);
        let t = cross_2d(w, db) / denom;
        let u = cross_2d(w, da) / denom;
        let slack_a = tol / len_a;
        let slack_b = tol / len_b;
        if t < -slack_a || t > 1.0 + slack_a || u < -slack_b || u > 1.0 + slack_b {
            return Vec::new();
        }
        let point = if t <= slack_a {
            a0
        } else if t >= 1.0 - slack_a {
            a1
        } else if u <= slack_b {
            b0
        } else if u >= 1.0 - slack_b {
            b1
        } else {
            lerp(a0, a1, t)
        };
        return vec![point];
    }

    // Parallel: only collinear segments can share points.
    if distance_point_to_line(a0, a1, b0) > tol || distance_point_to_line(a0, a1, b1) > tol {
        return Vec::new();
    }
    let mut contacts = Vec::new();
    for p in [b0, b1] {
        if point_on_segment(a0, a1, p, tol) {
            contacts.push(p);
        }
    }
    for p in [a0, a1] {
        if point_on_segment(b0, b1, p, tol) && !contacts.iter().any(|q| points_equal(*q, p, tol)) {
            contacts.push(p);
        }
    }
    contacts
}

// =============================================================================
// Ring Operations
// =============================================================================

/// Compute signed area of a ring using the Shoelace formula.
/// Positive = CCW winding, Negative = CW winding.
pub fn polygon_signed_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i][0] * vertices[j][1];
        area -= vertices[j][0] * vertices[i][1];
    }
    area / 2.0
}

/// Compute absolute area of a ring.
pub fn polygon_area(vertices: &[Point2]) -> f64 {
    polygon_signed_area(vertices).abs()
}

/// Area centroid of a ring. Falls back to the vertex average for rings
/// without area.
pub fn polygon_centroid(vertices: &[Point2]) -> Point2 {
    let n = vertices.len();
    if n == 0 {
        return [0.0, 0.0];
    }

    let mut signed_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let cross = vertices[i][0] * vertices[j][1] - vertices[j][0] * vertices[i][1];
        signed_area += cross;
        cx += (vertices[i][0] + vertices[j][0]) * cross;
        cy += (vertices[i][1] + vertices[j][1]) * cross;
    }

    signed_area /= 2.0;

    if signed_area != 0.0 {
        [cx / (6.0 * signed_area), cy / (6.0 * signed_area)]
    } else {
        let count = n as f64;
        [
            vertices.iter().map(|p| p[0]).sum::<f64>() / count,
            vertices.iter().map(|p| p[1]).sum::<f64>() / count,
        ]
    }
}

/// Test if a point is inside a ring using the winding number algorithm.
/// Works for both convex and concave rings.
pub fn point_in_polygon(point: Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut winding: i32 = 0;

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        let side = cross_2d(sub(p2, p1), sub(point, p1));

        if p1[1] <= point[1] {
            if p2[1] > point[1] && side > 0.0 {
                winding += 1;
            }
        } else if p2[1] <= point[1] && side < 0.0 {
            winding -= 1;
        }
    }

    winding != 0
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_points_equal() {
        assert!(points_equal([1.0, 2.0], [1.0, 2.0], TOL));
        assert!(points_equal([1.0, 2.0], [1.0 + 1e-12, 2.0 - 1e-12], TOL));
        assert!(!points_equal([1.0, 2.0], [1.1, 2.0], TOL));
    }

    #[test]
    fn test_segment_crossing() {
        let pts = segment_contacts([0.0, 0.0], [1.0, 1.0], [0.0, 1.0], [1.0, 0.0], TOL);
        assert_eq!(pts.len(), 1);
        assert!(points_equal(pts[0], [0.5, 0.5], 1e-12));
    }

    #[test]
    fn test_segment_parallel_apart() {
        let pts = segment_contacts([0.0, 0.0], [1.0, 0.0], [0.0, 0.5], [1.0, 0.5], TOL);
        assert!(pts.is_empty());
    }

    #[test]
    fn test_segment_outside_range() {
        // Lines would cross if extended.
        let pts = segment_contacts([0.0, 0.0], [0.5, 0.0], [1.0, 0.5], [1.0, -0.5], TOL);
        assert!(pts.is_empty());
    }

    #[test]
    fn test_segment_collinear_overlap() {
        let pts = segment_contacts([0.0, 0.0], [1.0, 0.0], [0.5, 0.0], [1.5, 0.0], TOL);
        assert_eq!(pts.len(), 2);
        assert!(pts.iter().any(|p| points_equal(*p, [0.5, 0.0], TOL)));
        assert!(pts.iter().any(|p| points_equal(*p, [1.0, 0.0], TOL)));
    }

    #[test]
    fn test_segment_t_junction_snaps_to_endpoint() {
        let end = [0.3, 0.0];
        let pts = segment_contacts([0.0, 0.0], [1.0, 0.0], [0.3, 1.0], end, TOL);
        assert_eq!(pts, vec![end]);
    }

    #[test]
    fn test_polygon_area() {
        let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!((polygon_area(&square) - 1.0).abs() < TOL);
        assert!(polygon_signed_area(&square) > 0.0);

        let tri = [[0.0, 0.0], [4.0, 0.0], [2.0, 3.0]];
        assert!((polygon_area(&tri) - 6.0).abs() < TOL);
    }

    #[test]
    fn test_polygon_centroid() {
        let square = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
        let c = polygon_centroid(&square);
        assert!(points_equal(c, [1.0, 1.0], 1e-12));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];

        assert!(point_in_polygon([5.0, 5.0], &square));
        assert!(point_in_polygon([1.0, 1.0], &square));
        assert!(!point_in_polygon([15.0, 5.0], &square));
        assert!(!point_in_polygon([-1.0, 5.0], &square));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape opening upwards.
        let u = [
            [0.0, 0.0],
            [3.0, 0.0],
            [3.0, 3.0],
            [2.0, 3.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 3.0],
            [0.0, 3.0],
        ];
        assert!(point_in_polygon([0.5, 2.0], &u));
        assert!(!point_in_polygon([1.5, 2.0], &u));
    }
}
