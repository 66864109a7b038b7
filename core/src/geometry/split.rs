//! The boundary split primitive.
//!
//! This module provides a trait-based abstraction over the operation that
//! cuts one region along another shape's outline, so the partition code does
//! not depend on how the cut is computed.

use super::planar_graph::PlanarGraph;
use super::polygon::Polygon;
use super::utils_2d::segment_contacts;
use super::{GeometryResult, Point2, EPSILON};
use tracing::{debug, trace};

/// Geometry operations needed by the partition engine.
pub trait SplitKernel {
    /// Split `region` along every ring of `splitter`.
    ///
    /// Returns the maximal pieces of `region` bounded by the splitter's
    /// outline. A splitter that does not cross the region's interior leaves
    /// it whole and the result is `[region]`, unchanged.
    ///
    /// Outlines that touch without crossing, such as a circle internally
    /// tangent to the region's edge, are not resolved. The piece pinched at
    /// the contact is returned as is, and validating it, or splitting it
    /// again, fails with
    /// [`GeometryError::SelfIntersecting`](super::GeometryError::SelfIntersecting).
    fn split(&self, region: &Polygon, splitter: &Polygon) -> GeometryResult<Vec<Polygon>>;

    /// Check that a polygon is fit for [`Self::same_shape`].
    fn validate(&self, _polygon: &Polygon) -> GeometryResult<()> {
        Ok(())
    }

    /// Whether two polygons describe the same shape. Both are assumed to
    /// have passed [`Self::validate`].
    fn same_shape(&self, a: &Polygon, b: &Polygon) -> GeometryResult<bool>;
}

/// Split kernel based on planar-graph face extraction.
///
/// Handles general position robustly. Exactly coincident edges and
/// T-junctions are snapped within the tolerance; tangencies finer than the
/// tolerance are not resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarSplitKernel {
    tolerance: f64,
}

impl PlanarSplitKernel {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Split points of every segment of both polygons, keyed by ring and
    /// segment index.
    fn contacts(
        &self,
        region: &[&[Point2]],
        splitter: &[&[Point2]],
    ) -> (Vec<Vec<Vec<Point2>>>, Vec<Vec<Vec<Point2>>>) {
        let mut region_cuts: Vec<Vec<Vec<Point2>>> =
            region.iter().map(|ring| vec![Vec::new(); ring.len()]).collect();
        let mut splitter_cuts: Vec<Vec<Vec<Point2>>> =
            splitter.iter().map(|ring| vec![Vec::new(); ring.len()]).collect();

        for (ri, ring_a) in region.iter().enumerate() {
            for i in 0..ring_a.len() {
                let (a0, a1) = (ring_a[i], ring_a[(i + 1) % ring_a.len()]);
                for (si, ring_b) in splitter.iter().enumerate() {
                    for j in 0..ring_b.len() {
                        let (b0, b1) = (ring_b[j], ring_b[(j + 1) % ring_b.len()]);
                        for p in segment_contacts(a0, a1, b0, b1, self.tolerance) {
                            region_cuts[ri][i].push(p);
                            splitter_cuts[si][j].push(p);
                        }
                    }
                }
            }
        }
        (region_cuts, splitter_cuts)
    }
}

impl Default for PlanarSplitKernel {
    fn default() -> Self {
        Self::new(EPSILON)
    }
}

impl SplitKernel for PlanarSplitKernel {
    fn split(&self, region: &Polygon, splitter: &Polygon) -> GeometryResult<Vec<Polygon>> {
        region.validate(self.tolerance)?;
        splitter.validate(self.tolerance)?;

        if !region.bounds().intersects(&splitter.bounds(), self.tolerance) {
            trace!("split: bounds disjoint");
            return Ok(vec![region.clone()]);
        }

        let region_rings: Vec<&[Point2]> = region.rings().collect();
        let splitter_rings: Vec<&[Point2]> = splitter.rings().collect();
        let (region_cuts, splitter_cuts) = self.contacts(&region_rings, &splitter_rings);

        let touching = region_cuts.iter().flatten().any(|cuts| !cuts.is_empty());
        let enclosed = splitter_rings
            .iter()
            .any(|ring| region.contains_point(ring[0]));
        if !touching && !enclosed {
            trace!("split: splitter outline misses the region");
            return Ok(vec![region.clone()]);
        }

        let mut graph = PlanarGraph::new(self.tolerance);
        for (rings, cuts) in [(&region_rings, &region_cuts), (&splitter_rings, &splitter_cuts)] {
            for (ring, ring_cuts) in rings.iter().zip(cuts.iter()) {
                for i in 0..ring.len() {
                    graph.insert_segment(ring[i], ring[(i + 1) % ring.len()], &ring_cuts[i]);
                }
            }
        }

        let mut pieces = Vec::new();
        for face in graph.into_faces() {
            if region.contains_point(face.interior_point()?) {
                pieces.push(face);
            }
        }

        if pieces.len() <= 1 {
            trace!("split: region left whole");
            return Ok(vec![region.clone()]);
        }

        debug!(pieces = pieces.len(), "split region");
        Ok(pieces)
    }

    fn validate(&self, polygon: &Polygon) -> GeometryResult<()> {
        polygon.validate(self.tolerance)
    }

    fn same_shape(&self, a: &Polygon, b: &Polygon) -> GeometryResult<bool> {
        Ok(a.same_shape(b, self.tolerance))
    }
}
