use crate::geometry::{GeometryResult, Polygon, SplitKernel};

/// Split every piece by the first splitter, flatten in order, and continue
/// with the remaining splitters. No splitters leaves `pieces` as they are.
pub fn cascade_split<K: SplitKernel + ?Sized>(
    kernel: &K,
    pieces: Vec<Polygon>,
    splitters: &[&Polygon],
) -> GeometryResult<Vec<Polygon>> {
    splitters.iter().try_fold(pieces, |pieces, splitter| {
        let mut next = Vec::with_capacity(pieces.len() * 2);
        for piece in &pieces {
            next.extend(kernel.split(piece, splitter)?);
        }
        Ok(next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryError, PlanarSplitKernel};
    use std::cell::RefCell;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]])
    }

    /// Records each split call and returns the region twice.
    struct RecordingKernel {
        calls: RefCell<Vec<(f64, f64)>>,
    }

    impl SplitKernel for RecordingKernel {
        fn split(&self, region: &Polygon, splitter: &Polygon) -> GeometryResult<Vec<Polygon>> {
            self.calls.borrow_mut().push((region.area(), splitter.area()));
            Ok(vec![region.clone(), region.clone()])
        }

        fn same_shape(&self, a: &Polygon, b: &Polygon) -> GeometryResult<bool> {
            Ok(a == b)
        }
    }

    #[test]
    fn test_no_splitters_returns_input() {
        let kernel = PlanarSplitKernel::default();
        let pieces = vec![rect(0.0, 0.0, 1.0, 1.0), rect(2.0, 0.0, 3.0, 1.0)];
        let out = cascade_split(&kernel, pieces.clone(), &[]).unwrap();
        assert_eq!(out, pieces);
    }

    #[test]
    fn test_splitters_consumed_in_order() {
        let kernel = RecordingKernel {
            calls: RefCell::new(Vec::new()),
        };
        let start = rect(0.0, 0.0, 1.0, 1.0);
        let first = rect(0.0, 0.0, 0.5, 0.5);
        let second = rect(0.0, 0.0, 0.1, 0.1);

        let out = cascade_split(&kernel, vec![start], &[&first, &second]).unwrap();
        assert_eq!(out.len(), 4);

        let splitter_areas: Vec<f64> = kernel.calls.borrow().iter().map(|c| c.1).collect();
        assert_eq!(splitter_areas.len(), 3);
        assert!((splitter_areas[0] - 0.25).abs() < 1e-12);
        assert!((splitter_areas[1] - 0.01).abs() < 1e-12);
        assert!((splitter_areas[2] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_cascade_refines_strip() {
        let kernel = PlanarSplitKernel::default();
        let strip = rect(0.0, 0.4, 1.0, 0.6);
        let left = rect(0.2, 0.0, 0.4, 1.0);
        let right = rect(0.6, 0.0, 0.8, 1.0);

        let out = cascade_split(&kernel, vec![strip], &[&left, &right]).unwrap();
        assert_eq!(out.len(), 5);
        let total: f64 = out.iter().map(Polygon::area).sum();
        assert!((total - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_errors_stop_the_cascade() {
        let kernel = PlanarSplitKernel::default();
        let bowtie = Polygon::new(vec![[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 1.0]]);
        let result = cascade_split(&kernel, vec![rect(0.0, 0.0, 1.0, 1.0)], &[&bowtie]);
        assert!(matches!(result, Err(GeometryError::SelfIntersecting { .. })));
    }
}
