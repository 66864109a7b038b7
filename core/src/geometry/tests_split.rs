use super::*;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::new(vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]])
}

fn sorted_areas(pieces: &[Polygon]) -> Vec<f64> {
    let mut areas: Vec<f64> = pieces.iter().map(Polygon::area).collect();
    areas.sort_by(f64::total_cmp);
    areas
}

fn assert_areas(pieces: &[Polygon], expected: &[f64]) {
    let areas = sorted_areas(pieces);
    assert_eq!(areas.len(), expected.len(), "areas: {:?}", areas);
    for (got, want) in areas.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "areas {:?} != {:?}", areas, expected);
    }
}

#[test]
fn test_split_by_overlapping_rectangle() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.0, 0.0, 1.0, 1.0);
    let splitter = rect(0.5, 0.25, 1.5, 0.75);

    let pieces = kernel.split(&region, &splitter).unwrap();
    assert_areas(&pieces, &[0.25, 0.75]);
    for piece in &pieces {
        assert!(piece.holes().is_empty());
    }
}

#[test]
fn test_split_bar_across_bar_gives_three_pieces() {
    let kernel = PlanarSplitKernel::default();
    let wide = rect(0.0, 0.4, 1.0, 0.6);
    let tall = rect(0.4, 0.0, 0.6, 1.0);

    let pieces = kernel.split(&wide, &tall).unwrap();
    assert_areas(&pieces, &[0.04, 0.08, 0.08]);
}

#[test]
fn test_disjoint_splitter_returns_region_unchanged() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.0, 0.0, 0.4, 0.4);
    let splitter = rect(0.6, 0.6, 1.0, 1.0);

    let pieces = kernel.split(&region, &splitter).unwrap();
    assert_eq!(pieces, vec![region]);
}

#[test]
fn test_splitter_inside_region_punches_hole() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.0, 0.0, 1.0, 1.0);
    let splitter = rect(0.25, 0.25, 0.75, 0.75);

    let pieces = kernel.split(&region, &splitter).unwrap();
    assert_areas(&pieces, &[0.25, 0.75]);

    let holed: Vec<&Polygon> = pieces.iter().filter(|p| !p.holes().is_empty()).collect();
    assert_eq!(holed.len(), 1);
    assert_eq!(holed[0].holes().len(), 1);
    assert!(holed[0].bounds().approx_eq(&region.bounds(), 1e-12));
}

#[test]
fn test_region_inside_splitter_is_unchanged() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.25, 0.25, 0.75, 0.75);
    let splitter = rect(0.0, 0.0, 1.0, 1.0);

    let pieces = kernel.split(&region, &splitter).unwrap();
    assert_eq!(pieces, vec![region]);
}

#[test]
fn test_shared_edge_does_not_split() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.0, 0.0, 1.0, 1.0);
    let neighbour = rect(1.0, 0.0, 2.0, 1.0);

    let pieces = kernel.split(&region, &neighbour).unwrap();
    assert_eq!(pieces, vec![region]);
}

#[test]
fn test_identical_splitter_does_not_split() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.1, 0.1, 0.9, 0.9);

    let pieces = kernel.split(&region, &region.clone()).unwrap();
    assert_eq!(pieces, vec![region]);
}

#[test]
fn test_split_region_with_hole() {
    let kernel = PlanarSplitKernel::default();
    let region = Polygon::with_holes(
        vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        vec![vec![[0.4, 0.4], [0.6, 0.4], [0.6, 0.6], [0.4, 0.6]]],
    );
    let right_half = rect(0.5, -0.5, 1.5, 1.5);

    let pieces = kernel.split(&region, &right_half).unwrap();
    assert_areas(&pieces, &[0.48, 0.48]);
    for piece in &pieces {
        assert!(piece.holes().is_empty());
    }
}

#[test]
fn test_pieces_cover_region() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.0, 0.0, 1.0, 1.0);
    let diamond = Polygon::new(vec![[0.5, -0.2], [1.2, 0.5], [0.5, 1.2], [-0.2, 0.5]]);

    let pieces = kernel.split(&region, &diamond).unwrap();
    assert_eq!(pieces.len(), 5);
    let total: f64 = pieces.iter().map(Polygon::area).sum();
    assert!((total - region.area()).abs() < 1e-9);
}

#[test]
fn test_self_intersecting_input_is_rejected() {
    let kernel = PlanarSplitKernel::default();
    let bowtie = Polygon::new(vec![[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 1.0]]);
    let square = rect(0.0, 0.0, 1.0, 1.0);

    assert!(matches!(
        kernel.split(&bowtie, &square),
        Err(GeometryError::SelfIntersecting { .. })
    ));
    assert!(matches!(
        kernel.split(&square, &bowtie),
        Err(GeometryError::SelfIntersecting { .. })
    ));
}

#[test]
fn test_kernel_same_shape() {
    let kernel = PlanarSplitKernel::new(1e-6);
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = Polygon::new(vec![[1.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0]]);
    let c = rect(0.0, 0.0, 1.0, 0.5);

    assert!(kernel.same_shape(&a, &b).unwrap());
    assert!(!kernel.same_shape(&a, &c).unwrap());
}

#[test]
fn test_internal_tangency_leaves_pinched_piece() {
    let kernel = PlanarSplitKernel::default();
    let region = rect(0.1, 0.1, 0.9, 0.9);
    // Touches the bottom edge at (0.5, 0.1) from inside.
    let diamond = Polygon::new(vec![[0.5, 0.1], [0.7, 0.3], [0.5, 0.5], [0.3, 0.3]]);

    let pieces = kernel.split(&region, &diamond).unwrap();
    assert_eq!(pieces.len(), 2);
    assert!(pieces.iter().any(|p| p.same_shape(&diamond, EPSILON)));

    let pinched = pieces.iter().find(|p| !p.same_shape(&diamond, EPSILON)).unwrap();
    match kernel.validate(pinched) {
        Err(GeometryError::SelfIntersecting { at }) => {
            assert!((at[0] - 0.5).abs() < 1e-9 && (at[1] - 0.1).abs() < 1e-9, "at {:?}", at);
        }
        other => panic!("expected a pinch at (0.5, 0.1), got {:?}", other),
    }
}
