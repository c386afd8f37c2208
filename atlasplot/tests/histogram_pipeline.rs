use atlasplot::dataset::{Dataset, Dimension};
use atlasplot::root::{Function1D, Graph, Hist1D, Hist2D};
use float_cmp::assert_approx_eq;
use rand::Rng;
use rand_pcg::Pcg64;

#[test]
fn filled_hist1d_to_dataset() {
    let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
    let mut hist = Hist1D::new("hist", 10, -0.5, 2.5);

    for _ in 0..1000 {
        // spread the fills over the axis and both flow regions
        hist.fill(4.0_f64.mul_add(rng.gen::<f64>(), -1.0));
    }

    let dataset = Dataset::from_object(&hist.clone().into(), false).unwrap();

    assert_eq!(dataset.dimensions(), vec![Dimension::X, Dimension::Y]);
    assert_eq!(dataset.number_of_points(), 10);

    // the visible bins and the flow counters account for every fill
    let visible: f64 = dataset.points(Dimension::Y).iter().sum();
    assert_approx_eq!(
        f64,
        visible + hist.underflow() + hist.overflow(),
        1000.0,
        ulps = 8
    );

    // bin-edge consistency in both dimensions
    for dimension in dataset.dimensions() {
        let points = dataset.points(dimension);
        let pairs = dataset.error_pairs(dimension);
        let lows = dataset.bin_low_edges(dimension);
        let highs = dataset.bin_high_edges(dimension);
        let widths = dataset.bin_widths(dimension);

        for index in 0..points.len() {
            assert_approx_eq!(f64, lows[index], points[index] - pairs[index].0, ulps = 8);
            assert_approx_eq!(f64, highs[index], points[index] + pairs[index].1, ulps = 8);
            assert_approx_eq!(f64, widths[index], pairs[index].0 + pairs[index].1, ulps = 8);
        }
    }

    // contiguous bins share their limits, so the deduplicated edges form a sorted axis
    let edges = dataset.bin_edges(Dimension::X);
    assert_eq!(edges.len(), 11);
    assert!(edges.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn hist2d_grid_round_trip() {
    let mut hist = Hist2D::new("hist", 3, -0.5, 2.5, 2, -0.5, 1.5);

    // give every cell a distinct content so any transposition is visible
    for ix in 0..3 {
        for iy in 0..2 {
            #[allow(clippy::cast_precision_loss)]
            hist.fill_weighted(ix as f64, iy as f64, (10 * iy + ix + 1) as f64);
        }
    }

    let dataset = Dataset::from_object(&hist.clone().into(), false).unwrap();

    assert_eq!(
        dataset.dimensions(),
        vec![Dimension::X, Dimension::Y, Dimension::Z]
    );
    assert_eq!(dataset.number_of_points(), 6);

    let (x_grid, y_grid) = dataset
        .unrolled_bin_centres([Dimension::X, Dimension::Y])
        .unwrap();
    let z_points = dataset.points(Dimension::Z);

    assert_eq!(x_grid.len(), z_points.len());
    assert_eq!(y_grid.len(), z_points.len());

    // cell (ix, iy) lands at flat index `iy * 3 + ix` and lines up with the unrolled centres
    for ix in 0..3 {
        for iy in 0..2 {
            let index = iy * 3 + ix;
            assert_eq!(z_points[index], hist.content(ix, iy));
            assert_eq!(x_grid[index], hist.x_binning().centres()[ix]);
            assert_eq!(y_grid[index], hist.y_binning().centres()[iy]);
        }
    }
}

#[test]
fn function_to_dataset() {
    let function = Function1D::new("function", 0.0, 10.0, f64::exp);
    let dataset = Dataset::from_object(&function.into(), false).unwrap();

    assert_eq!(dataset.number_of_points(), 1000);
    assert_eq!(dataset.points(Dimension::X).len(), 1000);
    assert_eq!(dataset.points(Dimension::X)[0], 0.0);
    assert_approx_eq!(
        f64,
        *dataset.points(Dimension::X).last().unwrap(),
        10.0,
        ulps = 2
    );
    assert!(dataset
        .error_pairs(Dimension::Y)
        .iter()
        .all(|&pair| pair == (0.0, 0.0)));
}

#[test]
fn sparse_graph_zero_removal() {
    let graph = Graph::new(
        "graph",
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0, 1.0, 0.0, 4.0],
    );
    let dataset = Dataset::from_object(&graph.into(), true).unwrap();

    assert_eq!(dataset.points(Dimension::X), [1.0, 3.0]);
    assert_eq!(dataset.points(Dimension::Y), [1.0, 4.0]);
    assert_eq!(dataset.number_of_points(), 2);
}
