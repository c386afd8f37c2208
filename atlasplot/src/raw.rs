//! Module containing the extraction of raw plottable arrays from ROOT-like objects.

use super::convert::f64_from_usize;
use super::error::{Error, Result};
use super::root::{Function1D, Graph, GraphAsymmErrors, GraphErrors, Hist1D, Hist2D, RootObject};
use itertools::izip;

/// Number of samples taken when a function is converted into points.
const FUNCTION_SAMPLES: usize = 1000;

/// Per-dimension arrays extracted from a ROOT-like object.
///
/// This is an unvalidated staging structure: it is consumed by
/// [`Dataset`](super::dataset::Dataset), which checks all shape and size invariants, and then
/// discarded.
#[derive(Clone, Debug, Default)]
pub struct RawData {
    /// Values along x, if the object has an x dimension.
    pub x_values: Option<Vec<f64>>,
    /// `(low, high)` error pairs along x.
    pub x_error_pairs: Option<Vec<(f64, f64)>>,
    /// Values along y, if the object has a y dimension.
    pub y_values: Option<Vec<f64>>,
    /// `(low, high)` error pairs along y.
    pub y_error_pairs: Option<Vec<(f64, f64)>>,
    /// Flattened grid values along z, if the object has a z dimension.
    pub z_values: Option<Vec<f64>>,
    /// `(low, high)` error pairs along z.
    pub z_error_pairs: Option<Vec<(f64, f64)>>,
    /// Number of extracted points; the z-grid length for two-dimensional histograms.
    pub n_points: usize,
}

impl RawData {
    /// Extract the plottable arrays from `object`. With `remove_zeros`, points whose y value is
    /// exactly zero are dropped from point-like extractions, matching the unfilled-bin semantics
    /// of sparse histograms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedObject`] when `object` is not convertible into plottable
    /// data.
    pub fn from_object(object: &RootObject, remove_zeros: bool) -> Result<Self> {
        let mut raw = match object {
            RootObject::Hist1D(hist) => Self::from_hist1d(hist),
            RootObject::Hist2D(hist) => Self::from_hist2d(hist),
            RootObject::Function(function) => Self::from_function(function),
            RootObject::Graph(graph) => Self::from_graph(graph),
            RootObject::GraphErrors(graph) => Self::from_graph_errors(graph),
            RootObject::GraphAsymmErrors(graph) => Self::from_graph_asymm_errors(graph),
            RootObject::Tree(_) => {
                return Err(Error::UnsupportedObject {
                    class_name: object.class_name(),
                })
            }
        };

        if remove_zeros {
            raw.remove_zeros();
        }

        Ok(raw)
    }

    fn from_hist1d(hist: &Hist1D) -> Self {
        let bins = hist.bins();

        Self {
            x_values: Some(hist.binning().centres()),
            x_error_pairs: Some(
                hist.binning()
                    .half_widths()
                    .into_iter()
                    .map(|width| (width, width))
                    .collect(),
            ),
            y_values: Some((0..bins).map(|bin| hist.content(bin)).collect()),
            y_error_pairs: Some((0..bins).map(|bin| hist.error_pair(bin)).collect()),
            n_points: bins,
            ..Self::default()
        }
    }

    fn from_hist2d(hist: &Hist2D) -> Self {
        let x_bins = hist.x_binning().bins();
        let y_bins = hist.y_binning().bins();
        let mut z_values = Vec::with_capacity(x_bins * y_bins);
        let mut z_error_pairs = Vec::with_capacity(x_bins * y_bins);

        // x varies fastest within each y row; the flat index of cell (ix, iy) is
        // `iy * x_bins + ix`, matching `Dataset::unrolled_bin_centres`
        for iy in 0..y_bins {
            for ix in 0..x_bins {
                z_values.push(hist.content(ix, iy));
                z_error_pairs.push(hist.error_pair(ix, iy));
            }
        }

        Self {
            x_values: Some(hist.x_binning().centres()),
            x_error_pairs: Some(
                hist.x_binning()
                    .half_widths()
                    .into_iter()
                    .map(|width| (width, width))
                    .collect(),
            ),
            y_values: Some(hist.y_binning().centres()),
            y_error_pairs: Some(
                hist.y_binning()
                    .half_widths()
                    .into_iter()
                    .map(|width| (width, width))
                    .collect(),
            ),
            z_values: Some(z_values),
            z_error_pairs: Some(z_error_pairs),
            n_points: x_bins * y_bins,
        }
    }

    fn from_function(function: &Function1D) -> Self {
        let (left, right) = function.range();
        let x_values: Vec<f64> = (0..FUNCTION_SAMPLES)
            .map(|sample| {
                (right - left).mul_add(
                    f64_from_usize(sample) / f64_from_usize(FUNCTION_SAMPLES - 1),
                    left,
                )
            })
            .collect();
        let y_values = x_values.iter().map(|&x| function.eval(x)).collect();

        Self {
            x_values: Some(x_values),
            x_error_pairs: Some(vec![(0.0, 0.0); FUNCTION_SAMPLES]),
            y_values: Some(y_values),
            y_error_pairs: Some(vec![(0.0, 0.0); FUNCTION_SAMPLES]),
            n_points: FUNCTION_SAMPLES,
            ..Self::default()
        }
    }

    fn from_graph(graph: &Graph) -> Self {
        Self {
            x_values: Some(graph.x().to_vec()),
            x_error_pairs: Some(vec![(0.0, 0.0); graph.points()]),
            y_values: Some(graph.y().to_vec()),
            y_error_pairs: Some(vec![(0.0, 0.0); graph.points()]),
            n_points: graph.points(),
            ..Self::default()
        }
    }

    fn from_graph_errors(graph: &GraphErrors) -> Self {
        Self {
            x_values: Some(graph.x().to_vec()),
            x_error_pairs: Some(graph.x_errors().iter().map(|&e| (e, e)).collect()),
            y_values: Some(graph.y().to_vec()),
            y_error_pairs: Some(graph.y_errors().iter().map(|&e| (e, e)).collect()),
            n_points: graph.points(),
            ..Self::default()
        }
    }

    fn from_graph_asymm_errors(graph: &GraphAsymmErrors) -> Self {
        // asymmetric-error graphs store the nominal point away from the centre of its error
        // bars; shift each value to the midpoint and mirror the averaged half-width, so that
        // downstream error bars stay centred on the plotted markers
        fn recentre(values: &[f64], low: &[f64], high: &[f64]) -> (Vec<f64>, Vec<(f64, f64)>) {
            izip!(values, low, high)
                .map(|(&value, &low, &high)| {
                    let half_width = 0.5 * (low + high);
                    (value + 0.5 * (high - low), (half_width, half_width))
                })
                .unzip()
        }

        let (x_values, x_error_pairs) =
            recentre(graph.x(), graph.x_errors_low(), graph.x_errors_high());
        let (y_values, y_error_pairs) =
            recentre(graph.y(), graph.y_errors_low(), graph.y_errors_high());

        Self {
            x_values: Some(x_values),
            x_error_pairs: Some(x_error_pairs),
            y_values: Some(y_values),
            y_error_pairs: Some(y_error_pairs),
            n_points: graph.points(),
            ..Self::default()
        }
    }

    /// Drop every point whose y value is exactly zero. Only point-like extractions are
    /// filtered; a z grid must stay aligned with its axes.
    #[allow(clippy::float_cmp)] // exact equality is the unfilled-bin criterion
    fn remove_zeros(&mut self) {
        fn filter<T: Copy>(values: &mut Option<Vec<T>>, keep: &[bool]) {
            if let Some(values) = values {
                *values = values
                    .iter()
                    .zip(keep)
                    .filter_map(|(&value, &keep)| keep.then_some(value))
                    .collect();
            }
        }

        if self.z_values.is_some() {
            return;
        }

        let Some(y_values) = &self.y_values else {
            return;
        };
        let keep: Vec<bool> = y_values.iter().map(|&y| y != 0.0).collect();

        filter(&mut self.x_values, &keep);
        filter(&mut self.x_error_pairs, &keep);
        filter(&mut self.y_values, &keep);
        filter(&mut self.y_error_pairs, &keep);
        self.n_points = self.y_values.as_ref().map_or(0, Vec::len);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn hist1d_extraction() {
        let mut hist = Hist1D::new("hist", 3, -0.5, 2.5);

        for value in 0..3 {
            hist.fill(f64::from(value));
        }

        let raw = RawData::from_object(&hist.into(), false).unwrap();

        assert_eq!(raw.x_values, Some(vec![0.0, 1.0, 2.0]));
        assert_eq!(raw.x_error_pairs, Some(vec![(0.5, 0.5); 3]));
        assert_eq!(raw.y_values, Some(vec![1.0, 1.0, 1.0]));
        assert_eq!(raw.y_error_pairs, Some(vec![(1.0, 1.0); 3]));
        assert_eq!(raw.z_values, None);
        assert_eq!(raw.n_points, 3);
    }

    #[test]
    fn hist2d_extraction_order() {
        let mut hist = Hist2D::new("hist", 3, -0.5, 2.5, 2, -0.5, 1.5);

        // weight encodes the cell, so any transposition shows up in the flat order
        for ix in 0..3 {
            for iy in 0..2 {
                hist.fill_weighted(f64_from_usize(ix), f64_from_usize(iy), f64_from_usize(10 * iy + ix));
            }
        }

        let raw = RawData::from_object(&hist.into(), false).unwrap();

        assert_eq!(raw.x_values, Some(vec![0.0, 1.0, 2.0]));
        assert_eq!(raw.y_values, Some(vec![0.0, 1.0]));
        assert_eq!(
            raw.z_values,
            Some(vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0])
        );
        assert_eq!(raw.n_points, 6);
    }

    #[test]
    fn function_sampling() {
        let function = Function1D::new("function", 0.0, 10.0, |x| 2.0 * x);
        let raw = RawData::from_object(&function.into(), false).unwrap();
        let x_values = raw.x_values.unwrap();
        let y_values = raw.y_values.unwrap();

        assert_eq!(x_values.len(), 1000);
        assert_eq!(raw.n_points, 1000);
        assert_eq!(x_values[0], 0.0);
        assert_approx_eq!(f64, *x_values.last().unwrap(), 10.0, ulps = 2);
        assert_approx_eq!(f64, y_values[500], 2.0 * x_values[500], ulps = 2);
        assert_eq!(raw.x_error_pairs.unwrap(), vec![(0.0, 0.0); 1000]);
    }

    #[test]
    fn graph_zero_removal() {
        let graph = Graph::new("graph", vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]);
        let raw = RawData::from_object(&graph.into(), true).unwrap();

        assert_eq!(raw.x_values, Some(vec![1.0, 2.0]));
        assert_eq!(raw.y_values, Some(vec![1.0, 4.0]));
        assert_eq!(raw.y_error_pairs, Some(vec![(0.0, 0.0); 2]));
        assert_eq!(raw.n_points, 2);
    }

    #[test]
    fn graph_errors_mirroring() {
        let graph = GraphErrors::new(
            "graph",
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0, 4.0],
            vec![0.5, 0.5, 0.5],
            vec![0.0, 1.0, 2.0],
        );
        let raw = RawData::from_object(&graph.into(), false).unwrap();

        assert_eq!(raw.x_values, Some(vec![0.0, 1.0, 2.0]));
        assert_eq!(raw.x_error_pairs, Some(vec![(0.5, 0.5); 3]));
        assert_eq!(
            raw.y_error_pairs,
            Some(vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])
        );
    }

    #[test]
    fn graph_asymm_errors_recentring() {
        let graph = GraphAsymmErrors::new(
            "graph",
            vec![0.0],
            vec![0.0],
            vec![0.5],
            vec![0.5],
            vec![0.0],
            vec![1.0],
        );
        let raw = RawData::from_object(&graph.into(), false).unwrap();

        // symmetric x errors leave the value in place
        assert_eq!(raw.x_values, Some(vec![0.0]));
        assert_eq!(raw.x_error_pairs, Some(vec![(0.5, 0.5)]));
        // the (0, 1) y error pair recentres the nominal 0 to 0.5
        assert_eq!(raw.y_values, Some(vec![0.5]));
        assert_eq!(raw.y_error_pairs, Some(vec![(0.5, 0.5)]));
        assert_eq!(raw.n_points, 1);
    }

    #[test]
    fn tree_is_unsupported() {
        let tree = RootObject::from(crate::root::Tree::new("tree", 100));

        assert!(matches!(
            RawData::from_object(&tree, false),
            Err(Error::UnsupportedObject { class_name: "TTree" })
        ));
    }
}
