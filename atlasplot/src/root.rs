//! Module containing the ROOT-like objects that this crate can turn into plottable data.
//!
//! The enum [`RootObject`] is the closed set of object classes known to the plotting layer;
//! integration code maps whatever its ROOT bindings hand out onto these variants.

use super::binning::Binning;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A binned one-dimensional histogram.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hist1D {
    name: String,
    binning: Binning,
    contents: Vec<f64>,
    sumw2: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: u64,
}

impl Hist1D {
    /// Create an empty histogram with `bins` equally sized bins between `left` and `right`.
    ///
    /// # Panics
    ///
    /// Panics when `bins` is zero or when `left` is not smaller than `right`.
    #[must_use]
    pub fn new(name: &str, bins: usize, left: f64, right: f64) -> Self {
        Self::with_binning(name, Binning::equal(left, right, bins))
    }

    /// Create an empty histogram with the given bin `limits`.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two limits are given.
    #[must_use]
    pub fn with_limits(name: &str, limits: Vec<f64>) -> Self {
        Self::with_binning(name, Binning::new(limits))
    }

    fn with_binning(name: &str, binning: Binning) -> Self {
        let bins = binning.bins();

        Self {
            name: name.to_owned(),
            binning,
            contents: vec![0.0; bins],
            sumw2: vec![0.0; bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
        }
    }

    /// Fill the bin containing `value` with unit weight.
    pub fn fill(&mut self, value: f64) {
        self.fill_weighted(value, 1.0);
    }

    /// Fill the bin containing `value` with `weight`. Values outside the axis are accumulated in
    /// the under- and overflow counters.
    pub fn fill_weighted(&mut self, value: f64, weight: f64) {
        self.entries += 1;

        match self.binning.index(value) {
            Some(bin) => {
                self.contents[bin] += weight;
                self.sumw2[bin] += weight * weight;
            }
            None if value < self.binning.left() => self.underflow += weight,
            None => self.overflow += weight,
        }
    }

    /// Returns the histogram name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the binning of the axis.
    #[must_use]
    pub const fn binning(&self) -> &Binning {
        &self.binning
    }

    /// Returns the number of bins, excluding under- and overflow.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.binning.bins()
    }

    /// Returns the content of the given bin.
    #[must_use]
    pub fn content(&self, bin: usize) -> f64 {
        self.contents[bin]
    }

    /// Returns the statistical error pair of the given bin, the square root of the summed
    /// squared weights mirrored to both sides.
    #[must_use]
    pub fn error_pair(&self, bin: usize) -> (f64, f64) {
        let error = self.sumw2[bin].sqrt();
        (error, error)
    }

    /// Returns the weight accumulated below the axis.
    #[must_use]
    pub const fn underflow(&self) -> f64 {
        self.underflow
    }

    /// Returns the weight accumulated above the axis.
    #[must_use]
    pub const fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Returns the number of fill calls.
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.entries
    }
}

/// A binned two-dimensional histogram.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hist2D {
    name: String,
    x_binning: Binning,
    y_binning: Binning,
    // shape (y bins, x bins), so that row-major iteration runs over x fastest
    contents: Array2<f64>,
    sumw2: Array2<f64>,
    entries: u64,
}

impl Hist2D {
    /// Create an empty histogram with equally sized bins along both axes.
    ///
    /// # Panics
    ///
    /// Panics when either axis has zero bins or unordered limits.
    #[must_use]
    pub fn new(
        name: &str,
        x_bins: usize,
        x_left: f64,
        x_right: f64,
        y_bins: usize,
        y_left: f64,
        y_right: f64,
    ) -> Self {
        Self::with_binnings(
            name,
            Binning::equal(x_left, x_right, x_bins),
            Binning::equal(y_left, y_right, y_bins),
        )
    }

    /// Create an empty histogram with the given axis binnings.
    #[must_use]
    pub fn with_binnings(name: &str, x_binning: Binning, y_binning: Binning) -> Self {
        let shape = (y_binning.bins(), x_binning.bins());

        Self {
            name: name.to_owned(),
            x_binning,
            y_binning,
            contents: Array2::zeros(shape),
            sumw2: Array2::zeros(shape),
            entries: 0,
        }
    }

    /// Fill the bin containing `(x, y)` with unit weight.
    pub fn fill(&mut self, x: f64, y: f64) {
        self.fill_weighted(x, y, 1.0);
    }

    /// Fill the bin containing `(x, y)` with `weight`. Values outside the axes are discarded.
    pub fn fill_weighted(&mut self, x: f64, y: f64, weight: f64) {
        self.entries += 1;

        if let (Some(ix), Some(iy)) = (self.x_binning.index(x), self.y_binning.index(y)) {
            self.contents[[iy, ix]] += weight;
            self.sumw2[[iy, ix]] += weight * weight;
        }
    }

    /// Returns the histogram name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the binning of the x axis.
    #[must_use]
    pub const fn x_binning(&self) -> &Binning {
        &self.x_binning
    }

    /// Returns the binning of the y axis.
    #[must_use]
    pub const fn y_binning(&self) -> &Binning {
        &self.y_binning
    }

    /// Returns the content of bin `(ix, iy)`.
    #[must_use]
    pub fn content(&self, ix: usize, iy: usize) -> f64 {
        self.contents[[iy, ix]]
    }

    /// Returns the statistical error pair of bin `(ix, iy)`.
    #[must_use]
    pub fn error_pair(&self, ix: usize, iy: usize) -> (f64, f64) {
        let error = self.sumw2[[iy, ix]].sqrt();
        (error, error)
    }

    /// Returns the number of fill calls.
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.entries
    }
}

/// A graph of `(x, y)` points without errors.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Graph {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Graph {
    /// Constructor.
    ///
    /// # Panics
    ///
    /// Panics when `x` and `y` differ in length.
    #[must_use]
    pub fn new(name: &str, x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(
            x.len(),
            y.len(),
            "graph arrays differ in length: {} vs. {}",
            x.len(),
            y.len()
        );

        Self {
            name: name.to_owned(),
            x,
            y,
        }
    }

    /// Returns the graph name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of points.
    #[must_use]
    pub fn points(&self) -> usize {
        self.x.len()
    }

    /// Returns the x values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the y values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

/// A graph of `(x, y)` points with symmetric errors in both directions.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GraphErrors {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    x_errors: Vec<f64>,
    y_errors: Vec<f64>,
}

impl GraphErrors {
    /// Constructor.
    ///
    /// # Panics
    ///
    /// Panics when the value and error arrays differ in length.
    #[must_use]
    pub fn new(name: &str, x: Vec<f64>, y: Vec<f64>, x_errors: Vec<f64>, y_errors: Vec<f64>) -> Self {
        assert!(
            (x.len() == y.len()) && (x.len() == x_errors.len()) && (x.len() == y_errors.len()),
            "graph arrays differ in length"
        );

        Self {
            name: name.to_owned(),
            x,
            y,
            x_errors,
            y_errors,
        }
    }

    /// Returns the graph name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of points.
    #[must_use]
    pub fn points(&self) -> usize {
        self.x.len()
    }

    /// Returns the x values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the y values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Returns the symmetric x errors.
    #[must_use]
    pub fn x_errors(&self) -> &[f64] {
        &self.x_errors
    }

    /// Returns the symmetric y errors.
    #[must_use]
    pub fn y_errors(&self) -> &[f64] {
        &self.y_errors
    }
}

/// A graph of `(x, y)` points with asymmetric errors in both directions.
///
/// The nominal point of such graphs is not the centre of its error bars; see
/// [`RawData`](super::raw::RawData) for the recentring applied on conversion.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GraphAsymmErrors {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    x_errors_low: Vec<f64>,
    x_errors_high: Vec<f64>,
    y_errors_low: Vec<f64>,
    y_errors_high: Vec<f64>,
}

impl GraphAsymmErrors {
    /// Constructor.
    ///
    /// # Panics
    ///
    /// Panics when the value and error arrays differ in length.
    #[must_use]
    pub fn new(
        name: &str,
        x: Vec<f64>,
        y: Vec<f64>,
        x_errors_low: Vec<f64>,
        x_errors_high: Vec<f64>,
        y_errors_low: Vec<f64>,
        y_errors_high: Vec<f64>,
    ) -> Self {
        assert!(
            (x.len() == y.len())
                && (x.len() == x_errors_low.len())
                && (x.len() == x_errors_high.len())
                && (x.len() == y_errors_low.len())
                && (x.len() == y_errors_high.len()),
            "graph arrays differ in length"
        );

        Self {
            name: name.to_owned(),
            x,
            y,
            x_errors_low,
            x_errors_high,
            y_errors_low,
            y_errors_high,
        }
    }

    /// Returns the graph name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of points.
    #[must_use]
    pub fn points(&self) -> usize {
        self.x.len()
    }

    /// Returns the x values.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the y values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Returns the downward x errors.
    #[must_use]
    pub fn x_errors_low(&self) -> &[f64] {
        &self.x_errors_low
    }

    /// Returns the upward x errors.
    #[must_use]
    pub fn x_errors_high(&self) -> &[f64] {
        &self.x_errors_high
    }

    /// Returns the downward y errors.
    #[must_use]
    pub fn y_errors_low(&self) -> &[f64] {
        &self.y_errors_low
    }

    /// Returns the upward y errors.
    #[must_use]
    pub fn y_errors_high(&self) -> &[f64] {
        &self.y_errors_high
    }
}

/// A named one-dimensional function over an inclusive range.
#[derive(Clone)]
pub struct Function1D {
    name: String,
    left: f64,
    right: f64,
    function: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl Function1D {
    /// Constructor.
    #[must_use]
    pub fn new(
        name: &str,
        left: f64,
        right: f64,
        function: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_owned(),
            left,
            right,
            function: Arc::new(function),
        }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the inclusive range over which the function is defined.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        (self.left, self.right)
    }

    /// Evaluates the function at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        (self.function)(x)
    }
}

impl fmt::Debug for Function1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function1D")
            .field("name", &self.name)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

/// A tree of event records. Trees must be histogrammed before they can be plotted, so they are
/// not convertible into plottable data.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tree {
    name: String,
    entries: u64,
}

impl Tree {
    /// Constructor.
    #[must_use]
    pub fn new(name: &str, entries: u64) -> Self {
        Self {
            name: name.to_owned(),
            entries,
        }
    }

    /// Returns the tree name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.entries
    }
}

/// Enum which lists all ROOT-like object classes known to this crate.
#[derive(Clone, Debug)]
pub enum RootObject {
    /// One-dimensional binned histogram.
    Hist1D(Hist1D),
    /// Two-dimensional binned histogram.
    Hist2D(Hist2D),
    /// Continuous function, sampled on a grid when converted.
    Function(Function1D),
    /// Graph without errors.
    Graph(Graph),
    /// Graph with symmetric errors.
    GraphErrors(GraphErrors),
    /// Graph with asymmetric errors.
    GraphAsymmErrors(GraphAsymmErrors),
    /// Tree of event records; not convertible into plottable data.
    Tree(Tree),
}

impl RootObject {
    /// Returns the ROOT class name of the contained object.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Hist1D(_) => "TH1D",
            Self::Hist2D(_) => "TH2D",
            Self::Function(_) => "TF1",
            Self::Graph(_) => "TGraph",
            Self::GraphErrors(_) => "TGraphErrors",
            Self::GraphAsymmErrors(_) => "TGraphAsymmErrors",
            Self::Tree(_) => "TTree",
        }
    }
}

impl From<Hist1D> for RootObject {
    fn from(hist: Hist1D) -> Self {
        Self::Hist1D(hist)
    }
}

impl From<Hist2D> for RootObject {
    fn from(hist: Hist2D) -> Self {
        Self::Hist2D(hist)
    }
}

impl From<Function1D> for RootObject {
    fn from(function: Function1D) -> Self {
        Self::Function(function)
    }
}

impl From<Graph> for RootObject {
    fn from(graph: Graph) -> Self {
        Self::Graph(graph)
    }
}

impl From<GraphErrors> for RootObject {
    fn from(graph: GraphErrors) -> Self {
        Self::GraphErrors(graph)
    }
}

impl From<GraphAsymmErrors> for RootObject {
    fn from(graph: GraphAsymmErrors) -> Self {
        Self::GraphAsymmErrors(graph)
    }
}

impl From<Tree> for RootObject {
    fn from(tree: Tree) -> Self {
        Self::Tree(tree)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hist1d_fill() {
        let mut hist = Hist1D::new("hist", 3, -0.5, 2.5);

        for value in 0..3 {
            hist.fill(f64::from(value));
        }

        assert_eq!(hist.bins(), 3);
        assert_eq!(hist.binning().centres(), vec![0.0, 1.0, 2.0]);
        assert_eq!(hist.content(0), 1.0);
        assert_eq!(hist.content(1), 1.0);
        assert_eq!(hist.content(2), 1.0);
        assert_eq!(hist.error_pair(0), (1.0, 1.0));
        assert_eq!(hist.underflow(), 0.0);
        assert_eq!(hist.overflow(), 0.0);
        assert_eq!(hist.entries(), 3);
    }

    #[test]
    fn hist1d_flows_and_weights() {
        let mut hist = Hist1D::new("hist", 2, 0.0, 2.0);

        hist.fill_weighted(0.5, 2.0);
        hist.fill_weighted(0.5, 2.0);
        hist.fill(-1.0);
        hist.fill(3.0);

        assert_eq!(hist.content(0), 4.0);
        assert_eq!(hist.content(1), 0.0);
        // two weight-2 fills sum to sqrt(2 * 2^2)
        assert_eq!(hist.error_pair(0), (8.0_f64.sqrt(), 8.0_f64.sqrt()));
        assert_eq!(hist.underflow(), 1.0);
        assert_eq!(hist.overflow(), 1.0);
        assert_eq!(hist.entries(), 4);
    }

    #[test]
    fn hist2d_fill() {
        let mut hist = Hist2D::new("hist", 3, -0.5, 2.5, 2, 0.0, 2.0);

        hist.fill(0.0, 0.5);
        hist.fill(2.0, 1.5);
        hist.fill_weighted(1.0, 0.5, 3.0);
        // discarded
        hist.fill(5.0, 0.5);

        assert_eq!(hist.content(0, 0), 1.0);
        assert_eq!(hist.content(1, 0), 3.0);
        assert_eq!(hist.content(2, 1), 1.0);
        assert_eq!(hist.content(2, 0), 0.0);
        assert_eq!(hist.error_pair(1, 0), (3.0, 3.0));
        assert_eq!(hist.entries(), 4);
    }

    #[test]
    #[should_panic(expected = "graph arrays differ in length")]
    fn graph_length_mismatch() {
        let _ = Graph::new("graph", vec![0.0, 1.0], vec![0.0]);
    }

    #[test]
    fn function_eval() {
        let function = Function1D::new("function", 0.0, 10.0, |x| x * x);

        assert_eq!(function.range(), (0.0, 10.0));
        assert_eq!(function.eval(3.0), 9.0);
    }

    #[test]
    fn class_names() {
        assert_eq!(
            RootObject::from(Hist1D::new("hist", 1, 0.0, 1.0)).class_name(),
            "TH1D"
        );
        assert_eq!(
            RootObject::from(Hist2D::new("hist", 1, 0.0, 1.0, 1, 0.0, 1.0)).class_name(),
            "TH2D"
        );
        assert_eq!(
            RootObject::from(Function1D::new("function", 0.0, 1.0, |x| x)).class_name(),
            "TF1"
        );
        assert_eq!(
            RootObject::from(Graph::new("graph", vec![], vec![])).class_name(),
            "TGraph"
        );
        assert_eq!(RootObject::from(Tree::new("tree", 0)).class_name(), "TTree");
    }
}
