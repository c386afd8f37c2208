//! Module containing the [`Dataset`] container and its derived arrays.

use super::error::{Error, Result};
use super::raw::RawData;
use super::root::RootObject;
use itertools::{iproduct, Itertools};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Name of one of the up-to-three dimensions of a [`Dataset`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Dimension {
    /// The abscissa.
    X,
    /// The ordinate.
    Y,
    /// The flattened grid values of two-dimensional data.
    Z,
}

impl Dimension {
    /// Returns the lower-case name of this dimension.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The error of a single point along one dimension. Both components are understood to be
/// non-negative offsets from the value.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum PointError {
    /// A single error mirrored to both sides of the value.
    Symmetric(f64),
    /// Separate downward and upward errors.
    Asymmetric(f64, f64),
}

impl PointError {
    /// Returns this error as a `(low, high)` pair.
    #[must_use]
    pub const fn pair(self) -> (f64, f64) {
        match self {
            Self::Symmetric(error) => (error, error),
            Self::Asymmetric(low, high) => (low, high),
        }
    }
}

impl From<f64> for PointError {
    fn from(error: f64) -> Self {
        Self::Symmetric(error)
    }
}

impl From<(f64, f64)> for PointError {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Asymmetric(low, high)
    }
}

/// A value with its asymmetric errors along a single dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    value: f64,
    error_low: f64,
    error_high: f64,
}

/// Arrays derived from the points of a single dimension.
#[derive(Clone, Debug, PartialEq)]
struct DerivedArrays {
    points: Vec<f64>,
    error_pairs: Vec<(f64, f64)>,
    points_error_symmetrised: Vec<f64>,
    errors_symmetrised: Vec<f64>,
    bin_low_edges: Vec<f64>,
    bin_high_edges: Vec<f64>,
    all_bin_edges: Vec<f64>,
    bin_edges: Vec<f64>,
    bin_widths: Vec<f64>,
}

fn derive_dimension(points: &[Point]) -> DerivedArrays {
    let bin_low_edges: Vec<f64> = points.iter().map(|p| p.value - p.error_low).collect();
    let bin_high_edges: Vec<f64> = points.iter().map(|p| p.value + p.error_high).collect();
    let all_bin_edges: Vec<f64> = bin_low_edges
        .iter()
        .interleave(&bin_high_edges)
        .copied()
        .collect();
    let mut bin_edges = all_bin_edges.clone();
    bin_edges.sort_by(|left, right| left.partial_cmp(right).unwrap());
    bin_edges.dedup();

    DerivedArrays {
        points: points.iter().map(|p| p.value).collect(),
        error_pairs: points.iter().map(|p| (p.error_low, p.error_high)).collect(),
        points_error_symmetrised: points
            .iter()
            .map(|p| (p.error_high - p.error_low).mul_add(0.5, p.value))
            .collect(),
        errors_symmetrised: points
            .iter()
            .map(|p| 0.5 * (p.error_low + p.error_high))
            .collect(),
        bin_low_edges,
        bin_high_edges,
        all_bin_edges,
        bin_edges,
        bin_widths: points.iter().map(|p| p.error_low + p.error_high).collect(),
    }
}

/// Arrays combining the x and y dimensions, used for stepped lines and band fills.
#[derive(Clone, Debug, PartialEq)]
struct XyArrays {
    x_at_y_bin_edges: Vec<f64>,
    y_at_x_bin_edges: Vec<f64>,
    band_edges_x: Vec<f64>,
    band_edges_y_low: Vec<f64>,
    band_edges_y_high: Vec<f64>,
}

fn derive_xy(x: &[Point], y: &[Point]) -> XyArrays {
    XyArrays {
        x_at_y_bin_edges: x.iter().flat_map(|p| [p.value, p.value]).collect(),
        y_at_x_bin_edges: y.iter().flat_map(|p| [p.value, p.value]).collect(),
        band_edges_x: x
            .iter()
            .flat_map(|p| [p.value - p.error_low, p.value + p.error_high])
            .collect(),
        band_edges_y_low: y
            .iter()
            .flat_map(|p| {
                let low = p.value - p.error_low;
                [low, low]
            })
            .collect(),
        band_edges_y_high: y
            .iter()
            .flat_map(|p| {
                let high = p.value + p.error_high;
                [high, high]
            })
            .collect(),
    }
}

#[derive(Clone, Debug, Default)]
struct DimensionData {
    points: Vec<Point>,
    derived: OnceLock<DerivedArrays>,
}

/// Container for plottable datasets.
///
/// A `Dataset` holds, for each populated [`Dimension`], an ordered list of values with their
/// `(low, high)` errors. All derived arrays are computed on first access and cached; a
/// `Dataset` is immutable once constructed.
#[derive(Clone, Debug)]
pub struct Dataset {
    data: BTreeMap<Dimension, DimensionData>,
    n_points: usize,
    xy: OnceLock<XyArrays>,
}

impl Dataset {
    fn empty() -> Self {
        Self {
            data: BTreeMap::new(),
            n_points: 0,
            xy: OnceLock::new(),
        }
    }

    fn add_dimension(
        &mut self,
        dimension: Dimension,
        values: Vec<f64>,
        errors: Option<Vec<PointError>>,
    ) -> Result<()> {
        let errors = errors.unwrap_or_else(|| vec![PointError::Symmetric(0.0); values.len()]);

        if values.len() != errors.len() {
            return Err(Error::DimensionSizeMismatch {
                dimension,
                values: values.len(),
                errors: errors.len(),
            });
        }

        let points = values
            .iter()
            .zip(&errors)
            .map(|(&value, error)| {
                let (error_low, error_high) = error.pair();
                Point {
                    value,
                    error_low,
                    error_high,
                }
            })
            .collect();
        self.data.insert(
            dimension,
            DimensionData {
                points,
                derived: OnceLock::new(),
            },
        );

        Ok(())
    }

    fn add_dimension_pairs(
        &mut self,
        dimension: Dimension,
        values: Vec<f64>,
        pairs: Option<Vec<(f64, f64)>>,
    ) -> Result<()> {
        let errors = pairs.map(|pairs| pairs.into_iter().map(PointError::from).collect());
        self.add_dimension(dimension, values, errors)
    }

    /// Interpret a ROOT-like object as a dataset, consuming whichever of its x, y and z
    /// dimensions are present. With `remove_zeros`, points whose y value is exactly zero are
    /// dropped from point-like objects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedObject`] when `object` is not convertible into plottable
    /// data.
    pub fn from_object(object: &RootObject, remove_zeros: bool) -> Result<Self> {
        let raw = RawData::from_object(object, remove_zeros)?;
        let mut dataset = Self::empty();

        if let Some(values) = raw.x_values {
            dataset.add_dimension_pairs(Dimension::X, values, raw.x_error_pairs)?;
        }
        if let Some(values) = raw.y_values {
            dataset.add_dimension_pairs(Dimension::Y, values, raw.y_error_pairs)?;
        }
        if let Some(values) = raw.z_values {
            dataset.add_dimension_pairs(Dimension::Z, values, raw.z_error_pairs)?;
        }
        dataset.n_points = raw.n_points;

        Ok(dataset)
    }

    /// Interpret two arrays as x-y points without errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointSizeMismatch`] when `x` and `y` differ in length.
    pub fn from_xy(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        Self::from_xy_with_errors(x, None, y, None)
    }

    /// Interpret two arrays as x-y points with the given errors; `None` means zero errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PointSizeMismatch`] when `x` and `y` differ in length, or
    /// [`Error::DimensionSizeMismatch`] when the values and errors of one dimension do.
    pub fn from_xy_with_errors(
        x: Vec<f64>,
        x_errors: Option<Vec<PointError>>,
        y: Vec<f64>,
        y_errors: Option<Vec<PointError>>,
    ) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::PointSizeMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        let mut dataset = Self::empty();
        dataset.n_points = x.len();
        dataset.add_dimension(Dimension::X, x, x_errors)?;
        dataset.add_dimension(Dimension::Y, y, y_errors)?;

        Ok(dataset)
    }

    /// Interpret three arrays as x and y bin axes with a flattened grid of z values, where x
    /// varies fastest within each y row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridSizeMismatch`] unless `z.len() == x.len() * y.len()`.
    pub fn from_grid(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        Self::from_grid_with_errors(x, None, y, None, z, None)
    }

    /// Interpret three arrays as x and y bin axes with a flattened grid of z values and the
    /// given errors; `None` means zero errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridSizeMismatch`] unless `z.len() == x.len() * y.len()`, or
    /// [`Error::DimensionSizeMismatch`] when the values and errors of one dimension differ in
    /// length.
    pub fn from_grid_with_errors(
        x: Vec<f64>,
        x_errors: Option<Vec<PointError>>,
        y: Vec<f64>,
        y_errors: Option<Vec<PointError>>,
        z: Vec<f64>,
        z_errors: Option<Vec<PointError>>,
    ) -> Result<Self> {
        if x.len() * y.len() != z.len() {
            return Err(Error::GridSizeMismatch {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }

        let mut dataset = Self::empty();
        dataset.n_points = z.len();
        dataset.add_dimension(Dimension::X, x, x_errors)?;
        dataset.add_dimension(Dimension::Y, y, y_errors)?;
        dataset.add_dimension(Dimension::Z, z, z_errors)?;

        Ok(dataset)
    }

    /// Returns a builder that assembles a dataset dimension by dimension.
    #[must_use]
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Returns the sorted list of populated dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.data.keys().copied().collect()
    }

    /// Returns whether `dimension` is populated.
    #[must_use]
    pub fn has_dimension(&self, dimension: Dimension) -> bool {
        self.data.contains_key(&dimension)
    }

    /// Returns the point count of this dataset; for grid-like data this is the flattened z
    /// length.
    #[must_use]
    pub const fn number_of_points(&self) -> usize {
        self.n_points
    }

    fn dimension_data(&self, dimension: Dimension) -> &DimensionData {
        self.data
            .get(&dimension)
            .unwrap_or_else(|| panic!("dataset has no '{dimension}' dimension"))
    }

    fn derived(&self, dimension: Dimension) -> &DerivedArrays {
        let data = self.dimension_data(dimension);
        data.derived.get_or_init(|| derive_dimension(&data.points))
    }

    /// Returns the values along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn points(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).points
    }

    /// Returns the `(low, high)` error pairs along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn error_pairs(&self, dimension: Dimension) -> &[(f64, f64)] {
        &self.derived(dimension).error_pairs
    }

    /// Returns the values along `dimension`, each recentred to the midpoint of its error bar.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn points_error_symmetrised(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).points_error_symmetrised
    }

    /// Returns the mean of the low and high error for each point along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn errors_symmetrised(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).errors_symmetrised
    }

    /// Returns `value - error_low` for each point along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn bin_low_edges(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).bin_low_edges
    }

    /// Returns `value + error_high` for each point along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn bin_high_edges(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).bin_high_edges
    }

    /// Returns the interleaved `[low, high]` bin edges along `dimension`, in input order. The
    /// result may contain duplicates or gaps when the points are not contiguous bins.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn all_bin_edges(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).all_bin_edges
    }

    /// Returns the sorted, deduplicated bin edges along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn bin_edges(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).bin_edges
    }

    /// Returns `error_low + error_high` for each point along `dimension`.
    ///
    /// # Panics
    ///
    /// Panics when `dimension` is not populated.
    #[must_use]
    pub fn bin_widths(&self, dimension: Dimension) -> &[f64] {
        &self.derived(dimension).bin_widths
    }

    fn xy(&self) -> &XyArrays {
        self.xy.get_or_init(|| {
            derive_xy(
                &self.dimension_data(Dimension::X).points,
                &self.dimension_data(Dimension::Y).points,
            )
        })
    }

    /// Returns each x value repeated twice, aligned with the interleaved y bin edges of a
    /// stepped line.
    ///
    /// # Panics
    ///
    /// Panics when the x or y dimension is not populated.
    #[must_use]
    pub fn x_at_y_bin_edges(&self) -> &[f64] {
        &self.xy().x_at_y_bin_edges
    }

    /// Returns each y value repeated twice, aligned with the interleaved x bin edges of a
    /// stepped line.
    ///
    /// # Panics
    ///
    /// Panics when the x or y dimension is not populated.
    #[must_use]
    pub fn y_at_x_bin_edges(&self) -> &[f64] {
        &self.xy().y_at_x_bin_edges
    }

    /// Returns the interleaved `(low, high)` x edges of a fillable band.
    ///
    /// # Panics
    ///
    /// Panics when the x or y dimension is not populated.
    #[must_use]
    pub fn band_edges_x(&self) -> &[f64] {
        &self.xy().band_edges_x
    }

    /// Returns the lower y boundary of a fillable band, each endpoint repeated twice and
    /// aligned with [`Self::band_edges_x`].
    ///
    /// # Panics
    ///
    /// Panics when the x or y dimension is not populated.
    #[must_use]
    pub fn band_edges_y_low(&self) -> &[f64] {
        &self.xy().band_edges_y_low
    }

    /// Returns the upper y boundary of a fillable band, each endpoint repeated twice and
    /// aligned with [`Self::band_edges_x`].
    ///
    /// # Panics
    ///
    /// Panics when the x or y dimension is not populated.
    #[must_use]
    pub fn band_edges_y_high(&self) -> &[f64] {
        &self.xy().band_edges_y_high
    }

    /// Construct the full cartesian-product grid of x and y bin centres: two equally long flat
    /// arrays with x varying fastest within each y row, aligned with the flattened z values of
    /// grid-like datasets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAxes`] for any axis pair other than `[X, Y]`.
    ///
    /// # Panics
    ///
    /// Panics when the x or y dimension is not populated.
    pub fn unrolled_bin_centres(&self, axes: [Dimension; 2]) -> Result<(Vec<f64>, Vec<f64>)> {
        let [first, second] = axes;

        if (first, second) != (Dimension::X, Dimension::Y) {
            return Err(Error::UnsupportedAxes { first, second });
        }

        let x = self.points(Dimension::X);
        let y = self.points(Dimension::Y);

        Ok(iproduct!(y.iter(), x.iter()).map(|(&y, &x)| (x, y)).unzip())
    }
}

/// Builder assembling a [`Dataset`] dimension by dimension, for callers that have their data as
/// named per-dimension arrays.
#[derive(Clone, Debug, Default)]
pub struct DatasetBuilder {
    values: BTreeMap<Dimension, Vec<f64>>,
    errors: BTreeMap<Dimension, Vec<PointError>>,
}

impl DatasetBuilder {
    /// Set the values of `dimension`.
    #[must_use]
    pub fn values(mut self, dimension: Dimension, values: Vec<f64>) -> Self {
        self.values.insert(dimension, values);
        self
    }

    /// Set the errors of `dimension`. Errors for a dimension without values are ignored.
    #[must_use]
    pub fn errors(mut self, dimension: Dimension, errors: Vec<PointError>) -> Self {
        self.errors.insert(dimension, errors);
        self
    }

    /// Build the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] when no values were provided,
    /// [`Error::DimensionSizeMismatch`] when the values and errors of one dimension differ in
    /// length and [`Error::GridSizeMismatch`] when x, y and z are all present but
    /// `z.len() != x.len() * y.len()`.
    pub fn build(mut self) -> Result<Dataset> {
        if self.values.is_empty() {
            return Err(Error::NoData);
        }

        if let (Some(x), Some(y), Some(z)) = (
            self.values.get(&Dimension::X),
            self.values.get(&Dimension::Y),
            self.values.get(&Dimension::Z),
        ) {
            if x.len() * y.len() != z.len() {
                return Err(Error::GridSizeMismatch {
                    x: x.len(),
                    y: y.len(),
                    z: z.len(),
                });
            }
        }

        let mut dataset = Dataset::empty();
        dataset.n_points = [Dimension::Z, Dimension::X, Dimension::Y]
            .into_iter()
            .find_map(|dimension| self.values.get(&dimension).map(Vec::len))
            .unwrap_or_default();

        for (dimension, values) in self.values {
            dataset.add_dimension(dimension, values, self.errors.remove(&dimension))?;
        }

        Ok(dataset)
    }
}
