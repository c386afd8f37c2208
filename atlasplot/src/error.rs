//! Module containing this crate's error types.

use super::dataset::Dimension;
use thiserror::Error;

/// Catch-all error for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the numbers of values and errors supplied for a single dimension differ.
    #[error("dimension '{dimension}' has {values} values but {errors} errors")]
    DimensionSizeMismatch {
        /// Dimension being ingested.
        dimension: Dimension,
        /// Number of values supplied.
        values: usize,
        /// Number of errors supplied.
        errors: usize,
    },
    /// Returned when the 'x' and 'y' arrays of a point series differ in size.
    #[error("failed to interpret arrays with {x} 'x' values and {y} 'y' values as a series of points")]
    PointSizeMismatch {
        /// Number of 'x' values.
        x: usize,
        /// Number of 'y' values.
        y: usize,
    },
    /// Returned when a flattened 'z' grid does not cover the 'x' and 'y' bins exactly once.
    #[error("failed to interpret {z} 'z' values as a grid over {x} 'x' bins and {y} 'y' bins")]
    GridSizeMismatch {
        /// Number of 'x' bins.
        x: usize,
        /// Number of 'y' bins.
        y: usize,
        /// Number of 'z' values.
        z: usize,
    },
    /// Returned when a dataset is initialised without any dimension.
    #[error("attempt to initialise a dataset without providing data")]
    NoData,
    /// Returned when a ROOT-like object can not be converted into plottable data.
    #[error("'{class_name}' objects can not be converted into plottable data")]
    UnsupportedObject {
        /// Class name of the offending object.
        class_name: &'static str,
    },
    /// Returned when bin unrolling is requested for an axis pair other than x-y.
    #[error("bin unrolling is only supported for the x-y axis pair, not {first}-{second}")]
    UnsupportedAxes {
        /// First requested axis.
        first: Dimension,
        /// Second requested axis.
        second: Dimension,
    },
    /// Error that does not originate from this crate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Shorthand for a result with this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
