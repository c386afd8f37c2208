//! Module that contains helpers for binning observables.

use super::convert::{f64_from_usize, usize_from_f64};
use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
enum Limits {
    Equal { left: f64, right: f64, bins: usize },
    Unequal { limits: Vec<f64> },
}

/// Ordered bin limits along a single histogram axis.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Binning(Limits);

impl Binning {
    /// Constructor for `Binning`. The limits are sorted; equally spaced limits are detected and
    /// stored compactly.
    ///
    /// # Panics
    ///
    /// Panics when fewer than two limits are given.
    #[must_use]
    pub fn new(mut limits: Vec<f64>) -> Self {
        assert!(
            limits.len() >= 2,
            "a binning needs at least two limits, got {}",
            limits.len()
        );

        limits.sort_by(|left, right| left.partial_cmp(right).unwrap());

        if limits
            .iter()
            .zip(limits.iter().skip(1))
            .map(|(current, next)| next - current)
            .collect::<Vec<f64>>()
            .windows(2)
            .all(|val| approx_eq!(f64, val[0], val[1], ulps = 8))
        {
            Self(Limits::Equal {
                left: *limits.first().unwrap(),
                right: *limits.last().unwrap(),
                bins: limits.len() - 1,
            })
        } else {
            Self(Limits::Unequal { limits })
        }
    }

    /// Constructor for `bins` equally sized bins between `left` and `right`.
    ///
    /// # Panics
    ///
    /// Panics when `bins` is zero or when `left` is not smaller than `right`.
    #[must_use]
    pub fn equal(left: f64, right: f64, bins: usize) -> Self {
        assert!(bins > 0, "a binning needs at least one bin");
        assert!(
            left < right,
            "bin limits must be ordered, got left {left} and right {right}"
        );

        Self(Limits::Equal { left, right, bins })
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        match &self.0 {
            Limits::Equal { bins, .. } => *bins,
            Limits::Unequal { limits } => limits.len() - 1,
        }
    }

    /// Returns the bin index for observable `value`. If the value over- or underflows, the return
    /// value is `None`.
    #[must_use]
    pub fn index(&self, value: f64) -> Option<usize> {
        match &self.0 {
            Limits::Equal { left, right, bins } => {
                if value < *left || value >= *right {
                    None
                } else {
                    Some(usize_from_f64(
                        (value - left) / (right - left) * f64_from_usize(*bins),
                    ))
                }
            }
            Limits::Unequal { limits } => {
                match limits.binary_search_by(|left| left.partial_cmp(&value).unwrap()) {
                    Err(0) => None,
                    Err(index) if index == limits.len() => None,
                    Ok(index) if index == (limits.len() - 1) => None,
                    Ok(index) => Some(index),
                    Err(index) => Some(index - 1),
                }
            }
        }
    }

    /// Returns the left-most bin limit.
    #[must_use]
    pub fn left(&self) -> f64 {
        match &self.0 {
            Limits::Unequal { limits } => *limits.first().unwrap(),
            Limits::Equal { left, .. } => *left,
        }
    }

    /// Returns the right-most bin limit.
    #[must_use]
    pub fn right(&self) -> f64 {
        match &self.0 {
            Limits::Unequal { limits } => *limits.last().unwrap(),
            Limits::Equal { right, .. } => *right,
        }
    }

    /// Returns the limits in a `Vec`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use atlasplot::binning::Binning;
    ///
    /// // example with equally sized bins
    /// let equal_bins = Binning::new(vec![0.25, 0.5, 0.75, 1.0]);
    /// assert_eq!(equal_bins.limits(), vec![0.25, 0.5, 0.75, 1.0]);
    ///
    /// // example with unequally sized bins
    /// let unequal_bins = Binning::new(vec![0.125, 0.25, 1.0, 1.5]);
    /// assert_eq!(unequal_bins.limits(), vec![0.125, 0.25, 1.0, 1.5]);
    /// ```
    #[must_use]
    pub fn limits(&self) -> Vec<f64> {
        match &self.0 {
            Limits::Equal { left, right, bins } => (0..=*bins)
                .map(|b| (*right - *left).mul_add(f64_from_usize(b) / f64_from_usize(*bins), *left))
                .collect(),
            Limits::Unequal { limits } => limits.clone(),
        }
    }

    /// Returns the size for each bin.
    #[must_use]
    pub fn bin_sizes(&self) -> Vec<f64> {
        match &self.0 {
            Limits::Equal { left, right, bins } => {
                vec![(*right - *left) / f64_from_usize(*bins); *bins]
            }
            Limits::Unequal { limits } => limits.windows(2).map(|x| x[1] - x[0]).collect(),
        }
    }

    /// Returns the centre of each bin.
    #[must_use]
    pub fn centres(&self) -> Vec<f64> {
        self.limits()
            .windows(2)
            .map(|x| 0.5 * (x[0] + x[1]))
            .collect()
    }

    /// Returns half of the size of each bin.
    #[must_use]
    pub fn half_widths(&self) -> Vec<f64> {
        self.bin_sizes().iter().map(|size| 0.5 * size).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn binning_index() {
        // check bin limits with exactly representable bin sizes
        let binning = Binning::new(vec![0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0]);

        assert_eq!(binning.bins(), 8);
        assert_eq!(binning.index(-0.1), None);
        assert_eq!(binning.index(0.1), Some(0));
        assert_eq!(binning.index(0.2), Some(1));
        assert_eq!(binning.index(0.3), Some(2));
        assert_eq!(binning.index(0.4), Some(3));
        assert_eq!(binning.index(0.55), Some(4));
        assert_eq!(binning.index(0.65), Some(5));
        assert_eq!(binning.index(0.8), Some(6));
        assert_eq!(binning.index(0.9), Some(7));
        assert_eq!(binning.index(1.1), None);

        // now check with bin sizes that are not exactly representable
        let binning = Binning::new(vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);

        assert_eq!(binning.bins(), 5);
        assert_eq!(binning.index(-1.0), None);
        assert_eq!(binning.index(0.05), Some(0));
        assert_eq!(binning.index(0.15), Some(1));
        assert_eq!(binning.index(0.25), Some(2));
        assert_eq!(binning.index(0.35), Some(3));
        assert_eq!(binning.index(0.45), Some(4));
        assert_eq!(binning.index(1.1), None);

        // check bin limits that are unequally sized, with values on the limits
        let binning = Binning::new(vec![0.0, 0.25, 0.75, 0.875, 1.0]);
        assert_eq!(binning.index(0.0), Some(0));
        assert_eq!(binning.index(0.25), Some(1));
        assert_eq!(binning.index(0.75), Some(2));
        assert_eq!(binning.index(0.875), Some(3));
        assert_eq!(binning.index(1.0), None);
    }

    #[test]
    fn binning_equal_width_detection() {
        assert_eq!(
            Binning::new(vec![-0.5, 0.5, 1.5, 2.5]),
            Binning::equal(-0.5, 2.5, 3)
        );
        assert_ne!(
            Binning::new(vec![0.0, 0.1, 0.3, 0.6, 1.0]),
            Binning::equal(0.0, 1.0, 4)
        );
    }

    #[test]
    fn binning_centres_and_sizes() {
        let binning = Binning::equal(-0.5, 2.5, 3);

        assert_eq!(binning.centres(), vec![0.0, 1.0, 2.0]);
        assert_eq!(binning.bin_sizes(), vec![1.0; 3]);
        assert_eq!(binning.half_widths(), vec![0.5; 3]);

        let binning = Binning::new(vec![0.125, 0.25, 1.0, 1.5]);

        assert_eq!(binning.left(), 0.125);
        assert_eq!(binning.right(), 1.5);
        assert_eq!(binning.centres(), vec![0.1875, 0.625, 1.25]);
        assert_eq!(binning.bin_sizes(), vec![0.125, 0.75, 0.5]);
    }

    #[test]
    #[should_panic(expected = "a binning needs at least two limits")]
    fn binning_too_few_limits() {
        let _ = Binning::new(vec![1.0]);
    }
}
