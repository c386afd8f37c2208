#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! `atlasplot` converts histograms, graphs, functions and raw arrays into
//! normalized [`Dataset`](dataset::Dataset) objects that a publication-style
//! rendering layer can draw without further interpretation.

mod convert;

pub mod binning;
pub mod dataset;
pub mod error;
pub mod raw;
pub mod root;
