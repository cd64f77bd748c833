//! Per-pixel stages of the arrow-chase pipeline.
//!
//! - [`binarize`]: luminance threshold followed by a windowed median.
//! - [`label_regions`]: 4-connected same-value components.
//! - [`analyze_regions`]: area, perimeter, centroid, central moments,
//!   elongation and principal-axis orientation for every region.
//! - [`estimate_tips`]: the boundary pixel each region points at.
//! - [`locate_seed`]: the region under the red start marker.
//!
//! All stages are pure functions of their inputs; the traversal that chains
//! them lives in the `arrow-chase` crate.

mod binarize;
mod direction;
mod label;
mod seed;
mod shape;

pub use binarize::{binarize, median_filter, threshold_luminance, BinarizeParams};
pub use direction::{estimate_tips, find_tip, fold_quarter_turn, TipParams, TipTable};
pub use label::label_regions;
pub use seed::{locate_seed, SeedError, SeedParams};
pub use shape::{analyze_regions, CentralMoments, RegionStats, RegionTable, ShapeError};
