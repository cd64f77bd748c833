//! Follow a chain of arrows drawn on a dark background to the region they
//! lead to.
//!
//! The input is segmented into flat-color regions (luminance threshold,
//! 5x5 median, 4-connected labeling). A dense red marker picks the starting
//! region. From there each region that passes an arrow shape test fires a
//! ray from its centroid through its tip; the region the ray lands in is
//! next. The first region that is not an arrow is the destination. Every
//! pixel a ray crosses is highlighted on a copy of the input.
//!
//! ## Quickstart
//!
//! ```no_run
//! use arrow_chase::{io, ArrowChaser, ChaseParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = io::load_color_image("map.png")?;
//! let result = ArrowChaser::new(ChaseParams::default()).run(&img);
//! println!("{}", result.report.termination);
//! io::save_color_image(&result.image, "map_traced.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `arrow_chase::core`: pixels, images, label grids, rectangles, logger.
//! - `arrow_chase::regions`: binarization, labeling, region statistics, tips, seed.
//! - [`PathTracer`]: the traversal over precomputed regions.
//! - [`ArrowChaser`]: all stages end to end.
//! - `arrow_chase::io` (feature `image`): file loading and saving.

pub use arrow_chase_core as core;
pub use arrow_chase_regions as regions;

mod error;
mod params;
mod pipeline;
mod report;
mod trace;

pub mod render;

#[cfg(feature = "image")]
pub mod io;

pub use error::ChaseError;
pub use params::{AcceptParams, ChaseParams, TraceParams};
pub use pipeline::{chase, ArrowChaser, ChaseResult};
pub use report::{ChaseReport, RegionSummary};
pub use trace::{Hop, PathTracer, Termination, TraceOutcome};

pub use arrow_chase_core::{ColorImage, LabelGrid, PixelPos, Rect, Rgb};
pub use arrow_chase_regions::{BinarizeParams, RegionTable, SeedParams, ShapeError, TipParams};
