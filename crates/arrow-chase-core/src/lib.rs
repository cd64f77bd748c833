//! Core types for the arrow-chase pipeline.
//!
//! This crate only holds the data model: RGB pixels and owned RGB grids, the
//! per-pixel region label grid, output rectangles, and the process logger.
//! It knows nothing about image file formats or about the traversal itself.

mod image;
mod labels;
mod logger;
mod rect;

pub use image::{ColorImage, Rgb};
pub use labels::LabelGrid;
pub use rect::Rect;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_level};

/// Integer pixel coordinate: `x` is the column, `y` the row.
pub type PixelPos = nalgebra::Point2<usize>;
