//! Conversions between [`ColorImage`] and the `image` crate, plus file helpers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ::image::{ImageReader, RgbImage};
use arrow_chase_core::{ColorImage, Rect, Rgb};

use crate::ChaseError;

/// Copy an `image::RgbImage` into a [`ColorImage`].
pub fn color_image_from_rgb8(img: &RgbImage) -> ColorImage {
    let data = img
        .pixels()
        .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]))
        .collect();
    ColorImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data,
    }
}

/// Copy a [`ColorImage`] into an `image::RgbImage`.
pub fn rgb8_from_color_image(img: &ColorImage) -> Result<RgbImage, ChaseError> {
    let invalid = || ChaseError::InvalidDimensions {
        width: img.width,
        height: img.height,
    };
    let w = u32::try_from(img.width).map_err(|_| invalid())?;
    let h = u32::try_from(img.height).map_err(|_| invalid())?;
    let raw: Vec<u8> = img.data.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
    RgbImage::from_raw(w, h, raw).ok_or_else(invalid)
}

/// Decode any format `image` understands and convert it to 8-bit RGB.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))
)]
pub fn load_color_image(path: impl AsRef<Path>) -> Result<ColorImage, ChaseError> {
    let rgb = ImageReader::open(path.as_ref())?
        .with_guessed_format()?
        .decode()?
        .to_rgb8();
    log::debug!(
        "loaded {} ({}x{})",
        path.as_ref().display(),
        rgb.width(),
        rgb.height()
    );
    Ok(color_image_from_rgb8(&rgb))
}

/// Encode `img`; the format follows the file extension.
pub fn save_color_image(img: &ColorImage, path: impl AsRef<Path>) -> Result<(), ChaseError> {
    rgb8_from_color_image(img)?.save(path.as_ref())?;
    Ok(())
}

/// Write one `x y width height` line per rectangle. An empty slice creates
/// an empty file.
pub fn write_rects(path: impl AsRef<Path>, rects: &[Rect]) -> Result<(), ChaseError> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    for r in rects {
        writeln!(out, "{r}")?;
    }
    out.flush()?;
    Ok(())
}
