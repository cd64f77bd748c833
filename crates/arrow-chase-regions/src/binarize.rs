//! Binarization: global luminance threshold plus median denoising.

use arrow_chase_core::{ColorImage, Rgb};
use serde::{Deserialize, Serialize};

/// Binarization settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Pixels with luminance strictly below this value become black, the rest white.
    pub luminance_threshold: f64,
    /// Median window radius; the window is `(2r+1) x (2r+1)`. `0` disables the filter.
    pub median_radius: usize,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            luminance_threshold: 18.0,
            median_radius: 2,
        }
    }
}

/// Threshold then median-filter `img`.
///
/// The result only ever contains [`Rgb::BLACK`] and [`Rgb::WHITE`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn binarize(img: &ColorImage, params: &BinarizeParams) -> ColorImage {
    let mask = threshold_luminance(img, params.luminance_threshold);
    median_filter(&mask, params.median_radius)
}

/// Map every pixel to black or white by its BT.601 luminance.
pub fn threshold_luminance(img: &ColorImage, threshold: f64) -> ColorImage {
    img.map_pixels(|p| {
        if p.luminance() < threshold {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    })
}

/// Per-channel median over a `(2r+1) x (2r+1)` window, edges clamped.
pub fn median_filter(img: &ColorImage, radius: usize) -> ColorImage {
    if radius == 0 {
        return img.clone();
    }
    let n = (2 * radius + 1) * (2 * radius + 1);
    let mid = n / 2;
    let mut r = Vec::with_capacity(n);
    let mut g = Vec::with_capacity(n);
    let mut b = Vec::with_capacity(n);

    img.map_window(radius, |window| {
        r.clear();
        g.clear();
        b.clear();
        for p in window {
            r.push(p.r);
            g.push(p.g);
            b.push(p.b);
        }
        Rgb::new(
            *r.select_nth_unstable(mid).1,
            *g.select_nth_unstable(mid).1,
            *b.select_nth_unstable(mid).1,
        )
    })
}
