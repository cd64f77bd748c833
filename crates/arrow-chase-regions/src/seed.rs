//! Start marker search: a dense 3x3 cluster of near-red pixels.

use arrow_chase_core::{ColorImage, LabelGrid, Rgb};
use serde::{Deserialize, Serialize};

/// Red-marker detection settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedParams {
    /// Red channel must be strictly above this.
    pub min_red: u8,
    /// Green channel must be strictly below this.
    pub max_green: u8,
    /// Blue channel must be strictly below this.
    pub max_blue: u8,
    /// Minimum red-dominant pixels in the 3x3 window (out of 9).
    pub min_hits: usize,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            min_red: 230,
            max_green: 70,
            max_blue: 70,
            min_hits: 7,
        }
    }
}

impl SeedParams {
    #[inline]
    pub fn is_marker_pixel(&self, p: Rgb) -> bool {
        p.r > self.min_red && p.g < self.max_green && p.b < self.max_blue
    }
}

#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum SeedError {
    #[error("no red start marker found")]
    NotFound,
    #[error("image is {width}x{height}, the marker window needs at least 3x3")]
    ImageTooSmall { width: usize, height: usize },
    #[error("label grid is {grid_w}x{grid_h} but image is {image_w}x{image_h}")]
    SizeMismatch {
        image_w: usize,
        image_h: usize,
        grid_w: usize,
        grid_h: usize,
    },
}

/// Region id under the first red marker, scanning window centres in raster order.
///
/// The outermost pixel ring is never a centre, so images narrower or shorter
/// than 3 px are rejected.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(img, labels, params))
)]
pub fn locate_seed(
    img: &ColorImage,
    labels: &LabelGrid,
    params: &SeedParams,
) -> Result<u32, SeedError> {
    if img.width != labels.width || img.height != labels.height {
        return Err(SeedError::SizeMismatch {
            image_w: img.width,
            image_h: img.height,
            grid_w: labels.width,
            grid_h: labels.height,
        });
    }
    let (w, h) = (img.width, img.height);
    if w < 3 || h < 3 {
        return Err(SeedError::ImageTooSmall {
            width: w,
            height: h,
        });
    }

    let hit = |x: usize, y: usize| params.is_marker_pixel(img.data[y * w + x]) as usize;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let hits: usize = (y - 1..=y + 1)
                .flat_map(|wy| (x - 1..=x + 1).map(move |wx| (wx, wy)))
                .map(|(wx, wy)| hit(wx, wy))
                .sum();
            if hits >= params.min_hits {
                let id = labels.labels[y * w + x];
                log::debug!("start marker at ({}, {}) in region {}", x, y, id);
                return if labels.is_valid_id(id) {
                    Ok(id)
                } else {
                    Err(SeedError::NotFound)
                };
            }
        }
    }
    Err(SeedError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label_regions;

    fn paint(img: &mut ColorImage, x0: usize, y0: usize, w: usize, h: usize, c: Rgb) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.set(x, y, c);
            }
        }
    }

    #[test]
    fn finds_region_under_marker() {
        let mut img = ColorImage::new(12, 10, Rgb::BLACK);
        paint(&mut img, 2, 2, 8, 6, Rgb::WHITE);
        paint(&mut img, 5, 4, 3, 3, Rgb::new(240, 20, 30));
        let labels = label_regions(&img);
        let id = locate_seed(&img, &labels, &SeedParams::default()).unwrap();
        assert_eq!(Some(id), labels.get(6, 5));
    }

    #[test]
    fn sparse_red_is_ignored() {
        let mut img = ColorImage::new(8, 8, Rgb::BLACK);
        // 6 of 9 pixels red: one short.
        paint(&mut img, 2, 2, 3, 2, Rgb::RED);
        let labels = label_regions(&img);
        assert_eq!(
            locate_seed(&img, &labels, &SeedParams::default()),
            Err(SeedError::NotFound)
        );
        let relaxed = SeedParams {
            min_hits: 6,
            ..SeedParams::default()
        };
        assert!(locate_seed(&img, &labels, &relaxed).is_ok());
    }

    #[test]
    fn thresholds_are_strict() {
        let mut img = ColorImage::new(5, 5, Rgb::BLACK);
        paint(&mut img, 1, 1, 3, 3, Rgb::new(230, 0, 0));
        let labels = label_regions(&img);
        assert_eq!(
            locate_seed(&img, &labels, &SeedParams::default()),
            Err(SeedError::NotFound)
        );
    }

    #[test]
    fn first_marker_in_raster_order_wins() {
        let mut img = ColorImage::new(16, 10, Rgb::BLACK);
        paint(&mut img, 10, 1, 3, 3, Rgb::RED);
        paint(&mut img, 1, 5, 3, 3, Rgb::RED);
        let labels = label_regions(&img);
        let id = locate_seed(&img, &labels, &SeedParams::default()).unwrap();
        assert_eq!(Some(id), labels.get(11, 2));
    }

    #[test]
    fn tiny_or_mismatched_inputs() {
        let img = ColorImage::new(2, 5, Rgb::RED);
        let labels = label_regions(&img);
        assert_eq!(
            locate_seed(&img, &labels, &SeedParams::default()),
            Err(SeedError::ImageTooSmall {
                width: 2,
                height: 5
            })
        );

        let big = ColorImage::new(6, 6, Rgb::RED);
        assert!(matches!(
            locate_seed(&big, &labels, &SeedParams::default()),
            Err(SeedError::SizeMismatch { .. })
        ));
    }
}
