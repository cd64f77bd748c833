use serde::{Deserialize, Serialize};

/// One 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::gray(0);
    pub const WHITE: Rgb = Rgb::gray(255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// BT.601 luma, `0.299 R + 0.587 G + 0.114 B`, on the 0..255 scale.
    #[inline]
    pub fn luminance(self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }
}

/// Owned row-major RGB raster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColorImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Rgb>, // row-major, len = w*h
}

impl ColorImage {
    /// Image of the given size filled with one color.
    pub fn new(width: usize, height: usize, fill: Rgb) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel in raster order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing buffer; `None` if its length does not match `width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<Rgb>) -> Option<Self> {
        let expected = width.checked_mul(height)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&mut self.data[y * self.width + x])
    }

    /// Overwrite one pixel. Returns `false` (and writes nothing) when out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Rgb) -> bool {
        match self.get_mut(x, y) {
            Some(px) => {
                *px = value;
                true
            }
            None => false,
        }
    }

    /// Iterate `(x, y, pixel)` in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        let w = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &p)| (i % w, i / w, p))
    }

    /// Apply `f` to every pixel independently.
    pub fn map_pixels(&self, mut f: impl FnMut(Rgb) -> Rgb) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Apply `f` to the `(2r+1) x (2r+1)` neighbourhood of every pixel.
    ///
    /// The window is handed to `f` row-major, centre pixel at index
    /// `(2r+1) * r + r`. Coordinates outside the raster are clamped to the
    /// nearest edge pixel, so border pixels see replicated edge values.
    pub fn map_window<F>(&self, radius: usize, mut f: F) -> Self
    where
        F: FnMut(&[Rgb]) -> Rgb,
    {
        if self.is_empty() {
            return self.clone();
        }
        let side = 2 * radius + 1;
        let mut window = Vec::with_capacity(side * side);
        let max_x = self.width - 1;
        let max_y = self.height - 1;

        Self::from_fn(self.width, self.height, |x, y| {
            window.clear();
            for wy in 0..side {
                let sy = (y + wy).saturating_sub(radius).min(max_y);
                let row = &self.data[sy * self.width..(sy + 1) * self.width];
                for wx in 0..side {
                    let sx = (x + wx).saturating_sub(radius).min(max_x);
                    window.push(row[sx]);
                }
            }
            f(&window)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_weights_sum_to_full_scale() {
        assert!((Rgb::WHITE.luminance() - 255.0).abs() < 1e-9);
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::RED.luminance() - 76.245).abs() < 1e-9);
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(ColorImage::from_raw(3, 2, vec![Rgb::BLACK; 5]).is_none());
        assert!(ColorImage::from_raw(3, 2, vec![Rgb::BLACK; 6]).is_some());
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut img = ColorImage::new(4, 3, Rgb::BLACK);
        assert!(img.set(3, 2, Rgb::RED));
        assert!(!img.set(4, 0, Rgb::RED));
        assert_eq!(img.get(3, 2), Some(Rgb::RED));
        assert_eq!(img.get(0, 3), None);
    }

    #[test]
    fn pixels_iterates_in_raster_order() {
        let img = ColorImage::from_fn(3, 2, |x, y| Rgb::gray((y * 3 + x) as u8));
        let order: Vec<_> = img.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert!(img.pixels().all(|(x, y, p)| p.r as usize == y * 3 + x));
    }

    #[test]
    fn map_window_clamps_to_edges() {
        let img = ColorImage::from_fn(3, 3, |x, y| Rgb::gray((y * 3 + x) as u8));
        let mut seen = Vec::new();
        let _ = img.map_window(1, |w| {
            seen.push(w.iter().map(|p| p.r).collect::<Vec<_>>());
            w[4]
        });
        // Top-left pixel: rows/cols -1 are replicated from row/col 0.
        assert_eq!(seen[0], vec![0, 0, 1, 0, 0, 1, 3, 3, 4]);
        // Centre pixel sees the whole image.
        assert_eq!(seen[4], (0..9).collect::<Vec<u8>>());
    }

    #[test]
    fn map_window_identity_on_centre() {
        let img = ColorImage::from_fn(5, 4, |x, y| Rgb::new(x as u8, y as u8, 7));
        let out = img.map_window(2, |w| w[12]);
        assert_eq!(out, img);
    }
}
