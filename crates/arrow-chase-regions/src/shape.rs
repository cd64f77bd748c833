//! Region statistics from a label grid: area, boundary, centroid and
//! second-order central moments, plus the two shape descriptors derived
//! from them (elongation and principal-axis orientation).

use std::f64::consts::FRAC_PI_4;

use arrow_chase_core::{LabelGrid, PixelPos, Rect};
use serde::{Deserialize, Serialize};

/// Per-region shape failures. None of them are fatal to a run; the tracer
/// treats the affected region as terminal.
#[derive(thiserror::Error, Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeError {
    #[error("covariance is isotropic (m20 == m02 and m11 == 0)")]
    Isotropic,
    #[error("covariance has a zero minor eigenvalue")]
    ZeroMinorAxis,
    #[error("no boundary pixel lies on the principal axis")]
    NoTipCandidate,
}

/// Second-order central moments `m_pq = sum (x - cx)^p (y - cy)^q`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralMoments {
    pub m20: f64,
    pub m02: f64,
    pub m11: f64,
}

impl CentralMoments {
    /// `sqrt((m20 - m02)^2 + 4 m11^2)`, the eigenvalue gap of the scatter matrix.
    #[inline]
    fn eigen_gap(&self) -> f64 {
        let d = self.m20 - self.m02;
        (d * d + 4.0 * self.m11 * self.m11).sqrt()
    }

    #[inline]
    pub fn is_isotropic(&self) -> bool {
        self.m20 == self.m02 && self.m11 == 0.0
    }

    /// Ratio of the larger to the smaller scatter eigenvalue, always `>= 1`.
    pub fn elongation(&self) -> Result<f64, ShapeError> {
        if self.is_isotropic() {
            return Err(ShapeError::Isotropic);
        }
        let trace = self.m20 + self.m02;
        let gap = self.eigen_gap();
        let minor = trace - gap;
        if minor <= f64::EPSILON * trace.abs().max(1.0) {
            return Err(ShapeError::ZeroMinorAxis);
        }
        Ok((trace + gap) / minor)
    }

    /// Principal axis angle `0.5 * atan(2 m11 / (m20 - m02))`, in `(-pi/4, pi/4]`.
    ///
    /// The axis is unsigned. When `m20 == m02` the quotient is infinite and
    /// the angle saturates at `pi/4`.
    pub fn orientation(&self) -> Result<f64, ShapeError> {
        if self.is_isotropic() {
            return Err(ShapeError::Isotropic);
        }
        let d = self.m20 - self.m02;
        if d == 0.0 {
            return Ok(FRAC_PI_4);
        }
        Ok(0.5 * (2.0 * self.m11 / d).atan())
    }
}

/// Everything derived for one region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionStats {
    pub id: u32,
    pub area: usize,
    /// Number of boundary pixels.
    pub perimeter: usize,
    /// Integer-truncated mean column / row.
    pub centroid: PixelPos,
    pub bbox: Rect,
    pub moments: CentralMoments,
    pub elongation: Result<f64, ShapeError>,
    pub orientation: Result<f64, ShapeError>,
    /// Boundary pixels in raster order.
    pub boundary: Vec<PixelPos>,
}

impl RegionStats {
    /// `perimeter^2 / area`, truncated to an integer.
    #[inline]
    pub fn compactness(&self) -> usize {
        if self.area == 0 {
            return 0;
        }
        self.perimeter * self.perimeter / self.area
    }
}

/// Arena of [`RegionStats`] indexed by region id.
#[derive(Clone, Debug, Default)]
pub struct RegionTable {
    regions: Vec<RegionStats>,
}

impl RegionTable {
    #[inline]
    pub fn get(&self, id: u32) -> Option<&RegionStats> {
        let idx = usize::try_from(id).ok()?.checked_sub(1)?;
        self.regions.get(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionStats> {
        self.regions.iter()
    }
}

#[derive(Clone, Copy)]
struct Accum {
    area: usize,
    sum_x: u64,
    sum_y: u64,
    min: (usize, usize),
    max: (usize, usize),
}

impl Default for Accum {
    fn default() -> Self {
        Self {
            area: 0,
            sum_x: 0,
            sum_y: 0,
            min: (usize::MAX, usize::MAX),
            max: (0, 0),
        }
    }
}

/// A pixel is on its region's boundary when an in-bounds 4-neighbour carries
/// another label. Neighbours outside the grid count as the pixel itself, so
/// touching the image frame alone does not make a boundary pixel.
#[inline]
fn is_boundary(grid: &LabelGrid, x: usize, y: usize, label: u32) -> bool {
    let (w, h) = (grid.width, grid.height);
    let idx = y * w + x;
    (y > 0 && grid.labels[idx - w] != label)
        || (y + 1 < h && grid.labels[idx + w] != label)
        || (x > 0 && grid.labels[idx - 1] != label)
        || (x + 1 < w && grid.labels[idx + 1] != label)
}

/// Compute statistics for every region of `grid`.
///
/// Two raster passes: the first collects area, coordinate sums, bounding
/// boxes and boundary pixels; the second sums central moments around each
/// region's truncated centroid.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(grid), fields(regions = grid.count))
)]
pub fn analyze_regions(grid: &LabelGrid) -> RegionTable {
    let k = grid.count as usize;
    let mut acc = vec![Accum::default(); k];
    let mut boundary: Vec<Vec<PixelPos>> = vec![Vec::new(); k];

    for (x, y, label) in grid.iter() {
        let Some(i) = (label as usize).checked_sub(1).filter(|&i| i < k) else {
            continue;
        };
        let a = &mut acc[i];
        a.area += 1;
        a.sum_x += x as u64;
        a.sum_y += y as u64;
        a.min = (a.min.0.min(x), a.min.1.min(y));
        a.max = (a.max.0.max(x), a.max.1.max(y));
        if is_boundary(grid, x, y, label) {
            boundary[i].push(PixelPos::new(x, y));
        }
    }

    let centroids: Vec<(i64, i64)> = acc
        .iter()
        .map(|a| match a.area as u64 {
            0 => (0, 0),
            n => ((a.sum_x / n) as i64, (a.sum_y / n) as i64),
        })
        .collect();

    let mut moments = vec![CentralMoments::default(); k];
    for (x, y, label) in grid.iter() {
        let Some(i) = (label as usize).checked_sub(1).filter(|&i| i < k) else {
            continue;
        };
        let (cx, cy) = centroids[i];
        let dx = (x as i64 - cx) as f64;
        let dy = (y as i64 - cy) as f64;
        let m = &mut moments[i];
        m.m20 += dx * dx;
        m.m02 += dy * dy;
        m.m11 += dx * dy;
    }

    let regions = acc
        .into_iter()
        .zip(boundary)
        .zip(moments)
        .enumerate()
        .map(|(i, ((a, boundary), moments))| {
            let (cx, cy) = centroids[i];
            let stats = RegionStats {
                id: i as u32 + 1,
                area: a.area,
                perimeter: boundary.len(),
                centroid: PixelPos::new(cx as usize, cy as usize),
                bbox: Rect::from_inclusive(a.min.0, a.min.1, a.max.0, a.max.1),
                moments,
                elongation: moments.elongation(),
                orientation: moments.orientation(),
                boundary,
            };
            log::debug!(
                "region {}: area={} perim={} compact={} elong={:?} theta={:?} centroid=({}, {})",
                stats.id,
                stats.area,
                stats.perimeter,
                stats.compactness(),
                stats.elongation,
                stats.orientation,
                cx,
                cy
            );
            stats
        })
        .collect();

    RegionTable { regions }
}
