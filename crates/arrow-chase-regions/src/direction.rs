//! Tip selection: the boundary pixel a region points at.
//!
//! The principal axis from the moments is unsigned and only known modulo a
//! quarter turn once folded, so the tip is recovered from the boundary:
//! among boundary pixels whose direction from the centroid matches the axis
//! angle, the farthest one wins.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use arrow_chase_core::PixelPos;
use serde::{Deserialize, Serialize};

use crate::shape::{RegionStats, RegionTable, ShapeError};

/// Tip selection settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipParams {
    /// Max angular distance (radians) between a boundary direction and the
    /// principal axis, compared with either sign of the axis angle.
    pub angle_tolerance: f64,
}

impl Default for TipParams {
    fn default() -> Self {
        Self {
            angle_tolerance: 0.03,
        }
    }
}

/// Fold an angle into `(-pi/4, pi/4]` by adding or removing a quarter turn.
#[inline]
pub fn fold_quarter_turn(mut angle: f64) -> f64 {
    if angle > FRAC_PI_4 {
        angle -= FRAC_PI_2;
    }
    if angle <= -FRAC_PI_4 {
        angle += FRAC_PI_2;
    }
    angle
}

/// Unsigned angle of the centroid-to-pixel vector against the x axis,
/// folded into `(-pi/4, pi/4]`. Vertical vectors count as `pi/2`.
#[inline]
fn boundary_angle(centroid: PixelPos, p: PixelPos) -> f64 {
    let dx = p.x.abs_diff(centroid.x) as f64;
    let dy = p.y.abs_diff(centroid.y) as f64;
    let raw = if dx == 0.0 {
        FRAC_PI_2
    } else {
        (dy / dx).atan()
    };
    fold_quarter_turn(raw)
}

#[inline]
fn dist2(a: PixelPos, b: PixelPos) -> usize {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    dx * dx + dy * dy
}

/// Pick the tip pixel of one region.
///
/// Candidates are boundary pixels whose folded angle is within
/// `angle_tolerance` of `+theta` or `-theta`. The farthest candidate from
/// the centroid is returned; ties keep the earliest pixel in raster order.
pub fn find_tip(
    boundary: &[PixelPos],
    centroid: PixelPos,
    theta: f64,
    params: &TipParams,
) -> Result<PixelPos, ShapeError> {
    let eps = params.angle_tolerance;
    boundary
        .iter()
        .copied()
        .filter(|&p| {
            let at = boundary_angle(centroid, p);
            (at - theta).abs() < eps || (at + theta).abs() < eps
        })
        .fold(None, |best: Option<(usize, PixelPos)>, p| {
            let d = dist2(p, centroid);
            match best {
                Some((bd, _)) if bd >= d => best,
                _ => Some((d, p)),
            }
        })
        .map(|(_, p)| p)
        .ok_or(ShapeError::NoTipCandidate)
}

/// Tip of every region, indexed by region id.
#[derive(Clone, Debug, Default)]
pub struct TipTable {
    tips: Vec<Result<PixelPos, ShapeError>>,
}

impl TipTable {
    /// `None` for an unknown id, otherwise the region's tip or the reason it has none.
    #[inline]
    pub fn get(&self, id: u32) -> Option<Result<PixelPos, ShapeError>> {
        let idx = usize::try_from(id).ok()?.checked_sub(1)?;
        self.tips.get(idx).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }
}

fn region_tip(region: &RegionStats, params: &TipParams) -> Result<PixelPos, ShapeError> {
    let theta = region.orientation?;
    find_tip(&region.boundary, region.centroid, theta, params)
}

/// Run [`find_tip`] for every region of `table`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(table, params), fields(regions = table.len()))
)]
pub fn estimate_tips(table: &RegionTable, params: &TipParams) -> TipTable {
    let tips = table
        .iter()
        .map(|r| {
            let tip = region_tip(r, params);
            if let Err(e) = tip {
                log::trace!("region {}: no tip ({})", r.id, e);
            }
            tip
        })
        .collect();
    TipTable { tips }
}
