//! Region-to-region traversal.
//!
//! Starting from the seed region the tracer repeats: accept-test the current
//! region, aim from its centroid at its tip, march a fixed-point ray until it
//! leaves the region (and the pass-through label), then continue in whatever
//! region the ray landed in. Every visited id is remembered so a chain that
//! loops back terminates instead of spinning.

use std::fmt;

use arrow_chase_core::{ColorImage, LabelGrid, PixelPos};
use arrow_chase_regions::{RegionTable, ShapeError, TipTable};
use serde::Serialize;

use crate::params::{AcceptParams, TraceParams};

/// Why a traversal stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// The region failed the arrow test: this is where the chain ends.
    Destination { region: u32 },
    /// The ray left the image before reaching another region.
    DeadEnd { region: u32 },
    /// The ray entered a region that was already visited.
    CycleDetected { region: u32 },
    /// `max_hops` regions were visited.
    HopLimit { region: u32 },
    /// The region is an arrow but has no usable tip.
    NoDirection { region: u32, reason: ShapeError },
    /// Tip and centroid coincide, so the ray would not move.
    Stationary { region: u32 },
    /// Elongation is undefined for the region.
    ShapeAnalysis { region: u32, reason: ShapeError },
    /// The id is not a region of the label grid.
    UnknownRegion { region: u32 },
    /// No start marker was found, nothing was traversed.
    SeedNotFound,
}

impl Termination {
    /// Region the traversal stopped in, if any.
    pub fn region(&self) -> Option<u32> {
        match *self {
            Termination::Destination { region }
            | Termination::DeadEnd { region }
            | Termination::CycleDetected { region }
            | Termination::HopLimit { region }
            | Termination::NoDirection { region, .. }
            | Termination::Stationary { region }
            | Termination::ShapeAnalysis { region, .. }
            | Termination::UnknownRegion { region } => Some(region),
            Termination::SeedNotFound => None,
        }
    }

    #[inline]
    pub fn is_destination(&self) -> bool {
        matches!(self, Termination::Destination { .. })
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Destination { region } => write!(f, "destination reached in region {region}"),
            Termination::DeadEnd { region } => write!(f, "dead end: ray from region {region} left the image"),
            Termination::CycleDetected { region } => write!(f, "cycle detected: region {region} visited twice"),
            Termination::HopLimit { region } => write!(f, "hop limit reached at region {region}"),
            Termination::NoDirection { region, reason } => {
                write!(f, "no direction for region {region}: {reason}")
            }
            Termination::Stationary { region } => {
                write!(f, "region {region} has its tip on its centroid")
            }
            Termination::ShapeAnalysis { region, reason } => {
                write!(f, "shape analysis failed for region {region}: {reason}")
            }
            Termination::UnknownRegion { region } => write!(f, "unknown region id {region}"),
            Termination::SeedNotFound => write!(f, "start marker not found"),
        }
    }
}

/// One ray march out of one arrow region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub region: u32,
    pub centroid: PixelPos,
    pub tip: PixelPos,
    /// Per-step fixed-point delta `[dx, dy]`.
    pub step: [i64; 2],
    /// Number of pixels highlighted by this march.
    pub painted: usize,
    /// Pixel where the march stopped; outside the image for a dead end.
    pub stop: [i64; 2],
}

/// Full result of one traversal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceOutcome {
    pub hops: Vec<Hop>,
    pub termination: Termination,
}

impl TraceOutcome {
    pub fn seed_not_found() -> Self {
        Self {
            hops: Vec::new(),
            termination: Termination::SeedNotFound,
        }
    }

    /// Region ids in visiting order, including the terminal one.
    pub fn visited(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.hops.iter().map(|h| h.region).collect();
        if let Some(last) = self.termination.region() {
            if !matches!(self.termination, Termination::DeadEnd { .. }) {
                ids.push(last);
            }
        }
        ids
    }

    pub fn painted(&self) -> usize {
        self.hops.iter().map(|h| h.painted).sum()
    }
}

/// Fixed-point ray advancing exactly one pixel per step along its dominant axis.
#[derive(Clone, Copy, Debug)]
struct Ray {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    bits: u32,
}

impl Ray {
    /// Ray from the centre of pixel `from` through the centre of pixel `to`;
    /// `None` when they coincide.
    fn new(from: PixelPos, to: PixelPos, bits: u32) -> Option<Self> {
        let bits = bits.min(30);
        let (fx, fy) = (from.x as i64, from.y as i64);
        let (tx, ty) = (to.x as i64, to.y as i64);
        let span = (tx - fx).abs().max((ty - fy).abs());
        if span == 0 {
            return None;
        }
        let half = (1i64 << bits) >> 1;
        let x = (fx << bits) + half;
        let y = (fy << bits) + half;
        let ex = (tx << bits) + half;
        let ey = (ty << bits) + half;
        Some(Self {
            x,
            y,
            dx: (ex - x) / span,
            dy: (ey - y) / span,
            bits,
        })
    }

    #[inline]
    fn pixel(&self) -> (i64, i64) {
        (self.x >> self.bits, self.y >> self.bits)
    }

    #[inline]
    fn advance(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }
}

enum RayStop {
    Exited,
    Entered(u32),
}

/// Walks the arrow chain over precomputed region data.
pub struct PathTracer<'a> {
    labels: &'a LabelGrid,
    regions: &'a RegionTable,
    tips: &'a TipTable,
    accept: AcceptParams,
    params: TraceParams,
}

impl<'a> PathTracer<'a> {
    pub fn new(
        labels: &'a LabelGrid,
        regions: &'a RegionTable,
        tips: &'a TipTable,
        accept: &AcceptParams,
        params: &TraceParams,
    ) -> Self {
        Self {
            labels,
            regions,
            tips,
            accept: *accept,
            params: *params,
        }
    }

    /// Traverse from `start`, highlighting marched pixels on `canvas`.
    ///
    /// `canvas` must have the label grid's dimensions; pixels outside it are
    /// skipped.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, canvas))
    )]
    pub fn trace(&self, start: u32, canvas: &mut ColorImage) -> TraceOutcome {
        let mut visited = vec![false; self.labels.count as usize + 1];
        let mut hops = Vec::new();
        let mut current = start;

        let termination = loop {
            let Some(region) = self.regions.get(current) else {
                break Termination::UnknownRegion { region: current };
            };
            let Some(seen) = visited.get_mut(current as usize) else {
                break Termination::UnknownRegion { region: current };
            };
            if *seen {
                break Termination::CycleDetected { region: current };
            }
            *seen = true;

            if self.params.max_hops.is_some_and(|max| hops.len() >= max) {
                break Termination::HopLimit { region: current };
            }

            match self.accept.is_arrow(region) {
                Ok(true) => {}
                Ok(false) => break Termination::Destination { region: current },
                Err(reason) => {
                    log::warn!("region {current}: {reason}");
                    break Termination::ShapeAnalysis {
                        region: current,
                        reason,
                    };
                }
            }

            let tip = match self.tips.get(current) {
                Some(Ok(tip)) => tip,
                Some(Err(reason)) => {
                    log::warn!("region {current} passed the arrow test but {reason}");
                    break Termination::NoDirection {
                        region: current,
                        reason,
                    };
                }
                None => break Termination::UnknownRegion { region: current },
            };

            let Some(ray) = Ray::new(region.centroid, tip, self.params.fraction_bits) else {
                break Termination::Stationary { region: current };
            };

            let (stop, painted, at) = self.march(ray, current, canvas);
            log::info!(
                "region {current}: centroid ({}, {}) -> tip ({}, {}), painted {painted} px",
                region.centroid.x,
                region.centroid.y,
                tip.x,
                tip.y
            );
            hops.push(Hop {
                region: current,
                centroid: region.centroid,
                tip,
                step: [ray.dx, ray.dy],
                painted,
                stop: [at.0, at.1],
            });

            match stop {
                RayStop::Exited => break Termination::DeadEnd { region: current },
                RayStop::Entered(next) => current = next,
            }
        };

        log::info!("traversal finished after {} hops: {termination}", hops.len());
        TraceOutcome { hops, termination }
    }

    /// Step until the ray leaves the grid or reaches a pixel that is neither
    /// `current` nor the pass-through label. Returns the stop reason, the
    /// number of highlighted pixels and the stopping pixel.
    fn march(
        &self,
        mut ray: Ray,
        current: u32,
        canvas: &mut ColorImage,
    ) -> (RayStop, usize, (i64, i64)) {
        let mut painted = 0usize;
        loop {
            let (x, y) = ray.pixel();
            let Some(label) = self.labels.at(x, y) else {
                return (RayStop::Exited, painted, (x, y));
            };
            if label != current && label != self.params.pass_through_label {
                return (RayStop::Entered(label), painted, (x, y));
            }
            canvas.set(x as usize, y as usize, self.params.highlight);
            painted += 1;
            ray.advance();
        }
    }
}
