//! Serializable summary of one chase run.

use arrow_chase_core::{PixelPos, Rect};
use arrow_chase_regions::{RegionStats, RegionTable, ShapeError, TipTable};
use serde::Serialize;

use crate::trace::{Hop, Termination, TraceOutcome};

/// Shape measurements of one region, flattened for JSON output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionSummary {
    pub id: u32,
    pub area: usize,
    pub perimeter: usize,
    pub compactness: usize,
    pub centroid: PixelPos,
    pub bbox: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elongation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<PixelPos>,
    /// First shape error hit while analysing the region, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_error: Option<ShapeError>,
}

impl RegionSummary {
    pub fn new(region: &RegionStats, tip: Option<Result<PixelPos, ShapeError>>) -> Self {
        let tip_error = tip.and_then(|t| t.err());
        Self {
            id: region.id,
            area: region.area,
            perimeter: region.perimeter,
            compactness: region.compactness(),
            centroid: region.centroid,
            bbox: region.bbox,
            elongation: region.elongation.ok(),
            orientation: region.orientation.ok(),
            tip: tip.and_then(|t| t.ok()),
            shape_error: region.elongation.err().or(tip_error),
        }
    }
}

/// Everything a run found, in a form that can be written as JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChaseReport {
    pub width: usize,
    pub height: usize,
    pub region_count: u32,
    /// Region under the start marker.
    pub seed: Option<u32>,
    pub regions: Vec<RegionSummary>,
    pub hops: Vec<Hop>,
    pub termination: Termination,
    /// Always empty: the traversal highlights pixels but emits no rectangles.
    pub path: Vec<Rect>,
}

impl ChaseReport {
    pub fn new(
        width: usize,
        height: usize,
        regions: &RegionTable,
        tips: &TipTable,
        seed: Option<u32>,
        outcome: &TraceOutcome,
    ) -> Self {
        Self {
            width,
            height,
            region_count: regions.len() as u32,
            seed,
            regions: regions
                .iter()
                .map(|r| RegionSummary::new(r, tips.get(r.id)))
                .collect(),
            hops: outcome.hops.clone(),
            termination: outcome.termination,
            path: Vec::new(),
        }
    }

    /// Region ids in visiting order, including the terminal one.
    pub fn visited(&self) -> Vec<u32> {
        TraceOutcome {
            hops: self.hops.clone(),
            termination: self.termination,
        }
        .visited()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
