use std::path::Path;

use arrow_chase_core::Rgb;
use arrow_chase_regions::{BinarizeParams, RegionStats, SeedParams, ShapeError, TipParams};
use serde::{Deserialize, Serialize};

use crate::ChaseError;

/// Shape gate deciding whether a region is an arrow.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptParams {
    /// Inclusive bounds on the truncated `perimeter^2 / area`.
    pub min_compactness: usize,
    pub max_compactness: usize,
    /// Inclusive bounds on the eigenvalue ratio.
    pub min_elongation: f64,
    pub max_elongation: f64,
}

impl Default for AcceptParams {
    fn default() -> Self {
        Self {
            min_compactness: 14,
            max_compactness: 17,
            min_elongation: 3.5,
            max_elongation: 4.15,
        }
    }
}

impl AcceptParams {
    /// `Ok(true)` for an arrow, `Ok(false)` for a terminal region.
    ///
    /// A region whose elongation is undefined yields the shape error instead.
    pub fn is_arrow(&self, region: &RegionStats) -> Result<bool, ShapeError> {
        let elongation = region.elongation?;
        let compactness = region.compactness();
        Ok((self.min_compactness..=self.max_compactness).contains(&compactness)
            && (self.min_elongation..=self.max_elongation).contains(&elongation))
    }
}

/// Ray-march settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    /// Fractional bits of the fixed-point ray position.
    pub fraction_bits: u32,
    /// Label the ray may always cross besides the current region.
    ///
    /// Id `1` is whatever region owns the top-left pixel, normally the
    /// background. Arrow maps whose background does not touch that corner
    /// break this assumption.
    pub pass_through_label: u32,
    /// Color written onto every pixel the ray crosses.
    pub highlight: Rgb,
    /// Optional cap on the number of regions visited.
    pub max_hops: Option<usize>,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            fraction_bits: 12,
            pass_through_label: 1,
            highlight: Rgb::MAGENTA,
            max_hops: None,
        }
    }
}

/// Every tunable of a chase run in one place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChaseParams {
    #[serde(default)]
    pub binarize: BinarizeParams,
    #[serde(default)]
    pub seed: SeedParams,
    #[serde(default)]
    pub tip: TipParams,
    #[serde(default)]
    pub accept: AcceptParams,
    #[serde(default)]
    pub trace: TraceParams,
}

impl ChaseParams {
    /// Load from a JSON file; absent sections keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ChaseError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
