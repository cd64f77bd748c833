use arrow_chase_core::{ColorImage, LabelGrid, Rect};
use arrow_chase_regions::{
    analyze_regions, binarize, estimate_tips, label_regions, locate_seed, RegionTable,
};

use crate::params::ChaseParams;
use crate::report::ChaseReport;
use crate::trace::{PathTracer, TraceOutcome};

/// Output of [`ArrowChaser::run`].
#[derive(Clone, Debug)]
pub struct ChaseResult {
    /// Rectangles along the path. The traversal never produces any, so this
    /// is always empty; callers still write it out as the path file.
    pub path: Vec<Rect>,
    /// Copy of the input with the traversed rays highlighted.
    pub image: ColorImage,
    pub labels: LabelGrid,
    pub regions: RegionTable,
    pub report: ChaseReport,
}

/// End-to-end runner: segment, analyse, find the start, follow the arrows.
#[derive(Clone, Debug, Default)]
pub struct ArrowChaser {
    params: ChaseParams,
}

impl ArrowChaser {
    pub fn new(params: ChaseParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ChaseParams {
        &self.params
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip(self, image),
            fields(width = image.width, height = image.height)
        )
    )]
    pub fn run(&self, image: &ColorImage) -> ChaseResult {
        let binary = binarize(image, &self.params.binarize);
        let labels = label_regions(&binary);
        let regions = analyze_regions(&labels);
        let tips = estimate_tips(&regions, &self.params.tip);
        log::info!(
            "{}x{} image: {} regions",
            image.width,
            image.height,
            regions.len()
        );

        let mut canvas = image.clone();
        let seed = match locate_seed(image, &labels, &self.params.seed) {
            Ok(id) => {
                log::info!("start marker in region {id}");
                Some(id)
            }
            Err(e) => {
                log::warn!("{e}");
                None
            }
        };

        let outcome = match seed {
            Some(start) => PathTracer::new(
                &labels,
                &regions,
                &tips,
                &self.params.accept,
                &self.params.trace,
            )
            .trace(start, &mut canvas),
            None => TraceOutcome::seed_not_found(),
        };

        let report = ChaseReport::new(
            image.width,
            image.height,
            &regions,
            &tips,
            seed,
            &outcome,
        );

        ChaseResult {
            path: Vec::new(),
            image: canvas,
            labels,
            regions,
            report,
        }
    }
}

/// Run with default parameters.
pub fn chase(image: &ColorImage) -> ChaseResult {
    ArrowChaser::default().run(image)
}
