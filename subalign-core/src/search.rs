//! Coarse-to-fine offset search between two token streams.

use crate::bucket::BucketSequence;
use crate::encoder::TokenEncoder;
use crate::error::{ConfigError, Result, Side};
use crate::lang::Language;
use crate::similarity::SimilarityMeasure;
use crate::traits::Lexicon;
use crate::types::TokenStream;
use serde::{Deserialize, Serialize};

/// Bucket widths in seconds, coarsest first.
pub const RESOLUTIONS: [f64; 9] = [5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01];

/// Default number of candidate offsets at the coarsest resolution.
const DEFAULT_MAX_ITERS: usize = 100;

/// Search parameters.
#[derive(clap::Args, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidate offsets evaluated at the coarsest resolution
    #[arg(long, default_value_t = DEFAULT_MAX_ITERS)]
    pub max_iters: usize,

    /// Similarity measure used to compare buckets
    #[arg(long, value_enum, default_value_t = SimilarityMeasure::OverlapCoefficient)]
    pub measure: SimilarityMeasure,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iters: DEFAULT_MAX_ITERS,
            measure: SimilarityMeasure::OverlapCoefficient,
        }
    }
}

impl SearchConfig {
    pub fn new(max_iters: usize, measure: SimilarityMeasure) -> Self {
        Self { max_iters, measure }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_iters == 0 {
            return Err(ConfigError::InvalidMaxIters(self.max_iters));
        }
        Ok(())
    }
}

/// Number of candidates needed at `width` to cover one bucket of
/// `previous_width` on each side.
pub fn step_budget(previous_width: f64, width: f64) -> usize {
    2 * (previous_width / width).ceil() as usize + 1
}

/// Outcome of one resolution step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStep {
    /// Bucket width in seconds
    pub width: f64,
    /// Candidate offsets evaluated
    pub max_iters: usize,
    /// Best bucket offset found
    pub offset_buckets: i64,
    /// Mean similarity at that offset
    pub similarity: f64,
    /// Total shared ids across reference buckets at that offset
    pub overlap: f64,
    /// Running offset in seconds after this step
    pub total_offset: f64,
}

/// Result of a full alignment run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Seconds to add to every target timestamp to match the reference.
    ///
    /// Negative when the target is shown too late.
    pub offset: f64,
    pub measure: SimilarityMeasure,
    pub steps: Vec<AlignmentStep>,
}

/// Align `target` on `reference` with a built-in language lexicon.
pub fn align(
    reference: &TokenStream,
    target: &TokenStream,
    language: Language,
    config: &SearchConfig,
) -> Result<Alignment> {
    align_with_lexicon(reference, target, language, config)
}

/// Align `target` on `reference`.
///
/// Both streams must share one vocabulary: the lexicon's stopwords and
/// stems apply to each of them. At every width of [`RESOLUTIONS`] the target
/// is bucketed with the running offset already applied, the best bucket
/// offset is searched around zero and folded into the running offset. The
/// first step evaluates `config.max_iters` candidates, later steps just
/// enough to cover one bucket of the previous width on each side. Earlier
/// decisions are never revisited.
pub fn align_with_lexicon<L: Lexicon>(
    reference: &TokenStream,
    target: &TokenStream,
    lexicon: L,
    config: &SearchConfig,
) -> Result<Alignment> {
    config.validate()?;
    reference.validate().map_err(|e| e.on(Side::Reference))?;
    target.validate().map_err(|e| e.on(Side::Target))?;

    tracing::info!(
        reference_tokens = reference.len(),
        target_tokens = target.len(),
        reference_span = reference.duration(),
        target_span = target.duration(),
        measure = %config.measure,
        max_iters = config.max_iters,
        "finding offset between two streams"
    );

    let mut encoder = TokenEncoder::new(lexicon);
    let mut total_offset = 0.0;
    let mut previous_width = None;
    let mut steps = Vec::with_capacity(RESOLUTIONS.len());

    for width in RESOLUTIONS {
        let max_iters = match previous_width {
            Some(previous) => step_budget(previous, width),
            None => config.max_iters,
        };

        let reference_buckets = BucketSequence::new(&mut encoder, reference, width, 0.0)
            .map_err(|e| e.on_side(Side::Reference))?;
        let target_buckets = BucketSequence::new(&mut encoder, target, width, total_offset)
            .map_err(|e| e.on_side(Side::Target))?;

        let (offset, similarity) =
            reference_buckets.find_offset(&target_buckets, max_iters, config.measure);

        let overlap = reference_buckets.similarity(
            &target_buckets,
            offset,
            SimilarityMeasure::OverlapCount,
        ) * reference_buckets.len() as f64;

        total_offset -= offset as f64 * width;
        previous_width = Some(width);

        tracing::debug!(
            width,
            max_iters,
            offset,
            total_offset,
            similarity,
            overlap,
            "aligned resolution"
        );

        steps.push(AlignmentStep {
            width,
            max_iters,
            offset_buckets: offset,
            similarity,
            overlap,
            total_offset,
        });
    }

    tracing::info!(
        offset = total_offset,
        vocabulary = encoder.len(),
        "found offset"
    );

    Ok(Alignment {
        offset: total_offset,
        measure: config.measure,
        steps,
    })
}
