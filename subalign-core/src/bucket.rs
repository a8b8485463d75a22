//! Time-bucket discretization of token streams.

use crate::encoder::{CanonicalId, TokenEncoder};
use crate::error::{ConfigError, InputError, Result};
use crate::similarity::SimilarityMeasure;
use crate::traits::Lexicon;
use crate::types::TokenStream;
use std::collections::{BTreeMap, BTreeSet};

/// Set of canonical ids active during one bucket.
pub type Bucket = BTreeSet<CanonicalId>;

/// Token stream discretized into fixed-width time buckets.
///
/// Bucket `k` covers `[k * width - shift, (k + 1) * width - shift)` seconds
/// of the source stream. A token lands in every bucket from the one holding
/// its start to the one holding its end, inclusive. Buckets that end up
/// without any id (silence, or only stopwords) are absent from the map.
#[derive(Clone, Debug)]
pub struct BucketSequence {
    width: f64,
    shift: f64,
    buckets: BTreeMap<i64, Bucket>,
}

impl BucketSequence {
    /// Bucket `stream` with the given width and shift, both in seconds.
    ///
    /// The shift is added to every timestamp before bucketing. The encoder
    /// is borrowed mutably only to allocate ids for words it has not seen.
    /// A stream made only of stopwords is rejected, as no bucket would be
    /// left to average over.
    pub fn new<L: Lexicon>(
        encoder: &mut TokenEncoder<L>,
        stream: &TokenStream,
        width: f64,
        shift: f64,
    ) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigError::InvalidWidth(width).into());
        }
        if !shift.is_finite() {
            return Err(ConfigError::InvalidShift(shift).into());
        }
        if stream.is_empty() {
            return Err(InputError::EmptyStream.into());
        }

        let mut sequence = Self {
            width,
            shift,
            buckets: BTreeMap::new(),
        };

        // Buckets are only created when an id is inserted, which is the
        // same as filling the whole index range and pruning empty ones.
        for token in stream {
            let Some(id) = encoder.encode(&token.text) else {
                continue;
            };

            for index in sequence.index(token.start)..=sequence.index(token.end) {
                sequence.buckets.entry(index).or_default().insert(id);
            }
        }

        if sequence.buckets.is_empty() {
            return Err(InputError::NoEncodableTokens.into());
        }

        tracing::trace!(
            width,
            shift,
            tokens = stream.len(),
            buckets = sequence.buckets.len(),
            "bucketed stream"
        );

        Ok(sequence)
    }

    /// Bucket index of a timestamp in seconds.
    pub fn index(&self, secs: f64) -> i64 {
        ((secs + self.shift) / self.width).floor() as i64
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, index: i64) -> Option<&Bucket> {
        self.buckets.get(&index)
    }

    /// Non-empty buckets in index order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Bucket)> {
        self.buckets.iter().map(|(&index, bucket)| (index, bucket))
    }

    /// Mean similarity of every bucket of `self` with the bucket `offset`
    /// indices further in `other`.
    ///
    /// Only the indices present in `self` are averaged over, so the result
    /// is not symmetric. Missing buckets of `other` count as empty. An empty
    /// `self` scores `0.0`.
    pub fn similarity(&self, other: &Self, offset: i64, measure: SimilarityMeasure) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }

        let empty = Bucket::new();
        let total: f64 = self
            .buckets
            .iter()
            .map(|(index, bucket)| {
                let theirs = other.buckets.get(&(index + offset)).unwrap_or(&empty);
                measure.score(bucket, theirs)
            })
            .sum();

        total / self.buckets.len() as f64
    }

    /// Find the bucket offset of `other` that best matches `self`.
    ///
    /// Evaluates `max_iters` candidates in the order of
    /// [`candidate_offsets`] and returns the first one reaching the highest
    /// similarity, together with that similarity. Offset `0` is always
    /// evaluated.
    pub fn find_offset(
        &self,
        other: &Self,
        max_iters: usize,
        measure: SimilarityMeasure,
    ) -> (i64, f64) {
        self.find_offset_with(other, max_iters, measure, |_, _| {})
    }

    /// [`find_offset`](Self::find_offset) reporting every evaluated
    /// `(offset, similarity)` pair to `visit`.
    pub fn find_offset_with<F>(
        &self,
        other: &Self,
        max_iters: usize,
        measure: SimilarityMeasure,
        mut visit: F,
    ) -> (i64, f64)
    where
        F: FnMut(i64, f64),
    {
        let mut best = (0, f64::NEG_INFINITY);

        for offset in candidate_offsets(max_iters.max(1)) {
            let value = self.similarity(other, offset, measure);
            tracing::trace!(offset, value, "evaluated candidate offset");
            visit(offset, value);

            if value > best.1 {
                best = (offset, value);
            }
        }

        best
    }
}

/// Candidate bucket offsets in search order: `0, 1, -1, 2, -2, ...`.
pub fn candidate_offsets(max_iters: usize) -> impl Iterator<Item = i64> {
    (1..=max_iters as i64).map(|i| if i % 2 == 0 { i / 2 } else { -(i / 2) })
}
