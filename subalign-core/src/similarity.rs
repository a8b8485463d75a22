//! Set-similarity measures between two buckets of canonical ids.

use crate::bucket::Bucket;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of the intersection.
///
/// Unbounded, so mostly useful for diagnostics.
pub fn overlap_count(a: &Bucket, b: &Bucket) -> usize {
    a.intersection(b).count()
}

/// Intersection size over the smaller set size, floored at one.
///
/// Stays in `[0, 1]` and tolerates buckets of very different sizes (one word
/// against a whole phrase). The floor makes it total on empty sets.
pub fn overlap_coefficient(a: &Bucket, b: &Bucket) -> f64 {
    overlap_count(a, b) as f64 / a.len().min(b.len()).max(1) as f64
}

/// Intersection size over union size.
///
/// Returns `None` when both sets are empty, where the ratio is undefined.
pub fn jaccard_index(a: &Bucket, b: &Bucket) -> Option<f64> {
    let intersection = overlap_count(a, b);
    let union = a.len() + b.len() - intersection;

    (union > 0).then(|| intersection as f64 / union as f64)
}

/// Similarity measure selector.
#[derive(
    clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum SimilarityMeasure {
    /// Intersection over union
    #[value(name = "jaccard-index")]
    #[serde(rename = "jaccard-index")]
    JaccardIndex,
    /// Intersection over smaller set size
    #[default]
    #[value(name = "overlap-coeff")]
    #[serde(rename = "overlap-coeff")]
    OverlapCoefficient,
    /// Raw intersection size
    #[value(name = "overlap-count")]
    #[serde(rename = "overlap-count")]
    OverlapCount,
}

impl SimilarityMeasure {
    pub const ALL: [Self; 3] = [
        Self::JaccardIndex,
        Self::OverlapCoefficient,
        Self::OverlapCount,
    ];

    /// Score two buckets.
    ///
    /// Jaccard on two empty buckets scores `0.0`.
    pub fn score(self, a: &Bucket, b: &Bucket) -> f64 {
        match self {
            Self::JaccardIndex => jaccard_index(a, b).unwrap_or(0.0),
            Self::OverlapCoefficient => overlap_coefficient(a, b),
            Self::OverlapCount => overlap_count(a, b) as f64,
        }
    }

    /// Command-line key of this measure.
    pub fn key(self) -> &'static str {
        match self {
            Self::JaccardIndex => "jaccard-index",
            Self::OverlapCoefficient => "overlap-coeff",
            Self::OverlapCount => "overlap-count",
        }
    }
}

impl fmt::Display for SimilarityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SimilarityMeasure {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key() == s)
            .ok_or_else(|| ConfigError::UnknownMeasure(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(ids: &[u32]) -> Bucket {
        ids.iter().copied().collect()
    }

    #[test]
    fn counts_common_ids() {
        assert_eq!(overlap_count(&bucket(&[1, 2, 3]), &bucket(&[2, 3, 4])), 2);
        assert_eq!(overlap_count(&bucket(&[]), &bucket(&[1])), 0);
    }

    #[test]
    fn coefficient_uses_smaller_set() {
        let single = bucket(&[7]);
        let phrase = bucket(&[1, 2, 3, 4, 7]);

        assert_eq!(overlap_coefficient(&single, &phrase), 1.0);
        assert_eq!(overlap_coefficient(&phrase, &single), 1.0);
    }

    #[test]
    fn coefficient_is_zero_against_empty_set() {
        assert_eq!(overlap_coefficient(&bucket(&[1, 2]), &bucket(&[])), 0.0);
        assert_eq!(overlap_coefficient(&bucket(&[]), &bucket(&[])), 0.0);
    }

    #[test]
    fn jaccard_divides_by_union() {
        let value = jaccard_index(&bucket(&[1, 2, 3]), &bucket(&[2, 3, 4])).unwrap();
        assert!((value - 0.5).abs() < 1e-12);
    }

    #[test]
    fn jaccard_is_undefined_on_two_empty_sets() {
        assert_eq!(jaccard_index(&bucket(&[]), &bucket(&[])), None);
        assert_eq!(
            SimilarityMeasure::JaccardIndex.score(&bucket(&[]), &bucket(&[])),
            0.0
        );
    }

    #[test]
    fn bounded_measures_stay_in_unit_interval() {
        let sets = [
            bucket(&[]),
            bucket(&[1]),
            bucket(&[1, 2]),
            bucket(&[2, 3, 4]),
            bucket(&[5, 6, 7, 8, 9]),
            bucket(&[1, 2, 3, 4, 5, 6, 7, 8, 9]),
        ];

        for a in &sets {
            for b in &sets {
                for measure in [
                    SimilarityMeasure::JaccardIndex,
                    SimilarityMeasure::OverlapCoefficient,
                ] {
                    let value = measure.score(a, b);
                    assert!((0.0..=1.0).contains(&value), "{measure}: {value}");
                }
                let count = SimilarityMeasure::OverlapCount.score(a, b);
                assert!(count >= 0.0 && count.fract() == 0.0);
            }
        }
    }

    #[test]
    fn parses_keys() {
        for measure in SimilarityMeasure::ALL {
            assert_eq!(measure.key().parse::<SimilarityMeasure>().unwrap(), measure);
        }
        assert!(matches!(
            "cosine".parse::<SimilarityMeasure>(),
            Err(ConfigError::UnknownMeasure(_))
        ));
    }
}
