// Five-criterion melody scoring.
//
// Each criterion is a pure function normalised to [0, 1]; the final score is
// a fixed convex combination of them, rounded to 4 decimal places. The
// weights are part of the scoring contract and are not configurable.

use crate::error::{Result, TunesmithError};
use crate::types::{Note, Pitch};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CONSONANCE_WEIGHT: f64 = 0.35;
pub const TARGET_AFFINITY_WEIGHT: f64 = 0.20;
pub const RHYTHMIC_VARIETY_WEIGHT: f64 = 0.20;
pub const CONTOUR_WEIGHT: f64 = 0.15;
pub const RANGE_WEIGHT: f64 = 0.10;

/// Distinct durations at which rhythmic variety saturates.
const RHYTHM_SATURATION: f64 = 4.0;

/// Ideal melodic range in semitones (a fifth to a tenth), and the centre of
/// the linear falloff outside it.
const IDEAL_RANGE: std::ops::RangeInclusive<i32> = 7..=15;
const RANGE_CENTRE: f64 = 11.0;

/// Fraction of notes whose pitch is in `set`.
fn membership_fraction(melody: &[Note], set: &HashSet<Pitch>) -> f64 {
    if melody.is_empty() {
        return 0.0;
    }
    let hits = melody.iter().filter(|n| set.contains(&n.pitch)).count();
    hits as f64 / melody.len() as f64
}

/// Fraction of notes that belong to the scale.
pub fn consonance(melody: &[Note], scale: &HashSet<Pitch>) -> f64 {
    membership_fraction(melody, scale)
}

/// Fraction of notes that land on a target (chord) tone.
pub fn target_affinity(melody: &[Note], targets: &HashSet<Pitch>) -> f64 {
    membership_fraction(melody, targets)
}

/// Distinct durations over 4, capped at 1.
pub fn rhythmic_variety(melody: &[Note]) -> f64 {
    // Durations are compared bit-for-bit; they are drawn from a finite pattern
    // so equal values always share a representation.
    let distinct: HashSet<u64> = melody.iter().map(|n| n.duration.to_bits()).collect();
    (distinct.len() as f64 / RHYTHM_SATURATION).min(1.0)
}

/// Distinct pitches over half the melody length, capped at 1.
pub fn contour(melody: &[Note]) -> f64 {
    if melody.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<Pitch> = melody.iter().map(|n| n.pitch).collect();
    (distinct.len() as f64 / (melody.len() as f64 * 0.5)).min(1.0)
}

/// 1.0 for a range of 7..=15 semitones, otherwise a linear falloff around 11
/// floored at 0.
pub fn range_score(melody: &[Note]) -> f64 {
    let (Some(min), Some(max)) = (
        melody.iter().map(|n| n.pitch).min(),
        melody.iter().map(|n| n.pitch).max(),
    ) else {
        return 0.0;
    };
    let span = max as i32 - min as i32;
    if IDEAL_RANGE.contains(&span) {
        1.0
    } else {
        (1.0 - (span as f64 - RANGE_CENTRE).abs() / RANGE_CENTRE).max(0.0)
    }
}

/// Rounds the stored binary value to 4 decimals, so a sum held as
/// 0.693749999... lands on 0.6937 rather than 0.6938.
fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// The five named sub-scores of one melody.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    pub consonance: f64,
    pub target_affinity: f64,
    pub rhythmic_variety: f64,
    pub contour: f64,
    pub range: f64,
}

impl FitnessBreakdown {
    /// Weighted sum of the sub-scores, rounded to 4 decimals.
    pub fn total(&self) -> f64 {
        round4(
            CONSONANCE_WEIGHT * self.consonance
                + TARGET_AFFINITY_WEIGHT * self.target_affinity
                + RHYTHMIC_VARIETY_WEIGHT * self.rhythmic_variety
                + CONTOUR_WEIGHT * self.contour
                + RANGE_WEIGHT * self.range,
        )
    }
}

/// Stateless melody scorer bound to one scale and one target pitch set.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    scale: HashSet<Pitch>,
    targets: HashSet<Pitch>,
}

impl FitnessEvaluator {
    pub fn new(scale: &[Pitch], targets: &[Pitch]) -> Self {
        Self {
            scale: scale.iter().copied().collect(),
            targets: targets.iter().copied().collect(),
        }
    }

    pub fn breakdown(&self, melody: &[Note]) -> Result<FitnessBreakdown> {
        if melody.is_empty() {
            return Err(TunesmithError::InvalidInput(
                "Cannot score an empty melody".to_string(),
            ));
        }
        Ok(FitnessBreakdown {
            consonance: consonance(melody, &self.scale),
            target_affinity: target_affinity(melody, &self.targets),
            rhythmic_variety: rhythmic_variety(melody),
            contour: contour(melody),
            range: range_score(melody),
        })
    }

    /// Score in [0, 1], rounded to 4 decimal places.
    pub fn evaluate(&self, melody: &[Note]) -> Result<f64> {
        Ok(self.breakdown(melody)?.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::melody_from_parts;

    #[test]
    fn test_weights_sum_to_one() {
        let sum = CONSONANCE_WEIGHT
            + TARGET_AFFINITY_WEIGHT
            + RHYTHMIC_VARIETY_WEIGHT
            + CONTOUR_WEIGHT
            + RANGE_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round4_uses_stored_value() {
        let sum = 0.35 * 0.625 + 0.20 * 0.125 + 0.20 * 1.0 + 0.15 * 1.0 + 0.10 * 1.0;
        assert_eq!(round4(sum), 0.6937);
        assert_eq!(round4(0.875), 0.875);
        assert_eq!(round4(0.123456), 0.1235);
    }

    #[test]
    fn test_range_falloff() {
        let span = |hi: Pitch| melody_from_parts(&[60, hi], &[1.0, 1.0]);
        assert_eq!(range_score(&span(67)), 1.0);
        assert_eq!(range_score(&span(75)), 1.0);
        // 0 semitones: 1 - 11/11
        assert_eq!(range_score(&span(60)), 0.0);
        // 4 semitones: 1 - 7/11
        assert!((range_score(&span(64)) - 4.0 / 11.0).abs() < 1e-12);
        // 20 semitones: 1 - 9/11
        assert!((range_score(&span(80)) - 2.0 / 11.0).abs() < 1e-12);
        // 30 semitones: floored
        assert_eq!(range_score(&span(90)), 0.0);
    }

    #[test]
    fn test_rhythmic_variety_saturates() {
        let melody = melody_from_parts(&[60; 6], &[0.5, 1.0, 1.5, 2.0, 3.0, 4.0]);
        assert_eq!(rhythmic_variety(&melody), 1.0);
        let two = melody_from_parts(&[60; 4], &[1.0, 1.0, 2.0, 2.0]);
        assert_eq!(rhythmic_variety(&two), 0.5);
    }

    #[test]
    fn test_contour_uses_half_length() {
        let melody = melody_from_parts(&[60, 62, 60, 62, 60, 62, 60, 62], &[1.0; 8]);
        assert_eq!(contour(&melody), 0.5);
        let single = melody_from_parts(&[60], &[1.0]);
        assert_eq!(contour(&single), 1.0);
    }
}
