// First-order Markov model over scale indices.
//
// Transition weights depend only on the absolute interval between two scale
// pitches: stepwise motion is favoured, large leaps are discouraged. Each row
// is normalised into a probability distribution and paired with a weighted
// sampler so draws follow the row exactly.

use crate::error::{Result, TunesmithError};
use crate::types::Pitch;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Unnormalised preference for moving `interval` semitones.
pub fn interval_weight(interval: u32) -> f64 {
    match interval {
        0 => 0.5,      // repeat: allowed, not preferred
        1..=2 => 3.0,  // step
        3..=4 => 2.0,  // third
        5..=7 => 1.0,  // up to a fifth
        _ => 0.2,      // large leap
    }
}

/// Row-stochastic N x N matrix over a pitch vocabulary. Read-only once built.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    rows: Vec<Vec<f64>>,
    samplers: Vec<WeightedIndex<f64>>,
}

impl TransitionTable {
    pub fn build(scale: &[Pitch]) -> Result<Self> {
        if scale.is_empty() {
            return Err(TunesmithError::InvalidInput(
                "Cannot build a transition table over an empty vocabulary".to_string(),
            ));
        }

        let mut rows = Vec::with_capacity(scale.len());
        let mut samplers = Vec::with_capacity(scale.len());

        for &from in scale {
            let weights: Vec<f64> = scale
                .iter()
                .map(|&to| interval_weight((to as i32 - from as i32).unsigned_abs()))
                .collect();
            let total: f64 = weights.iter().sum();
            let row: Vec<f64> = weights.iter().map(|w| w / total).collect();

            let sampler = WeightedIndex::new(&row).map_err(|e| {
                TunesmithError::InvalidInput(format!("Invalid transition row: {}", e))
            })?;
            rows.push(row);
            samplers.push(sampler);
        }

        log::debug!("Built {}x{} transition table", scale.len(), scale.len());
        Ok(Self { rows, samplers })
    }

    /// Vocabulary size N.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, from: usize) -> Option<&[f64]> {
        self.rows.get(from).map(|r| r.as_slice())
    }

    pub fn probability(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from).and_then(|r| r.get(to)).copied()
    }

    /// Draw the next scale index from row `current`.
    pub fn sample<R: Rng + ?Sized>(&self, current: usize, rng: &mut R) -> Result<usize> {
        let sampler = self.samplers.get(current).ok_or_else(|| {
            TunesmithError::InvalidInput(format!(
                "Scale index {} out of range for {} pitches",
                current,
                self.len()
            ))
        })?;
        Ok(sampler.sample(rng))
    }
}
