use super::chord::{chord_notes, progression};
use super::rhythm::rhythm_pattern;
use super::scale::build_scale;
use crate::config::CompositionConfig;
use crate::error::{Result, TunesmithError};
use crate::types::{Beats, Pitch};
use std::collections::HashSet;

/// The read-only material a session composes from.
///
/// - `scale`: ordered, duplicate-free legal pitches; index 0 is the root
/// - `targets`: chord tones the fitness function rewards (may be empty)
/// - `rhythm`: cyclic duration pattern, all entries positive
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    scale: Vec<Pitch>,
    targets: Vec<Pitch>,
    rhythm: Vec<Beats>,
}

impl Vocabulary {
    pub fn new(scale: Vec<Pitch>, targets: Vec<Pitch>, rhythm: Vec<Beats>) -> Result<Self> {
        if scale.is_empty() {
            return Err(TunesmithError::InvalidInput(
                "Pitch vocabulary is empty".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(scale.len());
        if let Some(dup) = scale.iter().find(|p| !seen.insert(**p)) {
            return Err(TunesmithError::InvalidInput(format!(
                "Pitch vocabulary contains {} more than once",
                dup
            )));
        }
        if rhythm.is_empty() {
            return Err(TunesmithError::InvalidInput(
                "Duration pattern is empty".to_string(),
            ));
        }
        if let Some(bad) = rhythm.iter().find(|d| !d.is_finite() || **d <= 0.0) {
            return Err(TunesmithError::InvalidInput(format!(
                "Duration {} is not a positive beat count",
                bad
            )));
        }
        if targets.is_empty() {
            log::warn!("Target pitch set is empty; chord-tone affinity will score 0");
        }

        Ok(Self {
            scale,
            targets,
            rhythm,
        })
    }

    /// Scale, tonic chord of the configured progression and rhythm pattern
    /// described by a composition config.
    pub fn from_composition(config: &CompositionConfig) -> Result<Self> {
        let scale = build_scale(
            &config.key,
            config.scale,
            (config.octave_low, config.octave_high),
        )?;
        let chords = progression(&config.progression)?;
        let targets = chord_notes(&scale, chords[0])?;
        let rhythm = rhythm_pattern(config.rhythm)?;
        Self::new(scale, targets, rhythm)
    }

    pub fn scale(&self) -> &[Pitch] {
        &self.scale
    }

    pub fn targets(&self) -> &[Pitch] {
        &self.targets
    }

    pub fn rhythm(&self) -> &[Beats] {
        &self.rhythm
    }

    pub fn root(&self) -> Pitch {
        self.scale[0]
    }
}
