use super::traits::ConfigSection;
use crate::error::TunesmithError;
use crate::theory::{self, ScaleType, RHYTHM_PATTERNS};
use serde::{Deserialize, Serialize};

/// What to compose: key, scale, rhythm, length and where to write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    pub key: String,
    pub scale: ScaleType,
    pub octave_low: i32,
    pub octave_high: i32,
    pub rhythm: usize,
    pub notes: usize,
    pub tempo: u32,
    pub progression: String,
    pub output: String,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            key: "C".to_string(),
            scale: ScaleType::Major,
            octave_low: 4,
            octave_high: 5,
            rhythm: 0,
            notes: 32,
            tempo: 120,
            progression: "I-IV-V-I".to_string(),
            output: "output/composition".to_string(),
        }
    }
}

impl ConfigSection for CompositionConfig {
    fn section_name() -> &'static str {
        "composition"
    }

    fn validate(&self) -> Result<(), TunesmithError> {
        theory::scale::semitone(&self.key)
            .map_err(|_| TunesmithError::Configuration(format!("Unknown key '{}'", self.key)))?;
        if self.octave_low > self.octave_high {
            return Err(TunesmithError::Configuration(
                "octave_low must not exceed octave_high".to_string()
            ));
        }
        if self.rhythm >= RHYTHM_PATTERNS.len() {
            return Err(TunesmithError::Configuration(format!(
                "Rhythm pattern index must be between 0 and {}",
                RHYTHM_PATTERNS.len() - 1
            )));
        }
        if self.notes < 1 {
            return Err(TunesmithError::Configuration(
                "A melody needs at least one note".to_string()
            ));
        }
        if self.tempo < 1 {
            return Err(TunesmithError::Configuration(
                "Tempo must be at least 1 BPM".to_string()
            ));
        }
        theory::progression(&self.progression).map_err(|_| {
            TunesmithError::Configuration(format!("Unknown progression '{}'", self.progression))
        })?;
        Ok(())
    }
}
