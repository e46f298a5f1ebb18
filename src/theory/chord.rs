use crate::error::{Result, TunesmithError};
use crate::types::Pitch;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Diatonic triads, addressed by roman numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordDegree {
    I,
    IV,
    V,
    #[serde(rename = "vi")]
    Vi,
}

impl ChordDegree {
    /// 0-based scale indices of the triad. Indices wrap around the scale.
    pub fn scale_indices(&self) -> [usize; 3] {
        match self {
            ChordDegree::I => [0, 2, 4],
            ChordDegree::IV => [3, 5, 0],
            ChordDegree::V => [4, 6, 1],
            ChordDegree::Vi => [5, 0, 2],
        }
    }
}

impl FromStr for ChordDegree {
    type Err = TunesmithError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "I" => Ok(ChordDegree::I),
            "IV" => Ok(ChordDegree::IV),
            "V" => Ok(ChordDegree::V),
            "vi" => Ok(ChordDegree::Vi),
            other => Err(TunesmithError::InvalidInput(format!(
                "Unknown chord degree '{}'",
                other
            ))),
        }
    }
}

/// Named chord progressions.
pub const PROGRESSIONS: [(&str, [ChordDegree; 4]); 2] = [
    (
        "I-IV-V-I",
        [ChordDegree::I, ChordDegree::IV, ChordDegree::V, ChordDegree::I],
    ),
    (
        "I-V-vi-IV",
        [ChordDegree::I, ChordDegree::V, ChordDegree::Vi, ChordDegree::IV],
    ),
];

pub fn progression(name: &str) -> Result<&'static [ChordDegree; 4]> {
    PROGRESSIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, chords)| chords)
        .ok_or_else(|| TunesmithError::InvalidInput(format!("Unknown progression '{}'", name)))
}

/// Pitches of `degree` within `scale`.
pub fn chord_notes(scale: &[Pitch], degree: ChordDegree) -> Result<Vec<Pitch>> {
    if scale.is_empty() {
        return Err(TunesmithError::InvalidInput(
            "Cannot build a chord on an empty scale".to_string(),
        ));
    }
    Ok(degree
        .scale_indices()
        .iter()
        .map(|&i| scale[i % scale.len()])
        .collect())
}
