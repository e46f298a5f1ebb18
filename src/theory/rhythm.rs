use crate::error::{Result, TunesmithError};
use crate::types::Beats;

/// Built-in duration patterns, in beats. Melodies cycle through a pattern.
pub const RHYTHM_PATTERNS: [&[Beats]; 4] = [
    &[1.0, 1.0, 1.0, 1.0],      // four quarters
    &[0.5, 0.5, 1.0, 1.0, 1.0], // two eighths + three quarters
    &[2.0, 1.0, 1.0],           // half + two quarters
    &[1.5, 0.5, 1.0, 1.0],      // dotted quarter + eighth + two quarters
];

pub fn rhythm_pattern(index: usize) -> Result<Vec<Beats>> {
    RHYTHM_PATTERNS
        .get(index)
        .map(|p| p.to_vec())
        .ok_or_else(|| {
            TunesmithError::InvalidInput(format!(
                "Rhythm pattern index {} out of range (0-{})",
                index,
                RHYTHM_PATTERNS.len() - 1
            ))
        })
}
