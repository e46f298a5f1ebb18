use crate::error::{Result, TunesmithError};
use crate::types::Pitch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semitone offset of each note name within an octave.
const SEMITONES: [(&str, u8); 12] = [
    ("C", 0),
    ("C#", 1),
    ("D", 2),
    ("D#", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("G", 7),
    ("G#", 8),
    ("A", 9),
    ("A#", 10),
    ("B", 11),
];

/// Highest legal MIDI pitch.
pub const MAX_PITCH: i32 = 127;

/// Semitone offset of a note name, case-insensitive ("c#" == "C#").
pub fn semitone(name: &str) -> Result<u8> {
    SEMITONES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, s)| s)
        .ok_or_else(|| TunesmithError::InvalidInput(format!("Unknown note name '{}'", name)))
}

/// Convert a note name and octave to a MIDI number (C4 = 60).
///
/// Fails when the name is unknown or the result falls outside 0-127.
pub fn note_to_midi(name: &str, octave: i32) -> Result<Pitch> {
    let midi = 12 * (octave + 1) + semitone(name)? as i32;
    if !(0..=MAX_PITCH).contains(&midi) {
        return Err(TunesmithError::InvalidInput(format!(
            "{}{} is outside the MIDI range",
            name, octave
        )));
    }
    Ok(midi as Pitch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Major,
    Minor,
    Pentatonic,
    Blues,
}

impl ScaleType {
    pub const ALL: [ScaleType; 4] = [
        ScaleType::Major,
        ScaleType::Minor,
        ScaleType::Pentatonic,
        ScaleType::Blues,
    ];

    /// Semitone intervals from the root.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::Minor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::Pentatonic => &[0, 2, 4, 7, 9],
            ScaleType::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleType::Major => "major",
            ScaleType::Minor => "minor",
            ScaleType::Pentatonic => "pentatonic",
            ScaleType::Blues => "blues",
        };
        f.write_str(name)
    }
}

/// Sorted, duplicate-free MIDI pitches of `scale_type` rooted on `root`,
/// covering every octave in the inclusive `octaves` range.
///
/// Pitches that would fall outside 0-127 are dropped rather than rejected,
/// so a range near the top of the keyboard yields a partial scale.
pub fn build_scale(root: &str, scale_type: ScaleType, octaves: (i32, i32)) -> Result<Vec<Pitch>> {
    let (low, high) = octaves;
    if low > high {
        return Err(TunesmithError::InvalidInput(format!(
            "Octave range {}..={} is empty",
            low, high
        )));
    }

    let offset = semitone(root)? as i32;
    let mut notes: Vec<Pitch> = (low..=high)
        .flat_map(|octave| {
            let base = 12 * (octave + 1) + offset;
            scale_type
                .intervals()
                .iter()
                .map(move |&interval| base + interval as i32)
        })
        .filter(|n| (0..=MAX_PITCH).contains(n))
        .map(|n| n as Pitch)
        .collect();

    notes.sort_unstable();
    notes.dedup();

    if notes.is_empty() {
        return Err(TunesmithError::InvalidInput(format!(
            "{} {} has no pitches in octaves {}..={}",
            root, scale_type, low, high
        )));
    }
    Ok(notes)
}
