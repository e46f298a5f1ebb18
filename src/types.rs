use serde::{Deserialize, Serialize};

/// MIDI note number (0-127). Middle C is 60.
pub type Pitch = u8;

/// Note length in beats (1.0 = quarter note).
pub type Beats = f64;

/// A single melodic event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: Pitch,
    pub duration: Beats,
}

impl Note {
    pub fn new(pitch: Pitch, duration: Beats) -> Self {
        Self { pitch, duration }
    }
}

/// Melody representation for the genetic search
///
/// A melody is a fixed-length sequence of notes. Every operator in
/// `engines::generation::operators` takes melodies by reference and returns
/// a freshly allocated melody, so a population slot is never edited in place
/// once it has been scored.
///
/// Length is constant across a run: crossover and mutation never add or
/// remove notes.
pub type Melody = Vec<Note>;

/// Total length of a melody in beats.
pub fn total_beats(melody: &[Note]) -> Beats {
    melody.iter().map(|n| n.duration).sum()
}

/// Build a melody from parallel pitch and duration slices.
///
/// Extra entries in the longer slice are ignored.
pub fn melody_from_parts(pitches: &[Pitch], durations: &[Beats]) -> Melody {
    pitches
        .iter()
        .zip(durations)
        .map(|(&pitch, &duration)| Note::new(pitch, duration))
        .collect()
}
