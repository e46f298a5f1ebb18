use super::markov::TransitionTable;
use crate::error::{Result, TunesmithError};
use crate::theory::Vocabulary;
use crate::types::{Melody, Note};
use rand::Rng;

/// Sample a melody of exactly `length` notes from the Markov chain.
///
/// The walk starts on the root (scale index 0) and durations cycle through
/// the vocabulary's rhythm pattern. There is no fitness awareness here; this
/// is raw material for the genetic search.
pub fn generate_melody<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    table: &TransitionTable,
    length: usize,
    rng: &mut R,
) -> Result<Melody> {
    if length == 0 {
        return Err(TunesmithError::InvalidInput(
            "Requested melody length must be at least 1".to_string(),
        ));
    }
    if table.len() != vocabulary.scale().len() {
        return Err(TunesmithError::InvalidInput(format!(
            "Transition table covers {} pitches but the vocabulary has {}",
            table.len(),
            vocabulary.scale().len()
        )));
    }

    let scale = vocabulary.scale();
    let rhythm = vocabulary.rhythm();
    let mut index = 0;
    let mut melody = Vec::with_capacity(length);

    for i in 0..length {
        melody.push(Note::new(scale[index], rhythm[i % rhythm.len()]));
        index = table.sample(index, rng)?;
    }

    Ok(melody)
}

/// Seed a population of `size` independently sampled melodies.
pub fn initial_population<R: Rng + ?Sized>(
    size: usize,
    vocabulary: &Vocabulary,
    table: &TransitionTable,
    length: usize,
    rng: &mut R,
) -> Result<Vec<Melody>> {
    (0..size)
        .map(|_| generate_melody(vocabulary, table, length, rng))
        .collect()
}
