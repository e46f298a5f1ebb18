use crate::error::{Result, TunesmithError};
use crate::types::{Beats, Melody, Note, Pitch};
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::cmp::Ordering;

/// Elitist truncation: the top `floor(P/2)` melodies, best first.
///
/// The sort is stable, so equal scores keep their population order.
pub fn select(population: &[Melody], scores: &[f64]) -> Result<Vec<Melody>> {
    if population.len() != scores.len() {
        return Err(TunesmithError::InvalidInput(format!(
            "{} melodies but {} scores",
            population.len(),
            scores.len()
        )));
    }

    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    Ok(ranked
        .into_iter()
        .take(population.len() / 2)
        .map(|i| population[i].clone())
        .collect())
}

/// Two distinct survivors, uniformly at random.
///
/// A lone survivor (population of 2 or 3) is paired with itself.
pub fn pick_parents<'a, R: Rng + ?Sized>(
    survivors: &'a [Melody],
    rng: &mut R,
) -> Result<(&'a Melody, &'a Melody)> {
    match survivors.len() {
        0 => {
            return Err(TunesmithError::DegenerateConfiguration(
                "No survivors to breed from".to_string(),
            ))
        }
        1 => return Ok((&survivors[0], &survivors[0])),
        _ => {}
    }
    let picks = index::sample(rng, survivors.len(), 2);
    Ok((&survivors[picks.index(0)], &survivors[picks.index(1)]))
}

/// Single-point splice: `parent_a` before a random cut, `parent_b` from it on.
///
/// The cut is drawn from `1..len`. One-note parents have no interior cut
/// point, so the child is a copy of `parent_a`.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &[Note],
    parent_b: &[Note],
    rng: &mut R,
) -> Result<Melody> {
    if parent_a.len() != parent_b.len() {
        return Err(TunesmithError::InvalidInput(format!(
            "Cannot cross melodies of length {} and {}",
            parent_a.len(),
            parent_b.len()
        )));
    }
    let len = parent_a.len();
    if len <= 1 {
        return Ok(parent_a.to_vec());
    }

    let cut = rng.gen_range(1..len);

    let mut child = Vec::with_capacity(len);
    child.extend_from_slice(&parent_a[..cut]);
    child.extend_from_slice(&parent_b[cut..]);
    Ok(child)
}

/// Per-note random replacement.
///
/// Pitch and duration are decided independently, each with probability
/// `rate`, drawing replacements uniformly from `scale` and `rhythm`.
pub fn mutate<R: Rng + ?Sized>(
    melody: &[Note],
    scale: &[Pitch],
    rhythm: &[Beats],
    rate: f64,
    rng: &mut R,
) -> Result<Melody> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(TunesmithError::InvalidInput(format!(
            "Mutation rate {} is not a probability",
            rate
        )));
    }
    if scale.is_empty() || rhythm.is_empty() {
        return Err(TunesmithError::InvalidInput(
            "Mutation needs a non-empty scale and rhythm pattern".to_string(),
        ));
    }

    let mut result = Vec::with_capacity(melody.len());
    for note in melody {
        let mut note = *note;
        if rng.gen::<f64>() < rate {
            if let Some(&pitch) = scale.choose(rng) {
                note.pitch = pitch;
            }
        }
        if rng.gen::<f64>() < rate {
            if let Some(&duration) = rhythm.choose(rng) {
                note.duration = duration;
            }
        }
        result.push(note);
    }
    Ok(result)
}
