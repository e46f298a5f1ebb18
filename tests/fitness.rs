use tunesmith::engines::evaluation::fitness::{consonance, contour, range_score, target_affinity};
use tunesmith::engines::evaluation::FitnessEvaluator;
use tunesmith::theory::{build_scale, chord_notes, ChordDegree, ScaleType};
use tunesmith::types::melody_from_parts;
use tunesmith::{Melody, TunesmithError};
use std::collections::HashSet;

fn c_major_evaluator() -> FitnessEvaluator {
    let scale = build_scale("C", ScaleType::Major, (4, 5)).unwrap();
    let chord = chord_notes(&scale, ChordDegree::I).unwrap();
    FitnessEvaluator::new(&scale, &chord)
}

fn well_formed_melody() -> Melody {
    // C E G A B G F E
    melody_from_parts(
        &[60, 64, 67, 69, 71, 67, 65, 64],
        &[0.5, 0.5, 1.0, 1.0, 2.0, 1.0, 0.5, 0.5],
    )
}

#[test]
fn test_well_formed_melody_scores_high() {
    let evaluator = c_major_evaluator();
    let score = evaluator.evaluate(&well_formed_melody()).unwrap();

    // 0.35 + 0.20 * 5/8 + 0.20 * 3/4 + 0.15 + 0.10
    assert!((score - 0.875).abs() < 1e-9, "got {}", score);
    assert!(score > 0.70);
}

#[test]
fn test_repeated_note_scores_low() {
    let evaluator = c_major_evaluator();
    let poor = melody_from_parts(&[60; 16], &[1.0; 16]);
    let score = evaluator.evaluate(&poor).unwrap();

    assert!(score < 0.65, "got {}", score);
    assert!(score < evaluator.evaluate(&well_formed_melody()).unwrap());

    let breakdown = evaluator.breakdown(&poor).unwrap();
    assert_eq!(breakdown.consonance, 1.0);
    assert_eq!(breakdown.target_affinity, 1.0);
    assert_eq!(breakdown.rhythmic_variety, 0.25);
    assert_eq!(breakdown.range, 0.0);
}

#[test]
fn test_scoring_is_pure_and_bounded() {
    let evaluator = c_major_evaluator();
    let melodies = vec![
        well_formed_melody(),
        melody_from_parts(&[60; 16], &[1.0; 16]),
        melody_from_parts(&[61, 63, 66, 68, 70], &[1.0, 1.5, 0.5, 2.0, 0.25]),
        melody_from_parts(&[0, 127], &[1.0, 1.0]),
        melody_from_parts(&[72], &[4.0]),
    ];

    for melody in &melodies {
        let first = evaluator.evaluate(melody).unwrap();
        let second = evaluator.evaluate(melody).unwrap();
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first), "score {} out of range", first);
    }
}

#[test]
fn test_score_is_rounded_to_four_places() {
    let evaluator = c_major_evaluator();
    let melody = melody_from_parts(&[60, 62, 64, 61, 66, 71, 74], &[1.0, 0.5, 1.5, 1.0, 1.0, 2.0, 1.0]);
    let score = evaluator.evaluate(&melody).unwrap();
    assert!(((score * 10_000.0).round() - score * 10_000.0).abs() < 1e-6);
}

#[test]
fn test_rounding_follows_stored_sum_not_decimal_reading() {
    // D#4 x3 off-scale, one chord tone (G4), 4 distinct durations, 14-semitone span
    let evaluator = c_major_evaluator();
    let melody = melody_from_parts(
        &[63, 63, 63, 77, 69, 67, 77, 71],
        &[1.0, 2.0, 1.0, 1.0, 1.5, 0.5, 1.0, 2.0],
    );
    assert_eq!(evaluator.evaluate(&melody).unwrap(), 0.6937);
}

#[test]
fn test_empty_melody_rejected() {
    let evaluator = c_major_evaluator();
    assert!(matches!(
        evaluator.evaluate(&[]),
        Err(TunesmithError::InvalidInput(_))
    ));
}

#[test]
fn test_out_of_scale_notes_lose_consonance() {
    let scale: HashSet<u8> = build_scale("C", ScaleType::Major, (4, 5)).unwrap().into_iter().collect();
    let chromatic = melody_from_parts(&[60, 61, 62, 63], &[1.0; 4]);
    assert_eq!(consonance(&chromatic, &scale), 0.5);
}

#[test]
fn test_empty_target_set_zeroes_affinity() {
    let scale = build_scale("C", ScaleType::Major, (4, 5)).unwrap();
    let evaluator = FitnessEvaluator::new(&scale, &[]);
    let breakdown = evaluator.breakdown(&well_formed_melody()).unwrap();
    assert_eq!(breakdown.target_affinity, 0.0);
    assert_eq!(target_affinity(&well_formed_melody(), &HashSet::new()), 0.0);
}

#[test]
fn test_contour_and_range_of_well_formed_melody() {
    let melody = well_formed_melody();
    assert_eq!(contour(&melody), 1.0);
    assert_eq!(range_score(&melody), 1.0);
}
