// Piano-roll rendering to PNG.
//
// x = onset time in beats, bar width = duration (inset so neighbours don't
// touch), y = MIDI pitch. Axis text is left out so rendering needs no font
// backend.

use crate::types::{total_beats, Note};
use anyhow::{anyhow, bail, Result};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;

const IMAGE_SIZE: (u32, u32) = (2100, 750);
const NOTE_GAP: f64 = 0.05;
const HALF_BAR_HEIGHT: f64 = 0.4;
/// Empty semitone rows kept above and below the outermost notes.
const PITCH_PADDING: f64 = 2.0;
const NOTE_FILL: RGBColor = RGBColor(70, 130, 180);

/// Bar corners `[(onset, pitch - 0.4), (onset + duration - 0.05, pitch + 0.4)]`
/// for every note, in beats and semitones.
pub fn note_rects(melody: &[Note]) -> Vec<[(f64, f64); 2]> {
    let mut onset = 0.0;
    melody
        .iter()
        .map(|note| {
            let pitch = note.pitch as f64;
            let rect = [
                (onset, pitch - HALF_BAR_HEIGHT),
                (onset + note.duration - NOTE_GAP, pitch + HALF_BAR_HEIGHT),
            ];
            onset += note.duration;
            rect
        })
        .collect()
}

pub fn draw_piano_roll(melody: &[Note], path: &Path) -> Result<()> {
    let (Some(low), Some(high)) = (
        melody.iter().map(|n| n.pitch).min(),
        melody.iter().map(|n| n.pitch).max(),
    ) else {
        bail!("Cannot draw an empty melody");
    };
    let beats = total_beats(melody);
    let plot_err = |e: DrawingAreaErrorKind<_>| anyhow!("Failed to draw {}: {}", path.display(), e);

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(
            0.0..beats,
            (low as f64 - PITCH_PADDING)..(high as f64 + PITCH_PADDING),
        )
        .map_err(plot_err)?;

    // one faint line per whole beat
    chart
        .draw_series((0..=beats.ceil() as u32).map(|beat| {
            let x = beat as f64;
            PathElement::new(
                vec![(x, low as f64 - PITCH_PADDING), (x, high as f64 + PITCH_PADDING)],
                BLACK.mix(0.15),
            )
        }))
        .map_err(plot_err)?;

    let rects = note_rects(melody);
    chart
        .draw_series(rects.iter().map(|&r| Rectangle::new(r, NOTE_FILL.filled())))
        .map_err(plot_err)?;
    chart
        .draw_series(rects.iter().map(|&r| Rectangle::new(r, BLACK.stroke_width(1))))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    log::info!("Saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::melody_from_parts;

    #[test]
    fn test_bars_follow_onsets() {
        let melody = melody_from_parts(&[60, 62, 64, 72], &[1.0, 0.5, 0.5, 2.0]);
        let rects = note_rects(&melody);
        assert_eq!(rects.len(), 4);

        let [(x0, y0), (x1, y1)] = rects[3];
        assert_eq!(x0, 2.0);
        assert!((x1 - 3.95).abs() < 1e-12);
        assert!((y0 - 71.6).abs() < 1e-12);
        assert!((y1 - 72.4).abs() < 1e-12);
    }

    #[test]
    fn test_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roll.png");
        let melody = melody_from_parts(
            &[60, 62, 64, 65, 67, 69, 71, 72],
            &[1.0, 0.5, 0.5, 1.0, 0.5, 0.5, 1.0, 2.0],
        );

        draw_piano_roll(&melody, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_empty_melody_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(draw_piano_roll(&[], &dir.path().join("empty.png")).is_err());
    }
}
