// Standard MIDI File output for a single melody.
//
// Format 1: track 0 carries the tempo, track 1 the melody on channel 0.
// Notes are laid end to end; a note's duration in beats becomes its length
// in ticks at 480 ticks per quarter note.

use crate::types::{Beats, Note};
use anyhow::{anyhow, bail, Context, Result};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u15, u24, u28, u4, u7},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

const VELOCITY: u8 = 100;
const CHANNEL: u8 = 0;

/// Largest value a 24-bit tempo meta event can hold.
const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

fn beats_to_ticks(beats: Beats) -> u32 {
    (beats * TICKS_PER_QUARTER as f64).round() as u32
}

/// Build an in-memory SMF for `melody` at `tempo` BPM.
pub fn melody_to_smf(melody: &[Note], tempo: u32) -> Result<Smf<'static>> {
    if tempo == 0 {
        bail!("Tempo must be positive");
    }
    let tempo_micros = 60_000_000 / tempo;
    if tempo_micros > MAX_TEMPO_MICROS {
        bail!("Tempo {} BPM is too slow to encode", tempo);
    }
    if let Some(note) = melody.iter().find(|n| n.pitch > 127) {
        bail!("Pitch {} is outside the MIDI range", note.pitch);
    }

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let tempo_track: Track<'static> = vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ];
    smf.tracks.push(tempo_track);

    let channel = u4::new(CHANNEL);
    let mut track: Track<'static> = Vec::with_capacity(melody.len() * 2 + 2);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Melody")),
    });

    for note in melody {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(note.pitch),
                    vel: u7::new(VELOCITY),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(beats_to_ticks(note.duration)),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(note.pitch),
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    Ok(smf)
}

/// Encoded SMF bytes.
pub fn encode_midi(melody: &[Note], tempo: u32) -> Result<Vec<u8>> {
    let smf = melody_to_smf(melody, tempo)?;
    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|e| anyhow!("Failed to encode MIDI: {}", e))?;
    Ok(buf)
}

/// Write `melody` to `path` as a Standard MIDI File.
pub fn export_midi(melody: &[Note], tempo: u32, path: &Path) -> Result<()> {
    let buf = encode_midi(melody, tempo)?;
    std::fs::write(path, &buf).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::melody_from_parts;

    fn scale_fragment() -> Vec<Note> {
        melody_from_parts(
            &[60, 62, 64, 65, 67, 67, 69],
            &[1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 2.0],
        )
    }

    #[test]
    fn test_smf_layout() {
        let smf = melody_to_smf(&scale_fragment(), 120).unwrap();
        assert_eq!(smf.tracks.len(), 2);
        // name + on/off per note + end of track
        assert_eq!(smf.tracks[1].len(), 1 + 7 * 2 + 1);
        assert_eq!(
            smf.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000)))
        );
    }

    #[test]
    fn test_note_lengths_in_ticks() {
        let smf = melody_to_smf(&scale_fragment(), 120).unwrap();
        let total: u32 = smf.tracks[1].iter().map(|e| e.delta.as_int()).sum();
        assert_eq!(total, 7 * TICKS_PER_QUARTER as u32);
    }

    #[test]
    fn test_encoded_header() {
        let bytes = encode_midi(&scale_fragment(), 90).unwrap();
        assert_eq!(&bytes[..4], b"MThd");
        let parsed = Smf::parse(&bytes).unwrap();
        assert_eq!(parsed.tracks.len(), 2);
    }

    #[test]
    fn test_rejects_zero_tempo() {
        assert!(encode_midi(&scale_fragment(), 0).is_err());
    }
}
