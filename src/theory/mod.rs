pub mod scale;
pub mod chord;
pub mod rhythm;
pub mod vocabulary;

pub use scale::{build_scale, note_to_midi, ScaleType};
pub use chord::{chord_notes, progression, ChordDegree, PROGRESSIONS};
pub use rhythm::{rhythm_pattern, RHYTHM_PATTERNS};
pub use vocabulary::Vocabulary;
