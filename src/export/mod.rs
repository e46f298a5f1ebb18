pub mod midi;
pub mod piano_roll;

pub use midi::export_midi;
pub use piano_roll::draw_piano_roll;
