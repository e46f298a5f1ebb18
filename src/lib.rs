//! Melody generation by Markov sampling and genetic refinement.
//!
//! A [`theory::Vocabulary`] supplies the scale, chord tones and rhythm. The
//! [`engines::generation`] module seeds a population from a transition
//! table over the scale and evolves it against the five-criterion
//! [`engines::evaluation::FitnessEvaluator`]. The winner can be written out
//! with [`export`].

pub mod config;
pub mod engines;
pub mod error;
pub mod export;
pub mod theory;
pub mod types;

pub use error::{Result, TunesmithError};
pub use types::{Melody, Note, Pitch};
