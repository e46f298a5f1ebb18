pub mod markov;
pub mod sampler;
pub mod operators;
pub mod evolution_engine;
pub mod progress;

pub use markov::TransitionTable;
pub use sampler::{generate_melody, initial_population};
pub use evolution_engine::{EvolutionEngine, EvolutionConfig, EvolutionOutcome, ProgressCallback};
pub use progress::{LogProgressCallback, RecordingProgressCallback};
