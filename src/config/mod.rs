pub mod traits;
pub mod composition;
pub mod evolution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use composition::CompositionConfig;
pub use evolution::EvolutionConfig;
pub use traits::ConfigSection;
