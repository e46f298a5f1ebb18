use super::traits::ConfigSection;
use crate::error::TunesmithError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub mutation_rate: f64,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_generations: 100,
            mutation_rate: 0.05,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), TunesmithError> {
        if self.population_size < 2 {
            return Err(TunesmithError::DegenerateConfiguration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.num_generations < 1 {
            return Err(TunesmithError::DegenerateConfiguration(
                "Generation count must be at least 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TunesmithError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if self.population_size % 2 != 0 {
            log::warn!(
                "Odd population size {}: {} survivors are kept per generation",
                self.population_size,
                self.population_size / 2
            );
        }
        Ok(())
    }
}
