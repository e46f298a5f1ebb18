use crate::config;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    markov::TransitionTable,
    operators::{crossover, mutate, pick_parents, select},
    sampler::initial_population,
};
use crate::error::{Result, TunesmithError};
use crate::theory::Vocabulary;
use crate::types::Melody;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub seed: Option<u64>,
}

impl From<&config::EvolutionConfig> for EvolutionConfig {
    fn from(c: &config::EvolutionConfig) -> Self {
        Self {
            population_size: c.population_size,
            generations: c.num_generations,
            mutation_rate: c.mutation_rate,
            seed: c.seed,
        }
    }
}

impl EvolutionConfig {
    fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TunesmithError::DegenerateConfiguration(format!(
                "Population size {} leaves no survivors",
                self.population_size
            )));
        }
        if self.generations < 1 {
            return Err(TunesmithError::DegenerateConfiguration(
                "At least one generation is required".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TunesmithError::InvalidInput(format!(
                "Mutation rate {} is not a probability",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Highest-scoring melody of the final population (first one on ties).
    pub best: Melody,
    pub best_score: f64,
    /// Best score of generation 1.
    pub initial_best: f64,
    /// Best score of each generation, generation 1 first.
    pub history: Vec<f64>,
}

/// Position and value of the highest score; the earliest position wins ties.
fn best_index(scores: &[f64]) -> (usize, f64) {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(bi, bs), (i, s)| {
            if s > bs { (i, s) } else { (bi, bs) }
        })
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    /// `generation` is 1-based.
    fn on_generation_complete(&mut self, generation: usize, total_generations: usize, best_fitness: f64);
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    vocabulary: Vocabulary,
    table: TransitionTable,
    evaluator: FitnessEvaluator,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig, vocabulary: Vocabulary) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let table = TransitionTable::build(vocabulary.scale())?;
        let evaluator = FitnessEvaluator::new(vocabulary.scale(), vocabulary.targets());

        Ok(Self {
            config,
            vocabulary,
            table,
            evaluator,
            rng,
        })
    }

    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }

    /// Markov-sampled starting population of `population_size` melodies.
    pub fn initialize_population(&mut self, melody_length: usize) -> Result<Vec<Melody>> {
        initial_population(
            self.config.population_size,
            &self.vocabulary,
            &self.table,
            melody_length,
            &mut self.rng,
        )
    }

    /// Seed a population and evolve it.
    pub fn run<C: ProgressCallback>(
        &mut self,
        melody_length: usize,
        callback: C,
    ) -> Result<EvolutionOutcome> {
        let population = self.initialize_population(melody_length)?;
        log::info!(
            "Seeded {} melodies of {} notes",
            population.len(),
            melody_length
        );
        self.evolve(population, callback)
    }

    /// Run exactly `generations` score/select/refill cycles on `population`,
    /// then return the best melody of the final population.
    pub fn evolve<C: ProgressCallback>(
        &mut self,
        population: Vec<Melody>,
        mut callback: C,
    ) -> Result<EvolutionOutcome> {
        self.check_population(&population)?;

        let total = self.config.generations;
        let mut population = population;
        let mut history = Vec::with_capacity(total);

        for generation in 1..=total {
            callback.on_generation_start(generation);

            let scores = self.evaluate_population(&population)?;
            let (_, best_fitness) = best_index(&scores);
            history.push(best_fitness);

            log::debug!(
                "Generation {}/{}: best {:.4}, mean {:.4}",
                generation,
                total,
                best_fitness,
                scores.iter().sum::<f64>() / scores.len() as f64
            );
            callback.on_generation_complete(generation, total, best_fitness);

            population = self.create_next_generation(&population, &scores)?;
        }

        // The last refill produced offspring that were never scored.
        let final_scores = self.evaluate_population(&population)?;
        let (best_idx, best_score) = best_index(&final_scores);

        Ok(EvolutionOutcome {
            best: population.swap_remove(best_idx),
            best_score,
            initial_best: history[0],
            history,
        })
    }

    fn check_population(&self, population: &[Melody]) -> Result<()> {
        if population.len() != self.config.population_size {
            return Err(TunesmithError::InvalidInput(format!(
                "Expected {} melodies, got {}",
                self.config.population_size,
                population.len()
            )));
        }
        let length = population[0].len();
        if length == 0 {
            return Err(TunesmithError::InvalidInput(
                "Melodies must contain at least one note".to_string(),
            ));
        }
        if let Some(odd) = population.iter().position(|m| m.len() != length) {
            return Err(TunesmithError::InvalidInput(format!(
                "Melody {} has {} notes, expected {}",
                odd,
                population[odd].len(),
                length
            )));
        }
        Ok(())
    }

    fn evaluate_population(&self, population: &[Melody]) -> Result<Vec<f64>> {
        population
            .iter()
            .enumerate()
            .map(|(i, melody)| {
                let score = self.evaluator.evaluate(melody)?;
                log::trace!("  [{}] fitness {:.4}", i + 1, score);
                Ok(score)
            })
            .collect()
    }

    /// Survivors followed by mutated crossover offspring, `population_size` in total.
    fn create_next_generation(
        &mut self,
        population: &[Melody],
        scores: &[f64],
    ) -> Result<Vec<Melody>> {
        let survivors = select(population, scores)?;
        let mut offspring = Vec::with_capacity(population.len() - survivors.len());

        while survivors.len() + offspring.len() < population.len() {
            let (parent_a, parent_b) = pick_parents(&survivors, &mut self.rng)?;
            let child = crossover(parent_a, parent_b, &mut self.rng)?;
            let child = mutate(
                &child,
                self.vocabulary.scale(),
                self.vocabulary.rhythm(),
                self.config.mutation_rate,
                &mut self.rng,
            )?;
            offspring.push(child);
        }

        let mut next_generation = survivors;
        next_generation.extend(offspring);
        Ok(next_generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_index_keeps_first_of_tied_maxima() {
        assert_eq!(best_index(&[0.5, 0.9, 0.9, 0.1]), (1, 0.9));
        assert_eq!(best_index(&[0.7, 0.7]), (0, 0.7));
    }

    #[test]
    fn test_best_index_single_score() {
        assert_eq!(best_index(&[0.25]), (0, 0.25));
    }
}
