use super::evolution_engine::ProgressCallback;

/// Generation 1, every 10th generation and the final one.
pub fn is_checkpoint(generation: usize, total_generations: usize) -> bool {
    generation == 1 || generation % 10 == 0 || generation == total_generations
}

/// Logs best fitness at checkpoint generations.
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_complete(&mut self, generation: usize, total_generations: usize, best_fitness: f64) {
        if is_checkpoint(generation, total_generations) {
            log::info!("Generation {:4} | best fitness: {:.4}", generation, best_fitness);
        }
    }
}

/// Keeps every checkpoint report in memory.
#[derive(Debug, Default)]
pub struct RecordingProgressCallback {
    pub checkpoints: Vec<(usize, f64)>,
}

impl ProgressCallback for &mut RecordingProgressCallback {
    fn on_generation_complete(&mut self, generation: usize, total_generations: usize, best_fitness: f64) {
        if is_checkpoint(generation, total_generations) {
            self.checkpoints.push((generation, best_fitness));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoints() {
        let reported: Vec<usize> = (1..=25).filter(|&g| is_checkpoint(g, 25)).collect();
        assert_eq!(reported, vec![1, 10, 20, 25]);
        assert!(is_checkpoint(1, 1));
    }
}
