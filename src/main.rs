use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tunesmith::config::ConfigManager;
use tunesmith::engines::generation::{EvolutionConfig, EvolutionEngine, LogProgressCallback};
use tunesmith::export::{draw_piano_roll, export_midi};
use tunesmith::theory::{ScaleType, Vocabulary};

/// Generate original melodies with a Markov chain and a genetic algorithm.
#[derive(Debug, Parser)]
#[command(name = "tunesmith", version)]
struct Cli {
    /// TOML configuration file (CLI flags take precedence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root note: C, C#, D, D#, E, F, F#, G, G#, A, A#, B
    #[arg(long)]
    key: Option<String>,

    #[arg(long, value_enum)]
    scale: Option<ScaleType>,

    /// Beats per minute
    #[arg(long)]
    tempo: Option<u32>,

    /// Number of notes in the melody
    #[arg(long)]
    notes: Option<usize>,

    /// Population size for the genetic algorithm
    #[arg(long)]
    population: Option<usize>,

    /// Number of evolutionary generations
    #[arg(long)]
    generations: Option<usize>,

    /// Per-note mutation probability (0.0-1.0)
    #[arg(long)]
    mutation: Option<f64>,

    /// Rhythm pattern index (0-3)
    #[arg(long)]
    rhythm: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Output path prefix; .mid and _piano_roll.png are appended
    #[arg(long)]
    output: Option<String>,

    /// Skip writing the piano-roll image
    #[arg(long)]
    no_piano_roll: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut manager = ConfigManager::load(cli.config.as_deref())?;
    manager.update(|c| {
        let comp = &mut c.composition;
        if let Some(key) = &cli.key {
            comp.key = key.clone();
        }
        if let Some(scale) = cli.scale {
            comp.scale = scale;
        }
        if let Some(tempo) = cli.tempo {
            comp.tempo = tempo;
        }
        if let Some(notes) = cli.notes {
            comp.notes = notes;
        }
        if let Some(rhythm) = cli.rhythm {
            comp.rhythm = rhythm;
        }
        if let Some(output) = &cli.output {
            comp.output = output.clone();
        }

        let evo = &mut c.evolution;
        if let Some(population) = cli.population {
            evo.population_size = population;
        }
        if let Some(generations) = cli.generations {
            evo.num_generations = generations;
        }
        if let Some(mutation) = cli.mutation {
            evo.mutation_rate = mutation;
        }
        if cli.seed.is_some() {
            evo.seed = cli.seed;
        }
    })?;

    if let Some(path) = &cli.dump_config {
        manager.save_to_file(path)?;
        log::info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let config = manager.get();
    let comp = &config.composition;

    if let Some(dir) = Path::new(&comp.output).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let vocabulary = Vocabulary::from_composition(comp)?;
    log::info!(
        "Composing in {} {} | {} BPM | {} notes | population {} | {} generations",
        comp.key,
        comp.scale,
        comp.tempo,
        comp.notes,
        config.evolution.population_size,
        config.evolution.num_generations
    );

    let mut engine = EvolutionEngine::new(EvolutionConfig::from(&config.evolution), vocabulary)?;
    let outcome = engine.run(comp.notes, LogProgressCallback)?;

    let breakdown = engine.evaluator().breakdown(&outcome.best)?;
    println!("\nFinal fitness: {:.4}", outcome.best_score);
    println!(
        "  consonance {:.2} | chord tones {:.2} | rhythm {:.2} | contour {:.2} | range {:.2}\n",
        breakdown.consonance,
        breakdown.target_affinity,
        breakdown.rhythmic_variety,
        breakdown.contour,
        breakdown.range
    );

    export_midi(&outcome.best, comp.tempo, Path::new(&format!("{}.mid", comp.output)))?;
    if !cli.no_piano_roll {
        draw_piano_roll(
            &outcome.best,
            Path::new(&format!("{}_piano_roll.png", comp.output)),
        )?;
    }

    Ok(())
}
