use std::path::PathBuf;

use chrono::Utc;
use rand::Rng as _;
use wingbeat_engine::{GapSeed, SimConfig};
use wingbeat_training::genetic::{Population, PopulationEvolver};

use crate::{model::PolicyModel, util::Output};

pub(crate) const POPULATION_COUNT: usize = 50;
pub(crate) const HIDDEN_SIZE: usize = 4;
pub(crate) const MAX_WEIGHT: f32 = 4.0;

const ROUNDS_PER_GENERATION: usize = 3;
const MAX_GENERATIONS: u32 = 50;

/// Five minutes of simulated flight at the reference tick rate. A
/// generation that lasts this long is considered solved for the round.
const TICK_BUDGET: u64 = 9_000;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EvolutionPhase {
    #[default]
    Exploration,
    Transition,
    Convergence,
}

impl EvolutionPhase {
    pub(crate) fn from_generation(generation: u32) -> Self {
        match generation {
            0..10 => Self::Exploration,
            10..30 => Self::Transition,
            _ => Self::Convergence,
        }
    }
}

const ELITE_COUNT: usize = 2;
const TOURNAMENT_SIZE: usize = 3;
const MUTATION_RATE: f32 = 0.15;
const BLX_ALPHA: f32 = 0.3;

const fn mutation_sigma_by_phase(phase: EvolutionPhase) -> f32 {
    match phase {
        EvolutionPhase::Exploration => 0.5,
        EvolutionPhase::Transition => 0.2,
        EvolutionPhase::Convergence => 0.05,
    }
}

pub(crate) const fn evolver_by_phase(phase: EvolutionPhase) -> PopulationEvolver {
    PopulationEvolver {
        elite_count: ELITE_COUNT,
        tournament_size: TOURNAMENT_SIZE,
        max_weight: MAX_WEIGHT,
        mutation_sigma: mutation_sigma_by_phase(phase),
        blx_alpha: BLX_ALPHA,
        mutation_rate: MUTATION_RATE,
    }
}

pub(crate) fn training_config() -> SimConfig {
    SimConfig {
        tick_budget: Some(TICK_BUDGET),
        ..SimConfig::default()
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Model name stored in the output file
    #[arg(long, default_value = "flock")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg { name, output } = arg;
    let config = training_config();

    let mut rng = rand::rng();
    let mut population = Population::random(HIDDEN_SIZE, POPULATION_COUNT, &mut rng, MAX_WEIGHT);
    for generation in 0..MAX_GENERATIONS {
        let phase = EvolutionPhase::from_generation(generation);
        eprintln!("Generation #{generation} ({phase:?}):");
        let evolver = evolver_by_phase(phase);
        let seeds: Vec<GapSeed> = (0..ROUNDS_PER_GENERATION).map(|_| rng.random()).collect();
        population.evaluate_fitness(&config, &seeds);

        let genome_stats = population.compute_genome_stats();
        #[expect(clippy::cast_precision_loss)]
        let genome_std_dev_mean =
            genome_stats.iter().map(|s| s.std_dev).sum::<f32>() / genome_stats.len() as f32;
        eprintln!("  Genome diversity (mean stddev): {genome_std_dev_mean:.3}");

        let fitness_stats = population.compute_fitness_stats();
        eprintln!("  Fitness Stats:");
        eprintln!("    Min:    {:.3}", fitness_stats.min);
        eprintln!("    Max:    {:.3}", fitness_stats.max);
        eprintln!("    Mean:   {:.3}", fitness_stats.mean);
        eprintln!("    Median: {:.3}", fitness_stats.median);
        eprintln!("    Stddev: {:.3}", fitness_stats.std_dev);

        if generation + 1 < MAX_GENERATIONS {
            population = evolver.evolve(&population);
        }
    }

    eprintln!("Best Individuals:");
    for (i, ind) in population.individuals().iter().take(5).enumerate() {
        eprintln!("  {i:2}: fitness {:.3}", ind.fitness());
    }

    let best_individual = population.individuals().first().unwrap();
    let model = PolicyModel {
        name: name.clone(),
        trained_at: Utc::now(),
        final_fitness: best_individual.fitness(),
        hidden_size: HIDDEN_SIZE,
        genome: best_individual.genome().to_vec(),
    };
    Output::save_json(&model, output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  Genome: {} parameters", model.genome.len());

    Ok(())
}
