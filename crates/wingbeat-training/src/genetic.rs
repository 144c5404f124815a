//! Genetic algorithm for evolving populations of flap policies.
//!
//! The GA evolves flat network genomes with tournament selection, BLX-α
//! crossover, and Gaussian mutation.
//!
//! # Algorithm Overview
//!
//! 1. **Evaluate Fitness** - The whole population flies shared pipe
//!    courses; per-bird fitness accrues inside the simulation
//! 2. **Elite Selection** - Top performers carry over unchanged
//! 3. **Tournament Selection** - Parents are picked by small tournaments
//! 4. **Crossover (BLX-α)** - Two parent genomes blend into offspring
//! 5. **Mutation** - Gaussian noise perturbs offspring parameters
//!
//! # Key Components
//!
//! - [`Individual`] - One candidate genome plus its fitness score
//! - [`Population`] - The individuals evaluated together
//! - [`PopulationEvolver`] - The evolution parameters (selection,
//!   crossover, mutation)
//!
//! Evaluation is a single pass per round regardless of population size:
//! every candidate flies the same course in the same session, and the
//! session reports one fitness total per starting slot. Averaging over
//! several seeded rounds keeps one lucky course from dominating.
//!
//! Parameters are fixed per [`PopulationEvolver`]; callers implement
//! adaptive schedules by constructing a different evolver per generation
//! (e.g. shrinking the mutation sigma over time).

use rand::{Rng, seq::IndexedRandom};
use wingbeat_engine::{GapSeed, GenerationSession, NeverStop, NullRenderSink, SimConfig};
use wingbeat_policy::FeedForwardPolicy;
use wingbeat_stats::descriptive::DescriptiveStats;

use crate::genome;

/// A single individual in the genetic algorithm population.
///
/// A candidate solution: one network genome and the fitness it earned in
/// evaluation.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: Vec<f32>,
    fitness: f32,
}

impl Individual {
    /// Creates a new individual with a random genome, parameters uniform
    /// in `[-max_weight, max_weight]`.
    pub fn random<R>(rng: &mut R, max_weight: f32, genome_len: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            genome: genome::random(rng, max_weight, genome_len),
            fitness: f32::MIN,
        }
    }

    #[must_use]
    pub fn genome(&self) -> &[f32] {
        &self.genome
    }

    /// Fitness earned in the last evaluation; higher is better.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }
}

/// A population of individuals for genetic algorithm evolution.
///
/// All individuals share one network topology, fixed by the hidden-layer
/// width at creation.
#[derive(Debug, Clone)]
pub struct Population {
    hidden_size: usize,
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a new population of random individuals.
    #[must_use]
    pub fn random<R>(hidden_size: usize, count: usize, rng: &mut R, max_weight: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        let genome_len = FeedForwardPolicy::genome_len(hidden_size);
        let individuals = (0..count)
            .map(|_| Individual::random(rng, max_weight, genome_len))
            .collect();
        Population {
            hidden_size,
            individuals,
        }
    }

    #[must_use]
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns all individuals, best first after evaluation.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Builds one policy per individual, in current individual order.
    ///
    /// The caller seats these into a session; the policy at index `i`
    /// reports its fitness under slot `i`.
    #[must_use]
    pub fn policies(&self) -> Vec<FeedForwardPolicy> {
        self.individuals
            .iter()
            .map(|ind| {
                FeedForwardPolicy::from_genome(self.hidden_size, ind.genome.clone()).unwrap()
            })
            .collect()
    }

    /// Evaluates fitness by flying the whole population through one
    /// shared course per seed, averaging each bird's totals across
    /// seeds. Individuals are sorted by fitness descending afterwards.
    ///
    /// `config.tick_budget` should be set: a population that learns to
    /// survive indefinitely would otherwise never finish a round.
    ///
    /// # Panics
    ///
    /// Panics if `seeds` is empty.
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate_fitness(&mut self, config: &SimConfig, seeds: &[GapSeed]) {
        assert!(!seeds.is_empty());

        let mut totals = vec![0.0_f32; self.individuals.len()];
        for seed in seeds {
            let mut session =
                GenerationSession::with_seed(config.clone(), self.policies(), 0, *seed);
            session.run(&mut NeverStop, &mut NullRenderSink);
            for (total, fitness) in totals.iter_mut().zip(session.final_fitness()) {
                *total += fitness;
            }
        }

        let rounds = seeds.len() as f32;
        for (ind, total) in self.individuals.iter_mut().zip(&totals) {
            ind.fitness = total / rounds;
        }
        self.sort_by_fitness();
    }

    /// Records fitness totals produced by a session the caller ran
    /// itself, slot `i` belonging to individual `i`, then sorts by
    /// fitness descending.
    ///
    /// # Panics
    ///
    /// Panics if `totals` is not one entry per individual.
    pub fn record_fitness(&mut self, totals: &[f32]) {
        assert_eq!(totals.len(), self.individuals.len());
        for (ind, fitness) in self.individuals.iter_mut().zip(totals) {
            ind.fitness = *fitness;
        }
        self.sort_by_fitness();
    }

    /// Descriptive statistics for each genome position across the
    /// population, for diversity tracking.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn compute_genome_stats(&self) -> Vec<DescriptiveStats> {
        let genome_len = FeedForwardPolicy::genome_len(self.hidden_size);
        (0..genome_len)
            .map(|i| {
                let values = self.individuals.iter().map(|ind| ind.genome[i]);
                DescriptiveStats::new(values).unwrap()
            })
            .collect()
    }

    /// Fitness distribution of the whole population, for progress
    /// reporting.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn compute_fitness_stats(&self) -> DescriptiveStats {
        DescriptiveStats::new(self.individuals.iter().map(|ind| ind.fitness)).unwrap()
    }

    fn sort_by_fitness(&mut self) {
        self.individuals
            .sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap());
    }
}

/// Controls genetic algorithm evolution parameters.
#[derive(Debug)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged (elitism)
    pub elite_count: usize,
    /// Genome parameters are clipped to `[-max_weight, max_weight]`
    pub max_weight: f32,
    /// Tournament size for selection (larger = stronger pressure)
    pub tournament_size: usize,
    /// Standard deviation for Gaussian mutation noise
    pub mutation_sigma: f32,
    /// BLX-α crossover parameter (exploration beyond the parent range)
    pub blx_alpha: f32,
    /// Probability of mutating each genome parameter
    pub mutation_rate: f32,
}

impl PopulationEvolver {
    /// Evolves the population to create the next generation.
    ///
    /// Preserves the top `elite_count` individuals unchanged, then fills
    /// the rest through tournament selection, crossover, and mutation.
    /// The result has the same size as the input.
    ///
    /// # Panics
    ///
    /// Panics if the population is not sorted by fitness descending.
    #[must_use]
    pub fn evolve(&self, population: &Population) -> Population {
        let mut rng = rand::rng();
        let mut next_individuals = vec![];
        assert!(
            population
                .individuals
                .is_sorted_by(|a, b| a.fitness >= b.fitness)
        );

        // elite selection
        next_individuals.extend(population.individuals[..self.elite_count].iter().cloned());

        // generate the rest
        while next_individuals.len() < population.individuals.len() {
            let p1 = tournament_select(&population.individuals, self.tournament_size, &mut rng);
            let p2 = tournament_select(&population.individuals, self.tournament_size, &mut rng);

            let mut child = genome::blx_alpha(
                &p1.genome,
                &p2.genome,
                self.blx_alpha,
                self.max_weight,
                &mut rng,
            );
            genome::mutate(
                &mut child,
                self.mutation_sigma,
                self.max_weight,
                self.mutation_rate,
                &mut rng,
            );

            next_individuals.push(Individual {
                genome: child,
                fitness: 0.0,
            });
        }

        Population {
            hidden_size: population.hidden_size,
            individuals: next_individuals,
        }
    }
}

/// Selects an individual by tournament: draw `tournament_size` distinct
/// candidates and keep the fittest.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Individual
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0);
    population
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap())
        .unwrap()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn test_config() -> SimConfig {
        SimConfig {
            tick_budget: Some(60),
            ..SimConfig::default()
        }
    }

    #[test]
    fn random_population_has_matching_topology() {
        let mut rng = Pcg32::seed_from_u64(1);
        let population = Population::random(4, 10, &mut rng, 4.0);

        assert_eq!(population.individuals().len(), 10);
        let genome_len = FeedForwardPolicy::genome_len(4);
        assert!(
            population
                .individuals()
                .iter()
                .all(|ind| ind.genome().len() == genome_len)
        );
        assert_eq!(population.policies().len(), 10);
    }

    #[test]
    fn evaluate_fitness_sorts_descending() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut population = Population::random(4, 8, &mut rng, 4.0);
        let seeds = [GapSeed::from_bytes([1; 16]), GapSeed::from_bytes([2; 16])];

        population.evaluate_fitness(&test_config(), &seeds);

        assert!(
            population
                .individuals()
                .is_sorted_by(|a, b| a.fitness() >= b.fitness())
        );
        assert!(
            population
                .individuals()
                .iter()
                .all(|ind| ind.fitness().is_finite())
        );
    }

    #[test]
    fn evaluation_is_deterministic_for_fixed_seeds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let population = Population::random(4, 5, &mut rng, 4.0);
        let seeds = [GapSeed::from_bytes([7; 16])];

        let mut a = population.clone();
        let mut b = population;
        a.evaluate_fitness(&test_config(), &seeds);
        b.evaluate_fitness(&test_config(), &seeds);

        let fitness_a: Vec<_> = a.individuals().iter().map(Individual::fitness).collect();
        let fitness_b: Vec<_> = b.individuals().iter().map(Individual::fitness).collect();
        assert_eq!(fitness_a, fitness_b);
    }

    #[test]
    fn record_fitness_reorders_individuals() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut population = Population::random(2, 3, &mut rng, 4.0);

        population.record_fitness(&[1.0, 5.0, 3.0]);

        let fitness: Vec<_> = population
            .individuals()
            .iter()
            .map(Individual::fitness)
            .collect();
        assert_eq!(fitness, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn evolve_preserves_size_and_elites() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut population = Population::random(4, 6, &mut rng, 4.0);
        population.record_fitness(&[0.5, 2.0, 1.0, 4.0, 3.0, 0.0]);
        let best_genome = population.individuals()[0].genome().to_vec();

        let evolver = PopulationEvolver {
            elite_count: 2,
            max_weight: 4.0,
            tournament_size: 3,
            mutation_sigma: 0.2,
            blx_alpha: 0.3,
            mutation_rate: 0.15,
        };
        let next = evolver.evolve(&population);

        assert_eq!(next.individuals().len(), 6);
        assert_eq!(next.individuals()[0].genome(), best_genome.as_slice());
        let bound = evolver.max_weight;
        assert!(
            next.individuals()
                .iter()
                .flat_map(|ind| ind.genome())
                .all(|g| (-bound..=bound).contains(g))
        );
    }

    #[test]
    fn full_tournament_always_picks_the_best() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut population = Population::random(2, 4, &mut rng, 4.0);
        population.record_fitness(&[0.0, 2.0, 9.0, 1.0]);

        for _ in 0..20 {
            let winner = tournament_select(population.individuals(), 4, &mut rng);
            assert_eq!(winner.fitness(), 9.0);
        }
    }

    #[test]
    fn fitness_stats_cover_the_population() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut population = Population::random(2, 4, &mut rng, 4.0);
        population.record_fitness(&[1.0, 2.0, 3.0, 4.0]);

        let stats = population.compute_fitness_stats();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 2.5);

        let genome_stats = population.compute_genome_stats();
        assert_eq!(genome_stats.len(), FeedForwardPolicy::genome_len(2));
    }
}
