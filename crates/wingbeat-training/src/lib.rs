//! Training system for evolving flap policies with a genetic algorithm.
//!
//! # How Training Works
//!
//! 1. **Population** - Create a population of individuals, each holding a
//!    random network genome
//! 2. **Evaluation** - The whole population flies one shared pipe course
//!    per round; each bird's fitness accumulates inside the simulation
//! 3. **Fitness** - Per-bird totals are averaged over several seeded
//!    rounds so one lucky course cannot dominate
//! 4. **Selection** - Tournament selection picks parents from the best
//!    performers
//! 5. **Reproduction** - BLX-α crossover plus Gaussian mutation produce
//!    the next generation, with the top individuals carried over intact
//! 6. **Repeat** - Continue until the population clears courses reliably
//!
//! Unlike per-individual evaluation schemes, every candidate flies the
//! same course in the same session, so a round is one simulation pass
//! regardless of population size.
//!
//! See the [`genetic`] module for the algorithm and [`genome`] for the
//! vector operators.

pub mod genetic;
pub mod genome;
