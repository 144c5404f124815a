//! Genome vector operations for the genetic algorithm.
//!
//! A genome is the flat parameter vector of one
//! [`FeedForwardPolicy`](wingbeat_policy::FeedForwardPolicy). Parameters
//! are signed network weights, so every operator clamps to
//! `[-max_weight, max_weight]` rather than normalizing; scaling a
//! network's weights changes its behavior, so there is no redundancy for
//! normalization to remove.
//!
//! - **Initialization**: [`random`] draws uniform signed genomes
//! - **Crossover**: [`blx_alpha`] implements the BLX-α operator
//! - **Mutation**: [`mutate`] applies Gaussian perturbation

use rand::Rng;
use rand_distr::Normal;

/// Creates a genome by applying a function to each index.
///
/// # Examples
///
/// ```
/// use wingbeat_training::genome;
///
/// let genome = genome::from_fn(|i| i as f32, 3);
/// assert_eq!(genome, vec![0.0, 1.0, 2.0]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f32>
where
    F: FnMut(usize) -> f32,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Generates a random genome with each parameter uniform in
/// `[-max_weight, max_weight]`.
pub fn random<R>(rng: &mut R, max_weight: f32, len: usize) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    from_fn(|_| rng.random_range(-max_weight..=max_weight), len)
}

/// Performs BLX-α (blend crossover) between two parent genomes.
///
/// For each position, offspring are sampled uniformly from the parents'
/// range expanded by `alpha` times its width on both sides, then clamped
/// to `[-max_weight, max_weight]`. `alpha = 0.0` keeps offspring strictly
/// between the parents; larger values explore beyond them.
///
/// # Panics
///
/// Panics if the parent genomes have different lengths.
pub fn blx_alpha<R>(p1: &[f32], p2: &[f32], alpha: f32, max_weight: f32, rng: &mut R) -> Vec<f32>
where
    R: Rng + ?Sized,
{
    assert_eq!(p1.len(), p2.len());
    from_fn(
        |i| {
            let x1 = p1[i];
            let x2 = p2[i];
            let min = f32::min(x1, x2);
            let max = f32::max(x1, x2);
            let d = max - min;
            let lower = min - alpha * d;
            let upper = max + alpha * d;
            rng.random_range(lower..=upper).clamp(-max_weight, max_weight)
        },
        p1.len(),
    )
}

/// Applies Gaussian mutation to a genome in-place.
///
/// Each parameter is perturbed with probability `rate` by a sample from
/// `N(0, sigma)` and clamped to `[-max_weight, max_weight]`. `sigma`
/// controls mutation strength; training typically shrinks it as the
/// population converges.
pub fn mutate<R>(genome: &mut [f32], sigma: f32, max_weight: f32, rate: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let normal = Normal::new(0.0, sigma).unwrap();
    for g in genome {
        if rng.random_bool(rate.into()) {
            *g = (*g + rng.sample(normal)).clamp(-max_weight, max_weight);
        }
    }
}
