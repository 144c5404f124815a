use wingbeat_engine::{DecisionPolicy, Observation};

/// Genome has the wrong length for the requested topology.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("genome length {actual} does not match topology (expected {expected})")]
pub struct GenomeLengthError {
    pub expected: usize,
    pub actual: usize,
}

/// A 3-input, single-hidden-layer, 1-output network.
///
/// The three inputs are the observation components (own height, distance
/// to the gap's upper edge, distance to its lower edge). Hidden units use
/// `tanh`, the output unit a sigmoid, so the flap signal lands in
/// `(0.0, 1.0)` and compares cleanly against the flap threshold.
///
/// All parameters live in one flat genome so the training crate can
/// breed policies without knowing the topology:
///
/// ```text
/// [input→hidden weights (3·h), hidden biases (h),
///  hidden→output weights (h), output bias (1)]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardPolicy {
    hidden_size: usize,
    genome: Vec<f32>,
}

impl FeedForwardPolicy {
    pub const INPUT_SIZE: usize = 3;

    /// Genome length required for a given hidden-layer width.
    #[must_use]
    pub const fn genome_len(hidden_size: usize) -> usize {
        Self::INPUT_SIZE * hidden_size + hidden_size + hidden_size + 1
    }

    /// Builds a policy from a flat genome.
    ///
    /// # Errors
    ///
    /// Returns [`GenomeLengthError`] if `genome.len()` does not match
    /// [`Self::genome_len`] for `hidden_size`.
    pub fn from_genome(hidden_size: usize, genome: Vec<f32>) -> Result<Self, GenomeLengthError> {
        let expected = Self::genome_len(hidden_size);
        if genome.len() != expected {
            return Err(GenomeLengthError {
                expected,
                actual: genome.len(),
            });
        }
        Ok(Self {
            hidden_size,
            genome,
        })
    }

    #[must_use]
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    #[must_use]
    pub fn genome(&self) -> &[f32] {
        &self.genome
    }

    #[must_use]
    pub fn into_genome(self) -> Vec<f32> {
        self.genome
    }

    /// Runs one forward pass.
    #[must_use]
    pub fn activate(&self, inputs: [f32; Self::INPUT_SIZE]) -> f32 {
        let h = self.hidden_size;
        let (hidden_weights, rest) = self.genome.split_at(Self::INPUT_SIZE * h);
        let (hidden_biases, rest) = rest.split_at(h);
        let (output_weights, output_bias) = rest.split_at(h);

        let mut sum = output_bias[0];
        for unit in 0..h {
            let mut pre = hidden_biases[unit];
            for (input_index, input) in inputs.iter().enumerate() {
                pre += hidden_weights[unit * Self::INPUT_SIZE + input_index] * input;
            }
            sum += output_weights[unit] * pre.tanh();
        }
        sigmoid(sum)
    }
}

impl DecisionPolicy for FeedForwardPolicy {
    fn decide(&mut self, observation: &Observation) -> f32 {
        self.activate(observation.as_array())
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_policy(hidden_size: usize) -> FeedForwardPolicy {
        FeedForwardPolicy::from_genome(
            hidden_size,
            vec![0.0; FeedForwardPolicy::genome_len(hidden_size)],
        )
        .unwrap()
    }

    #[test]
    fn genome_len_matches_topology() {
        // 3·4 weights + 4 biases + 4 weights + 1 bias
        assert_eq!(FeedForwardPolicy::genome_len(4), 21);
        assert_eq!(FeedForwardPolicy::genome_len(1), 6);
    }

    #[test]
    fn wrong_genome_length_is_rejected() {
        let err = FeedForwardPolicy::from_genome(4, vec![0.0; 20]).unwrap_err();
        assert_eq!(err.expected, 21);
        assert_eq!(err.actual, 20);
    }

    #[test]
    fn zero_genome_outputs_exactly_half() {
        let policy = zero_policy(4);
        let output = policy.activate([100.0, 50.0, 250.0]);
        assert!((output - 0.5).abs() < 1e-6);
    }

    #[test]
    fn output_stays_in_unit_interval() {
        let len = FeedForwardPolicy::genome_len(5);
        let genome: Vec<f32> = (0..len).map(|i| if i % 2 == 0 { 3.0 } else { -3.0 }).collect();
        let policy = FeedForwardPolicy::from_genome(5, genome).unwrap();

        for inputs in [[0.0, 0.0, 0.0], [350.0, 10.0, 190.0], [-50.0, 400.0, 0.0]] {
            let output = policy.activate(inputs);
            assert!(output > 0.0 && output < 1.0, "out of range: {output}");
        }
    }

    #[test]
    fn output_bias_shifts_the_decision() {
        let hidden_size = 2;
        let mut genome = vec![0.0; FeedForwardPolicy::genome_len(hidden_size)];
        let last = genome.len() - 1;
        genome[last] = 10.0;
        let policy = FeedForwardPolicy::from_genome(hidden_size, genome).unwrap();
        assert!(policy.activate([0.0, 0.0, 0.0]) > 0.99);
    }

    #[test]
    fn decide_uses_the_observation_fields() {
        let hidden_size = 1;
        // Single hidden unit wired to bird_y only, strongly positive.
        let genome = vec![1.0, 0.0, 0.0, 0.0, 10.0, 0.0];
        let mut policy = FeedForwardPolicy::from_genome(hidden_size, genome).unwrap();

        let high = Observation {
            bird_y: 5.0,
            gap_top_distance: 0.0,
            gap_bottom_distance: 0.0,
        };
        let low = Observation {
            bird_y: -5.0,
            gap_top_distance: 0.0,
            gap_bottom_distance: 0.0,
        };
        assert!(policy.decide(&high) > 0.9);
        assert!(policy.decide(&low) < 0.1);
    }
}
