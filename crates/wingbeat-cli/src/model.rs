use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wingbeat_policy::FeedForwardPolicy;

/// A trained policy as stored on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub hidden_size: usize,
    pub genome: Vec<f32>,
}

impl PolicyModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open policy model file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let model = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to read policy model file: {}", path.display()))?;

        Ok(model)
    }

    pub fn to_policy(&self) -> anyhow::Result<FeedForwardPolicy> {
        FeedForwardPolicy::from_genome(self.hidden_size, self.genome.clone())
            .with_context(|| format!("Invalid genome in policy model '{}'", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trips_through_json() {
        let model = PolicyModel {
            name: "flock".to_owned(),
            trained_at: Utc::now(),
            final_fitness: 42.5,
            hidden_size: 1,
            genome: vec![0.0; FeedForwardPolicy::genome_len(1)],
        };

        let json = serde_json::to_string(&model).unwrap();
        let back: PolicyModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, model.name);
        assert_eq!(back.genome, model.genome);
        assert!(back.to_policy().is_ok());
    }

    #[test]
    fn mismatched_genome_is_rejected() {
        let model = PolicyModel {
            name: "broken".to_owned(),
            trained_at: Utc::now(),
            final_fitness: 0.0,
            hidden_size: 4,
            genome: vec![0.0; 3],
        };
        assert!(model.to_policy().is_err());
    }
}
