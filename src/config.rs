//! Optional YAML overrides for the network hyperparameters.
use crate::network::NetworkConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Config file format; every field may be omitted.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkOverrides {
    pub input_count: Option<usize>,
    pub output_count: Option<usize>,
    pub hidden_count: Option<usize>,
    pub steps: Option<usize>,
    pub rate: Option<f64>,
    pub seed: Option<u64>,
}

impl NetworkOverrides {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("invalid network config")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("can't read config {}", path.display()))?;
        Self::from_yaml(&text)
    }

    // merge configs where the second overwrites the first
    pub fn merge(self, other: Self) -> Self {
        Self {
            input_count: other.input_count.or(self.input_count),
            output_count: other.output_count.or(self.output_count),
            hidden_count: other.hidden_count.or(self.hidden_count),
            steps: other.steps.or(self.steps),
            rate: other.rate.or(self.rate),
            seed: other.seed.or(self.seed),
        }
    }

    /// Fill the unset fields from `base`.
    pub fn apply(self, base: NetworkConfig) -> NetworkConfig {
        NetworkConfig {
            input_count: self.input_count.unwrap_or(base.input_count),
            output_count: self.output_count.unwrap_or(base.output_count),
            hidden_count: self.hidden_count.unwrap_or(base.hidden_count),
            steps: self.steps.unwrap_or(base.steps),
            rate: self.rate.unwrap_or(base.rate),
            seed: self.seed.or(base.seed),
        }
    }
}
