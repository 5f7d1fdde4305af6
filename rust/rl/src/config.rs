use crate::error::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub episodes: usize,
    pub gamma: f64,
    /// The evaluated Blackjack policy sticks from this total on.
    pub stick_threshold: u8,
    pub seed: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            gamma: 1.0,
            stick_threshold: 20,
            seed: 2718,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub episodes: usize,
    pub gamma: f64,
    pub seed: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            episodes: 500_000,
            gamma: 1.0,
            seed: 2718,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueIterationConfig {
    pub gamma: f64,
    pub theta: f64,
    pub max_iterations: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            theta: 1e-3,
            max_iterations: 1_000,
            rows: 4,
            cols: 4,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub prediction: PredictionConfig,
    pub control: ControlConfig,
    pub value_iteration: ValueIterationConfig,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, gamma) in [
            ("prediction", self.prediction.gamma),
            ("control", self.control.gamma),
            ("value_iteration", self.value_iteration.gamma),
        ] {
            if !(gamma > 0. && gamma <= 1.) {
                return Err(RlError::Config(format!(
                    "{name}.gamma must be in (0, 1], got {gamma}"
                )));
            }
        }
        if !(self.value_iteration.theta > 0.) {
            return Err(RlError::Config(
                "value_iteration.theta must be positive".to_string(),
            ));
        }
        if self.value_iteration.rows * self.value_iteration.cols < 2 {
            return Err(RlError::Config(
                "value_iteration grid needs at least two cells".to_string(),
            ));
        }

        Ok(())
    }
}
