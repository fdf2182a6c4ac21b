//! Simulation run configuration.
//!
//! A [`SimulationConfig`] bundles everything a run depends on: the seed,
//! the processor scenario, the policy, the workload shape and an optional
//! explicit processor list. It can be built in code or loaded from JSON;
//! omitted JSON fields take their defaults.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "scenario": 1,
//!   "policy": "FIFO",
//!   "workload": { "batch_size": 20 },
//!   "processors": [
//!     { "id": 1, "speed": 3, "memory_capability": 8 },
//!     { "id": 2, "speed": 2, "memory_capability": 4 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::models::Processor;
use crate::pool::{ProcessorPool, Scenario};
use crate::scheduler::Policy;
use crate::workload::WorkloadConfig;

/// Configuration of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed for workload generation (default 0).
    pub seed: u64,
    /// Processor pool scenario.
    pub scenario: Scenario,
    /// Scheduling policy.
    pub policy: Policy,
    /// Workload shape.
    pub workload: WorkloadConfig,
    /// Explicit processors; when set, replaces the scenario's pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processors: Option<Vec<Processor>>,
}

impl SimulationConfig {
    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the scenario.
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Sets the policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.workload.batch_size = batch_size;
        self
    }

    /// Replaces the workload shape.
    pub fn with_workload(mut self, workload: WorkloadConfig) -> Self {
        self.workload = workload;
        self
    }

    /// Uses an explicit processor list instead of the scenario's pool.
    pub fn with_processors(mut self, processors: Vec<Processor>) -> Self {
        self.processors = Some(processors);
        self
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded configuration file");
        Self::from_json_str(&text)
    }

    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks workload ranges and the explicit processor list, if any.
    pub fn validate(&self) -> SimResult<()> {
        self.workload.validate()?;
        if let Some(processors) = &self.processors {
            ProcessorPool::custom(processors.clone())?;
        }
        Ok(())
    }

    /// Builds the processor pool for this run.
    pub fn build_pool(&self) -> SimResult<ProcessorPool> {
        match &self.processors {
            Some(processors) => ProcessorPool::custom(processors.clone()),
            None => ProcessorPool::for_scenario(self.scenario),
        }
    }
}

impl std::str::FromStr for SimulationConfig {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.scenario, Scenario::Homogeneous);
        assert_eq!(config.policy, Policy::Fifo);
        assert_eq!(config.workload.batch_size, 50);
        assert!(config.processors.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"seed": 9, "workload": {"batch_size": 5}}"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.workload.batch_size, 5);
        assert_eq!(config.workload.memory_req, WorkloadConfig::default().memory_req);
        assert_eq!(config.policy, Policy::Fifo);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimulationConfig::default()
            .with_seed(11)
            .with_policy(Policy::Sjf)
            .with_processors(vec![Processor::new(1).with_memory(4)]);
        let json = config.to_json_pretty().unwrap();
        let back: SimulationConfig = json.parse().unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            SimulationConfig::from_json_str("{ not json"),
            Err(SimError::Json(_))
        ));
        assert!(SimulationConfig::from_json_str(r#"{"policy": "EDF"}"#).is_err());
        assert!(SimulationConfig::from_json_str(r#"{"scenario": 7}"#).is_err());
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let json = r#"{"workload": {"service_time": {"min": 10, "max": 1}}}"#;
        assert!(matches!(
            SimulationConfig::from_json_str(json),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_custom_processors_override_scenario() {
        let config = SimulationConfig::default()
            .with_scenario(Scenario::Reserved3)
            .with_processors(vec![Processor::new(1), Processor::new(2).with_speed(1)]);
        let pool = config.build_pool().unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(2).map(Processor::speed), Some(1));
    }

    #[test]
    fn test_empty_processor_list() {
        let config = SimulationConfig::default().with_processors(Vec::new());
        assert!(matches!(config.build_pool(), Err(SimError::EmptyPool)));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_file("/nonexistent/procsim.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
