//! Seeded synthetic workload generation.
//!
//! Produces a fixed-size batch of processes whose service time, arrival
//! time and memory requirement are drawn from three independent uniform
//! integer distributions. The same seed and configuration always yield
//! the same batch.
//!
//! # Default Ranges
//!
//! | Field | Range |
//! |-------|-------|
//! | service_time | 10^6 ..= 10^12 cycles |
//! | arrival_time | 1 ..= 10^10 |
//! | memory_req | 1 ..= 8 units |

use rand::distr::uniform::SampleUniform;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::models::Process;
use crate::scheduler::Policy;

/// Default number of processes per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// An inclusive value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    /// Smallest value.
    pub min: T,
    /// Largest value.
    pub max: T,
}

impl<T> ValueRange<T> {
    /// Creates an inclusive range.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: SampleUniform + PartialOrd + Copy + std::fmt::Display> ValueRange<T> {
    fn uniform(&self, field: &str) -> SimResult<Uniform<T>> {
        Uniform::new_inclusive(self.min, self.max).map_err(|e| {
            SimError::invalid_config(format!(
                "{field} range {}..={} is invalid: {e}",
                self.min, self.max
            ))
        })
    }
}

/// Workload shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of processes to generate.
    pub batch_size: usize,
    /// Service time range (cycles).
    pub service_time: ValueRange<u64>,
    /// Arrival time range.
    pub arrival_time: ValueRange<u64>,
    /// Memory requirement range (units).
    pub memory_req: ValueRange<u32>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            service_time: ValueRange::new(1_000_000, 1_000_000_000_000),
            arrival_time: ValueRange::new(1, 10_000_000_000),
            memory_req: ValueRange::new(1, 8),
        }
    }
}

impl WorkloadConfig {
    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the service time range.
    pub fn with_service_time(mut self, min: u64, max: u64) -> Self {
        self.service_time = ValueRange::new(min, max);
        self
    }

    /// Sets the arrival time range.
    pub fn with_arrival_time(mut self, min: u64, max: u64) -> Self {
        self.arrival_time = ValueRange::new(min, max);
        self
    }

    /// Sets the memory requirement range.
    pub fn with_memory_req(mut self, min: u32, max: u32) -> Self {
        self.memory_req = ValueRange::new(min, max);
        self
    }

    /// Checks that every range is non-empty.
    pub fn validate(&self) -> SimResult<()> {
        self.service_time.uniform("service_time")?;
        self.arrival_time.uniform("arrival_time")?;
        self.memory_req.uniform("memory_req")?;
        Ok(())
    }
}

/// Deterministic batch producer.
///
/// # Example
///
/// ```
/// use u_procsim::workload::{WorkloadConfig, WorkloadGenerator};
///
/// let generator = WorkloadGenerator::new(WorkloadConfig::default());
/// let a = generator.generate(42).unwrap();
/// let b = generator.generate(42).unwrap();
///
/// assert_eq!(a.len(), 50);
/// assert_eq!(a, b);
/// assert_eq!(a[0].id, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    /// Creates a generator for the given workload shape.
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    /// Generates `batch_size` processes with IDs `1..=batch_size`.
    ///
    /// Each process draws service time, then arrival time, then memory
    /// requirement from one seeded RNG. Derived fields start at zero.
    pub fn generate(&self, seed: u64) -> SimResult<Vec<Process>> {
        let service = self.config.service_time.uniform("service_time")?;
        let arrival = self.config.arrival_time.uniform("arrival_time")?;
        let memory = self.config.memory_req.uniform("memory_req")?;
        let count = u32::try_from(self.config.batch_size).map_err(|_| {
            SimError::invalid_config(format!(
                "batch size {} exceeds the process ID space",
                self.config.batch_size
            ))
        })?;

        let mut rng = StdRng::seed_from_u64(seed);
        let batch: Vec<Process> = (1..=count)
            .map(|id| {
                let service_time = service.sample(&mut rng);
                let arrival_time = arrival.sample(&mut rng);
                let memory_req = memory.sample(&mut rng);
                Process::new(id, service_time)
                    .with_arrival_time(arrival_time)
                    .with_memory(memory_req)
            })
            .collect();

        debug!(seed, processes = batch.len(), "generated workload");
        Ok(batch)
    }

    /// Generates a batch for `policy`.
    ///
    /// Only FIFO workloads are defined; other policies return
    /// [`SimError::NotImplemented`].
    pub fn generate_for(&self, policy: Policy, seed: u64) -> SimResult<Vec<Process>> {
        policy.ensure_implemented()?;
        self.generate(seed)
    }
}

/// Parses a seed from user input.
///
/// # Errors
/// [`SimError::InvalidSeed`] if the input is not a non-negative integer.
pub fn parse_seed(input: &str) -> SimResult<u64> {
    input.trim().parse().map_err(|_| SimError::InvalidSeed {
        input: input.trim().to_string(),
    })
}
