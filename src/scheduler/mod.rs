//! Scheduling engine and run statistics.
//!
//! Dispatches a batch to the selected [`Policy`] and aggregates the result
//! into a [`SimulationReport`].
//!
//! # Policies
//!
//! | Selector | Policy | Status |
//! |----------|--------|--------|
//! | FIFO | First In, First Out | implemented ([`FifoScheduler`]) |
//! | SJF | Shortest Job First | `NotImplemented` |
//! | RR | Round-Robin | `NotImplemented` |
//! | ML | Multilevel Queue | `NotImplemented` |
//!
//! # Statistics
//!
//! [`RunStats`] reports total and average turnaround/wait time and the
//! number of context switches (admission events). An empty finished list
//! yields [`RunSummary::NoneCompleted`] instead of zeroed averages.

mod fifo;
mod policy;
mod stats;

pub use fifo::{compute_fifo_times, FifoScheduler, TickSnapshot};
pub use policy::Policy;
pub use stats::{ProcessorStats, RunStats, RunSummary, SimulationReport};

use tracing::info;

use crate::config::SimulationConfig;
use crate::error::{SimError, SimResult};
use crate::models::Process;
use crate::pool::ProcessorPool;
use crate::workload::WorkloadGenerator;

/// Policy dispatcher.
///
/// Every policy maps to an explicit result: a report for FIFO, a
/// [`SimError::NotImplemented`] for the rest.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    policy: Policy,
    fifo: FifoScheduler,
}

impl Simulation {
    /// Creates a dispatcher for `policy`.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            fifo: FifoScheduler::new(),
        }
    }

    /// Runs `batch` on `pool` under the selected policy.
    pub fn run(
        &self,
        batch: Vec<Process>,
        pool: &mut ProcessorPool,
    ) -> SimResult<SimulationReport> {
        match self.policy {
            Policy::Fifo => self.fifo.run(batch, pool),
            Policy::Sjf | Policy::RoundRobin | Policy::Multilevel => Err(
                SimError::not_implemented(format!("{} policy", self.policy.name())),
            ),
        }
    }
}

/// Runs a full simulation from configuration.
///
/// Builds the processor pool, generates the seeded workload, and dispatches
/// it to the configured policy.
pub fn simulate(config: &SimulationConfig) -> SimResult<SimulationReport> {
    let policy = config.policy.ensure_implemented()?;
    let mut pool = config.build_pool()?;
    let batch = WorkloadGenerator::new(config.workload.clone()).generate_for(policy, config.seed)?;

    info!(
        seed = config.seed,
        scenario = %config.scenario,
        policy = %policy,
        "running simulation"
    );
    Simulation::new(policy).run(batch, &mut pool)
}
