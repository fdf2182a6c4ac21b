//! Completed-process snapshots.
//!
//! Once a process leaves its processor it is frozen into a
//! [`FinishedProcess`]. The finished list is append-only and ordered by
//! completion, not by admission.

use serde::{Deserialize, Serialize};

use super::Process;

/// An immutable record of a completed process.
///
/// Carries the process's own fields plus where and when it ran. Tick
/// numbers are 1-based; a process admitted on the first tick has
/// `admitted_tick == 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedProcess {
    /// Process identifier.
    pub id: u32,
    /// Total cycles required.
    pub service_time: u64,
    /// Generated arrival time (unused by FIFO).
    pub arrival_time: u64,
    /// Memory units occupied while resident.
    pub memory_req: u32,
    /// Precomputed wait time (cycles).
    pub wait_time: u64,
    /// Precomputed turnaround time (cycles).
    pub turnaround_time: u64,
    /// Cycles granted by completion, including any carry credit.
    pub cycles_worked: u64,
    /// Processor the process ran on.
    pub processor_id: u32,
    /// Tick in which the process was admitted.
    pub admitted_tick: u64,
    /// Tick in which the process completed.
    pub completed_tick: u64,
}

impl FinishedProcess {
    pub(crate) fn from_completion(
        process: Process,
        processor_id: u32,
        admitted_tick: u64,
        completed_tick: u64,
    ) -> Self {
        Self {
            id: process.id,
            service_time: process.service_time,
            arrival_time: process.arrival_time,
            memory_req: process.memory_req,
            wait_time: process.wait_time,
            turnaround_time: process.turnaround_time,
            cycles_worked: process.cycles_worked,
            processor_id,
            admitted_tick,
            completed_tick,
        }
    }

    /// Ticks spent in the pending queue before admission.
    ///
    /// This is the queueing delay actually observed during the run, as
    /// opposed to the closed-form `wait_time` estimate.
    #[inline]
    pub fn measured_wait_ticks(&self) -> u64 {
        self.admitted_tick.saturating_sub(1)
    }

    /// Ticks spent resident, counting both the admission and completion tick.
    #[inline]
    pub fn resident_ticks(&self) -> u64 {
        self.completed_tick.saturating_sub(self.admitted_tick) + 1
    }
}
