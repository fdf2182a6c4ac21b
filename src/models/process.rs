//! Process model.
//!
//! A process is one schedulable unit of work: a number of simulated
//! cycles to execute and an amount of memory it occupies while resident
//! on a processor.

use serde::{Deserialize, Serialize};

/// A process to be scheduled.
///
/// # Lifecycle
/// 1. Created by the workload generator with derived fields zeroed.
/// 2. `wait_time` and `turnaround_time` are filled in by the scheduler's
///    pre-pass, once, before any execution.
/// 3. `cycles_worked` grows every tick while resident on a processor.
/// 4. On completion the process becomes a [`FinishedProcess`](super::FinishedProcess).
///
/// # Time Representation
/// All times are in simulated clock cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier (1-based).
    pub id: u32,
    /// Total cycles required to complete.
    pub service_time: u64,
    /// Generated arrival time. Not used by FIFO.
    pub arrival_time: u64,
    /// Memory units occupied while resident.
    pub memory_req: u32,
    /// Precomputed wait before admission (cycles).
    pub wait_time: u64,
    /// `service_time + wait_time` (cycles).
    pub turnaround_time: u64,
    /// Cycles granted so far.
    pub cycles_worked: u64,
}

impl Process {
    /// Creates a process needing `service_time` cycles and one memory unit.
    pub fn new(id: u32, service_time: u64) -> Self {
        Self {
            id,
            service_time,
            arrival_time: 0,
            memory_req: 1,
            wait_time: 0,
            turnaround_time: 0,
            cycles_worked: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival_time(mut self, arrival_time: u64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the memory requirement.
    pub fn with_memory(mut self, memory_req: u32) -> Self {
        self.memory_req = memory_req;
        self
    }

    /// Whether the process has received all the cycles it needs.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.cycles_worked >= self.service_time
    }

    /// Cycles worked beyond `service_time`.
    #[inline]
    pub fn excess_cycles(&self) -> u64 {
        self.cycles_worked.saturating_sub(self.service_time)
    }

    pub(crate) fn grant_cycles(&mut self, cycles: u64) {
        self.cycles_worked = self.cycles_worked.saturating_add(cycles);
    }
}
