//! Run statistics.
//!
//! Aggregates a finished list into the figures the simulator reports.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total turnaround | Sum of precomputed turnaround times |
//! | Total wait | Sum of precomputed wait times |
//! | Avg turnaround / wait | Total / completed count (integer division) |
//! | Context switches | Admission events |
//! | Ticks | Simulation steps until pool and queue drained |

use serde::{Deserialize, Serialize};

use crate::models::{FinishedProcess, Process};

use super::Policy;

/// Aggregate statistics of a run in which at least one process completed.
///
/// All times are in simulated cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of completed processes.
    pub completed: usize,
    /// Sum of turnaround times.
    pub total_turnaround_time: u64,
    /// Sum of wait times.
    pub total_wait_time: u64,
    /// `total_turnaround_time / completed`, truncated.
    pub avg_turnaround_time: u64,
    /// `total_wait_time / completed`, truncated.
    pub avg_wait_time: u64,
    /// Admission events.
    pub context_switches: u64,
    /// Ticks simulated.
    pub ticks: u64,
}

impl RunStats {
    /// Computes statistics from a finished list.
    ///
    /// Returns `None` for an empty list rather than zero-valued averages.
    pub fn calculate(
        finished: &[FinishedProcess],
        context_switches: u64,
        ticks: u64,
    ) -> Option<Self> {
        if finished.is_empty() {
            return None;
        }
        let total_turnaround_time = finished
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.turnaround_time));
        let total_wait_time = finished
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.wait_time));
        let count = finished.len() as u64;

        Some(Self {
            completed: finished.len(),
            total_turnaround_time,
            total_wait_time,
            avg_turnaround_time: total_turnaround_time / count,
            avg_wait_time: total_wait_time / count,
            context_switches,
            ticks,
        })
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunSummary {
    /// At least one process completed.
    Completed(RunStats),
    /// The finished list is empty (e.g. an empty batch).
    NoneCompleted,
}

impl RunSummary {
    /// Summarizes a finished list.
    pub fn from_finished(finished: &[FinishedProcess], context_switches: u64, ticks: u64) -> Self {
        match RunStats::calculate(finished, context_switches, ticks) {
            Some(stats) => RunSummary::Completed(stats),
            None => RunSummary::NoneCompleted,
        }
    }

    /// The statistics, if any process completed.
    pub fn stats(&self) -> Option<&RunStats> {
        match self {
            RunSummary::Completed(stats) => Some(stats),
            RunSummary::NoneCompleted => None,
        }
    }
}

/// Per-processor activity over a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorStats {
    /// Processor identifier.
    pub processor_id: u32,
    /// Processes admitted.
    pub admissions: u64,
    /// Processes completed.
    pub completions: u64,
    /// Ticks with at least one resident.
    pub busy_ticks: u64,
    /// Highest memory occupancy observed.
    pub peak_memory: u32,
}

impl ProcessorStats {
    /// Creates zeroed stats for a processor.
    pub fn new(processor_id: u32) -> Self {
        Self {
            processor_id,
            admissions: 0,
            completions: 0,
            busy_ticks: 0,
            peak_memory: 0,
        }
    }

    /// Fraction of `ticks` this processor was busy (0.0 if `ticks` is 0).
    pub fn utilization(&self, ticks: u64) -> f64 {
        if ticks == 0 {
            0.0
        } else {
            self.busy_ticks as f64 / ticks as f64
        }
    }
}

/// Result of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy that produced this report.
    pub policy: Policy,
    /// The batch after the pre-pass, in admission order.
    pub batch: Vec<Process>,
    /// Completed processes in completion order.
    pub finished: Vec<FinishedProcess>,
    /// Per-processor activity, in pool order.
    pub processors: Vec<ProcessorStats>,
    /// Aggregate outcome.
    pub summary: RunSummary,
}

impl SimulationReport {
    /// Looks up a finished process by ID.
    pub fn finished_process(&self, id: u32) -> Option<&FinishedProcess> {
        self.finished.iter().find(|p| p.id == id)
    }
}
