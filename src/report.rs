//! Report rendering.
//!
//! Formats a [`SimulationReport`] as plain text ([`TextReport`]) or JSON
//! ([`render_json`]). Rendering is pure; nothing here touches the engine.
//!
//! # Text Layout
//!
//! | Section | Shown |
//! |---------|-------|
//! | Batch dump (pre-pass values) | `with_batch(true)` |
//! | One block per finished process | always |
//! | Run totals or "No processes completed." | always |
//! | Per-processor table | `with_processors(true)` |

use std::fmt;

use crate::error::SimResult;
use crate::models::FinishedProcess;
use crate::scheduler::{RunSummary, SimulationReport};

/// Plain-text view of a report.
///
/// # Example
///
/// ```
/// use u_procsim::config::SimulationConfig;
/// use u_procsim::report::TextReport;
/// use u_procsim::scheduler::simulate;
///
/// let report = simulate(&SimulationConfig::default().with_batch_size(3)).unwrap();
/// let text = TextReport::new(&report).with_processors(true).to_string();
///
/// assert!(text.contains("Arrival time (ignored):"));
/// assert!(text.contains("Context switches: 3"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    report: &'a SimulationReport,
    show_batch: bool,
    show_processors: bool,
}

impl<'a> TextReport<'a> {
    /// Creates a text view with only process blocks and totals.
    pub fn new(report: &'a SimulationReport) -> Self {
        Self {
            report,
            show_batch: false,
            show_processors: false,
        }
    }

    /// Includes the batch dump before the process blocks.
    pub fn with_batch(mut self, show: bool) -> Self {
        self.show_batch = show;
        self
    }

    /// Includes the per-processor table after the totals.
    pub fn with_processors(mut self, show: bool) -> Self {
        self.show_processors = show;
        self
    }

    fn write_batch(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Batch ({} processes, admission order):", self.report.batch.len())?;
        writeln!(
            f,
            "{:>6} {:>16} {:>16} {:>16}",
            "ID", "Service", "Wait", "Turnaround"
        )?;
        for p in &self.report.batch {
            writeln!(
                f,
                "{:>6} {:>16} {:>16} {:>16}",
                p.id, p.service_time, p.wait_time, p.turnaround_time
            )?;
        }
        writeln!(f)
    }

    fn write_processors(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ticks = self.report.summary.stats().map_or(0, |s| s.ticks);
        writeln!(f)?;
        writeln!(f, "Processors:")?;
        writeln!(
            f,
            "{:>4} {:>10} {:>10} {:>10} {:>8} {:>7}",
            "CPU", "Admitted", "Completed", "Busy", "Peak mem", "Util"
        )?;
        for cpu in &self.report.processors {
            writeln!(
                f,
                "{:>4} {:>10} {:>10} {:>10} {:>8} {:>6.1}%",
                cpu.processor_id,
                cpu.admissions,
                cpu.completions,
                cpu.busy_ticks,
                cpu.peak_memory,
                cpu.utilization(ticks) * 100.0
            )?;
        }
        Ok(())
    }
}

fn write_process(f: &mut fmt::Formatter<'_>, p: &FinishedProcess) -> fmt::Result {
    writeln!(f, "ID: {}", p.id)?;
    writeln!(f, "  Service time: {}", p.service_time)?;
    writeln!(f, "  Arrival time (ignored): {}", p.arrival_time)?;
    writeln!(f, "  Memory req: {}", p.memory_req)?;
    writeln!(f, "  Wait time: {}", p.wait_time)?;
    writeln!(f, "  Turnaround time: {}", p.turnaround_time)?;
    writeln!(
        f,
        "  Processor: {} (ticks {}..={})",
        p.processor_id, p.admitted_tick, p.completed_tick
    )?;
    writeln!(f)
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Policy: {}", self.report.policy.description())?;
        writeln!(f)?;

        if self.show_batch {
            self.write_batch(f)?;
        }

        for p in &self.report.finished {
            write_process(f, p)?;
        }

        match &self.report.summary {
            RunSummary::Completed(stats) => {
                writeln!(f, "Total turnaround time: {}", stats.total_turnaround_time)?;
                writeln!(f, "Average turnaround time: {}", stats.avg_turnaround_time)?;
                writeln!(f, "Average wait time: {}", stats.avg_wait_time)?;
                writeln!(f, "Context switches: {}", stats.context_switches)?;
                writeln!(f, "Ticks: {}", stats.ticks)?;
            }
            RunSummary::NoneCompleted => writeln!(f, "No processes completed.")?,
        }

        if self.show_processors {
            self.write_processors(f)?;
        }
        Ok(())
    }
}

/// Renders the whole report as pretty-printed JSON.
pub fn render_json(report: &SimulationReport) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
