//! FIFO scheduling engine.
//!
//! # Algorithm
//!
//! Pre-pass:
//! 1. Keep the batch in generation order; this is the admission order.
//! 2. `wait[0] = 0`, `wait[i] = service[i-1] + wait[i-1]`.
//! 3. `turnaround[i] = service[i] + wait[i]`.
//!
//! Tick loop, for each processor in pool order:
//! 1. Admit the pending head if it fits (first fit by processor order,
//!    at most one admission per processor per tick).
//! 2. Grant `speed * 10^9` cycles to every resident.
//! 3. Retire completed residents, free their memory, bank excess cycles
//!    as credit for the processor's next admission.
//!
//! The loop ends once the pending queue and every resident set are empty.
//!
//! # Complexity
//! O(t * (p + r)) where t=ticks, p=processors, r=residents per processor.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, info, trace, warn};

use crate::error::{SimError, SimResult};
use crate::models::{FinishedProcess, Process};
use crate::pool::ProcessorPool;
use crate::validation;

use super::{Policy, ProcessorStats, RunSummary, SimulationReport};

/// Fills in the closed-form FIFO wait and turnaround times.
///
/// Each process waits for the combined service time of every process ahead
/// of it in admission order. The estimate ignores memory-constrained
/// admission delays and parallel processors.
pub fn compute_fifo_times(batch: &mut [Process]) {
    let mut wait = 0u64;
    for process in batch.iter_mut() {
        process.wait_time = wait;
        process.turnaround_time = process.service_time.saturating_add(wait);
        wait = wait.saturating_add(process.service_time);
    }
}

/// Pool state at the end of a tick, passed to run observers.
#[derive(Debug)]
pub struct TickSnapshot<'a> {
    /// Tick number (1-based).
    pub tick: u64,
    /// Admissions during this tick.
    pub admitted: usize,
    /// Completions during this tick.
    pub completed: usize,
    /// Processes still pending.
    pub pending: usize,
    /// The pool after this tick.
    pub pool: &'a ProcessorPool,
}

/// FIFO scheduler with first-fit admission across processors.
///
/// # Example
///
/// ```
/// use u_procsim::models::Process;
/// use u_procsim::pool::ProcessorPool;
/// use u_procsim::scheduler::FifoScheduler;
///
/// let batch = vec![
///     Process::new(1, 4_000_000_000).with_memory(8),
///     Process::new(2, 1_000_000_000).with_memory(8),
/// ];
/// let mut pool = ProcessorPool::homogeneous(1, 8, 3);
///
/// let report = FifoScheduler::new().run(batch, &mut pool).unwrap();
/// let stats = report.summary.stats().unwrap();
///
/// assert_eq!(stats.context_switches, 2);
/// assert_eq!(report.finished[0].id, 1);
/// assert_eq!(report.finished[1].wait_time, 4_000_000_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FifoScheduler;

impl FifoScheduler {
    /// Creates a FIFO scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Runs `batch` on `pool` to completion.
    ///
    /// The pool is mutated in place; it ends the run with no residents.
    ///
    /// # Errors
    /// - [`SimError::EmptyPool`] if the pool has no processors.
    /// - [`SimError::AdmissionDeadlock`] if some process can never be admitted.
    /// - [`SimError::InvalidConfig`] for duplicate IDs or a pool that
    ///   already has residents.
    pub fn run(
        &self,
        batch: Vec<Process>,
        pool: &mut ProcessorPool,
    ) -> SimResult<SimulationReport> {
        self.run_observed(batch, pool, |_| {})
    }

    /// Like [`run`](Self::run), calling `observer` after every tick.
    pub fn run_observed<F>(
        &self,
        mut batch: Vec<Process>,
        pool: &mut ProcessorPool,
        mut observer: F,
    ) -> SimResult<SimulationReport>
    where
        F: FnMut(&TickSnapshot<'_>),
    {
        check_runnable(&batch, pool)?;
        compute_fifo_times(&mut batch);

        let admission_order = batch.clone();
        let total = batch.len();
        let mut pending: VecDeque<Process> = batch.into();
        let mut finished: Vec<FinishedProcess> = Vec::with_capacity(total);
        let mut admitted_at: HashMap<u32, u64> = HashMap::with_capacity(total);
        let mut processor_stats: Vec<ProcessorStats> =
            pool.iter().map(|p| ProcessorStats::new(p.id)).collect();
        let mut context_switches: u64 = 0;
        let mut tick: u64 = 0;

        info!(
            policy = %Policy::Fifo,
            processes = total,
            processors = pool.len(),
            "starting simulation"
        );

        while !pending.is_empty() || pool.has_residents() {
            tick += 1;
            let mut admitted = 0usize;
            let mut completed = 0usize;

            for (processor, stats) in pool.iter_mut().zip(processor_stats.iter_mut()) {
                // Admission: only the queue head, never skipping ahead
                if let Some(head) = pending.pop_front() {
                    let (process_id, memory_req) = (head.id, head.memory_req);
                    match processor.admit(head) {
                        Ok(()) => {
                            context_switches += 1;
                            admitted += 1;
                            stats.admissions += 1;
                            admitted_at.insert(process_id, tick);
                            debug!(
                                tick,
                                processor = processor.id,
                                process = process_id,
                                memory_req,
                                memory = processor.current_memory(),
                                "admitted"
                            );
                        }
                        Err(head) => pending.push_front(head),
                    }
                }

                if processor.is_idle() {
                    continue;
                }
                stats.busy_ticks += 1;
                stats.peak_memory = stats.peak_memory.max(processor.current_memory());

                // Execution and completion
                for process in processor.execute() {
                    let admitted_tick = admitted_at.remove(&process.id).unwrap_or(tick);
                    debug!(
                        tick,
                        processor = processor.id,
                        process = process.id,
                        cycles_worked = process.cycles_worked,
                        credit = processor.carry_credit(),
                        "completed"
                    );
                    stats.completions += 1;
                    completed += 1;
                    finished.push(FinishedProcess::from_completion(
                        process,
                        processor.id,
                        admitted_tick,
                        tick,
                    ));
                }
            }

            trace!(
                tick,
                admitted,
                completed,
                pending = pending.len(),
                residents = pool.resident_count(),
                "tick finished"
            );
            observer(&TickSnapshot {
                tick,
                admitted,
                completed,
                pending: pending.len(),
                pool: &*pool,
            });

            check_progress(tick, admitted + completed, &pending, pool)?;
        }

        let summary = RunSummary::from_finished(&finished, context_switches, tick);
        match &summary {
            RunSummary::Completed(stats) => info!(
                ticks = tick,
                context_switches,
                avg_wait_time = stats.avg_wait_time,
                avg_turnaround_time = stats.avg_turnaround_time,
                "simulation finished"
            ),
            RunSummary::NoneCompleted => warn!("simulation finished with no completed processes"),
        }

        Ok(SimulationReport {
            policy: Policy::Fifo,
            batch: admission_order,
            finished,
            processors: processor_stats,
            summary,
        })
    }
}

fn check_runnable(batch: &[Process], pool: &ProcessorPool) -> SimResult<()> {
    if pool.is_empty() {
        return Err(SimError::EmptyPool);
    }
    if pool.has_residents() {
        return Err(SimError::invalid_config(
            "processor pool already has resident processes",
        ));
    }
    if let Some(blocked) = validation::find_unadmissible(batch, pool.processors()) {
        warn!(
            process = blocked.id,
            memory_req = blocked.memory_req,
            "process can never be admitted"
        );
        return Err(deadlock(blocked, pool));
    }
    validation::validate_input(batch, pool.processors()).map_err(|errors| {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        SimError::invalid_config(message)
    })
}

/// Fails when a tick changed nothing, left the pool idle and still has a
/// pending head: that head can never be admitted.
///
/// Unreachable for inputs that pass `check_runnable`.
fn check_progress(
    tick: u64,
    events: usize,
    pending: &VecDeque<Process>,
    pool: &ProcessorPool,
) -> SimResult<()> {
    if events > 0 || pool.has_residents() {
        return Ok(());
    }
    match pending.front() {
        Some(head) => {
            warn!(tick, process = head.id, "admission stalled on idle pool");
            Err(deadlock(head, pool))
        }
        None => Ok(()),
    }
}

fn deadlock(process: &Process, pool: &ProcessorPool) -> SimError {
    SimError::AdmissionDeadlock {
        process_id: process.id,
        memory_req: process.memory_req,
        max_capability: pool.max_memory_capability(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Processor;
    use crate::workload::WorkloadGenerator;

    const GHZ: u64 = 1_000_000_000;

    fn single_processor(memory: u32) -> ProcessorPool {
        ProcessorPool::homogeneous(1, memory, 1)
    }

    fn run(batch: Vec<Process>, pool: &mut ProcessorPool) -> SimulationReport {
        FifoScheduler::new().run(batch, pool).unwrap()
    }

    fn seeded_batch(seed: u64) -> Vec<Process> {
        WorkloadGenerator::default().generate(seed).unwrap()
    }

    #[test]
    fn test_prepass_wait_and_turnaround() {
        let mut batch = vec![
            Process::new(1, 5),
            Process::new(2, 3),
            Process::new(3, 7),
        ];
        compute_fifo_times(&mut batch);

        let waits: Vec<u64> = batch.iter().map(|p| p.wait_time).collect();
        let turnarounds: Vec<u64> = batch.iter().map(|p| p.turnaround_time).collect();
        assert_eq!(waits, vec![0, 5, 8]);
        assert_eq!(turnarounds, vec![5, 8, 15]);
    }

    #[test]
    fn test_prepass_properties_on_generated_batch() {
        let mut batch = seeded_batch(11);
        compute_fifo_times(&mut batch);

        assert_eq!(batch[0].wait_time, 0);
        for i in 1..batch.len() {
            assert_eq!(
                batch[i].wait_time,
                batch[i - 1].service_time + batch[i - 1].wait_time
            );
        }
        for p in &batch {
            assert_eq!(p.turnaround_time, p.service_time + p.wait_time);
        }
    }

    #[test]
    fn test_single_process() {
        let mut pool = single_processor(8);
        let report = run(vec![Process::new(1, 2_500_000_000)], &mut pool);

        assert_eq!(report.finished.len(), 1);
        let p = &report.finished[0];
        assert_eq!(p.cycles_worked, 3 * GHZ);
        assert_eq!(p.admitted_tick, 1);
        assert_eq!(p.completed_tick, 3);
        assert_eq!(report.summary.stats().unwrap().ticks, 3);
        assert!(!pool.has_residents());
        assert_eq!(pool.get(1).unwrap().current_memory(), 0);
    }

    #[test]
    fn test_seed_42_homogeneous() {
        let batch = seeded_batch(42);
        let n = batch.len() as u64;
        let mut pool = ProcessorPool::for_scenario(crate::pool::Scenario::Homogeneous).unwrap();
        let report = run(batch, &mut pool);

        assert_eq!(report.finished.len(), 50);
        let stats = report.summary.stats().unwrap();
        assert_eq!(stats.completed, 50);
        assert_eq!(stats.context_switches, 50);
        assert!(stats.avg_turnaround_time > 0);
        assert!(stats.avg_wait_time > 0);
        assert_eq!(stats.total_turnaround_time / n, stats.avg_turnaround_time);
        assert_eq!(stats.total_wait_time / n, stats.avg_wait_time);

        let mut ids: Vec<u32> = report.finished.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<u32>>());

        for p in &report.finished {
            assert!(p.cycles_worked >= p.service_time);
            assert_eq!(p.turnaround_time, p.service_time + p.wait_time);
        }
        for p in &report.batch {
            assert_eq!(p.turnaround_time, p.service_time + p.wait_time);
        }

        let admissions: u64 = report.processors.iter().map(|s| s.admissions).sum();
        let completions: u64 = report.processors.iter().map(|s| s.completions).sum();
        assert_eq!(admissions, 50);
        assert_eq!(completions, 50);
    }

    #[test]
    fn test_memory_never_exceeds_capability() {
        let mut pool = ProcessorPool::for_scenario(crate::pool::Scenario::Homogeneous).unwrap();
        let mut ticks_seen = 0u64;

        FifoScheduler::new()
            .run_observed(seeded_batch(5), &mut pool, |snapshot| {
                ticks_seen += 1;
                assert_eq!(snapshot.tick, ticks_seen);
                for cpu in snapshot.pool.iter() {
                    let resident_memory: u32 = cpu.residents().map(|p| p.memory_req).sum();
                    assert_eq!(resident_memory, cpu.current_memory());
                    assert!(cpu.current_memory() <= cpu.memory_capability());
                }
            })
            .unwrap();

        assert!(ticks_seen > 0);
    }

    #[test]
    fn test_deterministic_runs() {
        let first = run(
            seeded_batch(42),
            &mut ProcessorPool::for_scenario(crate::pool::Scenario::Homogeneous).unwrap(),
        );
        let second = run(
            seeded_batch(42),
            &mut ProcessorPool::for_scenario(crate::pool::Scenario::Homogeneous).unwrap(),
        );

        assert_eq!(first.finished, second.finished);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.processors, second.processors);
    }

    #[test]
    fn test_full_memory_process_waits_for_empty_processor() {
        let mut pool = single_processor(8);
        let batch = vec![
            Process::new(1, 3 * GHZ).with_memory(1),
            Process::new(2, GHZ).with_memory(8),
        ];
        let report = run(batch, &mut pool);

        let small = report.finished_process(1).unwrap();
        let big = report.finished_process(2).unwrap();
        assert_eq!(small.completed_tick, 3);
        assert_eq!(big.admitted_tick, 4);
        assert_eq!(big.measured_wait_ticks(), 3);
        assert_eq!(report.summary.stats().unwrap().context_switches, 2);
    }

    #[test]
    fn test_full_pool_defers_admission() {
        let mut pool = ProcessorPool::homogeneous(4, 8, 1);
        let mut batch: Vec<Process> = (1..=4)
            .map(|id| Process::new(id, 2 * GHZ).with_memory(8))
            .collect();
        batch.push(Process::new(5, GHZ).with_memory(8));

        let mut per_tick = Vec::new();
        let report = FifoScheduler::new()
            .run_observed(batch, &mut pool, |s| {
                per_tick.push((s.tick, s.admitted, s.pending));
            })
            .unwrap();

        // Tick 1 fills all four processors, tick 2 admits nothing.
        assert_eq!(per_tick[0], (1, 4, 1));
        assert_eq!(per_tick[1], (2, 0, 1));
        assert_eq!(per_tick[2], (3, 1, 0));

        let last = report.finished_process(5).unwrap();
        assert_eq!(last.processor_id, 1);
        assert_eq!(last.admitted_tick, 3);
        assert_eq!(report.summary.stats().unwrap().context_switches, 5);
    }

    #[test]
    fn test_first_fit_by_processor_order() {
        let mut pool = ProcessorPool::custom(vec![
            Processor::new(1).with_memory(2).with_speed(1),
            Processor::new(2).with_memory(8).with_speed(1),
        ])
        .unwrap();
        let batch = vec![
            Process::new(1, 5 * GHZ).with_memory(4),
            Process::new(2, GHZ).with_memory(1),
        ];
        let report = run(batch, &mut pool);

        let first = report.finished_process(1).unwrap();
        let second = report.finished_process(2).unwrap();
        assert_eq!(first.processor_id, 2);
        assert_eq!(first.admitted_tick, 1);
        assert_eq!(second.processor_id, 1);
        assert_eq!(second.admitted_tick, 2);
    }

    #[test]
    fn test_completion_order_not_admission_order() {
        let mut pool = ProcessorPool::homogeneous(2, 8, 1);
        let batch = vec![
            Process::new(1, 5 * GHZ).with_memory(8),
            Process::new(2, GHZ).with_memory(8),
        ];
        let report = run(batch, &mut pool);

        let order: Vec<u32> = report.finished.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 1]);
        let admission: Vec<u32> = report.batch.iter().map(|p| p.id).collect();
        assert_eq!(admission, vec![1, 2]);
    }

    #[test]
    fn test_remainder_credit_on_same_processor() {
        let mut pool = single_processor(8);
        let batch = vec![
            Process::new(1, 1_500_000_000).with_memory(8),
            Process::new(2, 10 * GHZ).with_memory(8),
        ];
        let report = run(batch, &mut pool);

        // Half a tick of excess from process 1 is credited to process 2
        let second = report.finished_process(2).unwrap();
        assert_eq!(second.admitted_tick, 3);
        assert_eq!(second.cycles_worked, 10_500_000_000);
        assert_eq!(second.completed_tick, 12);
    }

    #[test]
    fn test_remainder_credit_not_shared_across_processors() {
        let mut pool = ProcessorPool::homogeneous(2, 8, 1);
        let batch = vec![
            Process::new(1, 1_500_000_000).with_memory(8),
            Process::new(2, GHZ).with_memory(8),
            Process::new(3, 10 * GHZ).with_memory(8),
        ];
        let report = run(batch, &mut pool);

        let third = report.finished_process(3).unwrap();
        assert_eq!(third.processor_id, 2);
        assert_eq!(third.admitted_tick, 2);
        assert_eq!(third.cycles_worked, 10 * GHZ);
        assert_eq!(third.completed_tick, 11);

        // Processor 1's credit was never claimed
        assert_eq!(pool.get(1).unwrap().carry_credit(), 500_000_000);
        assert_eq!(pool.get(2).unwrap().carry_credit(), 0);
    }

    #[test]
    fn test_admission_deadlock() {
        let mut pool = ProcessorPool::custom(vec![Processor::new(1).with_memory(4)]).unwrap();
        let batch = vec![
            Process::new(1, GHZ).with_memory(2),
            Process::new(2, GHZ).with_memory(6),
        ];

        let err = FifoScheduler::new().run(batch, &mut pool).unwrap_err();
        match err {
            SimError::AdmissionDeadlock {
                process_id,
                memory_req,
                max_capability,
            } => {
                assert_eq!(process_id, 2);
                assert_eq!(memory_req, 6);
                assert_eq!(max_capability, 4);
            }
            other => panic!("expected deadlock, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_reports_none_completed() {
        let mut pool = ProcessorPool::homogeneous(4, 8, 3);
        let report = run(Vec::new(), &mut pool);

        assert!(report.finished.is_empty());
        assert_eq!(report.summary, RunSummary::NoneCompleted);
    }

    #[test]
    fn test_empty_pool() {
        let mut pool = ProcessorPool::homogeneous(0, 8, 3);
        let err = FifoScheduler::new()
            .run(vec![Process::new(1, GHZ)], &mut pool)
            .unwrap_err();
        assert!(matches!(err, SimError::EmptyPool));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut pool = ProcessorPool::homogeneous(1, 8, 3);
        let err = FifoScheduler::new()
            .run(vec![Process::new(1, GHZ), Process::new(1, GHZ)], &mut pool)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }

    #[test]
    fn test_stalled_tick_reports_deadlock() {
        let idle = ProcessorPool::homogeneous(1, 0, 1);
        let pending: VecDeque<Process> = vec![Process::new(7, 10).with_memory(3)].into();

        let err = check_progress(5, 0, &pending, &idle).unwrap_err();
        assert!(matches!(
            err,
            SimError::AdmissionDeadlock {
                process_id: 7,
                memory_req: 3,
                max_capability: 0,
            }
        ));

        // Any event, or an empty queue, counts as progress
        assert!(check_progress(5, 1, &pending, &idle).is_ok());
        assert!(check_progress(5, 0, &VecDeque::new(), &idle).is_ok());
    }

    #[test]
    fn test_resident_pool_is_not_stalled() {
        let mut pool = single_processor(8);
        pool.iter_mut()
            .next()
            .unwrap()
            .admit(Process::new(1, 10 * GHZ).with_memory(8))
            .unwrap();
        let pending: VecDeque<Process> = vec![Process::new(2, 10).with_memory(8)].into();

        assert!(check_progress(3, 0, &pending, &pool).is_ok());
    }

    #[test]
    fn test_busy_ticks_and_peak_memory() {
        let mut pool = single_processor(8);
        let batch = vec![
            Process::new(1, 2 * GHZ).with_memory(3),
            Process::new(2, 2 * GHZ).with_memory(4),
        ];
        let report = run(batch, &mut pool);

        // tick 1: {1}, tick 2: {1, 2} then 1 leaves, tick 3: {2} then 2 leaves
        let stats = &report.processors[0];
        assert_eq!(stats.admissions, 2);
        assert_eq!(stats.completions, 2);
        assert_eq!(stats.busy_ticks, 3);
        assert_eq!(stats.peak_memory, 7);
    }
}
