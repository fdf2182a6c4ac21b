//! Processor model.
//!
//! Processors are the execution units of the simulation. Each has a clock
//! speed and a fixed memory capability that bounds how many processes can
//! be resident at once.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::Process;

/// Cycles executed per tick for each GHz of clock speed.
pub const CYCLES_PER_GHZ: u64 = 1_000_000_000;

/// Default clock speed (GHz).
pub const DEFAULT_SPEED_GHZ: u32 = 3;

/// Default memory capability (units).
pub const DEFAULT_MEMORY_CAPABILITY: u32 = 8;

/// An execution unit with a memory-bounded resident set.
///
/// Speed, capability and admission state (`current_memory`, residents,
/// carry credit) are private. Admission never pushes `current_memory` past
/// `memory_capability`. Only the static attributes are serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    /// Unique processor identifier.
    pub id: u32,
    speed: u32,
    memory_capability: u32,
    #[serde(skip)]
    current_memory: u32,
    #[serde(skip)]
    current_processes: VecDeque<Process>,
    #[serde(skip)]
    carry_credit: u64,
}

impl Processor {
    /// Creates an idle processor with default speed and memory.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            speed: DEFAULT_SPEED_GHZ,
            memory_capability: DEFAULT_MEMORY_CAPABILITY,
            current_memory: 0,
            current_processes: VecDeque::new(),
            carry_credit: 0,
        }
    }

    /// Sets the clock speed (GHz).
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the memory capability.
    pub fn with_memory(mut self, memory_capability: u32) -> Self {
        self.memory_capability = memory_capability;
        self
    }

    /// Clock speed (GHz).
    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Total memory capacity (units).
    #[inline]
    pub fn memory_capability(&self) -> u32 {
        self.memory_capability
    }

    /// Cycles granted to each resident per tick.
    #[inline]
    pub fn cycles_per_tick(&self) -> u64 {
        u64::from(self.speed) * CYCLES_PER_GHZ
    }

    /// Memory currently occupied by residents.
    #[inline]
    pub fn current_memory(&self) -> u32 {
        self.current_memory
    }

    /// Unoccupied memory, saturating at 0.
    #[inline]
    pub fn free_memory(&self) -> u32 {
        self.memory_capability.saturating_sub(self.current_memory)
    }

    /// Whether any memory is unoccupied.
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.current_memory < self.memory_capability
    }

    /// Whether `process` fits in the unoccupied memory right now.
    pub fn fits(&self, process: &Process) -> bool {
        self.has_capacity() && process.memory_req <= self.free_memory()
    }

    /// Whether `process` could ever fit, i.e. on an empty processor.
    pub fn can_ever_hold(&self, process: &Process) -> bool {
        self.memory_capability > 0 && process.memory_req <= self.memory_capability
    }

    /// Resident processes in admission order.
    pub fn residents(&self) -> impl Iterator<Item = &Process> {
        self.current_processes.iter()
    }

    /// Number of resident processes.
    pub fn resident_count(&self) -> usize {
        self.current_processes.len()
    }

    /// Whether no process is resident.
    pub fn is_idle(&self) -> bool {
        self.current_processes.is_empty()
    }

    /// Excess cycles waiting to be credited to the next admission.
    pub fn carry_credit(&self) -> u64 {
        self.carry_credit
    }

    /// Admits a process if it fits.
    ///
    /// On success the processor's carry credit is applied to the process
    /// and reset. On failure the process is handed back unchanged.
    pub fn admit(&mut self, mut process: Process) -> Result<(), Process> {
        if !self.fits(&process) {
            return Err(process);
        }
        process.grant_cycles(std::mem::take(&mut self.carry_credit));
        self.current_memory += process.memory_req;
        self.current_processes.push_back(process);
        Ok(())
    }

    /// Runs one tick: grants cycles to every resident, then removes and
    /// returns the completed ones in admission order.
    ///
    /// Memory held by completed processes is released and their excess
    /// cycles are added to the carry credit.
    pub fn execute(&mut self) -> Vec<Process> {
        let cycles = self.cycles_per_tick();
        for process in self.current_processes.iter_mut() {
            process.grant_cycles(cycles);
        }

        let mut completed = Vec::new();
        let mut still_running = VecDeque::with_capacity(self.current_processes.len());
        for process in self.current_processes.drain(..) {
            if process.is_complete() {
                completed.push(process);
            } else {
                still_running.push_back(process);
            }
        }
        self.current_processes = still_running;

        for process in &completed {
            self.current_memory -= process.memory_req;
            self.carry_credit = self.carry_credit.saturating_add(process.excess_cycles());
        }
        completed
    }
}
