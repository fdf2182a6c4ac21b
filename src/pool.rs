//! Processor pools and scenarios.
//!
//! A pool is the fixed set of processors a simulation runs on. Pools are
//! built from a numbered [`Scenario`] or from an explicit processor list.
//!
//! # Scenarios
//!
//! | # | Pool | Status |
//! |---|------|--------|
//! | 1 | 4 processors, 8 memory units, 3 GHz | implemented |
//! | 2-4 | heterogeneous capacity/speed | reserved |
//!
//! Processors are visited in pool order during each tick, so pool order is
//! also the first-fit admission order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SimError, SimResult};
use crate::models::{Processor, DEFAULT_MEMORY_CAPABILITY, DEFAULT_SPEED_GHZ};
use crate::validation;

/// Processor count of the homogeneous scenario.
pub const HOMOGENEOUS_PROCESSOR_COUNT: u32 = 4;

/// Processor scenario selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Scenario {
    /// Scenario 1: identical processors.
    #[default]
    Homogeneous,
    /// Scenario 2: not yet defined.
    Reserved2,
    /// Scenario 3: not yet defined.
    Reserved3,
    /// Scenario 4: not yet defined.
    Reserved4,
}

impl Scenario {
    /// All scenarios in menu order.
    pub const ALL: [Scenario; 4] = [
        Scenario::Homogeneous,
        Scenario::Reserved2,
        Scenario::Reserved3,
        Scenario::Reserved4,
    ];

    /// The scenario's menu number.
    pub fn number(self) -> u8 {
        match self {
            Scenario::Homogeneous => 1,
            Scenario::Reserved2 => 2,
            Scenario::Reserved3 => 3,
            Scenario::Reserved4 => 4,
        }
    }

    /// Whether a pool is defined for this scenario.
    pub fn is_implemented(self) -> bool {
        matches!(self, Scenario::Homogeneous)
    }
}

impl TryFrom<u8> for Scenario {
    type Error = SimError;

    fn try_from(value: u8) -> SimResult<Self> {
        match value {
            1 => Ok(Scenario::Homogeneous),
            2 => Ok(Scenario::Reserved2),
            3 => Ok(Scenario::Reserved3),
            4 => Ok(Scenario::Reserved4),
            _ => Err(SimError::InvalidSelection {
                input: value.to_string(),
                expected: "a scenario number from 1 to 4",
            }),
        }
    }
}

impl From<Scenario> for u8 {
    fn from(scenario: Scenario) -> u8 {
        scenario.number()
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        let invalid = || SimError::InvalidSelection {
            input: s.to_string(),
            expected: "a scenario number from 1 to 4",
        };
        let number: u8 = s.trim().parse().map_err(|_| invalid())?;
        Scenario::try_from(number).map_err(|_| invalid())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scenario {}", self.number())
    }
}

/// The processors of one simulation run.
#[derive(Debug, Clone)]
pub struct ProcessorPool {
    processors: Vec<Processor>,
}

impl ProcessorPool {
    /// Builds the pool for a scenario.
    ///
    /// Only [`Scenario::Homogeneous`] is defined; other scenarios return
    /// [`SimError::NotImplemented`].
    pub fn for_scenario(scenario: Scenario) -> SimResult<Self> {
        match scenario {
            Scenario::Homogeneous => Ok(Self::homogeneous(
                HOMOGENEOUS_PROCESSOR_COUNT,
                DEFAULT_MEMORY_CAPABILITY,
                DEFAULT_SPEED_GHZ,
            )),
            Scenario::Reserved2 | Scenario::Reserved3 | Scenario::Reserved4 => {
                Err(SimError::not_implemented(scenario.to_string()))
            }
        }
    }

    /// Creates `count` identical processors with IDs `1..=count`.
    pub fn homogeneous(count: u32, memory_capability: u32, speed: u32) -> Self {
        let processors = (1..=count)
            .map(|id| {
                Processor::new(id)
                    .with_memory(memory_capability)
                    .with_speed(speed)
            })
            .collect();
        Self { processors }
    }

    /// Creates a pool from explicit processors, in the given order.
    ///
    /// # Errors
    /// [`SimError::EmptyPool`] for an empty list, [`SimError::InvalidConfig`]
    /// for duplicate IDs or zero speed/memory.
    pub fn custom(processors: Vec<Processor>) -> SimResult<Self> {
        if processors.is_empty() {
            return Err(SimError::EmptyPool);
        }
        if let Err(errors) = validation::validate_pool(&processors) {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SimError::invalid_config(message));
        }
        Ok(Self { processors })
    }

    /// Number of processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether the pool has no processors.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Processors in pool order.
    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    /// Iterates processors in pool order.
    pub fn iter(&self) -> std::slice::Iter<'_, Processor> {
        self.processors.iter()
    }

    /// Iterates processors mutably, in pool order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Processor> {
        self.processors.iter_mut()
    }

    /// Finds a processor by ID.
    pub fn get(&self, id: u32) -> Option<&Processor> {
        self.processors.iter().find(|p| p.id == id)
    }

    /// Whether any processor has a resident process.
    pub fn has_residents(&self) -> bool {
        self.processors.iter().any(|p| !p.is_idle())
    }

    /// Total resident processes across the pool.
    pub fn resident_count(&self) -> usize {
        self.processors.iter().map(Processor::resident_count).sum()
    }

    /// Largest memory capability in the pool (0 if empty).
    pub fn max_memory_capability(&self) -> u32 {
        validation::max_capability(&self.processors)
    }
}
