//! Simulation domain models.
//!
//! Provides the data types shared by the workload generator, the processor
//! pool, and the scheduler engine.
//!
//! # Relationships
//!
//! | Type | Owned by | Notes |
//! |------|----------|-------|
//! | Process | pending queue, then one processor | resident on at most one processor |
//! | Processor | processor pool | residents bounded by memory, not count |
//! | FinishedProcess | finished list | append-only, completion order |

mod finished;
mod process;
mod processor;

pub use finished::FinishedProcess;
pub use process::Process;
pub use processor::{Processor, CYCLES_PER_GHZ, DEFAULT_MEMORY_CAPABILITY, DEFAULT_SPEED_GHZ};
