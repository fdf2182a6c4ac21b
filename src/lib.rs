//! Process scheduling simulator for small processor fleets.
//!
//! Generates a seeded synthetic workload, places it on a pool of
//! memory-constrained processors, and runs a tick-based scheduling
//! simulation that reports wait time, turnaround time, and context
//! switches.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Processor`, `FinishedProcess`
//! - **`workload`**: Seeded workload generator
//! - **`pool`**: Processor pools and scenarios
//! - **`validation`**: Input integrity checks (duplicate IDs, empty pools,
//!   processes no processor can ever admit)
//! - **`scheduler`**: Policy dispatch, the FIFO tick loop, run statistics
//! - **`report`**: Text and JSON rendering of simulation results
//! - **`config`**: Serializable run configuration
//!
//! # Example
//!
//! ```
//! use u_procsim::config::SimulationConfig;
//! use u_procsim::scheduler::{simulate, RunSummary};
//!
//! let config = SimulationConfig::default().with_seed(7).with_batch_size(10);
//! let report = simulate(&config).unwrap();
//!
//! assert_eq!(report.finished.len(), 10);
//! assert!(matches!(report.summary, RunSummary::Completed(_)));
//! ```
//!
//! # Simulation Model
//!
//! One tick visits every processor once. A processor may admit the head of
//! the pending queue if its memory allows, then grants `speed * 10^9` cycles
//! to each resident process. Finished processes release their memory and
//! leave any excess cycles as credit for the next admission on the same
//! processor.

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{SimError, SimResult};
