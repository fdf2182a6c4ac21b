//! Simulation errors.

use std::fmt;
use std::io;

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Errors that abort a simulation run.
#[derive(Debug)]
pub enum SimError {
    /// A policy or scenario that exists as an extension point only.
    NotImplemented {
        /// What was requested (e.g. "SJF policy", "scenario 3").
        what: String,
    },
    /// A scenario or algorithm selector that could not be parsed.
    InvalidSelection {
        /// The rejected input.
        input: String,
        /// What was expected instead.
        expected: &'static str,
    },
    /// A seed that is not a non-negative integer.
    InvalidSeed {
        /// The rejected input.
        input: String,
    },
    /// Inconsistent configuration (ranges, pools, batch).
    InvalidConfig {
        /// Human-readable description.
        message: String,
    },
    /// The processor pool has no processors.
    EmptyPool,
    /// A pending process needs more memory than any processor has.
    ///
    /// Such a process could never be admitted, so the run would loop forever.
    AdmissionDeadlock {
        /// The blocked process.
        process_id: u32,
        /// Its memory requirement.
        memory_req: u32,
        /// The largest memory capability in the pool.
        max_capability: u32,
    },
    /// Reading a configuration file failed.
    Io(io::Error),
    /// Parsing or rendering JSON failed.
    Json(serde_json::Error),
}

impl SimError {
    pub(crate) fn not_implemented(what: impl Into<String>) -> Self {
        SimError::NotImplemented { what: what.into() }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NotImplemented { what } => write!(f, "{what} is not implemented"),
            SimError::InvalidSelection { input, expected } => {
                write!(f, "invalid selection '{input}', expected {expected}")
            }
            SimError::InvalidSeed { input } => {
                write!(f, "invalid seed '{input}', expected a non-negative integer")
            }
            SimError::InvalidConfig { message } => write!(f, "invalid configuration: {message}"),
            SimError::EmptyPool => write!(f, "processor pool is empty"),
            SimError::AdmissionDeadlock {
                process_id,
                memory_req,
                max_capability,
            } => write!(
                f,
                "admission deadlock: process {process_id} needs {memory_req} memory units \
                 but the largest processor holds {max_capability}"
            ),
            SimError::Io(err) => write!(f, "i/o error: {err}"),
            SimError::Json(err) => write!(f, "json error: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            SimError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_deadlock_message() {
        let err = SimError::AdmissionDeadlock {
            process_id: 3,
            memory_req: 8,
            max_capability: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("process 3"));
        assert!(msg.contains("8 memory units"));
        assert!(msg.contains("holds 4"));
    }

    #[test]
    fn test_not_implemented_message() {
        let err = SimError::not_implemented("SJF policy");
        assert_eq!(err.to_string(), "SJF policy is not implemented");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_source() {
        let err = SimError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing"));
    }
}
