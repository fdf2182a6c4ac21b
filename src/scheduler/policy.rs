//! Scheduling policy selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{SimError, SimResult};

/// A scheduling policy.
///
/// Only [`Policy::Fifo`] is implemented; the others are accepted as
/// selections and rejected with [`SimError::NotImplemented`] at dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Policy {
    /// First In, First Out.
    #[default]
    Fifo,
    /// Shortest Job First.
    Sjf,
    /// Round-Robin.
    RoundRobin,
    /// Multilevel queue.
    Multilevel,
}

impl Policy {
    /// All selectable policies.
    pub const ALL: [Policy; 4] = [
        Policy::Fifo,
        Policy::Sjf,
        Policy::RoundRobin,
        Policy::Multilevel,
    ];

    /// Short selector name ("FIFO", "SJF", "RR", "ML").
    pub fn name(self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::Sjf => "SJF",
            Policy::RoundRobin => "RR",
            Policy::Multilevel => "ML",
        }
    }

    /// Policy description.
    pub fn description(self) -> &'static str {
        match self {
            Policy::Fifo => "First In, First Out",
            Policy::Sjf => "Shortest Job First",
            Policy::RoundRobin => "Round-Robin",
            Policy::Multilevel => "Multilevel Queue",
        }
    }

    /// Whether the simulator can run this policy.
    pub fn is_implemented(self) -> bool {
        matches!(self, Policy::Fifo)
    }

    /// Returns `Ok(self)` if implemented, `NotImplemented` otherwise.
    pub fn ensure_implemented(self) -> SimResult<Self> {
        if self.is_implemented() {
            Ok(self)
        } else {
            Err(SimError::not_implemented(format!("{} policy", self.name())))
        }
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        Policy::ALL
            .into_iter()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| SimError::InvalidSelection {
                input: s.to_string(),
                expected: "one of FIFO, SJF, RR, ML",
            })
    }
}

impl TryFrom<String> for Policy {
    type Error = SimError;

    fn try_from(value: String) -> SimResult<Self> {
        value.parse()
    }
}

impl From<Policy> for String {
    fn from(policy: Policy) -> String {
        policy.name().to_string()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
