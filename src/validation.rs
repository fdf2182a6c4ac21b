//! Input validation for simulation runs.
//!
//! Checks structural integrity of a process batch and a processor pool
//! before simulating. Detects:
//! - Duplicate IDs
//! - Empty pools
//! - Processors that can never run anything (zero speed or zero memory)
//! - Processes no processor could ever admit (admission deadlock)

use crate::models::{Process, Processor};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// The pool has no processors.
    EmptyPool,
    /// A processor has zero clock speed.
    ZeroSpeed,
    /// A processor has zero memory capability.
    ZeroCapacity,
    /// A process needs more memory than any processor has.
    Unadmissible,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a processor pool on its own.
///
/// Checks:
/// 1. At least one processor
/// 2. No duplicate processor IDs
/// 3. Every processor has non-zero speed and memory
pub fn validate_pool(processors: &[Processor]) -> ValidationResult {
    let errors = pool_errors(processors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a process batch against the pool it will run on.
///
/// Runs all pool checks, then:
/// 1. No duplicate process IDs
/// 2. Every process fits on at least one processor when that processor is empty
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(processes: &[Process], processors: &[Processor]) -> ValidationResult {
    let mut errors = pool_errors(processors);

    let mut process_ids = HashSet::new();
    for p in processes {
        if !process_ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
    }

    if !processors.is_empty() {
        let max_capability = max_capability(processors);
        for p in processes {
            if !processors.iter().any(|cpu| cpu.can_ever_hold(p)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::Unadmissible,
                    format!(
                        "Process {} needs {} memory units, largest processor holds {}",
                        p.id, p.memory_req, max_capability
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns the first process (in batch order) that no processor could ever admit.
pub fn find_unadmissible<'a>(
    processes: &'a [Process],
    processors: &[Processor],
) -> Option<&'a Process> {
    processes
        .iter()
        .find(|p| !processors.iter().any(|cpu| cpu.can_ever_hold(p)))
}

/// Largest memory capability in the pool (0 if empty).
pub fn max_capability(processors: &[Processor]) -> u32 {
    processors
        .iter()
        .map(Processor::memory_capability)
        .max()
        .unwrap_or(0)
}

fn pool_errors(processors: &[Processor]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if processors.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPool,
            "Processor pool is empty",
        ));
    }

    let mut processor_ids = HashSet::new();
    for cpu in processors {
        if !processor_ids.insert(cpu.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate processor ID: {}", cpu.id),
            ));
        }
        if cpu.speed() == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroSpeed,
                format!("Processor {} has zero speed", cpu.id),
            ));
        }
        if cpu.memory_capability() == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Processor {} has zero memory capability", cpu.id),
            ));
        }
    }

    errors
}
