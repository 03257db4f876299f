//! Signal validation at the collection boundary.
//!
//! Sources are external; their output is checked before it can reach the
//! evidence pool. An invalid signal is skipped and counted, never repaired.

use regex::Regex;
use thiserror::Error;

use crate::source::Signal;

/// Errors from signal validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalValidationError {
    #[error("empty subject handle")]
    EmptySubject,

    #[error("malformed subject handle: {handle}")]
    MalformedHandle { handle: String },

    #[error("weight must be finite and non-negative, got {weight}")]
    InvalidWeight { weight: f64 },

    #[error("judgment components must be finite and non-negative, got accept {accept}, restrict {restrict}")]
    InvalidJudgment { accept: f64, restrict: f64 },
}

/// Validates signals before they enter the pool.
///
/// Handles follow the domain-name grammar used by decentralized social
/// networks: dot-separated labels of letters, digits, and hyphens, at least
/// two labels deep.
pub struct SignalValidator {
    handle_regex: Regex,
}

impl SignalValidator {
    pub fn new() -> Self {
        let handle_regex = Regex::new(
            r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
        )
        .expect("invalid handle regex");

        Self { handle_regex }
    }

    /// Validate a single signal.
    pub fn validate(&self, signal: &Signal) -> Result<(), SignalValidationError> {
        if signal.subject.is_empty() {
            return Err(SignalValidationError::EmptySubject);
        }
        if !self.handle_regex.is_match(&signal.subject) {
            return Err(SignalValidationError::MalformedHandle {
                handle: signal.subject.clone(),
            });
        }
        if !signal.weight.is_finite() || signal.weight < 0.0 {
            return Err(SignalValidationError::InvalidWeight {
                weight: signal.weight,
            });
        }
        let j = &signal.judgment;
        if !j.accept.is_finite() || !j.restrict.is_finite() || j.accept < 0.0 || j.restrict < 0.0 {
            return Err(SignalValidationError::InvalidJudgment {
                accept: j.accept,
                restrict: j.restrict,
            });
        }
        Ok(())
    }
}

impl Default for SignalValidator {
    fn default() -> Self {
        Self::new()
    }
}
