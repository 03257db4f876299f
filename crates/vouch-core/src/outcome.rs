//! Threshold classification of fused masses.
//!
//! After fusion, a mass is flattened with the pignistic transform and its
//! `restrict` probability is compared against three caller-supplied
//! thresholds. Threshold sets are validated before any classification
//! happens; a malformed set fails the whole request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mass::BeliefMass;

/// Classification of a subject, in ascending order of concern:
/// `Trusted` < `Accepted` < `Suspected` < `Restricted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Trusted,
    Accepted,
    Suspected,
    Restricted,
}

/// Errors from threshold validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    /// Thresholds must satisfy trust <= suspicious <= restrict.
    #[error("thresholds out of order: trust {trust} <= suspicious {suspicious} <= restrict {restrict} required")]
    OutOfOrder {
        trust: f64,
        suspicious: f64,
        restrict: f64,
    },

    /// Each threshold must lie strictly between 0.0 and 1.0.
    #[error("threshold out of range: {0} is not strictly between 0.0 and 1.0")]
    OutOfRange(f64),
}

/// A validated set of outcome thresholds.
///
/// Construction checks ordering and range once, so a held `Thresholds` can
/// classify any number of masses without re-validating. There is no separate
/// `accept` threshold: classification reads only the pignistic `restrict`
/// probability, which keeps the validation surface small.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    trust: f64,
    suspicious: f64,
    restrict: f64,
}

impl Thresholds {
    /// Validate and construct a threshold set.
    ///
    /// # Arguments
    ///
    /// * `trust` - Upper bound for `Trusted`: a pignistic `restrict` value at
    ///     or below it is trusted.
    /// * `suspicious` - Lower edge of suspicion: values between `trust` and
    ///     `suspicious` are `Accepted`; values from `suspicious` up to
    ///     `restrict` are `Suspected`.
    /// * `restrict` - Lower bound for `Restricted`: values at or above it are
    ///     restricted.
    pub fn new(trust: f64, suspicious: f64, restrict: f64) -> Result<Self, ThresholdError> {
        if trust > suspicious || suspicious > restrict {
            return Err(ThresholdError::OutOfOrder {
                trust,
                suspicious,
                restrict,
            });
        }
        for value in [trust, suspicious, restrict] {
            if value <= 0.0 || value >= 1.0 {
                return Err(ThresholdError::OutOfRange(value));
            }
        }
        Ok(Self {
            trust,
            suspicious,
            restrict,
        })
    }

    pub fn trust(&self) -> f64 {
        self.trust
    }

    pub fn suspicious(&self) -> f64 {
        self.suspicious
    }

    pub fn restrict(&self) -> f64 {
        self.restrict
    }

    /// Classify a mass by its pignistic `restrict` probability.
    pub fn classify(&self, mass: BeliefMass) -> Outcome {
        let p = mass.pignistic();
        match p.restrict {
            x if x <= self.trust => Outcome::Trusted,
            x if x < self.suspicious => Outcome::Accepted,
            x if x >= self.restrict => Outcome::Restricted,
            // suspicious <= x < restrict
            _ => Outcome::Suspected,
        }
    }
}

impl BeliefMass {
    /// Checks the `restrict` probability after the pignistic transformation
    /// against a freshly validated threshold set.
    ///
    /// Equivalent to building [`Thresholds`] and calling
    /// [`classify`](Thresholds::classify); use a held [`Thresholds`] when
    /// classifying many masses.
    pub fn outcome(
        &self,
        trust: f64,
        suspicious: f64,
        restrict: f64,
    ) -> Result<Outcome, ThresholdError> {
        Ok(Thresholds::new(trust, suspicious, restrict)?.classify(*self))
    }
}
