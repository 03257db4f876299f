//! Two-state Dempster-Shafer belief mass.
//!
//! A [`BeliefMass`] assigns weight across the frame {Accept, Restrict}: mass
//! on each singleton hypothesis plus mass on their union, held in `unknown`.
//! Restricting the frame to two states keeps the combination rules closed
//! form and makes transformations like reweighting cheap.

use serde::{Deserialize, Serialize};

/// A basic probability assignment over the two-state frame {Accept, Restrict}.
///
/// The `unknown` component carries the mass assigned to the whole frame, i.e.
/// ambiguity between the two hypotheses. A well-formed mass has all three
/// components in the 0.0-1.0 range summing to 1.0; intermediate arithmetic may
/// leave that range, and [`scale`](BeliefMass::scale) restores it before the
/// mass is consumed downstream.
///
/// Masses are immutable values: every operation returns a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeliefMass {
    /// Mass supporting the "accept" hypothesis
    pub accept: f64,

    /// Mass supporting the "restrict" hypothesis
    pub restrict: f64,

    /// Mass on the accept-or-restrict union (ambiguity)
    pub unknown: f64,
}

impl BeliefMass {
    /// Create a mass from raw components.
    pub fn new(accept: f64, restrict: f64, unknown: f64) -> Self {
        Self {
            accept,
            restrict,
            unknown,
        }
    }

    /// The vacuous mass: total ignorance, all weight on `unknown`.
    ///
    /// This is the identity element of conjunctive combination.
    pub fn vacuous() -> Self {
        Self {
            accept: 0.0,
            restrict: 0.0,
            unknown: 1.0,
        }
    }

    /// Reassigns unknown mass evenly to `accept` and `restrict`.
    ///
    /// Converts a mass into a point probability usable for ranking and for
    /// threshold classification.
    pub fn pignistic(&self) -> Self {
        Self {
            accept: self.accept + self.unknown / 2.0,
            restrict: self.restrict + self.unknown / 2.0,
            unknown: 0.0,
        }
    }

    /// Clamps all components to the 0.0-1.0 range.
    ///
    /// Does not guarantee that the components will sum to 1.0.
    pub fn clamp(&self) -> Self {
        self.clamp_min_unknown(0.0)
    }

    /// Clamps all components to the 0.0-1.0 range, guaranteeing that the
    /// `unknown` component will be at least `min`.
    ///
    /// Does not guarantee that the components will sum to 1.0.
    ///
    /// # Arguments
    ///
    /// * `min` - The minimum [`unknown`](BeliefMass::unknown) value.
    pub fn clamp_min_unknown(&self, min: f64) -> Self {
        let mut accept = self.accept;
        let mut restrict = self.restrict;
        let mut unknown = self.unknown;

        if accept < 0.0 {
            accept = 0.0;
        } else if accept > 1.0 {
            accept = 1.0;
        }
        if restrict < 0.0 {
            restrict = 0.0;
        } else if restrict > 1.0 {
            restrict = 1.0;
        }
        if unknown < 0.0 {
            unknown = 0.0;
        } else if unknown > 1.0 {
            unknown = 1.0;
        }
        if unknown < min {
            unknown = min;
        }

        Self {
            accept,
            restrict,
            unknown,
        }
    }

    /// If the components sum to less than 1.0, assigns the remainder to the
    /// `unknown` component.
    ///
    /// Recovers a total mass when a caller supplied only `accept` and
    /// `restrict` and left `unknown` as a placeholder.
    pub fn fill_unknown(&self) -> Self {
        let sum = self.accept + self.restrict + self.unknown;
        Self {
            accept: self.accept,
            restrict: self.restrict,
            unknown: if sum < 1.0 {
                1.0 - self.accept - self.restrict
            } else {
                self.unknown
            },
        }
    }

    /// Rescales the mass so all components are in the 0.0-1.0 range and sum
    /// to 1.0, preserving the relative relationship between `accept` and
    /// `restrict`.
    pub fn scale(&self) -> Self {
        self.scale_min_unknown(0.0)
    }

    /// Rescales the mass so all components are in the 0.0-1.0 range and sum
    /// to 1.0, while ensuring that the `unknown` component is at least `min`.
    ///
    /// Preserves the relative relationship between `accept` and `restrict`.
    /// When both are zero, all remaining mass stays on `unknown` rather than
    /// being split.
    ///
    /// # Arguments
    ///
    /// * `min` - The minimum [`unknown`](BeliefMass::unknown) value.
    pub fn scale_min_unknown(&self, min: f64) -> Self {
        let d = self.fill_unknown().clamp();
        let mut sum = d.accept + d.restrict + d.unknown;
        let mut accept = d.accept;
        let mut restrict = d.restrict;
        let mut unknown = d.unknown;

        if sum > 0.0 {
            accept /= sum;
            restrict /= sum;
            unknown /= sum;
        }
        if unknown < min {
            unknown = min;
        }
        sum = 1.0 - unknown;
        if sum > 0.0 {
            let denominator = accept + restrict;
            if denominator > 0.0 {
                accept = sum * (accept / denominator);
                restrict = sum * (restrict / denominator);
            }
        }
        Self {
            accept,
            restrict,
            unknown,
        }
    }

    /// Multiplies `accept` and `restrict` by `factor`, replacing the
    /// `unknown` component with the remainder.
    ///
    /// Factors below 1.0 discount a source's reliability, shifting mass onto
    /// `unknown`; factors above 1.0 amplify it. A 1.0 factor only rescales
    /// the mass to a valid range if necessary.
    ///
    /// # Arguments
    ///
    /// * `factor` - A scale factor applied to `accept` and `restrict`.
    pub fn weight(&self, factor: f64) -> Self {
        Self {
            accept: self.accept * factor,
            restrict: self.restrict * factor,
            unknown: 0.0,
        }
        .scale()
    }
}
