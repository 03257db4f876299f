//! Combination rules for fusing independent belief masses.
//!
//! Two rules are provided:
//! - Conjunctive combination (Dempster's rule), folded pairwise. Exact, but
//!   brittle when many sources conflict.
//! - The Murphy average rule, which averages the masses first and then
//!   sharpens conjunctively. This is the rule the aggregation pipeline uses.
//!
//! Total disagreement between sources leaves no shared support to normalize
//! into. That case is surfaced as [`FusionError::TotalConflict`] instead of
//! poisoning downstream arithmetic with NaN.

use thiserror::Error;

use crate::mass::BeliefMass;

/// Errors from combining evidence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FusionError {
    /// All mass fell on the null hypothesis; the sources are mutually
    /// exclusive and cannot be renormalized.
    #[error("total conflict between sources leaves no shared support")]
    TotalConflict,

    /// The Murphy rule needs at least one mass to average.
    #[error("no evidence to combine")]
    NoEvidence,
}

impl BeliefMass {
    /// Performs the conjunctive combination of two masses.
    ///
    /// The helper underlying [`combine_conjunctive`](Self::combine_conjunctive)
    /// and [`combine_murphy`](Self::combine_murphy).
    ///
    /// # Arguments
    ///
    /// * `left` - The first mass of the pair.
    /// * `right` - The second mass of the pair.
    pub fn pairwise_combine(left: Self, right: Self) -> Result<Self, FusionError> {
        // The mass assigned to the null hypothesis due to non-intersection.
        let conflict = left.accept * right.restrict + left.restrict * right.accept;
        if 1.0 - conflict <= f64::EPSILON {
            return Err(FusionError::TotalConflict);
        }

        // An unrolled loop over the power set: each focal element on the left
        // is multiplied against each on the right, intersections are summed,
        // and every product is renormalized against the null hypothesis mass.
        Ok(Self {
            accept: (left.accept * right.accept
                + left.accept * right.unknown
                + left.unknown * right.accept)
                / (1.0 - conflict),
            restrict: (left.restrict * right.restrict
                + left.restrict * right.unknown
                + left.unknown * right.restrict)
                / (1.0 - conflict),
            unknown: (left.unknown * right.unknown) / (1.0 - conflict),
        })
    }

    /// Calculates the conjunctive combination of a set of masses.
    ///
    /// Folds [`pairwise_combine`](Self::pairwise_combine) over the input
    /// starting from the vacuous mass. High pairwise conflict compounds
    /// across a long input and can reach
    /// [`FusionError::TotalConflict`]; prefer
    /// [`combine_murphy`](Self::combine_murphy) for noisy evidence.
    ///
    /// # Arguments
    ///
    /// * `masses` - The masses to be combined.
    pub fn combine_conjunctive(masses: &[Self]) -> Result<Self, FusionError> {
        let mut combined = Self::vacuous();
        for mass in masses {
            combined = Self::pairwise_combine(combined, *mass)?;
        }
        Ok(combined)
    }

    /// Calculates the Murphy average combination of a set of masses.
    ///
    /// The Murphy rule[^1] takes the mean of each focal element across all
    /// input masses, then conjunctively combines the average with itself N
    /// times, where N is the number of inputs. Averaging first dampens any
    /// single conflicting outlier before the conjunctive sharpening step, so
    /// the rule stays defined even where plain conjunctive combination would
    /// collapse under conflict.
    ///
    /// Returns [`FusionError::NoEvidence`] for an empty input.
    ///
    /// # Arguments
    ///
    /// * `masses` - The masses to be combined.
    ///
    /// [^1]: Catherine K. Murphy. 2000. Combining belief functions when
    ///     evidence conflicts. Decision Support Systems 29, 1 (2000), 1-9.
    ///     DOI:<https://doi.org/10.1016/s0167-9236(99)00084-6>
    pub fn combine_murphy(masses: &[Self]) -> Result<Self, FusionError> {
        if masses.is_empty() {
            return Err(FusionError::NoEvidence);
        }

        let mut sum = Self::new(0.0, 0.0, 0.0);
        for mass in masses {
            sum.accept += mass.accept;
            sum.restrict += mass.restrict;
            sum.unknown += mass.unknown;
        }
        let count = masses.len() as f64;
        let average = Self {
            accept: sum.accept / count,
            restrict: sum.restrict / count,
            unknown: sum.unknown / count,
        };

        let mut combined = Self::vacuous();
        for _ in 0..masses.len() {
            combined = Self::pairwise_combine(combined, average)?;
        }
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn assert_components(mass: BeliefMass, accept: f64, restrict: f64, unknown: f64) {
        assert!(
            (mass.accept - accept).abs() < TOLERANCE,
            "accept was {}, expected {}",
            mass.accept,
            accept
        );
        assert!(
            (mass.restrict - restrict).abs() < TOLERANCE,
            "restrict was {}, expected {}",
            mass.restrict,
            restrict
        );
        assert!(
            (mass.unknown - unknown).abs() < TOLERANCE,
            "unknown was {}, expected {}",
            mass.unknown,
            unknown
        );
    }

    #[test]
    fn test_pairwise_combine_simple() {
        let combined = BeliefMass::pairwise_combine(
            BeliefMass::new(0.25, 0.5, 0.25),
            BeliefMass::new(0.25, 0.1, 0.65),
        )
        .unwrap();
        assert_components(
            combined,
            0.338235294117647,
            0.4705882352941177,
            0.1911764705882353,
        );
    }

    #[test]
    fn test_pairwise_combine_vacuous_is_identity() {
        let m = BeliefMass::new(0.25, 0.5, 0.25);
        let combined = BeliefMass::pairwise_combine(m, BeliefMass::vacuous()).unwrap();
        assert_components(combined, 0.25, 0.5, 0.25);
    }

    #[test]
    fn test_pairwise_combine_certainty_dominates() {
        let combined = BeliefMass::pairwise_combine(
            BeliefMass::new(0.25, 0.5, 0.25),
            BeliefMass::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert_components(combined, 1.0, 0.0, 0.0);
    }

    #[test]
    fn test_pairwise_combine_is_commutative() {
        let a = BeliefMass::new(0.35, 0.20, 0.45);
        let b = BeliefMass::new(0.1, 0.6, 0.3);
        let ab = BeliefMass::pairwise_combine(a, b).unwrap();
        let ba = BeliefMass::pairwise_combine(b, a).unwrap();
        assert_components(ba, ab.accept, ab.restrict, ab.unknown);
    }

    #[test]
    fn test_pairwise_combine_total_conflict_errors() {
        let result = BeliefMass::pairwise_combine(
            BeliefMass::new(1.0, 0.0, 0.0),
            BeliefMass::new(0.0, 1.0, 0.0),
        );
        assert_eq!(result, Err(FusionError::TotalConflict));
    }

    #[test]
    fn test_combine_conjunctive_with_vacuous() {
        let combined = BeliefMass::combine_conjunctive(&[
            BeliefMass::new(0.35, 0.20, 0.45),
            BeliefMass::vacuous(),
        ])
        .unwrap();
        assert_components(combined, 0.35, 0.20, 0.45);
    }

    #[test]
    fn test_combine_conjunctive_empty_is_vacuous() {
        let combined = BeliefMass::combine_conjunctive(&[]).unwrap();
        assert_components(combined, 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_combine_conjunctive_total_conflict_errors() {
        let result = BeliefMass::combine_conjunctive(&[
            BeliefMass::new(1.0, 0.0, 0.0),
            BeliefMass::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(result, Err(FusionError::TotalConflict));
    }

    #[test]
    fn test_combine_murphy_empty_errors() {
        assert_eq!(
            BeliefMass::combine_murphy(&[]),
            Err(FusionError::NoEvidence)
        );
    }

    #[test]
    fn test_combine_murphy_singleton_is_identity() {
        let m = BeliefMass::new(0.35, 0.20, 0.45);
        let combined = BeliefMass::combine_murphy(&[m]).unwrap();
        assert_components(combined, 0.35, 0.20, 0.45);
    }

    #[test]
    fn test_combine_murphy_with_vacuous() {
        let combined = BeliefMass::combine_murphy(&[
            BeliefMass::new(0.35, 0.20, 0.45),
            BeliefMass::vacuous(),
        ])
        .unwrap();
        assert_components(
            combined,
            0.2946891191709844,
            0.16062176165803108,
            0.5446891191709845,
        );
    }

    #[test]
    fn test_combine_murphy_survives_total_conflict() {
        let combined = BeliefMass::combine_murphy(&[
            BeliefMass::new(1.0, 0.0, 0.0),
            BeliefMass::new(0.0, 1.0, 0.0),
        ])
        .unwrap();
        assert_components(combined, 0.5, 0.5, 0.0);
    }
}
