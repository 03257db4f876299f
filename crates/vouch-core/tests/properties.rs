//! Property tests for the belief-mass algebra.

use proptest::prelude::*;
use vouch_core::BeliefMass;

const TOLERANCE: f64 = 1e-9;

/// Raw components, deliberately allowed outside the valid range.
fn component() -> impl Strategy<Value = f64> {
    -2.0f64..2.0
}

/// A well-formed mass: components in range, summing to 1.0.
fn valid_mass() -> impl Strategy<Value = BeliefMass> {
    (component(), component(), component())
        .prop_map(|(a, r, u)| BeliefMass::new(a, r, u).scale())
}

/// A well-formed mass holding back some ambiguity, so pairwise combination
/// can never reach total conflict.
fn hedged_mass() -> impl Strategy<Value = BeliefMass> {
    (component(), component(), component())
        .prop_map(|(a, r, u)| BeliefMass::new(a, r, u).scale_min_unknown(0.05))
}

proptest! {
    #[test]
    fn scale_yields_unit_sum_components(a in component(), r in component(), u in component()) {
        let m = BeliefMass::new(a, r, u).scale();
        prop_assert!((m.accept + m.restrict + m.unknown - 1.0).abs() < TOLERANCE);
        prop_assert!((0.0..=1.0).contains(&m.accept));
        prop_assert!((0.0..=1.0).contains(&m.restrict));
        prop_assert!((0.0..=1.0).contains(&m.unknown));
    }

    #[test]
    fn clamp_min_unknown_enforces_floor(
        a in component(),
        r in component(),
        u in component(),
        min in 0.0f64..=1.0,
    ) {
        let m = BeliefMass::new(a, r, u).clamp_min_unknown(min);
        prop_assert!(m.unknown >= min);
        prop_assert!((0.0..=1.0).contains(&m.accept));
        prop_assert!((0.0..=1.0).contains(&m.restrict));
    }

    #[test]
    fn pignistic_zeroes_unknown_and_preserves_total(m in valid_mass()) {
        let p = m.pignistic();
        prop_assert_eq!(p.unknown, 0.0);
        let before = m.accept + m.restrict + m.unknown;
        let after = p.accept + p.restrict;
        prop_assert!((before - after).abs() < TOLERANCE);
    }

    #[test]
    fn murphy_of_singleton_is_identity(m in valid_mass()) {
        let combined = BeliefMass::combine_murphy(&[m]).unwrap();
        prop_assert!((combined.accept - m.accept).abs() < TOLERANCE);
        prop_assert!((combined.restrict - m.restrict).abs() < TOLERANCE);
        prop_assert!((combined.unknown - m.unknown).abs() < TOLERANCE);
    }

    #[test]
    fn pairwise_combine_is_commutative(a in hedged_mass(), b in hedged_mass()) {
        let ab = BeliefMass::pairwise_combine(a, b).unwrap();
        let ba = BeliefMass::pairwise_combine(b, a).unwrap();
        prop_assert!((ab.accept - ba.accept).abs() < TOLERANCE);
        prop_assert!((ab.restrict - ba.restrict).abs() < TOLERANCE);
        prop_assert!((ab.unknown - ba.unknown).abs() < TOLERANCE);
    }

    #[test]
    fn weight_never_leaves_the_valid_range(m in valid_mass(), factor in 0.0f64..4.0) {
        let weighted = m.weight(factor);
        let sum = weighted.accept + weighted.restrict + weighted.unknown;
        prop_assert!((sum - 1.0).abs() < TOLERANCE);
        prop_assert!((0.0..=1.0).contains(&weighted.accept));
        prop_assert!((0.0..=1.0).contains(&weighted.restrict));
        prop_assert!((0.0..=1.0).contains(&weighted.unknown));
    }
}
