//! Per-subject evidence accumulation, pruning, and ranking.
//!
//! Evidence sources emit weighted judgments about subjects. The pool converts
//! each judgment into a belief mass, appends it to the named subject's
//! evidence list, and, once collection is done, fuses each list with the
//! Murphy rule, scores the result with the pignistic transform, and returns
//! subjects in descending score order.
//!
//! Pruning and fusion never mutate the pool: [`EvidencePool::rank`] computes
//! a fresh [`Ranking`] from the evidence as it stands, so ranking again after
//! more evidence arrives simply recomputes from the full lists.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combine::FusionError;
use crate::mass::BeliefMass;
use crate::outcome::{Outcome, Thresholds};

/// Evidence whose `unknown` mass exceeds this carries no usable signal.
const UNINFORMATIVE_UNKNOWN: f64 = 0.99;

/// A raw observation about a subject: support for accepting it and support
/// for restricting it. Ambiguity is introduced later by source weighting,
/// not asserted directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// Support for the "accept" hypothesis
    pub accept: f64,

    /// Support for the "restrict" hypothesis
    pub restrict: f64,
}

impl Judgment {
    /// A judgment fully in favor of the subject.
    pub fn favor() -> Self {
        Self {
            accept: 1.0,
            restrict: 0.0,
        }
    }

    /// A judgment fully against the subject.
    pub fn oppose() -> Self {
        Self {
            accept: 0.0,
            restrict: 1.0,
        }
    }

    /// The judgment as an unweighted belief mass.
    pub fn mass(&self) -> BeliefMass {
        BeliefMass::new(self.accept, self.restrict, 0.0)
    }
}

/// One subject's identity, retained profile data, and evidence list.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectRecord<P> {
    /// Stable external key (e.g. a handle)
    pub key: String,

    /// Profile payload captured when the subject was first observed
    pub profile: P,

    /// Belief masses appended during collection, in arrival order
    pub evidence: Vec<BeliefMass>,
}

impl<P> SubjectRecord<P> {
    /// True when every piece of evidence is indistinguishable from total
    /// ignorance, or there is none at all.
    fn is_uninformative(&self) -> bool {
        self.evidence.is_empty()
            || self
                .evidence
                .iter()
                .all(|mass| mass.unknown > UNINFORMATIVE_UNKNOWN)
    }
}

/// Accumulates weighted evidence per subject during the collection phase.
///
/// Subjects are keyed by a stable external identity. The first profile seen
/// for a key is retained; later observations only append evidence. Insertion
/// order is preserved and used as the deterministic tie-break when ranking.
#[derive(Debug, Clone)]
pub struct EvidencePool<P> {
    subjects: Vec<SubjectRecord<P>>,
    index: HashMap<String, usize>,
}

impl<P> Default for EvidencePool<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EvidencePool<P> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            subjects: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of subjects with at least one observation.
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Look up a subject's record by key.
    pub fn get(&self, key: &str) -> Option<&SubjectRecord<P>> {
        self.index.get(key).map(|&i| &self.subjects[i])
    }

    /// Record a weighted judgment about a subject.
    ///
    /// The judgment is discounted by the source's `weight` before being
    /// appended: the asserted mass is multiplied by the weight and the
    /// remainder moves to `unknown`. A zero weight therefore contributes a
    /// vacuous mass, which pruning later treats as no signal at all.
    ///
    /// # Arguments
    ///
    /// * `key` - The subject's stable external identity.
    /// * `profile` - Profile payload; retained only for the first observation
    ///     of this key.
    /// * `judgment` - The raw observation.
    /// * `weight` - The emitting source's reliability factor.
    pub fn observe(&mut self, key: impl Into<String>, profile: P, judgment: Judgment, weight: f64) {
        self.observe_mass(key, profile, judgment.mass().weight(weight));
    }

    /// Append an already-prepared belief mass to a subject's evidence.
    ///
    /// Used for fixed penalty or bonus masses that carry their own ambiguity
    /// and must bypass source weighting.
    pub fn observe_mass(&mut self, key: impl Into<String>, profile: P, mass: BeliefMass) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&i) => self.subjects[i].evidence.push(mass),
            None => {
                self.index.insert(key.clone(), self.subjects.len());
                self.subjects.push(SubjectRecord {
                    key,
                    profile,
                    evidence: vec![mass],
                });
            }
        }
    }

    /// Remove a subject from the pool, returning its record.
    ///
    /// The viewer uses this to drop their own handle before ranking.
    pub fn discard(&mut self, key: &str) -> Option<SubjectRecord<P>> {
        let i = self.index.remove(key)?;
        let record = self.subjects.remove(i);
        for shifted in &self.subjects[i..] {
            if let Some(slot) = self.index.get_mut(&shifted.key) {
                *slot -= 1;
            }
        }
        Some(record)
    }

    /// Fuse, score, and order the pool's subjects.
    ///
    /// Subjects whose evidence is empty or wholly uninformative are pruned.
    /// Each survivor's evidence list is fused with the Murphy rule and scored
    /// by its pignistic `accept` probability. Entries are sorted descending
    /// by score; equal scores keep their insertion order. A subject whose
    /// fusion degenerates is excluded from the entries and recorded in
    /// [`Ranking::rejected`] instead; an undefined score never reaches the
    /// sort.
    pub fn rank(&self) -> Ranking<P>
    where
        P: Clone,
    {
        let informative: Vec<&SubjectRecord<P>> = self
            .subjects
            .iter()
            .filter(|record| !record.is_uninformative())
            .collect();
        tracing::debug!(
            subjects = self.subjects.len(),
            informative = informative.len(),
            "pruned uninformative subjects"
        );

        let mut entries = Vec::with_capacity(informative.len());
        let mut rejected = Vec::new();
        for record in informative {
            match BeliefMass::combine_murphy(&record.evidence) {
                Ok(fused) => entries.push(RankedSubject {
                    key: record.key.clone(),
                    profile: record.profile.clone(),
                    fused,
                    score: fused.pignistic().accept,
                }),
                Err(error) => {
                    tracing::warn!(subject = %record.key, %error, "excluding subject from ranking");
                    rejected.push(RejectedSubject {
                        key: record.key.clone(),
                        error,
                    });
                }
            }
        }
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ranking {
            entries,
            rejected,
            ranked_at: Utc::now(),
        }
    }
}

/// A subject that survived fusion, with its derived score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSubject<P> {
    /// Stable external key
    pub key: String,

    /// Profile payload retained from the first observation
    pub profile: P,

    /// The fused belief mass
    pub fused: BeliefMass,

    /// Pignistic `accept` probability of the fused mass
    pub score: f64,
}

impl<P> RankedSubject<P> {
    /// Classify the fused mass against a validated threshold set.
    pub fn outcome(&self, thresholds: &Thresholds) -> Outcome {
        thresholds.classify(self.fused)
    }
}

/// A subject excluded from ranking because its evidence could not be fused.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedSubject {
    /// Stable external key
    pub key: String,

    /// Why fusion failed
    pub error: FusionError,
}

/// The ordered output of [`EvidencePool::rank`].
#[derive(Debug, Clone, Serialize)]
pub struct Ranking<P> {
    /// Subjects in descending score order
    pub entries: Vec<RankedSubject<P>>,

    /// Subjects excluded because fusion failed
    pub rejected: Vec<RejectedSubject>,

    /// When the ranking was computed
    pub ranked_at: DateTime<Utc>,
}

impl<P> Ranking<P> {
    /// Iterate `(key, score)` pairs in rank order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_weights_judgment_into_evidence() {
        let mut pool = EvidencePool::new();
        pool.observe("alice.example", (), Judgment::favor(), 0.75);

        let record = pool.get("alice.example").unwrap();
        assert_eq!(record.evidence.len(), 1);
        let mass = record.evidence[0];
        assert!((mass.accept - 0.75).abs() < 1e-12);
        assert!((mass.restrict - 0.0).abs() < 1e-12);
        assert!((mass.unknown - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_first_seen_profile_is_retained() {
        let mut pool = EvidencePool::new();
        pool.observe("alice.example", "first", Judgment::favor(), 0.5);
        pool.observe("alice.example", "second", Judgment::oppose(), 0.5);

        let record = pool.get("alice.example").unwrap();
        assert_eq!(record.profile, "first");
        assert_eq!(record.evidence.len(), 2);
    }

    #[test]
    fn test_discard_removes_subject_and_keeps_lookups() {
        let mut pool = EvidencePool::new();
        pool.observe("a.example", (), Judgment::favor(), 0.5);
        pool.observe("b.example", (), Judgment::favor(), 0.5);
        pool.observe("c.example", (), Judgment::favor(), 0.5);

        let removed = pool.discard("b.example").unwrap();
        assert_eq!(removed.key, "b.example");
        assert_eq!(pool.len(), 2);
        assert!(pool.get("b.example").is_none());
        assert_eq!(pool.get("c.example").unwrap().key, "c.example");
    }

    #[test]
    fn test_rank_prunes_pure_unknown_subjects() {
        let mut pool = EvidencePool::new();
        pool.observe_mass("ghost.example", (), BeliefMass::vacuous());
        pool.observe("seen.example", (), Judgment::favor(), 0.5);

        let ranking = pool.rank();
        assert_eq!(ranking.entries.len(), 1);
        assert_eq!(ranking.entries[0].key, "seen.example");
    }

    #[test]
    fn test_rank_prunes_zero_weight_observations() {
        let mut pool = EvidencePool::new();
        // A zero source weight discounts everything into unknown.
        pool.observe("follower.example", (), Judgment::favor(), 0.0);

        let ranking = pool.rank();
        assert!(ranking.entries.is_empty());
        assert!(ranking.rejected.is_empty());
    }

    #[test]
    fn test_rank_orders_by_descending_score() {
        let mut pool = EvidencePool::new();
        pool.observe_mass("low.example", (), BeliefMass::new(0.2, 0.6, 0.2));
        pool.observe_mass("high.example", (), BeliefMass::new(0.8, 0.0, 0.2));
        pool.observe_mass("mid.example", (), BeliefMass::new(0.5, 0.3, 0.2));

        let ranking = pool.rank();
        let keys: Vec<&str> = ranking.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["high.example", "mid.example", "low.example"]);

        let scores: Vec<f64> = ranking.scores().map(|(_, s)| s).collect();
        assert!((scores[0] - 0.9).abs() < 1e-12);
        assert!((scores[1] - 0.6).abs() < 1e-12);
        assert!((scores[2] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let mut pool = EvidencePool::new();
        pool.observe_mass("first.example", (), BeliefMass::new(0.5, 0.3, 0.2));
        pool.observe_mass("second.example", (), BeliefMass::new(0.5, 0.3, 0.2));

        let ranking = pool.rank();
        let keys: Vec<&str> = ranking.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["first.example", "second.example"]);
    }

    #[test]
    fn test_rank_recomputes_from_full_evidence() {
        let mut pool = EvidencePool::new();
        pool.observe("alice.example", (), Judgment::favor(), 0.75);
        let provisional = pool.rank();

        pool.observe("alice.example", (), Judgment::oppose(), 0.75);
        let updated = pool.rank();

        assert!(updated.entries[0].score < provisional.entries[0].score);
    }

    #[test]
    fn test_ranked_subject_outcome_uses_fused_mass() {
        let mut pool = EvidencePool::new();
        pool.observe_mass("bad.example", (), BeliefMass::new(0.0, 0.9, 0.1));

        let ranking = pool.rank();
        let thresholds = Thresholds::new(0.2, 0.5, 0.8).unwrap();
        assert_eq!(ranking.entries[0].outcome(&thresholds), Outcome::Restricted);
    }
}
