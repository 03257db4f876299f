//! # vouch-core
//!
//! Deterministic evidence fusion for social-graph trust ranking.
//!
//! Independent, weighted, possibly conflicting observations about a subject
//! are encoded as two-state Dempster-Shafer belief masses, fused with the
//! Murphy average rule, flattened with the pignistic transform, and ranked by
//! the resulting accept probability.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same evidence always produces the same ranking
//! 2. **Pure**: No I/O, no shared mutable state, no locking
//! 3. **No silent degeneration**: Total conflict is an error, never a NaN
//! 4. **Stable ordering**: Score ties keep insertion order
//!
//! ## Example
//!
//! ```rust,ignore
//! use vouch_core::{EvidencePool, Judgment, Thresholds};
//!
//! let mut pool = EvidencePool::new();
//! pool.observe("alice.example", profile, Judgment::favor(), 0.75);
//! pool.observe("alice.example", profile, Judgment::oppose(), 0.4);
//!
//! let ranking = pool.rank();
//! let thresholds = Thresholds::new(0.2, 0.5, 0.8)?;
//! for entry in &ranking.entries {
//!     println!("{} {:.3} {:?}", entry.key, entry.score, entry.outcome(&thresholds));
//! }
//! ```

pub mod aggregate;
pub mod combine;
pub mod mass;
pub mod outcome;

// Re-export main types at crate root
pub use aggregate::{
    EvidencePool, Judgment, RankedSubject, Ranking, RejectedSubject, SubjectRecord,
};
pub use combine::FusionError;
pub use mass::BeliefMass;
pub use outcome::{Outcome, ThresholdError, Thresholds};
