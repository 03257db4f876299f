//! Concurrent signal collection feeding the evidence pool.
//!
//! The collector fans out to every registered source concurrently, bounds
//! each with a timeout, validates what comes back, and accumulates the
//! survivors into an [`EvidencePool`]. Fusion itself stays in the core: the
//! harvest hands back a finalized pool for the caller to rank.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use vouch_core::EvidencePool;

use crate::source::{EvidenceSource, Profile, Signal, SourceError};
use crate::validator::SignalValidator;

/// Configuration for a collection run.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Upper bound on any single source's collection time
    pub source_timeout: Duration,

    /// Handle to drop from the pool before it is handed back; the viewer
    /// shows up in their own follower lists and should not rank themselves
    pub viewer: Option<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(30),
            viewer: None,
        }
    }
}

/// A failed source, recorded without aborting the run.
#[derive(Debug)]
pub struct SourceFailure {
    /// The source's reported name
    pub source: String,

    /// Why collection failed
    pub error: SourceError,
}

/// The result of one collection run.
#[derive(Debug)]
pub struct Harvest {
    /// Evidence accumulated from every source that answered
    pub pool: EvidencePool<Profile>,

    /// Sources that failed or timed out
    pub failures: Vec<SourceFailure>,

    /// Signals dropped by validation
    pub skipped: usize,
}

/// Fans out to registered evidence sources and accumulates their signals.
///
/// # Architecture
/// - Concurrent fan-out: all sources collect at once, each under its own
///   timeout
/// - Per-source failure isolation: one failed source never discards the
///   others' signals
/// - Validation at the boundary: malformed signals are skipped and counted
pub struct Collector {
    config: CollectorConfig,
    validator: SignalValidator,
    sources: Vec<Arc<dyn EvidenceSource>>,
}

impl Collector {
    /// Create a collector with no sources registered.
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            config,
            validator: SignalValidator::new(),
            sources: Vec::new(),
        }
    }

    /// Register an evidence source.
    pub fn register_source(&mut self, source: Arc<dyn EvidenceSource>) {
        self.sources.push(source);
    }

    /// Run every source to completion and accumulate the pool.
    ///
    /// Signals are applied in source-registration order regardless of which
    /// source finished first, so a harvest over the same signals produces
    /// the same pool.
    pub async fn harvest(&self) -> Harvest {
        let collections = join_all(self.sources.iter().map(|source| async move {
            let outcome = tokio::time::timeout(self.config.source_timeout, source.collect())
                .await
                .unwrap_or(Err(SourceError::Timeout(self.config.source_timeout)));
            (source.name().to_string(), outcome)
        }))
        .await;

        let mut pool = EvidencePool::new();
        let mut failures = Vec::new();
        let mut skipped = 0;
        for (name, outcome) in collections {
            match outcome {
                Ok(signals) => {
                    tracing::debug!(source = %name, signals = signals.len(), "source collected");
                    for signal in signals {
                        match self.validator.validate(&signal) {
                            Ok(()) => self.apply(&mut pool, signal),
                            Err(error) => {
                                tracing::warn!(source = %name, %error, "skipping invalid signal");
                                skipped += 1;
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::error!(source = %name, %error, "source failed");
                    failures.push(SourceFailure {
                        source: name,
                        error,
                    });
                }
            }
        }

        if let Some(viewer) = &self.config.viewer {
            pool.discard(viewer);
        }

        Harvest {
            pool,
            failures,
            skipped,
        }
    }

    fn apply(&self, pool: &mut EvidencePool<Profile>, signal: Signal) {
        pool.observe(signal.subject, signal.profile, signal.judgment, signal.weight);
    }
}
