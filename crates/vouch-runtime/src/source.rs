//! Evidence source trait and common types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use vouch_core::Judgment;

/// Errors from evidence sources.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source unreachable: {0}")]
    Unreachable(String),

    #[error("timeout after {0:?}")]
    Timeout(Duration),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Profile data attached to a signal. The pool retains the first profile it
/// sees for a subject; later signals only contribute evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name, when the source had one
    #[serde(default)]
    pub display_name: Option<String>,

    /// Stable decentralized identifier, when the source had one
    #[serde(default)]
    pub did: Option<String>,
}

/// One weighted observation emitted by a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// The subject's stable handle
    pub subject: String,

    /// Profile data seen alongside the observation
    #[serde(default)]
    pub profile: Profile,

    /// The raw judgment
    pub judgment: Judgment,

    /// The emitting source's reliability factor
    pub weight: f64,
}

impl Signal {
    /// Convenience constructor for a bare handle with no profile data.
    pub fn new(subject: impl Into<String>, judgment: Judgment, weight: f64) -> Self {
        Self {
            subject: subject.into(),
            profile: Profile::default(),
            judgment,
            weight,
        }
    }
}

/// Trait for evidence sources feeding the collector.
///
/// # Isolation Contract
/// Each source operates in isolation:
/// - No shared mutable state between sources
/// - No access to other sources' signals during collection
/// - A failing source never aborts the others
#[async_trait]
pub trait EvidenceSource: Send + Sync {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Collect this source's signals.
    ///
    /// # Isolation Contract
    /// - MUST NOT depend on other sources having run
    /// - MUST return all signals it has; the collector owns weighting policy
    ///   only through the weights carried on each signal
    async fn collect(&self) -> Result<Vec<Signal>, SourceError>;
}

/// An in-memory evidence source.
///
/// Serves tests and offline replay of previously captured signals; network
/// retrieval lives behind the same trait in callers' own crates.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    signals: Vec<Signal>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, signals: Vec<Signal>) -> Self {
        Self {
            name: name.into(),
            signals,
        }
    }
}

#[async_trait]
impl EvidenceSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn collect(&self) -> Result<Vec<Signal>, SourceError> {
        Ok(self.signals.clone())
    }
}
