//! # vouch-runtime
//!
//! Concurrent evidence collection for vouch.
//!
//! The fusion core in `vouch-core` is pure and synchronous. This crate owns
//! the boundary where evidence actually comes from: sources implement
//! [`EvidenceSource`], the [`Collector`] fans out to all of them at once,
//! validates what they emit, and hands back a finalized evidence pool.
//!
//! ## Important
//!
//! This crate performs no network retrieval itself. Network-backed sources
//! (follow graphs, block lists) implement [`EvidenceSource`] in their own
//! crates; [`StaticSource`] covers tests and offline replay.
//!
//! ## Example
//!
//! ```rust,ignore
//! use vouch_runtime::{Collector, CollectorConfig, StaticSource};
//!
//! let mut collector = Collector::new(CollectorConfig::default());
//! collector.register_source(Arc::new(StaticSource::new("follows", signals)));
//!
//! let harvest = collector.harvest().await;
//! let ranking = harvest.pool.rank();
//! ```

pub mod collector;
pub mod source;
pub mod validator;

pub use collector::{Collector, CollectorConfig, Harvest, SourceFailure};
pub use source::{EvidenceSource, Profile, Signal, SourceError, StaticSource};
pub use validator::{SignalValidationError, SignalValidator};
