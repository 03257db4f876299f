//! `vouch`: rank social-graph subjects from captured evidence signals.
//!
//! Reads a signals file (JSON or YAML, chosen by extension), fuses each
//! subject's evidence, and prints a ranking. A signals file is a list of
//! records:
//!
//! ```yaml
//! - subject: alice.example
//!   accept: 1.0
//!   restrict: 0.0
//!   weight: 0.75
//! - subject: spammer.example
//!   accept: 0.0
//!   restrict: 0.3
//!   unknown: 0.7   # applied as a direct mass; weight is ignored
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use vouch_core::{BeliefMass, EvidencePool, Judgment, Outcome, Ranking, Thresholds};

#[derive(Parser)]
#[command(name = "vouch", version, about = "Rank social-graph subjects by fused trust evidence")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank subjects by fused pignistic score
    Rank {
        /// Signals file (JSON or YAML, chosen by extension)
        #[arg(long)]
        signals: PathBuf,

        /// Drop this handle before ranking (e.g. the viewer's own)
        #[arg(long)]
        exclude: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rank subjects and classify each against outcome thresholds
    Classify {
        /// Signals file (JSON or YAML, chosen by extension)
        #[arg(long)]
        signals: PathBuf,

        /// Drop this handle before ranking (e.g. the viewer's own)
        #[arg(long)]
        exclude: Option<String>,

        /// Pignistic restrict at or below this is Trusted
        #[arg(long, default_value_t = 0.2)]
        trust: f64,

        /// Pignistic restrict below this (and above trust) is Accepted
        #[arg(long, default_value_t = 0.5)]
        suspicious: f64,

        /// Pignistic restrict at or above this is Restricted
        #[arg(long, default_value_t = 0.8)]
        restrict: f64,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// One record of a signals file.
#[derive(Debug, Deserialize)]
struct SignalRecord {
    subject: String,
    accept: f64,
    restrict: f64,

    /// Direct ambiguity mass; when present the record bypasses weighting
    /// and is appended as-is.
    #[serde(default)]
    unknown: Option<f64>,

    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Serialize)]
struct ClassifiedRow {
    subject: String,
    score: f64,
    outcome: Outcome,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Rank {
            signals,
            exclude,
            json,
        } => {
            let ranking = rank_signals(&signals, exclude.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                print_ranking(&ranking);
            }
        }
        Command::Classify {
            signals,
            exclude,
            trust,
            suspicious,
            restrict,
            json,
        } => {
            let thresholds = Thresholds::new(trust, suspicious, restrict)
                .context("invalid outcome thresholds")?;
            let ranking = rank_signals(&signals, exclude.as_deref())?;
            let rows: Vec<ClassifiedRow> = ranking
                .entries
                .iter()
                .map(|entry| ClassifiedRow {
                    subject: entry.key.clone(),
                    score: entry.score,
                    outcome: entry.outcome(&thresholds),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{:<40} {:>8.3}  {:?}", row.subject, row.score, row.outcome);
                }
                report_rejected(&ranking);
            }
        }
    }
    Ok(())
}

fn rank_signals(path: &Path, exclude: Option<&str>) -> Result<Ranking<()>> {
    let records = load_signals(path)?;
    let mut pool = EvidencePool::new();
    for record in records {
        let judgment = Judgment {
            accept: record.accept,
            restrict: record.restrict,
        };
        match record.unknown {
            Some(unknown) => pool.observe_mass(
                record.subject,
                (),
                BeliefMass::new(record.accept, record.restrict, unknown),
            ),
            None => pool.observe(record.subject, (), judgment, record.weight),
        }
    }
    if let Some(handle) = exclude {
        pool.discard(handle);
    }
    Ok(pool.rank())
}

fn load_signals(path: &Path) -> Result<Vec<SignalRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read signals file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON signals: {}", path.display())),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML signals: {}", path.display())),
        _ => bail!(
            "unsupported signals format: {} (expected .json, .yaml, or .yml)",
            path.display()
        ),
    }
}

fn print_ranking(ranking: &Ranking<()>) {
    for (subject, score) in ranking.scores() {
        println!("{:<40} {:>8.3}", subject, score);
    }
    report_rejected(ranking);
}

fn report_rejected(ranking: &Ranking<()>) {
    for rejected in &ranking.rejected {
        tracing::warn!(subject = %rejected.key, error = %rejected.error, "subject excluded");
    }
}
