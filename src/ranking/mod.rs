//! Ranking pipeline
//!
//! Walk the entity collection, count completed shifts for every active entity,
//! then keep the top results:
//!
//! - `walker` - cursor-following page traversal
//! - `eligibility` - the completed-shift predicate
//! - `counter` - completed shifts for one entity (or all workplaces at once)
//! - `aggregator` - counts for every active entity
//! - `ranker` - stable descending sort and truncation
//! - `pipeline` - wires the pieces together for one role

pub mod aggregator;
pub mod counter;
pub mod eligibility;
pub mod pipeline;
pub mod ranker;
pub mod walker;

pub use aggregator::EntityAggregator;
pub use counter::CompletionCounter;
pub use eligibility::{is_completed, Scope};
pub use pipeline::{render_results, RankingOptions, RankingPipeline};
pub use ranker::{top_n, DEFAULT_TOP_N};
pub use walker::PageWalker;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How workplace counts are gathered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Re-walk the shift collection for every entity
    #[default]
    PerEntity,
    /// Walk the shift collection once and bucket by workplace
    SinglePass,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::PerEntity => f.write_str("per-entity"),
            Strategy::SinglePass => f.write_str("single-pass"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-entity" => Ok(Strategy::PerEntity),
            "single-pass" => Ok(Strategy::SinglePass),
            other => Err(format!(
                "unknown strategy '{}', expected 'per-entity' or 'single-pass'",
                other
            )),
        }
    }
}
