//! # shiftrank
//!
//! Ranks the top active workers or workplaces of a paginated shifts API by
//! number of completed shifts. A shift is completed once it has been claimed,
//! was not cancelled and has already ended.
//!
//! ## Usage
//!
//! ```bash
//! shiftrank [workers|workplaces] [--base-url URL] [--top N] [--strategy per-entity|single-pass]
//! ```
//!
//! ## Modules
//!
//! - `abstractions` - Trait-based abstractions for the HTTP API and the clock
//! - `api` - Wire models and endpoint locators
//! - `app` - Configuration, logging and fatal error reporting
//! - `cli` - Command-line argument parsing and routing
//! - `error` - Error type and error codes
//! - `ranking` - Page walking, completion counting, aggregation and ranking
pub mod abstractions;
pub mod api;
pub mod app;
pub mod cli;
pub mod error;
pub mod ranking;

#[cfg(test)]
mod property_tests;

pub use api::{Entity, RankedResult, Role, Shift};
pub use error::{RankError, Result};
pub use ranking::{RankingOptions, RankingPipeline};
