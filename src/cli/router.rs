//! Command routing and execution

use crate::abstractions::{ReqwestFetcher, SystemClock};
use crate::app::AppConfig;
use crate::cli::args::Commands;
use crate::ranking::{render_results, RankingPipeline};
use anyhow::{Context, Result};
use tracing::debug;

/// Run one ranking command and return the JSON line to print
pub async fn execute_command(command: Option<Commands>, config: &AppConfig) -> Result<String> {
    let role = command.unwrap_or(Commands::Workers).role();
    debug!("Ranking {} with {:?}", role, config);

    let fetcher = ReqwestFetcher::new(config.request_timeout())?;
    let clock = SystemClock;
    let pipeline = RankingPipeline::new(
        &fetcher,
        &clock,
        config.endpoints()?,
        config.ranking_options(),
    );

    let ranked = pipeline.top_entities(role).await?;
    render_results(&ranked).context("Failed to render ranking as JSON")
}
