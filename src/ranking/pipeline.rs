use crate::abstractions::{Clock, HttpFetcher};
use crate::api::{Endpoints, Entity, RankedResult, Role};
use crate::error::Result;
use crate::ranking::{
    top_n, CompletionCounter, EntityAggregator, PageWalker, Strategy, DEFAULT_TOP_N,
};
use anyhow::Context;
use tracing::{debug, info};

/// Knobs for a ranking run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOptions {
    pub top_n: usize,
    pub skip_leading_shift: bool,
    pub strategy: Strategy,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            skip_leading_shift: true,
            strategy: Strategy::PerEntity,
        }
    }
}

/// End-to-end ranking over the upstream API
pub struct RankingPipeline<'a> {
    fetcher: &'a dyn HttpFetcher,
    clock: &'a dyn Clock,
    endpoints: Endpoints,
    options: RankingOptions,
}

impl<'a> RankingPipeline<'a> {
    pub fn new(
        fetcher: &'a dyn HttpFetcher,
        clock: &'a dyn Clock,
        endpoints: Endpoints,
        options: RankingOptions,
    ) -> Self {
        Self {
            fetcher,
            clock,
            endpoints,
            options,
        }
    }

    /// Top entities of `role` by completed shifts.
    ///
    /// Either the full ranked list comes back or an error whose chain
    /// starts with "Failed to compute top <role>".
    pub async fn top_entities(&self, role: Role) -> anyhow::Result<Vec<RankedResult>> {
        self.run(role)
            .await
            .with_context(|| format!("Failed to compute top {}", role))
    }

    /// Every entity of `role`, across all pages, active or not
    pub async fn fetch_entities(&self, role: Role) -> Result<Vec<Entity>> {
        let entities: Vec<Entity> = self
            .walker()
            .collect_all(self.endpoints.entities(role))
            .await?;
        debug!("Fetched {} {}", entities.len(), role);
        Ok(entities)
    }

    async fn run(&self, role: Role) -> Result<Vec<RankedResult>> {
        let entities = self.fetch_entities(role).await?;

        let counter = CompletionCounter::new(
            self.walker(),
            &self.endpoints,
            self.clock,
            self.options.skip_leading_shift,
        );
        let aggregator = EntityAggregator::new(counter, self.options.strategy);
        let results = aggregator.aggregate(&entities, role).await?;

        let ranked = top_n(results, self.options.top_n);
        info!("Top {} {}: {:?}", self.options.top_n, role, ranked);
        Ok(ranked)
    }

    fn walker(&self) -> PageWalker<'_> {
        PageWalker::new(self.fetcher, &self.endpoints)
    }
}

/// Compact JSON array of `{name, count}` objects
pub fn render_results(results: &[RankedResult]) -> serde_json::Result<String> {
    serde_json::to_string(results)
}
