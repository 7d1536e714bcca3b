//! Drives completion counting across all active entities

use crate::api::{Entity, RankedResult, Role};
use crate::error::Result;
use crate::ranking::counter::CompletionCounter;
use crate::ranking::Strategy;
use tracing::{debug, info};

pub struct EntityAggregator<'a> {
    counter: CompletionCounter<'a>,
    strategy: Strategy,
}

impl<'a> EntityAggregator<'a> {
    pub fn new(counter: CompletionCounter<'a>, strategy: Strategy) -> Self {
        Self { counter, strategy }
    }

    /// Pair every active entity's name with its completed shift count.
    ///
    /// Output order follows `entities`; inactive entities are dropped and
    /// zero counts are kept. Entities are counted one after another.
    pub async fn aggregate(&self, entities: &[Entity], role: Role) -> Result<Vec<RankedResult>> {
        let active: Vec<&Entity> = entities.iter().filter(|e| e.is_active()).collect();
        info!(
            "Counting completed shifts for {} of {} {} using {} strategy",
            active.len(),
            entities.len(),
            role,
            self.effective_strategy(role)
        );

        if active.is_empty() {
            return Ok(Vec::new());
        }

        match self.effective_strategy(role) {
            Strategy::PerEntity => {
                let mut results = Vec::with_capacity(active.len());
                for entity in active {
                    let count = self.counter.count(entity.id, role).await?;
                    results.push(RankedResult::new(entity.name.clone(), count));
                }
                Ok(results)
            }
            Strategy::SinglePass => {
                let buckets = self.counter.count_by_workplace().await?;
                Ok(active
                    .into_iter()
                    .map(|entity| {
                        let count = buckets.get(&entity.id).copied().unwrap_or(0);
                        debug!("{} {} has {} completed shifts", role, entity.id, count);
                        RankedResult::new(entity.name.clone(), count)
                    })
                    .collect())
            }
        }
    }

    /// Worker claims are fetched per worker, so a single pass only exists for workplaces
    fn effective_strategy(&self, role: Role) -> Strategy {
        match (self.strategy, role) {
            (Strategy::SinglePass, Role::Workplace) => Strategy::SinglePass,
            _ => Strategy::PerEntity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::{FixedClock, MockFetcher};
    use crate::api::{Endpoints, Shift, DEFAULT_BASE_URL};
    use crate::error::RankError;
    use crate::ranking::walker::PageWalker;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn entity(id: i64, name: &str, status: i64) -> Entity {
        Entity {
            id,
            name: name.to_string(),
            status,
            location: None,
        }
    }

    fn done(id: i64, workplace_id: i64) -> Shift {
        Shift {
            id,
            created_at: None,
            start_at: None,
            end_at: now() - Duration::hours(2),
            workplace_id,
            worker_id: Some(1),
            cancelled_at: None,
        }
    }

    fn claims(worker_id: i64) -> String {
        format!(
            "http://localhost:3000/workers/claims?workerId={}",
            worker_id
        )
    }

    #[tokio::test]
    async fn test_aggregate_skips_inactive_and_keeps_zero() {
        let mock = MockFetcher::new();
        mock.add_page(claims(1), &[done(1, 1), done(2, 1)], None).await;
        mock.add_page::<Shift>(claims(2), &[], None).await;
        mock.add_page(claims(3), &[done(3, 1)], None).await;

        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        let clock = FixedClock(now());
        let walker = PageWalker::new(&mock, &endpoints);
        let aggregator = EntityAggregator::new(
            CompletionCounter::new(walker, &endpoints, &clock, true),
            Strategy::PerEntity,
        );

        let entities = vec![entity(1, "A", 0), entity(2, "B", 0), entity(3, "C", 1)];
        let results = aggregator.aggregate(&entities, Role::Worker).await.unwrap();

        assert_eq!(
            results,
            vec![RankedResult::new("A", 2), RankedResult::new("B", 0)]
        );
        assert_eq!(mock.request_count(&claims(3)).await, 0);
        // Sequential, in entity order
        assert_eq!(mock.requested().await, vec![claims(1), claims(2)]);
    }

    #[tokio::test]
    async fn test_aggregate_no_active_entities() {
        let mock = MockFetcher::new();
        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        let clock = FixedClock(now());
        let aggregator = EntityAggregator::new(
            CompletionCounter::new(PageWalker::new(&mock, &endpoints), &endpoints, &clock, true),
            Strategy::SinglePass,
        );

        let results = aggregator
            .aggregate(&[entity(1, "A", 2)], Role::Workplace)
            .await
            .unwrap();
        assert!(results.is_empty());
        assert!(mock.requested().await.is_empty());
    }

    #[tokio::test]
    async fn test_single_pass_walks_shifts_once() {
        let shifts = "http://localhost:3000/shifts?workerId=&jobType=&location=";
        let mock = MockFetcher::new();
        mock.add_page(
            shifts,
            &[done(99, 1), done(1, 1), done(2, 2), done(3, 2), done(4, 5)],
            None,
        )
        .await;

        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        let clock = FixedClock(now());
        let entities = vec![entity(1, "Dock", 0), entity(2, "Mill", 0), entity(3, "Yard", 0)];

        let single = EntityAggregator::new(
            CompletionCounter::new(PageWalker::new(&mock, &endpoints), &endpoints, &clock, true),
            Strategy::SinglePass,
        );
        let single_results = single.aggregate(&entities, Role::Workplace).await.unwrap();
        assert_eq!(mock.request_count(shifts).await, 1);

        let per_entity = EntityAggregator::new(
            CompletionCounter::new(PageWalker::new(&mock, &endpoints), &endpoints, &clock, true),
            Strategy::PerEntity,
        );
        let per_entity_results = per_entity
            .aggregate(&entities, Role::Workplace)
            .await
            .unwrap();

        assert_eq!(single_results, per_entity_results);
        assert_eq!(
            single_results,
            vec![
                RankedResult::new("Dock", 1),
                RankedResult::new("Mill", 2),
                RankedResult::new("Yard", 0),
            ]
        );
    }

    #[tokio::test]
    async fn test_single_pass_falls_back_for_workers() {
        let mock = MockFetcher::new();
        mock.add_page(claims(1), &[done(1, 1)], None).await;

        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        let clock = FixedClock(now());
        let aggregator = EntityAggregator::new(
            CompletionCounter::new(PageWalker::new(&mock, &endpoints), &endpoints, &clock, true),
            Strategy::SinglePass,
        );

        let results = aggregator
            .aggregate(&[entity(1, "A", 0)], Role::Worker)
            .await
            .unwrap();
        assert_eq!(results, vec![RankedResult::new("A", 1)]);
    }

    #[tokio::test]
    async fn test_failure_on_one_entity_aborts_everything() {
        let mock = MockFetcher::new();
        mock.add_page(claims(1), &[done(1, 1)], None).await;
        mock.add_status(claims(2), 500).await;
        mock.add_page(claims(3), &[done(2, 1)], None).await;

        let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
        let clock = FixedClock(now());
        let aggregator = EntityAggregator::new(
            CompletionCounter::new(PageWalker::new(&mock, &endpoints), &endpoints, &clock, true),
            Strategy::PerEntity,
        );

        let entities = vec![entity(1, "A", 0), entity(2, "B", 0), entity(3, "C", 0)];
        let err = aggregator
            .aggregate(&entities, Role::Worker)
            .await
            .unwrap_err();
        assert!(matches!(err, RankError::Transport { status: 500, .. }));
        assert_eq!(mock.request_count(&claims(3)).await, 0);
    }
}
