//! Property-based tests for the ranking pipeline

#[cfg(test)]
mod tests {
    use crate::abstractions::{FixedClock, MockFetcher};
    use crate::api::{Endpoints, Entity, RankedResult, Role, Shift, DEFAULT_BASE_URL};
    use crate::ranking::{
        is_completed, top_n, CompletionCounter, EntityAggregator, PageWalker, Scope, Strategy,
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    fn page_locator(index: usize) -> String {
        format!("http://localhost:3000/items?page={}", index)
    }

    // Property test: walking concatenates pages in arrival order
    proptest! {
        #[test]
        fn test_walker_concatenates_pages(
            pages in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..6), 1..6),
        ) {
            let walked: Vec<i32> = runtime().block_on(async {
                let mock = MockFetcher::new();
                for (i, items) in pages.iter().enumerate() {
                    let next = (i + 1 < pages.len()).then(|| page_locator(i + 1));
                    mock.add_page(page_locator(i), items.as_slice(), next.as_deref()).await;
                }
                let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
                PageWalker::new(&mock, &endpoints)
                    .collect_all(page_locator(0))
                    .await
                    .unwrap()
            });

            let expected: Vec<i32> = pages.iter().flatten().copied().collect();
            prop_assert_eq!(walked.len(), pages.iter().map(Vec::len).sum::<usize>());
            prop_assert_eq!(walked, expected);
        }
    }

    // Property test: predicate truth table
    proptest! {
        #[test]
        fn test_is_completed_truth_table(
            end_offset_minutes in -10_000i64..10_000i64,
            worker_id in prop::option::of(1i64..50),
            cancelled in any::<bool>(),
            workplace_id in 1i64..5,
            target in 1i64..5,
        ) {
            let shift = Shift {
                id: 1,
                created_at: None,
                start_at: None,
                end_at: now() + Duration::minutes(end_offset_minutes),
                workplace_id,
                worker_id,
                cancelled_at: cancelled.then(now),
            };
            let ended = !cancelled && end_offset_minutes < 0;

            prop_assert_eq!(is_completed(&shift, now(), Scope::Worker), ended);
            prop_assert_eq!(
                is_completed(&shift, now(), Scope::Workplace(target)),
                ended && worker_id.is_some() && workplace_id == target
            );
        }
    }

    // Property test: ranking order, stability and length
    proptest! {
        #[test]
        fn test_top_n_sorted_stable_and_bounded(
            counts in prop::collection::vec(0u64..5, 0..12),
            n in 1usize..6,
        ) {
            let results: Vec<RankedResult> = counts
                .iter()
                .enumerate()
                .map(|(i, count)| RankedResult::new(format!("{:02}", i), *count))
                .collect();

            let ranked = top_n(results, n);
            prop_assert_eq!(ranked.len(), n.min(counts.len()));
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
                if pair[0].count == pair[1].count {
                    // Names encode input position
                    prop_assert!(pair[0].name < pair[1].name);
                }
            }
        }
    }

    // Property test: inactive entities never reach the ranking
    proptest! {
        #[test]
        fn test_inactive_entities_excluded(
            statuses in prop::collection::vec(0i64..3, 0..8),
        ) {
            let entities: Vec<Entity> = statuses
                .iter()
                .enumerate()
                .map(|(i, status)| Entity {
                    id: i as i64,
                    name: format!("entity-{}", i),
                    status: *status,
                    location: None,
                })
                .collect();

            let results = runtime().block_on(async {
                let mock = MockFetcher::new();
                for entity in &entities {
                    mock.add_page::<Shift>(
                        format!("http://localhost:3000/workers/claims?workerId={}", entity.id),
                        &[],
                        None,
                    )
                    .await;
                }
                let endpoints = Endpoints::new(DEFAULT_BASE_URL).unwrap();
                let clock = FixedClock(now());
                let aggregator = EntityAggregator::new(
                    CompletionCounter::new(
                        PageWalker::new(&mock, &endpoints),
                        &endpoints,
                        &clock,
                        true,
                    ),
                    Strategy::PerEntity,
                );
                aggregator.aggregate(&entities, Role::Worker).await.unwrap()
            });

            let active: Vec<&str> = entities
                .iter()
                .filter(|e| e.status == 0)
                .map(|e| e.name.as_str())
                .collect();
            let ranked: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
            prop_assert_eq!(ranked, active);
        }
    }
}
