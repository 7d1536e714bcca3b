//! Per-entity completed shift counting

use crate::abstractions::Clock;
use crate::api::{Endpoints, Role, Shift};
use crate::error::Result;
use crate::ranking::eligibility::{is_completed, Scope};
use crate::ranking::walker::PageWalker;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Counts completed shifts for one entity at a time
pub struct CompletionCounter<'a> {
    walker: PageWalker<'a>,
    endpoints: &'a Endpoints,
    clock: &'a dyn Clock,
    skip_leading_shift: bool,
}

impl<'a> CompletionCounter<'a> {
    pub fn new(
        walker: PageWalker<'a>,
        endpoints: &'a Endpoints,
        clock: &'a dyn Clock,
        skip_leading_shift: bool,
    ) -> Self {
        Self {
            walker,
            endpoints,
            clock,
            skip_leading_shift,
        }
    }

    /// Number of items dropped from the head of every shift page for `role`
    ///
    /// The workplace shift listing leads each page with a non-data record.
    /// Only that endpoint is affected.
    fn leading_skip(&self, role: Role) -> usize {
        match role {
            Role::Workplace if self.skip_leading_shift => 1,
            _ => 0,
        }
    }

    fn start_locator(&self, entity_id: i64, role: Role) -> Result<String> {
        match role {
            Role::Worker => self.endpoints.worker_claims(entity_id),
            Role::Workplace => self.endpoints.shifts(),
        }
    }

    /// Walk the entity's shift resource and count completed shifts
    pub async fn count(&self, entity_id: i64, role: Role) -> Result<u64> {
        let now = self.clock.now();
        let scope = Scope::for_entity(role, entity_id);
        let skip = self.leading_skip(role);
        let start = self.start_locator(entity_id, role)?;

        let total = self
            .walker
            .fold(start, 0u64, |acc, page: Vec<Shift>| {
                acc + count_eligible(&page, skip, now, scope)
            })
            .await?;

        debug!("{} {} has {} completed shifts", role, entity_id, total);
        Ok(total)
    }

    /// Walk the full shift collection once and count completed shifts per workplace
    ///
    /// Produces the same numbers as calling `count(id, Role::Workplace)` for
    /// every workplace id, with a single walk.
    pub async fn count_by_workplace(&self) -> Result<HashMap<i64, u64>> {
        let now = self.clock.now();
        let skip = self.leading_skip(Role::Workplace);
        let start = self.endpoints.shifts()?;

        let buckets = self
            .walker
            .fold(start, HashMap::new(), |mut buckets, page: Vec<Shift>| {
                for shift in page.iter().skip(skip) {
                    if is_completed(shift, now, Scope::Workplace(shift.workplace_id)) {
                        *buckets.entry(shift.workplace_id).or_insert(0u64) += 1;
                    }
                }
                buckets
            })
            .await?;

        debug!("Bucketed completed shifts for {} workplaces", buckets.len());
        Ok(buckets)
    }
}

/// Completed shifts in one page after dropping `skip` leading items
pub fn count_eligible(page: &[Shift], skip: usize, now: DateTime<Utc>, scope: Scope) -> u64 {
    page.iter()
        .skip(skip)
        .filter(|shift| is_completed(shift, now, scope))
        .count() as u64
}
