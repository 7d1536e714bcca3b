//! Completed-shift predicate

use crate::api::{Role, Shift};
use chrono::{DateTime, Utc};

/// What a shift collection has already been narrowed to before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Collection is pre-filtered to one worker by the query
    Worker,
    /// Collection is unfiltered; only shifts at this workplace match
    Workplace(i64),
}

impl Scope {
    pub fn for_entity(role: Role, entity_id: i64) -> Self {
        match role {
            Role::Worker => Scope::Worker,
            Role::Workplace => Scope::Workplace(entity_id),
        }
    }
}

/// A shift is completed when it is not cancelled and ended strictly before `now`.
///
/// Workplace scope additionally requires a matching `workplaceId` and a
/// claiming worker. Worker-scoped shifts are claimed by construction.
pub fn is_completed(shift: &Shift, now: DateTime<Utc>, scope: Scope) -> bool {
    let ended = !shift.is_cancelled() && shift.end_at < now;

    match scope {
        Scope::Worker => ended,
        Scope::Workplace(workplace_id) => {
            ended && shift.workplace_id == workplace_id && shift.is_claimed()
        }
    }
}
