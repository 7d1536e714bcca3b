use crate::api::RankedResult;

pub const DEFAULT_TOP_N: usize = 3;

/// Sort descending by count and keep the first `n`.
///
/// The sort is stable, so equal counts keep their input order.
pub fn top_n(mut results: Vec<RankedResult>, n: usize) -> Vec<RankedResult> {
    results.sort_by(|a, b| b.count.cmp(&a.count));
    results.truncate(n);
    results
}
