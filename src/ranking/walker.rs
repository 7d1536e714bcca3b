//! Cursor-following traversal of paginated resources

use crate::abstractions::HttpFetcher;
use crate::api::{Endpoints, PagedResult};
use crate::error::{RankError, Result};
use futures::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Walks a cursor-linked resource page by page.
///
/// The walk stops at the first page without a `next` link. Any failed fetch
/// or undecodable page ends the walk with that error; nothing fetched so far
/// is handed back. A cursor chain that loops is followed forever.
#[derive(Clone, Copy)]
pub struct PageWalker<'a> {
    fetcher: &'a dyn HttpFetcher,
    endpoints: &'a Endpoints,
}

impl<'a> PageWalker<'a> {
    pub fn new(fetcher: &'a dyn HttpFetcher, endpoints: &'a Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Lazy stream of pages starting at `start`, one fetch per poll
    pub fn pages<T>(&self, start: String) -> impl Stream<Item = Result<Vec<T>>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        let fetcher = self.fetcher;
        let endpoints = self.endpoints;

        stream::try_unfold(Some(start), move |cursor| async move {
            match cursor {
                Some(locator) => fetch_page::<T>(fetcher, endpoints, &locator)
                    .await
                    .map(Some),
                None => Ok(None),
            }
        })
    }

    /// Left-fold every page into an accumulator
    pub async fn fold<T, A, F>(&self, start: String, init: A, mut f: F) -> Result<A>
    where
        T: DeserializeOwned + 'a,
        F: FnMut(A, Vec<T>) -> A,
    {
        self.pages::<T>(start)
            .try_fold(init, |acc, items| {
                futures::future::ready(Ok::<A, RankError>(f(acc, items)))
            })
            .await
    }

    /// Materialize the whole collection in API order
    pub async fn collect_all<T>(&self, start: String) -> Result<Vec<T>>
    where
        T: DeserializeOwned + 'a,
    {
        self.fold(start, Vec::new(), |mut all, items| {
            all.extend(items);
            all
        })
        .await
    }
}

/// Fetch and decode one page, returning its items and the resolved next locator
async fn fetch_page<T: DeserializeOwned>(
    fetcher: &dyn HttpFetcher,
    endpoints: &Endpoints,
    locator: &str,
) -> Result<(Vec<T>, Option<String>)> {
    let body = fetcher.get_json(locator).await?;
    let page = PagedResult::<T>::from_value(body)
        .map_err(|e| RankError::unexpected_shape(locator, e.to_string()).with_source(e))?;
    debug!(
        "Fetched {} items from {} (last page: {})",
        page.items.len(),
        locator,
        page.is_last()
    );

    let next = page
        .next_cursor
        .as_deref()
        .map(|cursor| endpoints.resolve_cursor(locator, cursor))
        .transpose()?;

    Ok((page.items, next))
}
