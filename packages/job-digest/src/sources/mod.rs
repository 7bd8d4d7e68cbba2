//! Source adapters: everything that turns a search query into raw records.
//!
//! Each `(source, query)` fetch is independent and failure-isolated. Fetches
//! run concurrently but results are merged in declaration order (sources in
//! the order built, queries in the order configured), so last-wins dedup
//! downstream sees the same sequence on every run.

pub mod board;
pub mod jsearch;
pub mod mock;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::config::DigestConfig;
use crate::error::SourceResult;
use crate::types::{RawJob, RawRecord};

pub use board::BoardSource;
pub use jsearch::JSearchSource;
pub use mock::MockSource;

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Adapter name, recorded on every job it produces.
    fn name(&self) -> &str;

    /// Fetch raw listings for one query. Implementations must bound every
    /// network call with a timeout.
    async fn fetch(&self, query: &str, location: &str) -> SourceResult<Vec<RawJob>>;
}

/// Records gathered from every source, in merge order.
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<RawRecord>,
    pub attempted: usize,
    pub failed: usize,
}

/// Build every configured source. A source that cannot be built (missing
/// credential, bad selector) is logged and skipped; the rest still run.
pub fn build_sources(config: &DigestConfig) -> Vec<Box<dyn JobSource>> {
    let mut sources: Vec<Box<dyn JobSource>> = Vec::new();

    if config.fetch.jsearch_enabled {
        match JSearchSource::from_config(config) {
            Ok(source) => sources.push(Box::new(source)),
            Err(e) => tracing::warn!(source = JSearchSource::NAME, error = %e, "Source disabled"),
        }
    }

    for board in &config.boards {
        match BoardSource::from_config(board, config.request_timeout()) {
            Ok(source) => sources.push(Box::new(source)),
            Err(e) => tracing::warn!(source = %board.name, error = %e, "Source disabled"),
        }
    }

    tracing::info!(count = sources.len(), "Sources ready");
    sources
}

/// Run every query against every source with at most `concurrency` fetches
/// in flight.
pub async fn collect(
    sources: &[Box<dyn JobSource>],
    queries: &[String],
    location: &str,
    concurrency: usize,
) -> Collected {
    let tasks: Vec<(&dyn JobSource, &str)> = sources
        .iter()
        .flat_map(|source| {
            queries
                .iter()
                .filter(|q| !q.trim().is_empty())
                .map(move |q| (&**source, q.as_str()))
        })
        .collect();

    let attempted = tasks.len();

    // `buffered` yields in input order regardless of completion order.
    let results: Vec<_> = stream::iter(tasks)
        .map(|(source, query)| async move {
            tracing::info!(source = source.name(), query, "Searching");
            (source.name(), query, source.fetch(query, location).await)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut collected = Collected {
        attempted,
        ..Default::default()
    };

    for (name, query, result) in results {
        match result {
            Ok(jobs) => {
                tracing::debug!(source = name, query, count = jobs.len(), "Fetched");
                collected
                    .records
                    .extend(jobs.into_iter().map(|job| RawRecord::new(name, job)));
            }
            Err(e) => {
                tracing::warn!(source = name, query, error = %e, "Fetch failed, skipping");
                collected.failed += 1;
            }
        }
    }

    tracing::info!(
        records = collected.records.len(),
        attempted = collected.attempted,
        failed = collected.failed,
        "Collection complete"
    );

    collected
}
