//! Normalize → dedup → filter → limit.
//!
//! Dedup runs on the unfiltered list, so the last record seen for an id is
//! the one that gets judged: a stale re-post hides the listing entirely.
//!
//! Pure and synchronous: given the same raw records and the same run clock,
//! the pipeline always yields the same jobs in the same order.

pub mod dedup;
pub mod filter;
pub mod normalize;
pub mod timestamps;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::config::DigestConfig;
use crate::types::{Job, RawRecord};

pub use dedup::{dedup_and_limit, dedup_last_wins, limit};
pub use filter::{FilterChain, FilterOutcome, JobFilter, KeywordMatch, PublisherExclusion, Recency};
pub use normalize::{normalize, normalize_all, NormalizeContext};

/// Counts describing one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub raw_records: usize,
    pub rejected: IndexMap<&'static str, usize>,
    pub duplicates: usize,
    pub truncated: usize,
    pub kept: usize,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub jobs: Vec<Job>,
    pub stats: RunStats,
}

#[derive(Debug)]
pub struct JobPipeline {
    ctx: NormalizeContext,
    chain: FilterChain,
    max_jobs: usize,
}

impl JobPipeline {
    pub fn new(ctx: NormalizeContext, chain: FilterChain, max_jobs: usize) -> Self {
        Self {
            ctx,
            chain,
            max_jobs,
        }
    }

    /// Pipeline for one run, with `now` fixed as the run clock.
    pub fn from_config(config: &DigestConfig, now: DateTime<Utc>) -> Self {
        Self::new(
            NormalizeContext::new(now),
            FilterChain::from_config(&config.filters, now),
            config.max_jobs,
        )
    }

    pub fn run(&self, records: &[RawRecord]) -> PipelineOutput {
        let jobs = normalize_all(records, &self.ctx);
        let normalized = jobs.len();

        let unique = dedup_last_wins(jobs);
        let duplicates = normalized - unique.len();

        let FilterOutcome { kept, rejected } = self.chain.apply(unique);
        let filtered = kept.len();

        let jobs = limit(kept, self.max_jobs);

        let stats = RunStats {
            raw_records: records.len(),
            rejected,
            duplicates,
            truncated: filtered - jobs.len(),
            kept: jobs.len(),
        };

        tracing::info!(
            raw = stats.raw_records,
            rejected = stats.rejected.values().sum::<usize>(),
            duplicates = stats.duplicates,
            truncated = stats.truncated,
            kept = stats.kept,
            "Pipeline complete"
        );

        PipelineOutput { jobs, stats }
    }
}
