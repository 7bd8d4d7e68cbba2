//! Filter chain: independent predicates over canonical jobs, combined with AND.
//!
//! Every filter is a pure function of the job, so evaluation order never
//! changes which jobs survive; it only decides which filter a rejection is
//! attributed to in the run statistics.

use std::collections::HashSet;

use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;

use crate::config::FilterConfig;
use crate::types::Job;

pub trait JobFilter: Send + Sync {
    /// Short name used in logs and rejection counts.
    fn name(&self) -> &'static str;

    fn admits(&self, job: &Job) -> bool;
}

/// Admits jobs posted within `max_age` of `now`. Unknown posting time is
/// never recent.
#[derive(Debug, Clone)]
pub struct Recency {
    max_age: TimeDelta,
    now: DateTime<Utc>,
}

impl Recency {
    pub fn new(max_age: TimeDelta, now: DateTime<Utc>) -> Self {
        Self { max_age, now }
    }

    pub fn hours(max_age_hours: u32, now: DateTime<Utc>) -> Self {
        Self::new(TimeDelta::hours(i64::from(max_age_hours)), now)
    }
}

impl JobFilter for Recency {
    fn name(&self) -> &'static str {
        "recency"
    }

    fn admits(&self, job: &Job) -> bool {
        match job.posted_at {
            Some(posted) => self.now.signed_duration_since(posted) <= self.max_age,
            None => false,
        }
    }
}

/// Admits jobs whose title or description contains any keyword.
///
/// Plain case-insensitive substring containment: "sre" also matches inside
/// "desre". An empty keyword set admits everything.
#[derive(Debug, Clone)]
pub struct KeywordMatch {
    keywords: Vec<String>,
}

impl KeywordMatch {
    pub fn new(keywords: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

impl JobFilter for KeywordMatch {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn admits(&self, job: &Job) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let text = job.searchable_text();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// Rejects jobs from excluded publishers (exact match).
#[derive(Debug, Clone, Default)]
pub struct PublisherExclusion {
    excluded: HashSet<String>,
}

impl PublisherExclusion {
    pub fn new(excluded: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }
}

impl JobFilter for PublisherExclusion {
    fn name(&self) -> &'static str {
        "publisher"
    }

    fn admits(&self, job: &Job) -> bool {
        !self.excluded.contains(&job.publisher)
    }
}

/// Jobs that passed, plus how many each filter turned away.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    pub kept: Vec<Job>,
    /// Keyed by the first filter (in chain order) that rejected the job.
    pub rejected: IndexMap<&'static str, usize>,
}

impl FilterOutcome {
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn JobFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter (builder pattern).
    pub fn with(mut self, filter: impl JobFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Standard chain: recency, keywords, publisher exclusion.
    pub fn from_config(config: &FilterConfig, now: DateTime<Utc>) -> Self {
        Self::new()
            .with(Recency::hours(config.max_age_hours, now))
            .with(KeywordMatch::new(&config.must_keywords))
            .with(PublisherExclusion::new(config.excluded_publishers.iter().cloned()))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn admits(&self, job: &Job) -> bool {
        self.filters.iter().all(|f| f.admits(job))
    }

    fn first_rejection(&self, job: &Job) -> Option<&'static str> {
        self.filters.iter().find(|f| !f.admits(job)).map(|f| f.name())
    }

    /// Keep admitted jobs in their original order.
    pub fn apply(&self, jobs: Vec<Job>) -> FilterOutcome {
        let mut outcome = FilterOutcome {
            kept: Vec::with_capacity(jobs.len()),
            rejected: self.names().into_iter().map(|n| (n, 0)).collect(),
        };

        for job in jobs {
            match self.first_rejection(&job) {
                None => outcome.kept.push(job),
                Some(name) => {
                    tracing::trace!(id = %job.id, filter = name, "Job rejected");
                    *outcome.rejected.entry(name).or_insert(0) += 1;
                }
            }
        }

        outcome
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .finish()
    }
}
