//! Job digest: collect recent job listings from several sources, normalize
//! them into one shape, deduplicate, filter, and render a report.
//!
//! ```text
//! sources (JSearch, boards) -> normalize -> dedup -> filter chain -> limit -> render
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use job_digest::{config::DigestConfig, pipeline::JobPipeline, sources};
//!
//! let config = DigestConfig::preset("devops-24h")?;
//! let now = chrono::Utc::now();
//!
//! let sources = sources::build_sources(&config);
//! let collected = sources::collect(&sources, &config.search.queries, &config.search.location, 4).await;
//! let output = JobPipeline::from_config(&config, now).run(&collected.records);
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod sources;
pub mod types;

pub use config::DigestConfig;
pub use error::{ConfigError, ReportError, SourceError};
pub use pipeline::{JobPipeline, PipelineOutput, RunStats};
pub use render::{RenderOptions, ReportFormat};
pub use types::{Job, RawJob, RawRecord, ScrapedCard};
