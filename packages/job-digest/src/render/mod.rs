//! Report rendering.
//!
//! Every renderer takes the final job list and the same [`RenderOptions`],
//! never fails on an empty list, and produces identical bytes for identical
//! input. Nothing here reads the clock.

pub mod html;
pub mod json;
pub mod markdown;
pub mod outreach;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::config::DigestConfig;
use crate::error::ReportResult;
use crate::types::Job;

pub use outreach::{build_outreach, OutreachMessage};

/// Heading shown when nothing survived the pipeline.
pub fn no_jobs_message(max_age_hours: u32) -> String {
    format!("No matching jobs found in the last {} hours.", max_age_hours)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[value(alias = "txt")]
    Text,
    #[value(alias = "md")]
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

/// Everything a renderer needs besides the jobs themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_age_hours: u32,
    pub location: String,
    pub role_label: String,
    pub candidate_name: String,
    pub template: String,
    pub description_chars: usize,
}

impl RenderOptions {
    pub fn from_config(config: &DigestConfig) -> Self {
        Self {
            max_age_hours: config.filters.max_age_hours,
            location: config.search.location.clone(),
            role_label: config.outreach.role_label.clone(),
            candidate_name: config.outreach.candidate_name.clone(),
            template: config.outreach.template.clone(),
            description_chars: config.outreach.description_chars,
        }
    }

    /// `DevOps/SRE Job Digest (3 roles)`
    pub fn subject(&self, count: usize) -> String {
        format!("{} Job Digest ({} roles)", self.role_label, count)
    }

    pub fn intro(&self) -> String {
        format!(
            "Here are {} roles from multiple platforms (last {} hours):",
            self.role_label, self.max_age_hours
        )
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&DigestConfig::default())
    }
}

pub fn render(format: ReportFormat, jobs: &[Job], options: &RenderOptions) -> ReportResult<String> {
    match format {
        ReportFormat::Text => Ok(text::render(jobs, options)),
        ReportFormat::Markdown => Ok(markdown::render(jobs, options)),
        ReportFormat::Html => Ok(html::render(jobs, options)),
        ReportFormat::Json => json::render(jobs, options),
    }
}

/// `-` shown for a job without a posting time.
pub(crate) fn posted_label(job: &Job) -> String {
    job.posted_at
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}
